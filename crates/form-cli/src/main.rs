use std::sync::Arc;

use form_adapters::definitions::{definition_by_name, LICENSE_APPLICATION};
use form_adapters::{business_prefill_mapping, BusinessCatalog, BusinessSource, InMemoryCatalog, InMemorySink};
use form_core::{LocationPolicy, SubmissionCoordinator, WizardDefinition, WizardError, WizardSession};
use formflow_rust::{AppConfig, CoreError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod answers;

use answers::Answers;

const USAGE: &str = "Uso:\n  form-cli definition --kind <license_application|complaint>\n  form-cli submit --kind <KIND> \
                     --input <answers.json> [--strict] [--timeout-ms <N>] [--latency-ms <N>]";

#[derive(Debug, Default)]
struct Args {
    command:    Option<String>,
    kind:       Option<String>,
    input:      Option<String>,
    strict:     bool,
    /// Valores crudos: se validan junto con el entorno en `load_config`.
    timeout_ms: Option<String>,
    latency_ms: Option<String>,
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args { command: args.get(1).cloned(),
                            ..Args::default() };
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--kind" => { i += 1; if i < args.len() { parsed.kind = Some(args[i].clone()); } }
            "--input" => { i += 1; if i < args.len() { parsed.input = Some(args[i].clone()); } }
            "--timeout-ms" => { i += 1; if i < args.len() { parsed.timeout_ms = Some(args[i].clone()); } }
            "--latency-ms" => { i += 1; if i < args.len() { parsed.latency_ms = Some(args[i].clone()); } }
            "--strict" => parsed.strict = true,
            _ => {}
        }
        i += 1;
    }
    parsed
}

/// Configuración del proceso; los flags tienen prioridad sobre el entorno.
fn load_config<F>(args: &Args, env: F) -> Result<AppConfig, CoreError>
    where F: Fn(&str) -> Option<String>
{
    AppConfig::from_lookup(|key| match key {
        "FORMFLOW_SUBMIT_TIMEOUT_MS" => args.timeout_ms.clone().or_else(|| env(key)),
        "FORMFLOW_SINK_LATENCY_MS" => args.latency_ms.clone().or_else(|| env(key)),
        "FORMFLOW_STRICT_LOCATION" if args.strict => Some("true".to_string()),
        _ => env(key),
    })
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args);
    let code = match (args.command.as_deref(), args.kind.as_deref(), args.input.as_deref()) {
        (Some("definition"), Some(kind), _) => print_definition(kind),
        (Some("submit"), Some(kind), Some(input)) => match load_config(&args, |key| std::env::var(key).ok()) {
            Ok(cfg) => run_submit(kind, input, &cfg).await,
            Err(e) => { eprintln!("[form submit] {e}\n{USAGE}"); 2 }
        },
        _ => { eprintln!("{USAGE}"); 2 }
    };
    std::process::exit(code);
}

fn print_definition(kind: &str) -> i32 {
    let definition = match definition_by_name(kind) {
        Ok(d) => d,
        Err(e) => { eprintln!("[form definition] {e}"); return 4; }
    };
    match serde_json::to_string_pretty(&definition) {
        Ok(json) => { println!("{json}"); 0 }
        Err(e) => { eprintln!("[form definition] {e}"); 5 }
    }
}

async fn run_submit(kind: &str, input: &str, cfg: &AppConfig) -> i32 {
    let raw = match std::fs::read_to_string(input) {
        Ok(r) => r,
        Err(e) => { eprintln!("[form submit] no se pudo leer {input}: {e}"); return 3; }
    };
    let answers = match Answers::parse(&raw) {
        Ok(a) => a,
        Err(e) => { eprintln!("[form submit] {e}"); return 3; }
    };
    let definition = match definition_by_name(kind) {
        Ok(d) => Arc::new(d),
        Err(e) => { eprintln!("[form submit] {e}"); return 4; }
    };
    let sink = Arc::new(InMemorySink::default().with_latency(cfg.sink_latency()));
    submit_answers(definition, &answers, cfg, sink).await
}

async fn submit_answers(definition: Arc<WizardDefinition>,
                        answers: &Answers,
                        cfg: &AppConfig,
                        sink: Arc<InMemorySink>)
                        -> i32 {
    let coordinator = SubmissionCoordinator::with_config(sink, cfg.engine_config());
    let mut session = WizardSession::open(definition.clone());

    if definition.name() == LICENSE_APPLICATION {
        if let (Some(user), Some(entity)) = (answers.user.as_deref(), answers.entity.as_deref()) {
            if let Err(code) = prefill_from_catalog(&mut session, user, entity, cfg.location_policy()).await {
                return code;
            }
        }
    }

    for step in definition.steps() {
        for name in step.fields() {
            match answers.value(name) {
                Ok(Some(value)) => {
                    if let Err(e) = session.set_field(name, value) {
                        eprintln!("[form submit] {e}");
                        return 4;
                    }
                }
                Ok(None) => {}
                Err(e) => { eprintln!("[form submit] {e}"); return 3; }
            }
        }
        if step.index < definition.last_index() {
            if let Err(e) = session.advance() {
                return report_rejection(&e);
            }
        }
    }

    match coordinator.submit_session(&mut session).await {
        Ok(reference) => {
            let tracking = session.receipt().map(|r| r.tracking_number.clone()).unwrap_or_default();
            let out = serde_json::json!({ "reference_id": reference.as_str(),
                                          "tracking_number": tracking,
                                          "attempts": session.attempts(),
                                          "events": session.event_variants() });
            println!("{out}");
            if let Err(e) = session.acknowledge() {
                warn!(session = %session.id(), error = %e, "could not acknowledge submitted session");
            }
            0
        }
        Err(e @ WizardError::Submission(_)) => { eprintln!("[form submit] envío fallido: {e}"); 5 }
        Err(e) => report_rejection(&e),
    }
}

async fn prefill_from_catalog(session: &mut WizardSession,
                              user_id: &str,
                              entity: &str,
                              policy: LocationPolicy)
                              -> Result<(), i32> {
    let catalog = InMemoryCatalog::demo().map_err(|e| { eprintln!("[form submit] {e}"); 5 })?;
    let user = match catalog.find_user(user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => { eprintln!("[form submit] usuario {user_id} no registrado"); return Err(4); }
        Err(e) => { eprintln!("[form submit] {e}"); return Err(5); }
    };
    let business = match catalog.find_entity(&user, entity).await {
        Ok(Some(b)) => b,
        Ok(None) => { eprintln!("[form submit] negocio {entity} no disponible para {user_id}"); return Err(4); }
        Err(e) => { eprintln!("[form submit] {e}"); return Err(5); }
    };
    session.apply_prefill(&business_prefill_mapping(policy), &BusinessSource(&business))
           .map_err(|e| report_rejection(&e))
}

fn report_rejection(e: &WizardError) -> i32 {
    match e.validation_report() {
        Some(report) => match serde_json::to_string(report) {
            Ok(json) => eprintln!("[form submit] {e}\n{json}"),
            Err(_) => eprintln!("[form submit] {e}"),
        },
        None => eprintln!("[form submit] {e}"),
    }
    4
}
