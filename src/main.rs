//! Demo de punta a punta: un dueño de negocio completa la solicitud de
//! licencia contra el catálogo y el sink en memoria.
//!
//! `RUST_LOG=debug cargo run --bin main-core` muestra la traza del motor.

use std::sync::Arc;

use form_adapters::definitions::{fields, license_application_definition};
use form_adapters::{business_prefill_mapping, BusinessCatalog, BusinessSource, InMemoryCatalog, InMemorySink};
use form_core::{AttachmentRef, FieldValue, SessionHandle, SubmissionCoordinator, WizardError, WizardSession};
use formflow_rust::config::config;
use formflow_rust::{CoreError, DomainError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEMO_USER: &str = "U-100";

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                             .init();
    let cfg = config()?;

    let catalog = InMemoryCatalog::demo()?;
    let user = catalog.find_user(DEMO_USER)
                      .await?
                      .ok_or_else(|| DomainError::NotFound(format!("usuario {DEMO_USER}")))?;
    let businesses = catalog.list_available_entities(&user).await?;
    let business = businesses.first()
                             .ok_or_else(|| DomainError::NotFound(format!("negocios de {DEMO_USER}")))?;
    let license_types = catalog.list_license_types().await?;
    println!("Negocios de {} ({DEMO_USER}): {}", user.name, businesses.len());
    println!("Tipos de licencia: {}", license_types.iter().map(|l| l.name.as_str()).collect::<Vec<_>>().join(", "));

    let sink = Arc::new(InMemorySink::default().with_latency(cfg.sink_latency()));
    // Primer intento falla para mostrar la recuperación.
    sink.fail_next(1, "network error");
    let coordinator = SubmissionCoordinator::with_config(sink.clone(), cfg.engine_config());

    let definition = Arc::new(license_application_definition()?);
    let handle = SessionHandle::new(WizardSession::open(definition));
    {
        let mut session = handle.lock();
        session.apply_prefill(&business_prefill_mapping(cfg.location_policy()), &BusinessSource(business))?;
        println!("Prefill: {} / {}, {}",
                 session.fields().text(fields::BUSINESS_NAME).unwrap_or_default(),
                 session.fields().text(fields::CITY).unwrap_or_default(),
                 session.fields().text(fields::STATE).unwrap_or_default());
        session.advance()?;

        // Paso 2 incompleto: el avance queda bloqueado.
        session.set_field(fields::LICENSE_TYPE, FieldValue::choice(license_types[0].name.clone()))?;
        match session.advance() {
            Err(WizardError::Validation(report)) => println!("Bloqueado en paso {}: faltan {:?}", report.step_index, report.missing),
            other => warn!(?other, "se esperaba un bloqueo de validación"),
        }
        session.set_field(fields::LICENSE_CATEGORY, FieldValue::choice("Small Scale"))?;
        session.set_field(fields::LICENSE_DURATION, FieldValue::choice("1 Year"))?;
        session.advance()?;

        session.set_field(fields::IDENTITY_PROOF, vec![AttachmentRef::new("doc-1", "pan.pdf")])?;
        session.set_field(fields::ADDRESS_PROOF,
                          vec![AttachmentRef::new("doc-2", "bill.pdf").with_media_type("application/pdf")])?;
        session.advance()?;
        session.set_field(fields::DECLARATION, FieldValue::choice("accepted"))?;
    }

    if let Err(e) = coordinator.submit(&handle).await {
        warn!(error = %e, "primer envío fallido; reintentando");
    }
    let reference = coordinator.submit(&handle).await?;
    info!(reference = %reference, "solicitud registrada");

    let mut session = handle.lock();
    if let Some(receipt) = session.receipt() {
        println!("Solicitud {} (seguimiento {})", receipt.id, receipt.tracking_number);
    }
    println!("Intentos: {} / invocaciones del sink: {}", session.attempts(), sink.invocations());
    println!("Eventos: {}", session.event_variants().join(""));
    session.acknowledge()?;
    Ok(())
}
