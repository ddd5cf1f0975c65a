#![allow(dead_code)]

use async_trait::async_trait;
use form_core::{FieldValue, PrefillSource, SinkError, SinkReceipt, StepDefinition, SubmissionPayload, SubmissionSink,
                WizardDefinition, WizardSession};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Tabla de cuatro pasos con la forma del wizard de licencias.
pub fn license_like() -> Arc<WizardDefinition> {
    let steps = vec![StepDefinition::new(1, "Business Details").require("businessId")
                                                                .optional("businessName")
                                                                .optional("city")
                                                                .optional("state")
                                                                .optional("pincode"),
                     StepDefinition::new(2, "License Details").require("licenseType")
                                                               .require("licenseCategory")
                                                               .require("licenseDuration"),
                     StepDefinition::new(3, "Documents").require("identityProof"),
                     StepDefinition::new(4, "Review").require("declaration")];
    Arc::new(WizardDefinition::new("license_application", steps).expect("valid definition"))
}

/// Sesión en el último paso con todo lo requerido completo.
pub fn session_at_last_step() -> WizardSession {
    let mut s = WizardSession::open(license_like());
    s.set_field("businessId", "B1").unwrap();
    s.advance().unwrap();
    s.set_field("licenseType", FieldValue::choice("Trade License")).unwrap();
    s.set_field("licenseCategory", FieldValue::choice("Small Scale")).unwrap();
    s.set_field("licenseDuration", FieldValue::choice("1 Year")).unwrap();
    s.advance().unwrap();
    s.set_field("identityProof",
                vec![form_core::AttachmentRef::new("doc-1", "aadhaar.pdf").with_media_type("application/pdf")])
     .unwrap();
    s.advance().unwrap();
    s.set_field("declaration", FieldValue::choice("accepted")).unwrap();
    s
}

/// Sink que responde según un guion; cuenta invocaciones.
pub struct ScriptedSink {
    pub calls: AtomicUsize,
    script: Mutex<Vec<Result<SinkReceipt, SinkError>>>,
    pub payloads: Mutex<Vec<SubmissionPayload>>,
}

impl ScriptedSink {
    pub fn new(script: Vec<Result<SinkReceipt, SinkError>>) -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0),
                        script: Mutex::new(script),
                        payloads: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn receipt(id: &str) -> SinkReceipt {
    SinkReceipt { id: id.to_string(),
                  tracking_number: format!("TRK-{id}") }
}

#[async_trait]
impl SubmissionSink for ScriptedSink {
    async fn create_submission(&self, payload: &SubmissionPayload) -> Result<SinkReceipt, SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            return Err(SinkError::new("script exhausted"));
        }
        script.remove(0)
    }
}

/// Sink que no responde hasta que se le notifica.
pub struct GatedSink {
    pub calls: AtomicUsize,
    pub gate: Notify,
}

impl GatedSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0),
                        gate: Notify::new() })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionSink for GatedSink {
    async fn create_submission(&self, _payload: &SubmissionPayload) -> Result<SinkReceipt, SinkError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.gate.notified().await;
        Ok(receipt(&format!("APP-{n}")))
    }
}

/// Entidad de catálogo mínima para prefill.
pub struct Business {
    pub id: &'static str,
    pub attrs: HashMap<&'static str, &'static str>,
}

impl PrefillSource for Business {
    fn entity_id(&self) -> &str {
        self.id
    }
    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs.get(name).map(|v| v.to_string())
    }
}
