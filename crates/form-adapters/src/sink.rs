//! Sink de envíos en memoria.
//!
//! Deduplica por marcador de idempotencia: un reintento con el mismo
//! marcador que ya fue aceptado devuelve el recibo original sin crear un
//! registro nuevo. Permite simular latencia y fallos de red.

use async_trait::async_trait;
use dashmap::DashMap;
use form_core::{SinkError, SinkReceipt, SubmissionPayload, SubmissionSink};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug)]
pub struct InMemorySink {
    prefix: String,
    seq: AtomicU64,
    invocations: AtomicUsize,
    latency: Duration,
    /// Mensajes de fallo pendientes; cada invocación consume uno.
    failures: Mutex<Vec<String>>,
    by_marker: DashMap<Uuid, SinkReceipt>,
    records: DashMap<String, SubmissionPayload>,
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new("APP")
    }
}

impl InMemorySink {
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(),
               seq: AtomicU64::new(0),
               invocations: AtomicUsize::new(0),
               latency: Duration::ZERO,
               failures: Mutex::new(Vec::new()),
               by_marker: DashMap::new(),
               records: DashMap::new() }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Las próximas `times` invocaciones fallan con `message`.
    pub fn fail_next(&self, times: usize, message: &str) {
        let mut failures = self.failures.lock().unwrap_or_else(|p| p.into_inner());
        failures.extend(std::iter::repeat(message.to_string()).take(times));
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Envíos registrados (distintos marcadores aceptados).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<SubmissionPayload> {
        self.records.get(id).map(|r| r.value().clone())
    }

    fn take_failure(&self) -> Option<String> {
        let mut failures = self.failures.lock().unwrap_or_else(|p| p.into_inner());
        if failures.is_empty() {
            None
        } else {
            Some(failures.remove(0))
        }
    }
}

/// Número de seguimiento derivado del marcador: estable entre reintentos.
pub fn tracking_number(marker: Uuid) -> String {
    let digest = Sha256::digest(marker.as_bytes());
    let hex: String = digest.iter().take(5).map(|b| format!("{b:02X}")).collect();
    format!("TRK-{hex}")
}

#[async_trait]
impl SubmissionSink for InMemorySink {
    async fn create_submission(&self, payload: &SubmissionPayload) -> Result<SinkReceipt, SinkError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(message) = self.take_failure() {
            debug!(marker = %payload.idempotency_marker(), %message, "simulated sink failure");
            return Err(SinkError::new(message));
        }
        let marker = payload.idempotency_marker();
        if let Some(existing) = self.by_marker.get(&marker) {
            debug!(%marker, id = %existing.id, "duplicate submission, returning original receipt");
            return Ok(existing.value().clone());
        }
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let receipt = SinkReceipt { id: format!("{}-{n:04}", self.prefix),
                                    tracking_number: tracking_number(marker) };
        self.records.insert(receipt.id.clone(), payload.clone());
        self.by_marker.insert(marker, receipt.clone());
        info!(id = %receipt.id, wizard = payload.wizard(), attempt = payload.attempt(), "submission recorded");
        Ok(receipt)
    }
}
