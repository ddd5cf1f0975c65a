use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SubmissionPayload;

/// Respuesta del sink a un envío aceptado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkReceipt {
    pub id: String,
    pub tracking_number: String,
}

/// Fallo del sink con un mensaje legible por humanos.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Servicio externo que registra un envío terminado. Es la única llamada
/// "de red" que hace el motor; la deduplicación real, si existe, es suya.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn create_submission(&self, payload: &SubmissionPayload) -> Result<SinkReceipt, SinkError>;
}
