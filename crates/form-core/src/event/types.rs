//! Tipos de evento de una sesión de wizard.
//!
//! Cada operación que cambia el estado de la sesión deja un evento en un
//! `EventStore` append-only. Los eventos nunca llevan valores de campos,
//! sólo sus nombres: el contenido del formulario sólo viaja en el payload.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// Primer evento de toda sesión.
    SessionOpened { wizard: String, definition_hash: String, step_count: usize },
    FieldUpdated { field: String },
    /// `advance()` rechazado por validación. No cambia el paso actual.
    AdvanceBlocked { step_index: usize, missing: Vec<String> },
    StepAdvanced { from: usize, to: usize },
    StepRetreated { from: usize, to: usize },
    PrefillApplied { entity_id: String, fields: Vec<String> },
    PrefillCleared { fields: Vec<String> },
    SubmissionStarted { attempt: u32, idempotency_marker: Uuid, content_hash: String },
    SubmissionSucceeded { attempt: u32, reference_id: String, tracking_number: String },
    SubmissionFailed { attempt: u32, error: String },
    SessionClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub seq: u64,
    pub session_id: Uuid,
    pub kind: SessionEventKind,
    pub ts: DateTime<Utc>,
}
