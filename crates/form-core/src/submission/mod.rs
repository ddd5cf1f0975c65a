//! Envío de una sesión completa a un sink externo.

mod coordinator;
mod payload;
mod sink;
mod state;

pub use coordinator::{EngineConfig, SubmissionCoordinator};
pub use payload::SubmissionPayload;
pub use sink::{SinkError, SinkReceipt, SubmissionSink};
pub use state::{ReferenceId, SubmissionState};
