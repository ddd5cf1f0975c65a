//! Errores del motor de formularios.
//!
//! Tres familias, según quién puede recuperarse:
//! - `Validation`: faltan campos requeridos; sólo bloquea la llamada que la produjo.
//! - `Submission`: el sink falló o no respondió a tiempo; la sesión vuelve a ser editable.
//! - `IllegalTransition`: uso incorrecto del motor (navegar fuera de rango,
//!   enviar dos veces); nunca se muestra al usuario como error propio.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::ValidationReport;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IllegalTransition {
    #[error("already at the first step")] AtFirstStep,
    #[error("already at the last step")] AtLastStep,
    #[error("submission is only allowed from the last step")] NotOnLastStep,
    #[error("a submission is already in flight")] SubmissionInFlight,
    #[error("session already submitted")] AlreadySubmitted,
    #[error("no submission in flight")] NoSubmissionInFlight,
    #[error("session has not been submitted")] NotSubmitted,
    #[error("session closed")] SessionClosed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionError {
    #[error("{0}")] Sink(String),
    #[error("submission timed out after {0} ms")] Timeout(u64),
    /// El future de `submit` se descartó antes de recibir respuesta del sink.
    #[error("submission cancelled")] Cancelled,
}

#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardError {
    #[error("step {} is missing required fields: {}", .0.step_index, .0.missing.join(", "))]
    Validation(ValidationReport),
    #[error(transparent)] Submission(#[from] SubmissionError),
    #[error("illegal transition: {0}")] IllegalTransition(#[from] IllegalTransition),
    #[error("invalid wizard definition: {0}")] Definition(String),
    #[error("prefill rejected: {0}")] Prefill(String),
    #[error("unknown field: {0}")] UnknownField(String),
    #[error("internal: {0}")] Internal(String),
}

impl WizardError {
    /// Reporte de validación si el error es de validación.
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            WizardError::Validation(r) => Some(r),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(e: serde_json::Error) -> Self {
        WizardError::Internal(format!("serialization: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_missing_fields() {
        let err = WizardError::Validation(ValidationReport { step_index: 2,
                                                             valid: false,
                                                             missing: vec!["licenseType".into(), "licenseDuration".into()] });
        assert_eq!(err.to_string(), "step 2 is missing required fields: licenseType, licenseDuration");
    }

    #[test]
    fn sink_error_is_transparent() {
        let err: WizardError = SubmissionError::Sink("network error".into()).into();
        assert_eq!(err.to_string(), "network error");
        let err: WizardError = SubmissionError::Timeout(250).into();
        assert_eq!(err.to_string(), "submission timed out after 250 ms");
    }

    #[test]
    fn illegal_transition_format() {
        let err: WizardError = IllegalTransition::SubmissionInFlight.into();
        assert_eq!(err.to_string(), "illegal transition: a submission is already in flight");
    }
}
