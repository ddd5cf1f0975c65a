use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador devuelto por el sink para un envío aceptado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReferenceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Estado de envío de una sesión.
///
/// Transiciones válidas:
/// - `Editing` -> `Submitting`
/// - `Failed` -> `Submitting` | `Editing`
/// - `Submitting` -> `Submitted` | `Failed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionState {
    Editing,
    Submitting,
    Submitted(ReferenceId),
    Failed(String),
}

impl SubmissionState {
    /// Edición, navegación y nuevos envíos permitidos.
    pub fn is_editable(&self) -> bool {
        matches!(self, SubmissionState::Editing | SubmissionState::Failed(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn reference_id(&self) -> Option<&ReferenceId> {
        match self {
            SubmissionState::Submitted(id) => Some(id),
            _ => None,
        }
    }
}
