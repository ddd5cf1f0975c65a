use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Tipo de licencia ofrecido por el catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseType {
    pub id: String,
    pub name: String,
}

impl LicenseType {
    pub fn new(id: &str, name: &str) -> Result<Self, DomainError> {
        if id.trim().is_empty() || name.trim().is_empty() {
            return Err(DomainError::ValidationError(format!("license type '{id}' needs id and name")));
        }
        Ok(Self { id: id.trim().to_string(),
                  name: name.trim().to_string() })
    }
}
