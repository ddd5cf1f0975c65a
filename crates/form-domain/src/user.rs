use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Citizen,
    BusinessOwner,
    Department,
}

/// Usuario autenticado que abre un wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn new(id: &str, name: &str, role: UserRole) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::ValidationError("user id is empty".into()));
        }
        Ok(Self { id: id.trim().to_string(),
                  name: name.trim().to_string(),
                  role })
    }

    /// Sólo los dueños de negocio tienen registros que prellenar.
    pub fn owns_businesses(&self) -> bool {
        matches!(self.role, UserRole::BusinessOwner)
    }
}
