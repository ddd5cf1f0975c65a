use thiserror::Error;

/// Errores del dominio de la aplicación
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entidad no encontrada: {0}")]
    NotFound(String),
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Error genérico de dominio: {0}")]
    Generic(String),
}

impl From<form_domain::DomainError> for DomainError {
    fn from(e: form_domain::DomainError) -> Self {
        match e {
            form_domain::DomainError::ValidationError(msg) => DomainError::Validation(msg),
            other => DomainError::Generic(other.to_string()),
        }
    }
}
