use form_core::WizardError;
use form_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("catalog: {0}")]
    Catalog(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}
