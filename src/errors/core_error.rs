use form_adapters::AdapterError;
use form_core::WizardError;
use thiserror::Error;

use super::domain_error::DomainError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Error del wizard: {0}")]
    Wizard(#[from] WizardError),
    #[error("Error de adaptador: {0}")]
    Adapter(#[from] AdapterError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_core::IllegalTransition;

    #[test]
    fn test_internal_variant_format() {
        let err = CoreError::Internal("algo malo".into());
        assert_eq!(err.to_string(), "Error interno: algo malo");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: CoreError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
    }

    #[test]
    fn test_config_variant_format() {
        let err = CoreError::Config("FORMFLOW_SUBMIT_TIMEOUT_MS inválido".into());
        assert_eq!(err.to_string(), "Error de configuración: FORMFLOW_SUBMIT_TIMEOUT_MS inválido");
    }

    #[test]
    fn test_domain_variant_is_transparent() {
        let err: CoreError = DomainError::NotFound("BUS-9".into()).into();
        assert_eq!(err.to_string(), "Entidad no encontrada: BUS-9");
    }

    #[test]
    fn test_wizard_variant_from() {
        let err: CoreError = WizardError::from(IllegalTransition::AtFirstStep).into();
        assert!(matches!(err, CoreError::Wizard(_)));
        assert!(err.to_string().starts_with("Error del wizard: illegal transition"));
    }
}
