//! Errores de aplicación: `CoreError` para fallos de proceso (configuración,
//! IO, motor) y `DomainError` para reglas de negocio del portal.

pub mod core_error;
pub mod domain_error;
