//! FormFlow Rust Library
//!
//! Este crate actúa como la librería de aplicación de FormFlow:
//! - Expone `errors` para manejar errores de núcleo y dominio.
//! - Expone `config` con la configuración cargada del entorno (.env).
//!
//! El motor de wizards vive en `form-core`; aquí sólo se conecta con el
//! entorno del proceso. Puede usarse desde `main.rs` o por otros clientes.

pub mod config;
pub mod errors;

pub use config::{AppConfig, CONFIG};
pub use errors::{core_error::CoreError, domain_error::DomainError};
