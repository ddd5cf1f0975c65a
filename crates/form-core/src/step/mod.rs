//! Tabla de pasos y validador de presencia.

mod definition;
mod validator;

pub use definition::{StepDefinition, WizardDefinition};
pub use validator::{check, check_all, ValidationReport};
