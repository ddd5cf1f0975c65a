//! Sesión de wizard: Field Store + Stepper + estado de envío.

mod handle;
mod wizard;

pub use handle::SessionHandle;
pub use wizard::WizardSession;
