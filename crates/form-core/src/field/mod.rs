//! Field Store: valores vivos de todos los campos de una sesión.

mod store;
mod value;

pub use store::FieldStore;
pub use value::{AttachmentRef, FieldValue};
