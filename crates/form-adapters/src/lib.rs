//! form-adapters: capa de adaptación Dominio ↔ Core
//!
//! Este crate provee:
//! - Las tablas de pasos de los wizards del portal (`definitions`).
//! - El mapeo de prefill desde un `Business` del catálogo (`prefill`).
//! - Colaboradores en memoria: catálogo de negocios/licencias y sink de envíos.
//!
//! El core sólo conoce campos, pasos y el trait `SubmissionSink`; aquí se
//! conectan esas piezas con las entidades de `form-domain`.

pub mod catalog;
pub mod definitions;
pub mod error;
pub mod prefill;
pub mod sink;

pub use catalog::{BusinessCatalog, InMemoryCatalog};
pub use error::AdapterError;
pub use prefill::{business_prefill_mapping, BusinessSource};
pub use sink::InMemorySink;
