//! Prefill Resolver: copia atributos de una entidad externa seleccionada
//! (p. ej. un negocio registrado) a campos del formulario.
//!
//! Aplicar un prefill sobrescribe siempre los campos destino, descartando
//! ediciones previas del usuario en esos campos. Quitar la selección los
//! deja vacíos.

mod location;
mod mapping;

pub use location::{split_location, LocationPolicy};
pub use mapping::{PrefillMapping, PrefillRule};

/// Entidad externa que puede alimentar un prefill.
pub trait PrefillSource {
    fn entity_id(&self) -> &str;
    /// Valor textual de un atributo; `None` si la entidad no lo tiene.
    fn attribute(&self, name: &str) -> Option<String>;
}
