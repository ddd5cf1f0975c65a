use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FieldValue;

/// Mapa nombre-de-campo -> valor actual.
///
/// Pertenece en exclusiva a una sesión. Sólo lo mutan las ediciones del
/// usuario y el Prefill Resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldStore {
    values: IndexMap<String, FieldValue>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea un store con una entrada vacía por cada nombre dado.
    pub fn seeded<'a, I>(names: I) -> Self
        where I: IntoIterator<Item = &'a str>
    {
        let values = names.into_iter()
                          .map(|n| (n.to_string(), FieldValue::default()))
                          .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Texto de un campo (texto u opción).
    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(FieldValue::as_str)
    }

    /// Fija un valor y devuelve el anterior, si lo había.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Vacía un campo conservando su entrada. Devuelve `false` si no existía.
    pub fn clear(&mut self, name: &str) -> bool {
        match self.values.get_mut(name) {
            Some(v) => {
                *v = v.cleared();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// `true` si el campo existe y no está vacío.
    pub fn is_filled(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
