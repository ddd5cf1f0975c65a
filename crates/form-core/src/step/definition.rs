//! Definición inmutable de un wizard: una secuencia ordenada de pasos.
//!
//! Invariantes que `WizardDefinition::new` garantiza:
//! - al menos un paso;
//! - índices 1..=N contiguos y en orden;
//! - cada campo pertenece a un único paso (requerido u opcional) y su nombre no está en blanco.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

use crate::errors::WizardError;
use crate::hashing::hash_value;

/// Un paso del formulario: los campos que posee y cuáles bloquean el avance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Posición 1-based dentro del wizard.
    pub index: usize,
    /// Nombre para la UI; el core no lo interpreta.
    pub label: String,
    pub required_fields: IndexSet<String>,
    pub optional_fields: IndexSet<String>,
}

impl StepDefinition {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self { index,
               label: label.into(),
               required_fields: IndexSet::new(),
               optional_fields: IndexSet::new() }
    }

    pub fn require(mut self, field: impl Into<String>) -> Self {
        self.required_fields.insert(field.into());
        self
    }

    pub fn optional(mut self, field: impl Into<String>) -> Self {
        self.optional_fields.insert(field.into());
        self
    }

    /// Campos del paso: primero requeridos, luego opcionales.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.required_fields
            .iter()
            .chain(self.optional_fields.iter())
            .map(String::as_str)
    }

    pub fn owns(&self, field: &str) -> bool {
        self.required_fields.contains(field) || self.optional_fields.contains(field)
    }
}

/// Definición completa de un wizard con su hash canónico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardDefinition {
    name: String,
    steps: Vec<StepDefinition>,
    definition_hash: String,
}

impl WizardDefinition {
    pub fn new(name: impl Into<String>, steps: Vec<StepDefinition>) -> Result<Self, WizardError> {
        let name = name.into();
        if steps.is_empty() {
            return Err(WizardError::Definition(format!("wizard '{name}' has no steps")));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for (pos, step) in steps.iter().enumerate() {
            if step.index != pos + 1 {
                return Err(WizardError::Definition(format!("step at position {} declares index {}",
                                                           pos + 1,
                                                           step.index)));
            }
            // `seen` también cubre un campo requerido y opcional en el mismo paso.
            for field in step.fields() {
                if field.trim().is_empty() {
                    return Err(WizardError::Definition(format!("step {} declares a blank field name", step.index)));
                }
                if !seen.insert(field) {
                    return Err(WizardError::Definition(format!("field '{field}' declared more than once")));
                }
            }
        }
        let definition_hash = hash_value(&json!({
                                             "engine_version": crate::constants::ENGINE_VERSION,
                                             "name": name,
                                             "steps": steps.iter().map(|s| json!({
                                                 "index": s.index,
                                                 "required": s.required_fields,
                                                 "optional": s.optional_fields,
                                             })).collect::<Vec<_>>()
                                         }));
        Ok(Self { name,
                  steps,
                  definition_hash })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Paso por índice 1-based.
    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        index.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len()
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    /// Todos los campos declarados, en orden de paso.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().flat_map(StepDefinition::fields)
    }

    pub fn declares(&self, field: &str) -> bool {
        self.steps.iter().any(|s| s.owns(field))
    }
}
