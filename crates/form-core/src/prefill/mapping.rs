use serde::{Deserialize, Serialize};

use super::{split_location, LocationPolicy, PrefillSource};
use crate::errors::WizardError;
use crate::field::FieldValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefillRule {
    /// Copia un atributo tal cual. Si la entidad no lo tiene, el destino queda vacío.
    Copy { attribute: String, target: String },
    /// Parte un atributo "ciudad, estado" en dos campos.
    SplitLocation {
        attribute: String,
        city_target: String,
        state_target: String,
        policy: LocationPolicy,
    },
}

impl PrefillRule {
    pub fn targets(&self) -> Vec<&str> {
        match self {
            PrefillRule::Copy { target, .. } => vec![target.as_str()],
            PrefillRule::SplitLocation { city_target, state_target, .. } => {
                vec![city_target.as_str(), state_target.as_str()]
            }
        }
    }
}

/// Qué atributos de la entidad alimentan qué campos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillMapping {
    rules: Vec<PrefillRule>,
}

impl PrefillMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(mut self, attribute: impl Into<String>, target: impl Into<String>) -> Self {
        self.rules.push(PrefillRule::Copy { attribute: attribute.into(),
                                            target: target.into() });
        self
    }

    pub fn split_location(mut self,
                          attribute: impl Into<String>,
                          city_target: impl Into<String>,
                          state_target: impl Into<String>,
                          policy: LocationPolicy)
                          -> Self {
        self.rules.push(PrefillRule::SplitLocation { attribute: attribute.into(),
                                                     city_target: city_target.into(),
                                                     state_target: state_target.into(),
                                                     policy });
        self
    }

    pub fn rules(&self) -> &[PrefillRule] {
        &self.rules
    }

    /// Campos destino en orden de regla.
    pub fn targets(&self) -> Vec<&str> {
        self.rules.iter().flat_map(PrefillRule::targets).collect()
    }

    /// Resuelve todas las reglas contra la entidad sin escribir nada. Si una
    /// regla falla, no se devuelve ningún valor.
    pub fn resolve<S>(&self, source: &S) -> Result<Vec<(String, FieldValue)>, WizardError>
        where S: PrefillSource + ?Sized
    {
        let mut out = Vec::with_capacity(self.rules.len() + 1);
        for rule in &self.rules {
            match rule {
                PrefillRule::Copy { attribute, target } => {
                    let value = source.attribute(attribute).unwrap_or_default();
                    out.push((target.clone(), FieldValue::Text(value)));
                }
                PrefillRule::SplitLocation { attribute,
                                             city_target,
                                             state_target,
                                             policy, } => {
                    let raw = source.attribute(attribute).unwrap_or_default();
                    let (city, state) = split_location(&raw, policy)?;
                    out.push((city_target.clone(), FieldValue::Text(city)));
                    out.push((state_target.clone(), FieldValue::Text(state)));
                }
            }
        }
        Ok(out)
    }
}
