//! Separación de un string "ciudad, estado".
//!
//! El comportamiento heredado parte en la primera coma y, si no hay segunda
//! parte, usa un estado por defecto. Es frágil con direcciones sin coma o
//! internacionales, por eso la política es explícita: `FallbackState`
//! reproduce lo heredado y `Strict` rechaza lo que no tenga la forma esperada.

use serde::{Deserialize, Serialize};

use crate::errors::WizardError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationPolicy {
    /// Estado a usar cuando el string no trae segunda parte.
    FallbackState(String),
    /// Exige exactamente "ciudad, estado" con ambas partes no vacías.
    Strict,
}

impl Default for LocationPolicy {
    fn default() -> Self {
        LocationPolicy::FallbackState("Delhi".to_string())
    }
}

/// Devuelve `(ciudad, estado)` según la política.
///
/// Con `FallbackState`, una ubicación en blanco deja ambos campos vacíos: el
/// estado por defecto sólo acompaña a una ciudad.
pub fn split_location(raw: &str, policy: &LocationPolicy) -> Result<(String, String), WizardError> {
    if raw.trim().is_empty() {
        return match policy {
            LocationPolicy::FallbackState(_) => Ok((String::new(), String::new())),
            LocationPolicy::Strict => Err(WizardError::Prefill("missing location, expected 'city, state'".into())),
        };
    }
    let mut parts = raw.split(',').map(str::trim);
    let city = parts.next().unwrap_or_default().to_string();
    let state = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    match policy {
        LocationPolicy::FallbackState(default_state) => {
            Ok((city, state.unwrap_or_else(|| default_state.clone())))
        }
        LocationPolicy::Strict => {
            let extra = parts.next().is_some();
            match state {
                Some(state) if !city.is_empty() && !extra => Ok((city, state)),
                _ => Err(WizardError::Prefill(format!("malformed location '{raw}', expected 'city, state'"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_splits_and_trims() {
        let policy = LocationPolicy::default();
        assert_eq!(split_location("Delhi, Delhi", &policy).unwrap(), ("Delhi".into(), "Delhi".into()));
        assert_eq!(split_location(" Pune ,Maharashtra ", &policy).unwrap(),
                   ("Pune".into(), "Maharashtra".into()));
    }

    #[test]
    fn fallback_uses_default_state_without_comma() {
        let policy = LocationPolicy::default();
        assert_eq!(split_location("Mumbai", &policy).unwrap(), ("Mumbai".into(), "Delhi".into()));
        assert_eq!(split_location("Mumbai,", &policy).unwrap(), ("Mumbai".into(), "Delhi".into()));
        let custom = LocationPolicy::FallbackState("Karnataka".into());
        assert_eq!(split_location("Mysuru", &custom).unwrap().1, "Karnataka");
    }

    #[test]
    fn blank_location_gets_no_fallback_state() {
        let policy = LocationPolicy::default();
        assert_eq!(split_location("", &policy).unwrap(), (String::new(), String::new()));
        assert_eq!(split_location("   ", &policy).unwrap(), (String::new(), String::new()));
        assert!(split_location("", &LocationPolicy::Strict).is_err());
    }

    #[test]
    fn fallback_ignores_extra_parts() {
        let policy = LocationPolicy::default();
        assert_eq!(split_location("Noida, Uttar Pradesh, India", &policy).unwrap(),
                   ("Noida".into(), "Uttar Pradesh".into()));
    }

    #[test]
    fn strict_rejects_malformed() {
        let policy = LocationPolicy::Strict;
        assert!(split_location("Mumbai", &policy).is_err());
        assert!(split_location(", Delhi", &policy).is_err());
        assert!(split_location("Noida, Uttar Pradesh, India", &policy).is_err());
        assert_eq!(split_location("Delhi, Delhi", &policy).unwrap(), ("Delhi".into(), "Delhi".into()));
    }
}
