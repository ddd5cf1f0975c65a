//! Validator: función pura (paso, campos) -> reporte de presencia.
//!
//! Sólo comprueba que los requeridos no estén vacíos. El formato (email,
//! números, códigos postales) es responsabilidad de los widgets de la UI.

use serde::{Deserialize, Serialize};

use super::{StepDefinition, WizardDefinition};
use crate::field::FieldStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub step_index: usize,
    pub valid: bool,
    /// Requeridos ausentes o vacíos, en orden de declaración.
    pub missing: Vec<String>,
}

/// Valida un paso contra el store.
pub fn check(step: &StepDefinition, fields: &FieldStore) -> ValidationReport {
    let missing: Vec<String> = step.required_fields
                                   .iter()
                                   .filter(|f| !fields.is_filled(f))
                                   .cloned()
                                   .collect();
    ValidationReport { step_index: step.index,
                       valid: missing.is_empty(),
                       missing }
}

/// Valida todos los pasos y devuelve el reporte del primero que falla; si
/// ninguno falla, un reporte válido del último paso.
pub fn check_all(definition: &WizardDefinition, fields: &FieldStore) -> ValidationReport {
    definition.steps()
              .iter()
              .map(|s| check(s, fields))
              .find(|r| !r.valid)
              .unwrap_or_else(|| ValidationReport { step_index: definition.last_index(),
                                                    valid: true,
                                                    missing: Vec::new() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;

    fn license_step() -> StepDefinition {
        StepDefinition::new(2, "License").require("licenseType")
                                         .require("licenseCategory")
                                         .require("licenseDuration")
                                         .optional("remarks")
    }

    #[test]
    fn reports_only_empty_required_fields() {
        let mut fields = FieldStore::seeded(license_step().fields());
        fields.set("licenseCategory", FieldValue::choice("Small Scale"));
        fields.set("licenseDuration", FieldValue::choice("1 Year"));
        let report = check(&license_step(), &fields);
        assert!(!report.valid);
        assert_eq!(report.step_index, 2);
        assert_eq!(report.missing, vec!["licenseType".to_string()]);
    }

    #[test]
    fn absent_key_counts_as_missing() {
        let report = check(&license_step(), &FieldStore::new());
        assert_eq!(report.missing.len(), 3);
    }

    #[test]
    fn optional_fields_never_gate() {
        let mut fields = FieldStore::new();
        for f in ["licenseType", "licenseCategory", "licenseDuration"] {
            fields.set(f, "x");
        }
        let report = check(&license_step(), &fields);
        assert!(report.valid);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn check_all_returns_first_failing_step() {
        let def = WizardDefinition::new("w",
                                        vec![StepDefinition::new(1, "a").require("a1"),
                                             StepDefinition::new(2, "b").require("b1"),
                                             StepDefinition::new(3, "c").require("c1")]).unwrap();
        let mut fields = FieldStore::seeded(def.field_names());
        fields.set("a1", "ok");
        let report = check_all(&def, &fields);
        assert_eq!(report.step_index, 2);
        assert_eq!(report.missing, vec!["b1".to_string()]);

        fields.set("b1", "ok");
        fields.set("c1", "ok");
        let report = check_all(&def, &fields);
        assert!(report.valid);
        assert_eq!(report.step_index, 3);
    }
}
