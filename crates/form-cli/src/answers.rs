//! Archivo de respuestas de la CLI.
//!
//! Formato:
//! ```json
//! { "user": "U-100", "entity": "BUS-001", "fields": { "licenseType": "Trade License" } }
//! ```
//! Strings pasan a texto, números a número, arrays a adjuntos; un objeto se
//! interpreta como `FieldValue` etiquetado (`{"type": "choice", "value": ".."}`).

use form_core::{AttachmentRef, FieldValue};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
pub struct Answers {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Answers {
    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("answers JSON parse error: {e}"))
    }

    /// Respuesta para `name`, si el archivo la trae.
    pub fn value(&self, name: &str) -> Result<Option<FieldValue>, String> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => to_field_value(v).map(Some).map_err(|e| format!("field '{name}': {e}")),
        }
    }
}

fn to_field_value(v: &Value) -> Result<FieldValue, String> {
    match v {
        Value::String(s) => Ok(FieldValue::text(s.clone())),
        Value::Number(n) => n.as_f64().map(FieldValue::Number).ok_or_else(|| "number out of range".to_string()),
        Value::Bool(b) => Ok(FieldValue::choice(b.to_string())),
        Value::Array(_) => serde_json::from_value::<Vec<AttachmentRef>>(v.clone()).map(FieldValue::from)
                                                                                .map_err(|e| e.to_string()),
        Value::Object(_) => serde_json::from_value::<FieldValue>(v.clone()).map_err(|e| e.to_string()),
        Value::Null => Ok(FieldValue::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_maps_to_field_values() {
        let answers = Answers::parse(r#"{
            "fields": {
                "subject": "Noise",
                "floors": 4,
                "declaration": true,
                "evidence": [{"id": "d1", "file_name": "photo.jpg"}],
                "licenseType": {"type": "choice", "value": "Trade License"},
                "remarks": null
            }
        }"#).unwrap();
        assert_eq!(answers.value("subject").unwrap(), Some(FieldValue::text("Noise")));
        assert_eq!(answers.value("floors").unwrap(), Some(FieldValue::Number(4.0)));
        assert_eq!(answers.value("declaration").unwrap(), Some(FieldValue::choice("true")));
        assert_eq!(answers.value("evidence").unwrap(),
                   Some(FieldValue::from(vec![AttachmentRef::new("d1", "photo.jpg")])));
        assert_eq!(answers.value("licenseType").unwrap(), Some(FieldValue::choice("Trade License")));
        assert_eq!(answers.value("remarks").unwrap(), None);
        assert_eq!(answers.value("absent").unwrap(), None);
        assert!(answers.user.is_none());
    }

    #[test]
    fn malformed_attachment_is_reported_with_field_name() {
        let answers = Answers::parse(r#"{"fields": {"evidence": [1, 2]}}"#).unwrap();
        let err = answers.value("evidence").unwrap_err();
        assert!(err.starts_with("field 'evidence'"));
        assert!(Answers::parse("not json").is_err());
    }
}
