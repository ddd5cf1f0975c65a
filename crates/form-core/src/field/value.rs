use serde::{Deserialize, Serialize};

/// Referencia a un documento adjunto. El motor nunca lee el contenido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub id: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl AttachmentRef {
    pub fn new(id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self { id: id.into(),
               file_name: file_name.into(),
               media_type: None }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// Valor de un campo de formulario.
///
/// La validación del core es sólo de presencia: un valor cuenta como vacío
/// si es texto/opción en blanco, un número NaN o una lista sin adjuntos.
/// En JSON el número vacío viaja como `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(#[serde(with = "nan_as_null")] f64),
    Choice(String),
    Attachments(Vec<AttachmentRef>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn choice(s: impl Into<String>) -> Self {
        FieldValue::Choice(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s.trim().is_empty(),
            FieldValue::Number(n) => n.is_nan(),
            FieldValue::Attachments(items) => items.is_empty(),
        }
    }

    /// Contenido textual para texto y opciones.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Mismo tipo de valor, vacío. Resetear un campo no cambia su "forma".
    pub fn cleared(&self) -> FieldValue {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::Choice(_) => FieldValue::Choice(String::new()),
            FieldValue::Number(_) => FieldValue::Number(f64::NAN),
            FieldValue::Attachments(_) => FieldValue::Attachments(Vec::new()),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Vec<AttachmentRef>> for FieldValue {
    fn from(items: Vec<AttachmentRef>) -> Self {
        FieldValue::Attachments(items)
    }
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if n.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(*n)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_is_presence_only() {
        assert!(FieldValue::text("").is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("not-an-email").is_empty());
        assert!(FieldValue::choice("").is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(FieldValue::Number(f64::NAN).is_empty());
        assert!(FieldValue::Attachments(vec![]).is_empty());
        assert!(!FieldValue::from(vec![AttachmentRef::new("d1", "pan.pdf")]).is_empty());
    }

    #[test]
    fn cleared_keeps_variant() {
        let v = FieldValue::choice("1 Year").cleared();
        assert_eq!(v, FieldValue::Choice(String::new()));
        assert!(FieldValue::Number(3.0).cleared().is_empty());
    }

    #[test]
    fn serde_shape_is_tagged() {
        let v = serde_json::to_value(FieldValue::choice("Small Scale")).unwrap();
        assert_eq!(v, serde_json::json!({"type": "choice", "value": "Small Scale"}));
        let back: FieldValue = serde_json::from_value(v).unwrap();
        assert_eq!(back, FieldValue::choice("Small Scale"));
    }

    #[test]
    fn empty_number_travels_as_null() {
        let v = serde_json::to_value(FieldValue::Number(7.5).cleared()).unwrap();
        assert_eq!(v, serde_json::json!({"type": "number", "value": null}));
        let back: FieldValue = serde_json::from_value(v).unwrap();
        assert!(matches!(back, FieldValue::Number(n) if n.is_nan()));
        assert!(back.is_empty());

        let back: FieldValue = serde_json::from_str(r#"{"type":"number","value":3}"#).unwrap();
        assert_eq!(back, FieldValue::Number(3.0));
    }
}
