//! Snapshot inmutable de una sesión en el momento del envío.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::WizardError;
use crate::field::FieldStore;
use crate::hashing::hash_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    session_id: Uuid,
    wizard: String,
    definition_hash: String,
    fields: FieldStore,
    selected_entity_id: Option<String>,
    idempotency_marker: Uuid,
    attempt: u32,
    content_hash: String,
    created_at: DateTime<Utc>,
}

impl SubmissionPayload {
    /// Construye el snapshot. `content_hash` cubre definición, campos y
    /// entidad seleccionada, no el intento ni la hora: dos reintentos con el
    /// mismo contenido comparten hash.
    pub fn snapshot(session_id: Uuid,
                    wizard: &str,
                    definition_hash: &str,
                    fields: &FieldStore,
                    selected_entity_id: Option<&str>,
                    idempotency_marker: Uuid,
                    attempt: u32)
                    -> Result<Self, WizardError> {
        let content_hash = hash_value(&json!({
                                          "definition_hash": definition_hash,
                                          "fields": serde_json::to_value(fields)?,
                                          "selected_entity_id": selected_entity_id,
                                      }));
        Ok(Self { session_id,
                  wizard: wizard.to_string(),
                  definition_hash: definition_hash.to_string(),
                  fields: fields.clone(),
                  selected_entity_id: selected_entity_id.map(str::to_string),
                  idempotency_marker,
                  attempt,
                  content_hash,
                  created_at: Utc::now() })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn wizard(&self) -> &str {
        &self.wizard
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn selected_entity_id(&self) -> Option<&str> {
        self.selected_entity_id.as_deref()
    }

    pub fn idempotency_marker(&self) -> Uuid {
        self.idempotency_marker
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
