//! Registro de negocio tal como lo entrega el catálogo.
//!
//! Sólo se valida la forma (identificador y nombre presentes); la
//! elegibilidad legal de un negocio no es asunto de este crate.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    id: String,
    owner_id: String,
    display_name: String,
    #[serde(default)]
    address: String,
    /// "ciudad, estado" en el formato heredado del catálogo.
    #[serde(default)]
    location: String,
    #[serde(default)]
    postal_code: String,
    #[serde(default)]
    business_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    registered_on: Option<NaiveDate>,
}

impl Business {
    pub fn new(id: &str, owner_id: &str, display_name: &str) -> Result<Self, DomainError> {
        let b = Self { id: id.trim().to_string(),
                       owner_id: owner_id.trim().to_string(),
                       display_name: display_name.trim().to_string(),
                       address: String::new(),
                       location: String::new(),
                       postal_code: String::new(),
                       business_type: String::new(),
                       registered_on: None };
        b.validate()?;
        Ok(b)
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = address.trim().to_string();
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn with_postal_code(mut self, postal_code: &str) -> Self {
        self.postal_code = postal_code.trim().to_string();
        self
    }

    pub fn with_business_type(mut self, business_type: &str) -> Self {
        self.business_type = business_type.trim().to_string();
        self
    }

    pub fn with_registered_on(mut self, date: NaiveDate) -> Self {
        self.registered_on = Some(date);
        self
    }

    /// Deserializa y valida un registro recibido del catálogo.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let b: Business = serde_json::from_str(raw)?;
        b.validate()?;
        Ok(b)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::ValidationError("business id is empty".into()));
        }
        if self.owner_id.trim().is_empty() {
            return Err(DomainError::ValidationError(format!("business {} has no owner", self.id)));
        }
        if self.display_name.trim().is_empty() {
            return Err(DomainError::ValidationError(format!("business {} has no display name", self.id)));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
    pub fn address(&self) -> &str {
        &self.address
    }
    pub fn location(&self) -> &str {
        &self.location
    }
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
    pub fn business_type(&self) -> &str {
        &self.business_type
    }
    pub fn registered_on(&self) -> Option<NaiveDate> {
        self.registered_on
    }
}
