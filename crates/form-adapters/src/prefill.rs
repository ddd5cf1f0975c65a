//! Prefill desde un `Business` del catálogo.

use form_core::{LocationPolicy, PrefillMapping, PrefillSource};
use form_domain::Business;

use crate::definitions::fields;

/// Vista de un `Business` como fuente de prefill.
#[derive(Debug, Clone, Copy)]
pub struct BusinessSource<'a>(pub &'a Business);

impl PrefillSource for BusinessSource<'_> {
    fn entity_id(&self) -> &str {
        self.0.id()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let value = match name {
            "displayName" => self.0.display_name(),
            "address" => self.0.address(),
            "location" => self.0.location(),
            "postalCode" => self.0.postal_code(),
            "businessType" => self.0.business_type(),
            "id" => self.0.id(),
            _ => return None,
        };
        Some(value.to_string())
    }
}

/// Bloque de datos del negocio del paso 1 del wizard de licencias.
pub fn business_prefill_mapping(policy: LocationPolicy) -> PrefillMapping {
    PrefillMapping::new().copy("id", fields::BUSINESS_ID)
                         .copy("displayName", fields::BUSINESS_NAME)
                         .copy("address", fields::ADDRESS)
                         .split_location("location", fields::CITY, fields::STATE, policy)
                         .copy("postalCode", fields::PINCODE)
                         .copy("businessType", fields::BUSINESS_TYPE)
}
