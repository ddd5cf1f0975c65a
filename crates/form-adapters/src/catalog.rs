//! Catálogo de negocios y tipos de licencia (sólo lectura para el core).

use async_trait::async_trait;
use form_domain::{Business, LicenseType, User, UserRole};
use std::collections::HashMap;

use crate::AdapterError;

#[async_trait]
pub trait BusinessCatalog: Send + Sync {
    /// Usuario registrado en el portal.
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AdapterError>;

    /// Negocios que el usuario puede seleccionar en el paso 1.
    async fn list_available_entities(&self, user: &User) -> Result<Vec<Business>, AdapterError>;

    async fn list_license_types(&self) -> Result<Vec<LicenseType>, AdapterError>;

    /// Busca un negocio del usuario por id.
    async fn find_entity(&self, user: &User, entity_id: &str) -> Result<Option<Business>, AdapterError> {
        let all = self.list_available_entities(user).await?;
        Ok(all.into_iter().find(|b| b.id() == entity_id))
    }
}

/// Catálogo en memoria indexado por dueño.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    users: HashMap<String, User>,
    businesses: HashMap<String, Vec<Business>>,
    license_types: Vec<LicenseType>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn add_business(&mut self, business: Business) {
        self.businesses
            .entry(business.owner_id().to_string())
            .or_default()
            .push(business);
    }

    pub fn add_license_type(&mut self, license_type: LicenseType) {
        self.license_types.push(license_type);
    }

    /// Datos de demostración del portal.
    pub fn demo() -> Result<Self, AdapterError> {
        let mut catalog = Self::new();
        catalog.add_user(User::new("U-100", "Ravi Sharma", UserRole::BusinessOwner)?);
        catalog.add_user(User::new("U-200", "Meera Iyer", UserRole::BusinessOwner)?);
        catalog.add_user(User::new("U-300", "Asha Verma", UserRole::Citizen)?);
        catalog.add_business(Business::new("BUS-001", "U-100", "Sharma Sweets & Caterers")?.with_address("12 Chandni Chowk")
                                                                                        .with_location("Delhi, Delhi")
                                                                                        .with_postal_code("110006")
                                                                                        .with_business_type("Food & Beverage"));
        catalog.add_business(Business::new("BUS-002", "U-100", "Sharma Electronics")?.with_address("Plot 4, Nehru Place")
                                                                                   .with_location("New Delhi, Delhi")
                                                                                   .with_postal_code("110019")
                                                                                   .with_business_type("Retail"));
        catalog.add_business(Business::new("BUS-003", "U-200", "Coastal Textiles")?.with_address("Linking Road")
                                                                                 .with_location("Mumbai")
                                                                                 .with_postal_code("400050")
                                                                                 .with_business_type("Manufacturing"));
        for (id, name) in [("LT-TRADE", "Trade License"),
                           ("LT-FSSAI", "Food Safety License"),
                           ("LT-HEALTH", "Health Trade License"),
                           ("LT-SHOP", "Shop & Establishment License"),
                           ("LT-FIRE", "Fire Safety NOC")]
        {
            catalog.add_license_type(LicenseType::new(id, name)?);
        }
        Ok(catalog)
    }
}

#[async_trait]
impl BusinessCatalog for InMemoryCatalog {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AdapterError> {
        Ok(self.users.get(user_id).cloned())
    }

    async fn list_available_entities(&self, user: &User) -> Result<Vec<Business>, AdapterError> {
        if !user.owns_businesses() {
            return Ok(Vec::new());
        }
        Ok(self.businesses.get(&user.id).cloned().unwrap_or_default())
    }

    async fn list_license_types(&self) -> Result<Vec<LicenseType>, AdapterError> {
        Ok(self.license_types.clone())
    }
}
