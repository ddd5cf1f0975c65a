//! Tablas de pasos de los wizards del portal.
//!
//! Los nombres de campo son el contrato con la UI; se exponen como
//! constantes para que prefill, UI y tests no repitan literales.

use form_core::{StepDefinition, WizardDefinition, WizardError};

pub mod fields {
    pub const BUSINESS_ID: &str = "businessId";
    pub const BUSINESS_NAME: &str = "businessName";
    pub const ADDRESS: &str = "address";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const PINCODE: &str = "pincode";
    pub const BUSINESS_TYPE: &str = "businessType";

    pub const LICENSE_TYPE: &str = "licenseType";
    pub const LICENSE_CATEGORY: &str = "licenseCategory";
    pub const LICENSE_DURATION: &str = "licenseDuration";
    pub const REMARKS: &str = "remarks";

    pub const IDENTITY_PROOF: &str = "identityProof";
    pub const ADDRESS_PROOF: &str = "addressProof";
    pub const OTHER_DOCUMENTS: &str = "otherDocuments";

    pub const DECLARATION: &str = "declaration";

    pub const COMPLAINT_CATEGORY: &str = "complaintCategory";
    pub const COMPLAINT_SUBJECT: &str = "subject";
    pub const COMPLAINT_DESCRIPTION: &str = "description";
    pub const INCIDENT_LOCATION: &str = "incidentLocation";
    pub const EVIDENCE: &str = "evidence";
    pub const CONTACT_NAME: &str = "contactName";
    pub const CONTACT_PHONE: &str = "contactPhone";
    pub const CONTACT_EMAIL: &str = "contactEmail";
}

pub const LICENSE_APPLICATION: &str = "license_application";
pub const COMPLAINT: &str = "complaint";

/// Solicitud de licencia: negocio, detalles de licencia, documentos, revisión.
pub fn license_application_definition() -> Result<WizardDefinition, WizardError> {
    use fields::*;
    let steps = vec![StepDefinition::new(1, "Business Details").require(BUSINESS_ID)
                                                                .optional(BUSINESS_NAME)
                                                                .optional(ADDRESS)
                                                                .optional(CITY)
                                                                .optional(STATE)
                                                                .optional(PINCODE)
                                                                .optional(BUSINESS_TYPE),
                     StepDefinition::new(2, "License Details").require(LICENSE_TYPE)
                                                               .require(LICENSE_CATEGORY)
                                                               .require(LICENSE_DURATION)
                                                               .optional(REMARKS),
                     StepDefinition::new(3, "Documents").require(IDENTITY_PROOF)
                                                         .require(ADDRESS_PROOF)
                                                         .optional(OTHER_DOCUMENTS),
                     StepDefinition::new(4, "Review & Declaration").require(DECLARATION)];
    WizardDefinition::new(LICENSE_APPLICATION, steps)
}

/// Queja ciudadana: detalles, evidencia, contacto y confirmación.
pub fn complaint_definition() -> Result<WizardDefinition, WizardError> {
    use fields::*;
    let steps = vec![StepDefinition::new(1, "Complaint Details").require(COMPLAINT_CATEGORY)
                                                                 .require(COMPLAINT_SUBJECT)
                                                                 .require(COMPLAINT_DESCRIPTION)
                                                                 .optional(INCIDENT_LOCATION),
                     StepDefinition::new(2, "Evidence").optional(EVIDENCE),
                     StepDefinition::new(3, "Contact & Confirmation").require(CONTACT_NAME)
                                                                      .require(CONTACT_PHONE)
                                                                      .optional(CONTACT_EMAIL)
                                                                      .require(DECLARATION)];
    WizardDefinition::new(COMPLAINT, steps)
}

/// Definición por nombre, para la CLI.
pub fn definition_by_name(name: &str) -> Result<WizardDefinition, WizardError> {
    match name {
        LICENSE_APPLICATION | "license" => license_application_definition(),
        COMPLAINT => complaint_definition(),
        other => Err(WizardError::Definition(format!("unknown wizard '{other}'"))),
    }
}
