// form-domain library entry point
pub mod business;
pub mod error;
pub mod license;
pub mod user;
pub use business::Business;
pub use error::DomainError;
pub use license::LicenseType;
pub use user::{User, UserRole};
