//! Constantes del motor de formularios por pasos.
//!
//! `ENGINE_VERSION` entra en el hash de definición, así que un cambio
//! incompatible del motor produce hashes distintos aunque la tabla de pasos
//! no cambie.

/// Versión lógica del motor.
pub const ENGINE_VERSION: &str = "W1.0";

/// Timeout por defecto para la llamada al sink de envío (milisegundos).
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 15_000;
