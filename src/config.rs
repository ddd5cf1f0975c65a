//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! También traduce esos valores a la configuración del motor (`EngineConfig`)
//! y a la política de ubicación del prefill.
use std::env;
use std::time::Duration;

use form_core::constants::DEFAULT_SUBMIT_TIMEOUT_MS;
use form_core::{EngineConfig, LocationPolicy};
use once_cell::sync::Lazy;

use crate::errors::core_error::CoreError;

/// Estado usado cuando la ubicación del negocio no trae parte de estado.
pub const DEFAULT_STATE: &str = "Delhi";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Parámetros del motor de envío.
    pub submission: SubmissionConfig,
    /// Parámetros del prefill desde el catálogo.
    pub prefill: PrefillConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    /// Tiempo máximo de espera al sink (FORMFLOW_SUBMIT_TIMEOUT_MS).
    pub timeout_ms: u64,
    /// Latencia simulada del sink en memoria (FORMFLOW_SINK_LATENCY_MS).
    pub sink_latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefillConfig {
    /// FORMFLOW_DEFAULT_STATE
    pub default_state: String,
    /// FORMFLOW_STRICT_LOCATION
    pub strict_location: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { submission: SubmissionConfig { timeout_ms:      DEFAULT_SUBMIT_TIMEOUT_MS,
                                              sink_latency_ms: 0, },
               prefill:    PrefillConfig { default_state:   DEFAULT_STATE.to_string(),
                                           strict_location: false, }, }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno del proceso.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables; las ausentes toman el valor por defecto.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let timeout_ms = parse_u64(&lookup, "FORMFLOW_SUBMIT_TIMEOUT_MS")?.unwrap_or(defaults.submission.timeout_ms);
        if timeout_ms == 0 {
            return Err(CoreError::Config("FORMFLOW_SUBMIT_TIMEOUT_MS debe ser mayor que 0".into()));
        }
        let sink_latency_ms = parse_u64(&lookup, "FORMFLOW_SINK_LATENCY_MS")?.unwrap_or(0);
        let default_state = match lookup("FORMFLOW_DEFAULT_STATE") {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => defaults.prefill.default_state,
        };
        let strict_location = parse_bool(&lookup, "FORMFLOW_STRICT_LOCATION")?.unwrap_or(false);
        Ok(Self { submission: SubmissionConfig { timeout_ms,
                                                 sink_latency_ms },
                  prefill:    PrefillConfig { default_state,
                                              strict_location } })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default().with_submit_timeout(Duration::from_millis(self.submission.timeout_ms))
    }

    pub fn location_policy(&self) -> LocationPolicy {
        if self.prefill.strict_location {
            LocationPolicy::Strict
        } else {
            LocationPolicy::FallbackState(self.prefill.default_state.clone())
        }
    }

    pub fn sink_latency(&self) -> Duration {
        Duration::from_millis(self.submission.sink_latency_ms)
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>, CoreError>
    where F: Fn(&str) -> Option<String>
{
    match lookup(key) {
        None => Ok(None),
        Some(v) => v.trim()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|e| CoreError::Config(format!("{key}={v}: {e}"))),
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> Result<Option<bool>, CoreError>
    where F: Fn(&str) -> Option<String>
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" | "" => Ok(Some(false)),
            _ => Err(CoreError::Config(format!("{key}={v}: se esperaba un booleano"))),
        },
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
/// Un valor inválido queda guardado como mensaje y se reporta en `config()`.
pub static CONFIG: Lazy<Result<AppConfig, String>> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    AppConfig::from_env().map_err(|e| e.to_string())
});

/// Acceso a la configuración global.
pub fn config() -> Result<&'static AppConfig, CoreError> {
    CONFIG.as_ref().map_err(|msg| CoreError::Config(msg.clone()))
}
