use std::time::Duration;

/// Environment variable holding the gateway endpoint.
pub const API_BASE_ENV_VAR: &str = "CONTACTS_API_BASE";

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Reads [`API_BASE_ENV_VAR`], falling back to the loopback default when
    /// it is unset or blank.
    pub fn from_env() -> Self {
        let value = std::env::var(API_BASE_ENV_VAR).ok();
        Self::with_base_url(resolve_base_url(value.as_deref()))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

fn resolve_base_url(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_API_BASE.to_string(),
    }
}
