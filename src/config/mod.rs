//! Configuration management
//!
//! Layered sources, highest priority last: `config/default.*`,
//! an `ENV`-specific file, `config/local.*`, then `JIJI__` environment
//! variables with `__` section separators. The conventional
//! `SUPABASE_URL` / `SUPABASE_ANON_KEY` variables override the
//! collaborator section when present.

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI). Should be
    /// false in hardened production.
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any (development only).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_docs: true,
            request_timeout_seconds: 30,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// External collaborator (auth + records + storage) connection details.
///
/// Both fields absent or empty means the service starts anyway and
/// answers every pipeline request with the misconfiguration outcome
/// instead of crashing at boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    /// Per-request timeout for collaborator calls (seconds).
    pub request_timeout_seconds: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            request_timeout_seconds: 10,
        }
    }
}

impl SupabaseConfig {
    /// Credentials pair when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.url.as_deref(), self.anon_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Some((url, key)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests admitted per client per window.
    pub max_requests: u32,
    /// Window length in seconds, measured from each client's first
    /// request (sliding, not aligned to clock boundaries).
    pub window_seconds: u64,
    /// Interval between background sweeps of stale client windows.
    pub sweep_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 30,
            window_seconds: 60,
            sweep_interval_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and the environment.
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("JIJI").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        // Conventional Supabase variables take precedence when set.
        if let Ok(url) = std::env::var("SUPABASE_URL") {
            config.supabase.url = Some(url);
        }
        if let Ok(key) = std::env::var("SUPABASE_ANON_KEY") {
            config.supabase.anon_key = Some(key);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot run with. Collaborator
    /// credentials are deliberately not required here.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::new("server.port must be non-zero"));
        }
        if self.rate_limit.enabled && self.rate_limit.max_requests == 0 {
            return Err(ConfigValidationError::new(
                "rate_limit.max_requests must be positive when rate limiting is enabled",
            ));
        }
        if self.rate_limit.enabled && self.rate_limit.window_seconds == 0 {
            return Err(ConfigValidationError::new(
                "rate_limit.window_seconds must be positive when rate limiting is enabled",
            ));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigValidationError::new(
                "server.request_timeout_seconds must be positive",
            ));
        }
        Ok(())
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ConfigValidationError),
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ConfigValidationError {
    message: String,
}

impl ConfigValidationError {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_limit.max_requests, 30);
        assert_eq!(config.rate_limit.window_seconds, 60);
        assert!(config.supabase.credentials().is_none());
    }

    #[test]
    fn credentials_require_both_fields_non_empty() {
        let mut supabase = SupabaseConfig::default();
        supabase.url = Some("https://project.supabase.co".into());
        assert!(supabase.credentials().is_none());

        supabase.anon_key = Some(String::new());
        assert!(supabase.credentials().is_none());

        supabase.anon_key = Some("anon".into());
        assert_eq!(
            supabase.credentials(),
            Some(("https://project.supabase.co", "anon"))
        );
    }

    #[test]
    fn zero_ceiling_rejected_only_when_enabled() {
        let mut config = Config::default();
        config.rate_limit.max_requests = 0;
        assert!(config.validate().is_err());

        config.rate_limit.enabled = false;
        assert!(config.validate().is_ok());
    }
}
