//! Configuration for the backend client and the workbench as a whole.

use std::time::Duration;
use symbology::StyleCacheConfig;

/// Configuration of the HTTP workflow backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the backend API, without trailing slash
    pub base_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3030/api".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl BackendConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("WORKBENCH_BACKEND_URL") {
            config.base_url = val.trim_end_matches('/').to_string();
        }

        if let Ok(val) = std::env::var("WORKBENCH_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            ));
        }
        if self.request_timeout.is_zero() {
            return Err("request_timeout must be > 0".to_string());
        }
        Ok(())
    }
}

/// Complete workbench configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbenchConfig {
    pub backend: BackendConfig,
    pub style_cache: StyleCacheConfig,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            style_cache: StyleCacheConfig::default(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl WorkbenchConfig {
    /// Load configuration from environment variables, reading a `.env`
    /// file first if one exists.
    pub fn from_env() -> Self {
        // missing .env is fine
        let _ = dotenvy::dotenv();

        let mut config = Self {
            backend: BackendConfig::from_env(),
            style_cache: StyleCacheConfig::from_env(),
            ..Self::default()
        };

        if let Ok(val) = std::env::var("WORKBENCH_LOG_LEVEL") {
            config.log_level = val;
        }

        if let Ok(val) = std::env::var("WORKBENCH_LOG_JSON") {
            config.log_json = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.backend.validate()?;
        self.style_cache
            .validate()
            .map_err(|e| format!("style_cache: {}", e))?;
        if self.log_level.trim().is_empty() {
            return Err("log_level must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(WorkbenchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_backend() {
        let config = BackendConfig {
            base_url: "ftp://example.org".to_string(),
            ..BackendConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BackendConfig {
            request_timeout: Duration::ZERO,
            ..BackendConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_cache_capacity_surfaces() {
        let config = WorkbenchConfig {
            style_cache: StyleCacheConfig { capacity: 0 },
            ..WorkbenchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("style_cache"));
    }
}
