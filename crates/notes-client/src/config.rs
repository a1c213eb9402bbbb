//! Client configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/dev";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the notes API; endpoint paths are appended to it.
    pub base_url: String,
    /// Timeout applied to each request, connection included.
    pub timeout: Duration,
    /// Where the bearer token is persisted. `None` means the default location.
    pub token_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_file: None,
            log_level: "warn".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `NOTES_API_URL`: API base URL (default: "http://localhost:3000/dev")
    /// - `NOTES_TIMEOUT_SECS`: Request timeout (default: 30)
    /// - `NOTES_TOKEN_FILE`: Credential file (default: `<config dir>/notes/token`)
    /// - `NOTES_LOG_LEVEL`: Logging level (default: "warn")
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = env::var("NOTES_API_URL").unwrap_or(defaults.base_url);

        let timeout = match env::var("NOTES_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name: "NOTES_TIMEOUT_SECS".to_string(),
                    reason: format!("expected a whole number of seconds, got {:?}", raw),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.timeout,
        };

        let token_file = env::var_os("NOTES_TOKEN_FILE").map(PathBuf::from);

        let log_level = env::var("NOTES_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            base_url,
            timeout,
            token_file,
            log_level,
        })
    }

    /// Resolve the credential file path.
    pub fn token_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.token_file {
            return Ok(path.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("notes").join("token"))
            .ok_or(ConfigError::NoTokenLocation)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable or option value.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// No token file was given and the platform has no config directory.
    #[error("no credential location: set NOTES_TOKEN_FILE")]
    NoTokenLocation,
}
