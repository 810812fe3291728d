//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EASYGADGET_API_URL` - Backend base URL (default: the hosted backend)
//! - `EASYGADGET_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `EASYGADGET_SESSION_FILE` - Path to the session file
//!   (default: `<config dir>/easy-gadget/session.json`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "https://easy-gadget-backend.onrender.com";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("No usable config directory for the session file; set EASYGADGET_SESSION_FILE")]
    NoConfigDir,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL.
    pub base_url: Url,
    /// Per-request timeout. One attempt per call, no retries.
    pub timeout: Duration,
    /// Path of the session file (bearer token + cached user).
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if no
    /// session file location can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("EASYGADGET_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("EASYGADGET_API_URL".to_string(), e.to_string())
            })?;

        let timeout_secs = match std::env::var("EASYGADGET_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("EASYGADGET_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let session_file = match std::env::var("EASYGADGET_SESSION_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_session_file()?,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            session_file,
        })
    }

    /// Build a configuration pointing at an explicit backend and session file.
    ///
    /// Mainly useful for tests driving a local backend.
    #[must_use]
    pub fn new(base_url: Url, session_file: PathBuf) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file,
        }
    }
}

/// Default session file location under the platform config directory.
fn default_session_file() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("easy-gadget").join("session.json"))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_timeout() {
        let config = ClientConfig::new(
            "http://127.0.0.1:3999".parse().unwrap(),
            PathBuf::from("/tmp/session.json"),
        );
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_default_api_url_parses() {
        assert!(DEFAULT_API_URL.parse::<Url>().is_ok());
    }
}
