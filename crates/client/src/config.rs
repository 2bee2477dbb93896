//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FONELLI_API_URL` - Base URL of the order intake backend
//!
//! ## Optional
//! - `FONELLI_SESSION_FILE` - Path of the persisted session record
//!   (default: `<platform data dir>/fonelli/session.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend.
    pub base_url: Url,
    /// Path of the persisted session record.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `FONELLI_API_URL` is missing or not a valid
    /// URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_url("FONELLI_API_URL", &get_required_env("FONELLI_API_URL")?)?;
        let session_file =
            std::env::var("FONELLI_SESSION_FILE").map_or_else(|_| default_session_file(), PathBuf::from);

        Ok(Self {
            base_url,
            session_file,
        })
    }

    /// Build a configuration directly, for tests and embedding shells.
    ///
    /// The session file defaults to the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("FONELLI_API_URL", base_url)?,
            session_file: default_session_file(),
        })
    }

    /// Base URL rendered without a trailing slash, ready for path joining.
    #[must_use]
    pub(crate) fn endpoint_base(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

fn parse_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fonelli")
        .join("session.json")
}
