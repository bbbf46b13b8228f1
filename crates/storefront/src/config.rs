//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MAESTRO_DATA_DIR` - Directory for durable store files (default: `data`)
//! - `MAESTRO_ADMIN_CODE` - Code that unlocks the administration screen
//!   (default: the built-in demo code)
//! - `MAESTRO_PAYMENT_DELAY_MS` - Simulated payment gateway delay
//!   (default: 2500)
//! - `MAESTRO_WATERMARK_DELAY_MS` - Simulated watermarking delay per
//!   document (default: 2000)
//! - `MAESTRO_ASSISTANT_API_KEY` - API key for the recommendation
//!   collaborator; the assistant degrades to a fixed fallback reply when
//!   unset
//! - `MAESTRO_ASSISTANT_MODEL` - Model ID for the recommendation
//!   collaborator

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Code that unlocks the administration screen when no override is set.
const DEFAULT_ADMIN_CODE: &str = "102030";

/// Default simulated payment gateway delay.
const DEFAULT_PAYMENT_DELAY_MS: u64 = 2500;

/// Default simulated watermarking delay per document.
const DEFAULT_WATERMARK_DELAY_MS: u64 = 2000;

/// Default model for the recommendation collaborator.
const DEFAULT_ASSISTANT_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Clone)]
pub struct StoreConfig {
    /// Directory holding the wholesale store files.
    pub data_dir: PathBuf,
    /// Code that unlocks the administration screen.
    pub admin_code: SecretString,
    /// Simulated payment gateway delay.
    pub payment_delay: Duration,
    /// Simulated watermarking delay per document.
    pub watermark_delay: Duration,
    /// Recommendation collaborator configuration, if a key is present.
    pub assistant: Option<AssistantConfig>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("data_dir", &self.data_dir)
            .field("admin_code", &"[REDACTED]")
            .field("payment_delay", &self.payment_delay)
            .field("watermark_delay", &self.watermark_delay)
            .field("assistant", &self.assistant)
            .finish()
    }
}

/// Recommendation collaborator configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AssistantConfig {
    /// API key for the Messages API.
    pub api_key: SecretString,
    /// Model ID (e.g., claude-sonnet-4-20250514).
    pub model: String,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a delay variable is present but not a
    /// valid integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("MAESTRO_DATA_DIR", "data"));
        let admin_code =
            SecretString::from(get_env_or_default("MAESTRO_ADMIN_CODE", DEFAULT_ADMIN_CODE));
        let payment_delay = get_delay_ms("MAESTRO_PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS)?;
        let watermark_delay =
            get_delay_ms("MAESTRO_WATERMARK_DELAY_MS", DEFAULT_WATERMARK_DELAY_MS)?;
        let assistant = AssistantConfig::from_env();

        Ok(Self {
            data_dir,
            admin_code,
            payment_delay,
            watermark_delay,
            assistant,
        })
    }
}

impl AssistantConfig {
    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("MAESTRO_ASSISTANT_API_KEY")?;
        Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("MAESTRO_ASSISTANT_MODEL", DEFAULT_ASSISTANT_MODEL),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a millisecond duration from an environment variable.
fn get_delay_ms(key: &str, default_ms: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}
