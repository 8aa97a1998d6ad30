//! Engine configuration loaded from environment variables.

use crate::errors::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the companion backend (e.g. https://api.example.com)
    pub api_base_url: String,
    /// Per-request timeout in seconds; hung requests become failures
    pub request_timeout_secs: u64,
    /// Path to the device-local SQLite key/value store
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            api_base_url: env_var("API_BASE_URL").map_err(|_| {
                EngineError::Config("API_BASE_URL environment variable is required".to_string())
            })?,
            request_timeout_secs: env_var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .map_err(|_| EngineError::Config("Invalid REQUEST_TIMEOUT_SECS".to_string()))?,
            database_url: env_var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./companion_local.db".to_string()),
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| EngineError::Config(format!("Missing env var: {key}")))
}
