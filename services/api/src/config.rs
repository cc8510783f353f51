//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub data_dir: PathBuf,
    pub log_level: Level,
    pub session_ttl_secs: u64,
    pub cors_origin: HeaderValue,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Storage Settings ---
        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        // --- Load Session and CORS Settings ---
        // Sessions default to a 30-day lifetime, matching the household's
        // "log in once per device" expectation.
        let session_ttl_str =
            std::env::var("SESSION_TTL_SECS").unwrap_or_else(|_| "2592000".to_string());
        let session_ttl_secs = session_ttl_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "SESSION_TTL_SECS".to_string(),
                format!("'{}' is not a valid number of seconds", session_ttl_str),
            )
        })?;
        if i64::try_from(session_ttl_secs).is_err() {
            return Err(ConfigError::InvalidValue(
                "SESSION_TTL_SECS".to_string(),
                format!("'{}' is too large for a session lifetime", session_ttl_str),
            ));
        }

        let cors_origin_str =
            std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let cors_origin = cors_origin_str.parse::<HeaderValue>().map_err(|_| {
            ConfigError::InvalidValue(
                "CORS_ORIGIN".to_string(),
                format!("'{}' is not a valid origin", cors_origin_str),
            )
        })?;

        Ok(Self {
            bind_address,
            data_dir,
            log_level,
            session_ttl_secs,
            cors_origin,
        })
    }
}
