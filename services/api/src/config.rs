//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
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
    pub database_url: String,
    pub log_level: Level,
    /// Base URL that share links are built against.
    pub share_base_url: String,
    /// Simulated analysis latency applied before an entry is created.
    pub processing_delay_ms: u64,
    /// Base latency of one mocked email send (actual delay is 1-3x this).
    pub email_delay_ms: u64,
    /// Probability that a mocked email send fails.
    pub email_failure_rate: f64,
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

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Sharing and Simulation Settings ---
        let share_base_url = std::env::var("SHARE_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let processing_delay_ms = parse_millis("PROCESSING_DELAY_MS", 1500)?;
        let email_delay_ms = parse_millis("EMAIL_DELAY_MS", 1000)?;

        let email_failure_rate = match std::env::var("EMAIL_FAILURE_RATE") {
            Err(_) => 0.05,
            Ok(raw) => raw.parse::<f64>().map_err(|e| {
                ConfigError::InvalidValue("EMAIL_FAILURE_RATE".to_string(), e.to_string())
            })?,
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            share_base_url,
            processing_delay_ms,
            email_delay_ms,
            email_failure_rate,
        })
    }
}

fn parse_millis(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
    }
}
