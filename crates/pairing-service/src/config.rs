//! Pairing service configuration.
//!
//! Configuration is loaded from environment variables. Sensitive fields
//! (the app certificate and the flush secret) are held as `SecretString`
//! so Debug output redacts them.

use crate::matchmaking::DEFAULT_CHANNEL_SPACE;
use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default channel token lifetime in seconds (2 hours).
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 7200;

/// Pairing service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Application identifier embedded in channel tokens.
    pub app_id: String,

    /// Signing secret for channel tokens.
    pub app_certificate: SecretString,

    /// Shared secret gating the administrative queue flush.
    pub flush_secret: SecretString,

    /// Size of the channel identifier space (default: 10^10).
    pub channel_space: u64,

    /// Default channel token lifetime in seconds (default: 7200).
    pub default_token_ttl_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let app_id = vars
            .get("APP_ID")
            .ok_or_else(|| ConfigError::MissingEnvVar("APP_ID".to_string()))?
            .clone();

        let app_certificate = vars
            .get("APP_CERTIFICATE")
            .map(|s| SecretString::from(s.as_str()))
            .ok_or_else(|| ConfigError::MissingEnvVar("APP_CERTIFICATE".to_string()))?;

        let flush_secret = vars
            .get("FLUSH_SECRET")
            .map(|s| SecretString::from(s.as_str()))
            .ok_or_else(|| ConfigError::MissingEnvVar("FLUSH_SECRET".to_string()))?;

        let channel_space = parse_u64(vars, "CHANNEL_SPACE", DEFAULT_CHANNEL_SPACE)?;
        if channel_space == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CHANNEL_SPACE".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let default_token_ttl_seconds =
            parse_u64(vars, "TOKEN_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?;

        Ok(Config {
            bind_address,
            app_id,
            app_certificate,
            flush_secret,
            channel_space,
            default_token_ttl_seconds,
        })
    }
}

fn parse_u64(
    vars: &HashMap<String, String>,
    var: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    match vars.get(var) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: format!("{e}"),
        }),
    }
}
