use std::path::PathBuf;
use std::str::FromStr;

use devreg_core::validation::payload::{
    PayloadShape, DEFAULT_DISCRIMINATOR_FIELD, DEFAULT_PROPERTIES_FIELD,
};

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be a valid {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Settings for the payload validation middleware.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Path of the rule catalog file read at startup.
    pub rules_path: PathBuf,
    /// Only POST/PUT requests at or below this path are inspected.
    pub protected_prefix: String,
    /// Payload field names the rule engine reads.
    pub shape: PayloadShape,
    /// Largest request body the middleware will buffer.
    pub max_body_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from("validation_rules.json"),
            protected_prefix: "/api/devices".to_string(),
            shape: PayloadShape::default(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub validation: ValidationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `3000`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `VALIDATION_RULES_PATH` | `validation_rules.json`  |
    /// | `PROTECTED_PATH_PREFIX` | `/api/devices`           |
    /// | `DISCRIMINATOR_FIELD`   | `deviceTypeName`         |
    /// | `PROPERTIES_FIELD`      | `additionalProperties`   |
    /// | `MAX_BODY_BYTES`        | `1048576`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading values through
    /// `lookup`, so tests need not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse(&lookup, "PORT", "3000", "u16")?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse(&lookup, "REQUEST_TIMEOUT_SECS", "30", "u64")?;

        let validation = ValidationConfig {
            rules_path: PathBuf::from(var("VALIDATION_RULES_PATH", "validation_rules.json")),
            protected_prefix: var("PROTECTED_PATH_PREFIX", "/api/devices"),
            shape: PayloadShape {
                discriminator_field: var("DISCRIMINATOR_FIELD", DEFAULT_DISCRIMINATOR_FIELD),
                properties_field: var("PROPERTIES_FIELD", DEFAULT_PROPERTIES_FIELD),
            },
            max_body_bytes: parse(&lookup, "MAX_BODY_BYTES", "1048576", "usize")?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            validation,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|_| ConfigError {
        var,
        expected,
        value,
    })
}
