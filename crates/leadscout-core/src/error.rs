//! Core error types for leadscout.
//!
//! `LeadscoutError` is the shared error for the data model and validation
//! paths; configuration loading has its own `ConfigError` so callers can
//! tell a missing file apart from a broken one.

use thiserror::Error;

/// Central error type for core operations.
#[derive(Error, Debug)]
pub enum LeadscoutError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid identifiers, rejected status transitions)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `LeadscoutError`.
pub type Result<T> = std::result::Result<T, LeadscoutError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LeadscoutError::Validation("bad source id".to_string());
        assert_eq!(err.to_string(), "validation error: bad source id");

        let err = ConfigError::InvalidValue {
            field: "search.max_concurrent".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for search.max_concurrent: must be at least 1"
        );
    }

    #[test]
    fn test_error_from_config() {
        let err: LeadscoutError = ConfigError::NoConfigDir.into();
        assert!(matches!(err, LeadscoutError::Config(_)));
    }
}
