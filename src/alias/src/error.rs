//! Error types for the alias resolver
//!
//! Resolution never fails with an error: an alias either resolves or it does
//! not. These errors come from setup, loading configuration, opening a durable
//! cache, or compiling a pattern the regex engine rejects.

use thiserror::Error;

/// Alias resolver errors
#[derive(Debug, Error)]
pub enum AliasError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pattern could not be compiled
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Raw wildcard pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Cache backend error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Identifier error from the core crate
    #[error(transparent)]
    Core(#[from] alias_core::CoreError),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for alias resolver operations
pub type Result<T> = std::result::Result<T, AliasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AliasError::Configuration("unknown cache backend 'redis'".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown cache backend 'redis'"
        );

        let err = AliasError::InvalidPattern {
            pattern: "Foo\\*".to_string(),
            reason: "too big".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid pattern 'Foo\\*': too big");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: AliasError = alias_core::CoreError::invalid_identifier("").into();
        assert!(matches!(err, AliasError::Core(_)));
    }
}
