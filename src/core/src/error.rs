//! Unified error types shared by the alias crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for identifier handling
#[derive(Debug, Error)]
pub enum CoreError {
    /// Identifier is empty or made only of namespace separators
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),
}

impl CoreError {
    /// Create an invalid identifier error
    pub fn invalid_identifier<S: Into<String>>(msg: S) -> Self {
        CoreError::InvalidIdentifier(msg.into())
    }
}
