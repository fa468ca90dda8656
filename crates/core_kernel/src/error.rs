//! Core error types used across the workspace

use thiserror::Error;

use crate::identifiers::CodeParseError;

/// Errors that are not tied to a single entity or adapter
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid code: {0}")]
    Code(#[from] CodeParseError),

    /// A setting is missing or out of range
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
