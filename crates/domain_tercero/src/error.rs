//! Third-party domain errors
//!
//! This module defines the error taxonomy of the registry:
//!
//! - [`FormatError`]: a single raw value has the wrong shape (phone, mobile)
//! - [`NitError`]: structural failures of a tax identification number
//! - [`FieldError`]: one rule violation, tagged with the offending field
//! - [`ThirdPartyError`]: failures of the registration / update workflows

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::PortError;

/// A raw field value failed its shape rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    pub message: String,
}

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Structural failures of a NIT (tax identification number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NitError {
    #[error("NIT cannot be empty")]
    Empty,

    #[error("NIT must contain only digits before and after the separator")]
    NonNumeric,

    #[error("NIT may contain a single '-' between the main number and the check digit")]
    MalformedSeparator,

    #[error("NIT must include the main number and the check digit")]
    MissingCheckDigit,

    #[error("NIT main number must have between 8 and 14 digits")]
    MainPartLength,

    #[error("NIT must have between 9 and 15 digits including the check digit")]
    TotalLength,
}

/// A single validation failure tagged with the field it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by the third-party workflows
#[derive(Debug, Error)]
pub enum ThirdPartyError {
    /// No third party with the given code exists
    #[error("Third party not found: {0}")]
    NotFound(String),

    /// The record was rejected; carries every violation found
    #[error("Third party validation failed: {}", FieldErrors(.0))]
    Validation(Vec<FieldError>),

    /// A uniqueness constraint was violated at commit time
    #[error("Duplicate third party: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
    },

    /// The persistence layer failed
    #[error(transparent)]
    Port(PortError),
}

impl ThirdPartyError {
    /// Creates a NotFound error from any code type
    pub fn not_found(code: impl fmt::Display) -> Self {
        ThirdPartyError::NotFound(code.to_string())
    }

    /// Returns the field errors when this is a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ThirdPartyError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<PortError> for ThirdPartyError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { id, .. } => ThirdPartyError::NotFound(id),
            PortError::Conflict { message, field } => ThirdPartyError::Conflict { message, field },
            PortError::Validation {
                message,
                field: Some(field),
            } => ThirdPartyError::Validation(vec![FieldError::new(field, message)]),
            other => ThirdPartyError::Port(other),
        }
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}
