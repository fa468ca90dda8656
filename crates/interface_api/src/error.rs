//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use core_kernel::CodeParseError;
use domain_tercero::{FieldError, FormatError, ThirdPartyError};

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
    },

    /// Every rule violation of a rejected record
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_type, field, field_errors) = match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None, Vec::new()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None, Vec::new()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None, Vec::new()),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden", None, Vec::new()),
            ApiError::Conflict { field, .. } => (StatusCode::CONFLICT, "conflict", field, Vec::new()),
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", None, errors)
            }
            ApiError::Unavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable", None, Vec::new())
            }
            ApiError::Internal(_) => {
                error!(%message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, Vec::new())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            field,
            field_errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ThirdPartyError> for ApiError {
    fn from(err: ThirdPartyError) -> Self {
        match err {
            ThirdPartyError::NotFound(code) => ApiError::NotFound(format!("Third party {}", code)),
            ThirdPartyError::Validation(errors) => ApiError::Validation(errors),
            ThirdPartyError::Conflict { message, field } => ApiError::Conflict { message, field },
            ThirdPartyError::Port(port) if port.is_transient() => ApiError::Unavailable(port.to_string()),
            ThirdPartyError::Port(port) => ApiError::Internal(port.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingPermission(permission) => ApiError::Forbidden(permission),
            AuthError::InvalidToken | AuthError::TokenExpired => ApiError::Unauthorized,
        }
    }
}

impl From<CodeParseError> for ApiError {
    fn from(err: CodeParseError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Wraps a query-string parse failure with the parameter name
pub fn bad_parameter(name: &str, err: FormatError) -> ApiError {
    ApiError::BadRequest(format!("{}: {}", name, err))
}
