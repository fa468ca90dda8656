//! Port contracts shared by the domain and its adapters
//!
//! The registry follows a ports-and-adapters layout: `domain_tercero`
//! declares `ThirdPartyPort`, while `infra_db` (PostgreSQL) and the in-memory
//! mock implement it. This module holds what every port needs regardless of
//! the entity it stores:
//!
//! - [`PortError`], the single error type adapters may return
//! - [`DomainPort`] and [`HealthCheckable`], the supertraits of every port
//! - [`OperationMetadata`], who asked for an operation and under which
//!   correlation id

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The store refused a value (check constraint or similar)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// A uniqueness rule was violated; `field` names the duplicated column
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
    },

    /// The store could not be reached
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// A stored value has no domain representation
    #[error("Transformation error: {message}")]
    Transformation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a Conflict error naming the duplicated field
    pub fn conflict_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
        }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// True when the store was unreachable; the request may succeed later
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker supertrait of every port; ports are shared across tasks
pub trait DomainPort: Send + Sync + 'static {}

/// Health status reported by an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Outcome of a single health probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    pub fn is_operational(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Adapters that can probe their backing store
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Who initiated a port operation, for audit logs
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    pub correlation_id: Option<String>,
    pub initiated_by: Option<String>,
}

impl OperationMetadata {
    /// Metadata for an operator, with a fresh time-ordered correlation id
    pub fn for_operator(operator: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(Uuid::now_v7().to_string()),
            initiated_by: Some(operator.into()),
        }
    }

    /// Returns the operator name, or "system" when none was recorded
    pub fn operator(&self) -> &str {
        self.initiated_by.as_deref().unwrap_or("system")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let error = PortError::not_found("ThirdParty", 123);
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(error.to_string(), "Not found: ThirdParty with id 123");
    }

    #[test]
    fn test_only_connection_errors_are_transient() {
        assert!(PortError::connection("refused").is_transient());

        let conflict = PortError::conflict_field("duplicate", "document_number");
        assert!(!conflict.is_transient());
        assert!(conflict.is_conflict());
    }

    #[test]
    fn test_operation_metadata() {
        assert_eq!(OperationMetadata::default().operator(), "system");

        let metadata = OperationMetadata::for_operator("jdoe");
        assert_eq!(metadata.operator(), "jdoe");
        assert!(metadata.correlation_id.is_some());
    }
}
