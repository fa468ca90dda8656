//! Core Kernel - Foundational types shared by the third-party registry
//!
//! This crate provides the building blocks used across the workspace:
//! - Strongly-typed record codes
//! - Port contracts (errors, health checks, operation metadata) for the
//!   ports-and-adapters layout
//! - Common error types

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{ThirdPartyCode, CodeParseError};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
    OperationMetadata,
};
pub use error::CoreError;
