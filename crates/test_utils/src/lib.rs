//! Test Utilities Crate
//!
//! Shared test infrastructure for the third-party registry.
//!
//! # Modules
//!
//! - `fixtures`: ready-made records, forms and raw values
//! - `builders`: builder for records with selective overrides
//! - `database`: PostgreSQL testcontainers with the migrated schema
//! - `assertions`: assertions over rule-engine violations
//! - `generators`: proptest strategies for valid records and NITs

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
