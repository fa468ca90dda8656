//! Domain Adapters
//!
//! Implementations of domain ports backed by the PostgreSQL repositories.
//! Each adapter implements the port trait, converts row types to domain
//! models and translates database errors into port errors.

pub mod third_party;

pub use third_party::PostgresThirdPartyAdapter;
