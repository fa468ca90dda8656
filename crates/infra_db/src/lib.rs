//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the third-party registry using SQLx.
//!
//! # Architecture
//!
//! - `pool`: connection pool configuration and embedded migrations
//! - `repositories`: SQL access to the `terceros` table, row types only
//! - `adapters`: domain port implementations that translate rows and errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresThirdPartyAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/terceros")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresThirdPartyAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool, DEFAULT_DATABASE_URL};
pub use error::DatabaseError;
pub use repositories::ThirdPartyRepository;
pub use adapters::PostgresThirdPartyAdapter;
