//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;

/// API configuration
///
/// Values come from `API_`-prefixed environment variables (a `.env` file is
/// loaded first by the server binary); anything unset keeps its default.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub database_max_connections: u32,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Upper bound applied to search page sizes
    pub max_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: infra_db::DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 10,
            log_level: "info".to_string(),
            max_page_size: 200,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs as i64)?
            .set_default("database_url", defaults.database_url)?
            .set_default("database_max_connections", i64::from(defaults.database_max_connections))?
            .set_default("log_level", defaults.log_level)?
            .set_default("max_page_size", i64::from(defaults.max_page_size))?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(CoreError::configuration("API_JWT_SECRET must not be empty"));
        }
        if self.max_page_size == 0 {
            return Err(CoreError::configuration("API_MAX_PAGE_SIZE must be at least 1"));
        }
        if self.database_max_connections == 0 {
            return Err(CoreError::configuration(
                "API_DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
