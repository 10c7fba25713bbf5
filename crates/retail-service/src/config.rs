//! Service configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use retail_core::validation::validate_report_limit;
use retail_core::{DEFAULT_REPORT_LIMIT, ORDER_RADIUS};
use retail_db::DbConfig;

/// Retail service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size; concurrent sessions beyond this wait for a connection
    pub max_connections: u32,

    /// Stores farther than this are neither listed nor orderable
    pub order_radius: f64,

    /// Rows returned by reports when the caller gives no limit
    pub report_limit: u32,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            database_path: PathBuf::from("retail.db"),
            max_connections: 5,
            order_radius: ORDER_RADIUS,
            report_limit: DEFAULT_REPORT_LIMIT,
            log_filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment, map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();

        let config = ServiceConfig {
            database_path: lookup("RETAIL_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: parse_or(&lookup, "RETAIL_MAX_CONNECTIONS", defaults.max_connections)?,

            order_radius: parse_or(&lookup, "RETAIL_ORDER_RADIUS", defaults.order_radius)?,

            report_limit: parse_or(&lookup, "RETAIL_REPORT_LIMIT", defaults.report_limit)?,

            log_filter: lookup("RETAIL_LOG").unwrap_or(defaults.log_filter),
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("RETAIL_MAX_CONNECTIONS".to_string()));
        }

        if !config.order_radius.is_finite() || config.order_radius < 0.0 {
            return Err(ConfigError::InvalidValue("RETAIL_ORDER_RADIUS".to_string()));
        }

        if validate_report_limit(config.report_limit).is_err() {
            return Err(ConfigError::InvalidValue("RETAIL_REPORT_LIMIT".to_string()));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
