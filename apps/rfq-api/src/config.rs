//! API configuration module.
//!
//! Configuration is loaded from environment variables once at start-up, with
//! fallback to defaults. The result is immutable and shared through
//! [`crate::state::AppState`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;
use rfq_db::DbConfig;

/// Header the upstream gateway uses for the authenticated user.
pub const DEFAULT_PRINCIPAL_HEADER: &str = "x-authenticated-user";

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: SocketAddr,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// How long a write waits for another write's lock
    pub db_busy_timeout: Duration,

    /// Bootstrap the schema on start-up
    pub run_migrations: bool,

    /// Deadline for each store call and each render
    pub request_timeout: Duration,

    /// Header carrying the authenticated principal
    pub principal_header: HeaderName,

    /// Reject RFQ requests that carry no principal
    pub require_principal: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_path: PathBuf::from("./rfq.db"),
            db_max_connections: 5,
            db_busy_timeout: Duration::from_secs(5),
            run_migrations: true,
            request_timeout: Duration::from_secs(30),
            principal_header: HeaderName::from_static(DEFAULT_PRINCIPAL_HEADER),
            require_principal: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let request_timeout_secs: u64 = parse(&lookup, "RFQ_REQUEST_TIMEOUT_SECS", 30)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("RFQ_REQUEST_TIMEOUT_SECS".to_string()));
        }

        let db_max_connections: u32 = parse(&lookup, "RFQ_DB_MAX_CONNECTIONS", defaults.db_max_connections)?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("RFQ_DB_MAX_CONNECTIONS".to_string()));
        }

        let db_busy_timeout_ms: u64 = parse(&lookup, "RFQ_DB_BUSY_TIMEOUT_MS", 5_000)?;

        let principal_header = match lookup("RFQ_PRINCIPAL_HEADER") {
            Some(name) => HeaderName::from_str(name.trim())
                .map_err(|_| ConfigError::InvalidValue("RFQ_PRINCIPAL_HEADER".to_string()))?,
            None => defaults.principal_header,
        };

        Ok(ApiConfig {
            bind_addr: parse(&lookup, "RFQ_BIND_ADDR", defaults.bind_addr)?,
            database_path: lookup("RFQ_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            db_max_connections,
            db_busy_timeout: Duration::from_millis(db_busy_timeout_ms),
            run_migrations: parse_flag(&lookup, "RFQ_RUN_MIGRATIONS", defaults.run_migrations)?,
            request_timeout: Duration::from_secs(request_timeout_secs),
            principal_header,
            require_principal: parse_flag(&lookup, "RFQ_REQUIRE_PRINCIPAL", defaults.require_principal)?,
        })
    }

    /// Store settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.db_max_connections)
            .busy_timeout(self.db_busy_timeout)
            .run_migrations(self.run_migrations)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        },
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
