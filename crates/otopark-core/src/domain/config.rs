//! Service configuration
//!
//! Connection settings are injected into the store gateway; nothing here is
//! process-global. [`AppConfig::from_env`] reads the process environment,
//! [`AppConfig::from_lookup`] takes any key lookup so tests can feed values
//! directly.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::branding;

/// Environment variable names
pub mod env {
    pub const DB_HOST: &str = "OTOPARK_DB_HOST";
    pub const DB_USER: &str = "OTOPARK_DB_USER";
    pub const DB_PASSWORD: &str = "OTOPARK_DB_PASSWORD";
    pub const DB_NAME: &str = "OTOPARK_DB_NAME";
    pub const HTTP_HOST: &str = "OTOPARK_HTTP_HOST";
    pub const HTTP_PORT: &str = "OTOPARK_HTTP_PORT";
    pub const MAX_CONNECTIONS: &str = "OTOPARK_MAX_CONNECTIONS";
    pub const EXPOSE_ERROR_DETAILS: &str = "OTOPARK_EXPOSE_ERROR_DETAILS";
}

/// Host value that resolves to the platform data directory
pub const LOCALHOST: &str = "localhost";

/// Extension appended to database names that carry none
const DATABASE_EXTENSION: &str = "db";

/// Errors raised while loading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("max_connections must be at least 1")]
    ZeroConnections,
}

/// Store connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `localhost` (or empty) for the platform data directory, otherwise a
    /// directory path holding the database files
    pub host: String,
    /// Account name, recorded for parity with networked stores
    pub user: String,
    /// Account password; never logged or serialized
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Database file stem (`.db` is appended when no extension is given)
    pub database_name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: LOCALHOST.to_string(),
            user: "root".to_string(),
            password: String::new(),
            database_name: "otopark_db".to_string(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database_name", &self.database_name)
            .finish()
    }
}

impl DatabaseConfig {
    /// Create a config pointing at `database_name` inside `host`
    pub fn new(host: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database_name: database_name.into(),
            ..Default::default()
        }
    }

    /// Set the account credentials
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Directory the database files live in
    pub fn data_dir(&self) -> PathBuf {
        let host = self.host.trim();
        if host.is_empty() || host.eq_ignore_ascii_case(LOCALHOST) {
            branding::data_dir()
        } else {
            PathBuf::from(host)
        }
    }

    /// Full path of the database file
    pub fn database_path(&self) -> PathBuf {
        let mut file = PathBuf::from(&self.database_name);
        if file.extension().is_none() {
            file.set_extension(DATABASE_EXTENSION);
        }
        self.data_dir().join(file)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Upper bound on simultaneously open store connections
    pub max_connections: usize,
    /// Echo the store's failure cause to clients in `{"error": ...}` bodies
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: branding::DEFAULT_HTTP_PORT,
            max_connections: 8,
            expose_error_details: true,
        }
    }
}

impl ServerConfig {
    /// Create a config listening on `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(env::DB_HOST) {
            config.database.host = host;
        }
        if let Some(user) = lookup(env::DB_USER) {
            config.database.user = user;
        }
        if let Some(password) = lookup(env::DB_PASSWORD) {
            config.database.password = password;
        }
        if let Some(name) = lookup(env::DB_NAME) {
            config.database.database_name = name;
        }

        if let Some(host) = lookup(env::HTTP_HOST) {
            config.server.host = host;
        }
        if let Some(port) = lookup(env::HTTP_PORT) {
            config.server.port = parse_number(env::HTTP_PORT, &port)?;
        }
        if let Some(max) = lookup(env::MAX_CONNECTIONS) {
            config.server.max_connections = parse_number(env::MAX_CONNECTIONS, &max)?;
        }
        if let Some(flag) = lookup(env::EXPOSE_ERROR_DETAILS) {
            config.server.expose_error_details = parse_bool(env::EXPOSE_ERROR_DETAILS, &flag)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        Ok(())
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
