//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Where blogs and users are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidValue("STORAGE")),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend
    pub storage: StorageBackend,

    /// Database connection URL (required for Postgres storage)
    pub database_url: Option<String>,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Apply pending migrations at startup
    pub run_migrations: bool,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// HMAC secret for signing login tokens
    pub jwt_secret: String,

    /// Login token lifetime in seconds
    pub token_ttl_secs: i64,

    /// Reject anonymous blog creation and deletion. Like updates stay
    /// open to anonymous requests either way.
    pub require_auth_for_writes: bool,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage: StorageBackend = env::var("STORAGE")
            .unwrap_or_else(|_| "postgres".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_URL"));
        }

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let run_migrations = parse_bool("RUN_MIGRATIONS", true)?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3003".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let jwt_secret = env::var("SECRET").map_err(|_| ConfigError::MissingEnv("SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue("SECRET"));
        }

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .ok()
            .filter(|ttl: &i64| *ttl > 0)
            .ok_or(ConfigError::InvalidValue("TOKEN_TTL_SECS"))?;

        let require_auth_for_writes = parse_bool("REQUIRE_AUTH_FOR_WRITES", false)?;

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        Ok(Self {
            storage,
            database_url,
            database_max_connections,
            run_migrations,
            host,
            port,
            environment,
            jwt_secret,
            token_ttl_secs,
            require_auth_for_writes,
            log_format,
        })
    }

    /// Configuration for tests and local experiments: in-memory storage,
    /// fixed secret, anonymous writes allowed.
    pub fn in_memory(jwt_secret: impl Into<String>) -> Self {
        Self {
            storage: StorageBackend::Memory,
            database_url: None,
            database_max_connections: 1,
            run_migrations: false,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            jwt_secret: jwt_secret.into(),
            token_ttl_secs: 3600,
            require_auth_for_writes: false,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(v) => match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue(name)),
        },
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
