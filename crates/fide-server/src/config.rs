//! Configuration management

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 7373;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default database URL, shared with `fide-ingest`.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://fide.db";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("FIDE_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: env_or("FIDE_PORT", DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: env_or(
                    "FIDE_SHUTDOWN_TIMEOUT",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                ),
                request_timeout_secs: env_or("FIDE_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_DATABASE_MAX_CONNECTIONS,
                ),
                connect_timeout_secs: env_or(
                    "DATABASE_CONNECT_TIMEOUT",
                    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
                ),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_or("CORS_ALLOW_CREDENTIALS", true),
            },
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.server.port == 0 {
            return Err(AppError::Config("Server port must be greater than 0".to_string()));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.database.url.trim().is_empty() {
            return Err(AppError::Config("Database URL cannot be empty".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(AppError::Config(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset or invalid
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "FIDE_HOST",
        "FIDE_PORT",
        "FIDE_SHUTDOWN_TIMEOUT",
        "FIDE_REQUEST_TIMEOUT",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "DATABASE_CONNECT_TIMEOUT",
        "CORS_ALLOWED_ORIGINS",
        "CORS_ALLOW_CREDENTIALS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.server.port, 7373);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.database.url, "sqlite://fide.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        clear_env();
        std::env::set_var("FIDE_HOST", "0.0.0.0");
        std::env::set_var("FIDE_PORT", "8080");
        std::env::set_var("DATABASE_URL", "sqlite://ratings.db");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example");

        let config = Config::load().unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://ratings.db");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("FIDE_PORT", "not-a-port");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "-3");

        let config = Config::load().unwrap();
        assert_eq!(config.server.port, DEFAULT_SERVER_PORT);
        assert_eq!(config.database.max_connections, DEFAULT_DATABASE_MAX_CONNECTIONS);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_port_is_rejected() {
        clear_env();
        std::env::set_var("FIDE_PORT", "0");

        assert!(matches!(Config::load(), Err(AppError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.database.url = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
