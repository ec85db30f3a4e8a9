//! Application configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `APP_ENV`: environment name (default: development)
//! - `PORT`: port to listen on (default: 3000)
//! - `HOST`: bind host (default: 127.0.0.1)
//! - `DATABASE_PATH`: SQLite file (default: ./db.sqlite)
//! - `DATABASE_AUTO_SCHEMA`: create the `todos` table on open (default: true)
//! - `APP_LOGGING`: HTTP request tracing (default: true)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_DATABASE_PATH: &str = "./db.sqlite";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime environment settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Environment name, e.g. "development" or "production"
    pub environment: String,
    pub host: IpAddr,
    pub port: u16,
}

/// Application feature flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFlags {
    /// Enable HTTP request tracing
    pub logging: bool,
}

/// SQLite settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    /// Create the `todos` table when the connection is opened
    pub auto_schema: bool,
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: EnvConfig,
    pub app: AppFlags,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let host = match lookup("HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "HOST",
                value: raw,
            })?,
            None => DEFAULT_HOST,
        };

        let path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        Ok(Self {
            env: EnvConfig {
                environment,
                host,
                port,
            },
            app: AppFlags {
                logging: parse_flag(&lookup, "APP_LOGGING", true)?,
            },
            database: DatabaseConfig {
                path,
                auto_schema: parse_flag(&lookup, "DATABASE_AUTO_SCHEMA", true)?,
            },
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.env.host, self.env.port)
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.env.environment, "development");
        assert_eq!(config.env.port, 3000);
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.database.path, PathBuf::from("./db.sqlite"));
        assert!(config.database.auto_schema);
        assert!(config.app.logging);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("PORT", "8080"),
            ("HOST", "0.0.0.0"),
            ("DATABASE_PATH", "/tmp/todos.sqlite"),
            ("DATABASE_AUTO_SCHEMA", "false"),
            ("APP_LOGGING", "off"),
        ]))
        .unwrap();

        assert_eq!(config.env.environment, "production");
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database.path, PathBuf::from("/tmp/todos.sqlite"));
        assert!(!config.database.auto_schema);
        assert!(!config.app.logging);
    }

    #[test]
    fn rejects_bad_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn rejects_bad_flag() {
        let err = AppConfig::from_lookup(lookup_from(&[("APP_LOGGING", "maybe")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for APP_LOGGING: 'maybe'");
    }
}
