use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl Config {
    const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:3000";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "RUN_MIGRATIONS",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            database_url,
            bind_addr,
            run_migrations,
        })
    }
}
