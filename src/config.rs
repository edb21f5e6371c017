use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

use crate::schedule::PolicyKind;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR '{0}'")]
    InvalidBindAddr(String),

    #[error("Unknown HOME_AWAY_POLICY '{0}', expected balanced or slot_order")]
    UnknownPolicy(String),
}

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub home_away_policy: PolicyKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let home_away_policy = match lookup("HOME_AWAY_POLICY") {
            Some(raw) => PolicyKind::from_str(raw.trim())
                .map_err(|_| ConfigError::UnknownPolicy(raw.clone()))?,
            None => PolicyKind::default(),
        };

        Ok(Self {
            bind_addr,
            database_url,
            home_away_policy,
        })
    }
}
