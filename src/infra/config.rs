//! Centralized configuration (environment variables + defaults).

use crate::infra::logging::LogFormat;
use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "products.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON document holding the catalog.
    pub data_file: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads `.env` (if present) and reads the configuration from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = lookup("CATALOG_DATA_FILE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        let bind_addr = lookup("CATALOG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("CATALOG_BIND_ADDR must be a socket address, got '{}'", bind_addr))?;

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            data_file: PathBuf::from(data_file),
            bind_addr,
            log_format,
        })
    }
}
