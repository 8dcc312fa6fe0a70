//! Application configuration, loaded from a JSON file.

use crate::scrape::{ScrapeConfig, Site};
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::Level;

/// Top-level server configuration.
///
/// Every field has a default, so a partial file (or no file at all) still
/// yields a runnable server. `sites` is the allow-list scraped when a
/// request names no site of its own.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7070
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Loads configuration from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Returns the server address as a string (e.g. "0.0.0.0:7070").
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// Maps the configured log level name to a tracing level, falling back
    /// to INFO for anything unrecognized.
    pub fn tracing_level(&self) -> Level {
        match self.log_level.as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            log_level: default_log_level(),
            sites: Vec::new(),
            scrape: ScrapeConfig::default(),
        }
    }
}
