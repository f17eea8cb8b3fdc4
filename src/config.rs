//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the moon-config.toml
//! file. Only the HTTP listener is configurable; the computation itself has no
//! tunables.
//!
//! The `HOST` and `PORT` environment variables override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "moon-config.toml";

/// Application configuration loaded from moon-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// HTTP listener configuration
    pub server: ServerConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
        }
    }
}

impl Config {
    /// Load configuration from moon-config.toml, then apply environment overrides
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE).with_overrides(
            std::env::var("HOST").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `HOST`/`PORT` style overrides; unparseable ports are ignored
    pub fn with_overrides(mut self, host: Option<&str>, port: Option<&str>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }
        if let Some(port) = port {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(port, "ignoring invalid PORT"),
            }
        }
        self
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
