//! Configuration management for the client
//!
//! Settings come from an optional TOML file layered under `LFT_*`
//! environment variables. Every field has a default, so the client runs
//! with no configuration at all.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::session::SessionOptions;
use crate::transfer::DEFAULT_CHUNK_SIZE;

/// Configuration file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "lft-client";

/// A server offered in the selection menu
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub name: String,
    pub host: String,
}

/// Complete client configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Servers offered at startup, in menu order
    pub servers: Vec<ServerEntry>,

    /// TCP port every server listens on
    /// Environment: LFT_PORT
    pub port: u16,

    /// Bytes requested per payload read
    /// Environment: LFT_CHUNK_SIZE
    pub chunk_size: usize,

    /// Longest server line accepted
    pub max_line_length: usize,

    /// Longest filename accepted
    pub max_name_length: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            servers: vec![
                ServerEntry {
                    name: "Newark".into(),
                    host: "newark.cs.sierracollege.edu".into(),
                },
                ServerEntry {
                    name: "London".into(),
                    host: "london.cs.sierracollege.edu".into(),
                },
            ],
            port: 3456,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_line_length: 4096,
            max_name_length: 255,
        }
    }
}

impl ClientConfig {
    /// Load configuration with environment overrides.
    ///
    /// An explicit `path` must exist; otherwise `lft-client.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("LFT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.servers.is_empty() {
            return Err(config::ConfigError::Message(
                "at least one server must be configured".into(),
            ));
        }

        if let Some(server) = self.servers.iter().find(|s| s.host.trim().is_empty()) {
            return Err(config::ConfigError::Message(format!(
                "server {:?} has an empty host",
                server.name
            )));
        }

        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.chunk_size == 0 {
            return Err(config::ConfigError::Message(
                "chunk_size must be greater than 0".into(),
            ));
        }

        if self.max_line_length == 0 || self.max_name_length == 0 {
            return Err(config::ConfigError::Message(
                "line and name limits must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Limits handed to each session
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            chunk_size: self.chunk_size,
            max_line_length: self.max_line_length,
            max_name_length: self.max_name_length,
        }
    }
}
