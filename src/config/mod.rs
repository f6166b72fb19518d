//! Configuration module for the risk scoring service.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server, Model, and Observability.

mod model_config;
mod observability_config;
mod server_config;

pub use model_config::{DEFAULT_MODEL_PATH, ModelEnvConfig};
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Server
    pub server: ServerEnvConfig,

    // Model artifact
    pub model_path: PathBuf,

    // Observability
    pub observability_enabled: bool,
    pub observability_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        let observability = ObservabilityEnvConfig::default();
        Self {
            server: ServerEnvConfig::default(),
            model_path: ModelEnvConfig::default().model_path,
            observability_enabled: observability.enabled,
            observability_interval_seconds: observability.interval_seconds,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let model = ModelEnvConfig::from_env();
        let observability =
            ObservabilityEnvConfig::from_env().context("Failed to load observability config")?;

        Ok(Self {
            server,
            model_path: model.model_path,
            observability_enabled: observability.enabled,
            observability_interval_seconds: observability.interval_seconds,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}
