//! HTTP server configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};

/// Server environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEnvConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| defaults.host.to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;
        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
