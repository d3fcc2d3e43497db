use std::fmt;
use std::net::SocketAddr;

use serde::Deserialize;

use crate::ConfigError;

/// Transport the MCP service is exposed over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Local process pipe
    #[default]
    Stdio,
    /// Streamable HTTP at `/mcp`
    Http,
    /// Server-sent events at `/sse`
    Sse,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
            Self::Sse => write!(f, "sse"),
        }
    }
}

/// Process-facing server settings (`MCP_*`)
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: Transport,
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            server_host: default_host(),
            server_port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address for the network transports
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a bindable address
    pub fn listen_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("invalid listen address: {e}")))
    }
}
