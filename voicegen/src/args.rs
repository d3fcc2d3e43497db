use clap::{Parser, ValueEnum};
use voicegen_config::{Config, Transport};

/// Voice generation MCP server
#[derive(Debug, Parser)]
#[command(name = "voicegen", about = "MCP server that turns text into hosted speech audio")]
pub struct Args {
    /// Transport to serve (overrides MCP_TRANSPORT)
    #[arg(short, long, value_enum)]
    pub transport: Option<TransportArg>,

    /// Host for the network transports (overrides MCP_SERVER_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port for the network transports (overrides MCP_SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TransportArg {
    Stdio,
    Http,
    Sse,
}

impl From<TransportArg> for Transport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
            TransportArg::Sse => Self::Sse,
        }
    }
}

impl Args {
    /// Fold command-line overrides into the environment-derived config
    pub fn apply(&self, config: &mut Config) {
        if let Some(transport) = self.transport {
            config.server.transport = transport.into();
        }
        if let Some(ref host) = self.host {
            config.server.server_host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.server_port = port;
        }
    }
}
