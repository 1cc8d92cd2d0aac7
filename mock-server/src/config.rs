//! Listener settings and command-line parsing.
//!
//! The only user-facing knob is the listen port. The request-size limit is a
//! compile-time constant carried on `ServerConfig` so tests can shrink it.

use std::net::{Ipv4Addr, SocketAddr};

use clap::Parser;

/// Port used when none is given on the command line.
pub const DEFAULT_PORT: u16 = 8080;

/// Largest request body accepted, by declared Content-Length (10 MiB).
pub const MAX_REQUEST_BYTES: u64 = 10 * 1024 * 1024;

/// Command line for the `model-mock-server` binary.
#[derive(Debug, Parser)]
#[command(name = "model-mock-server", version)]
#[command(about = "Mock OpenAI- and Ollama-style model API server for integration tests", long_about = None)]
pub struct Cli {
    /// Port to listen on (all interfaces)
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub max_request_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_request_bytes: MAX_REQUEST_BYTES,
        }
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            port: cli.port,
            ..Self::default()
        }
    }
}

impl ServerConfig {
    /// Address the listener binds to: every interface on `port`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
