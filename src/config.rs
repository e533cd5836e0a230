//! Command-line configuration for the service and its device client.

use std::time::Duration;

use clap::Parser;

use crate::network::device_control::ClientConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "tv_control_service")]
#[command(about = "REST control and status surface for Roku-based televisions")]
pub struct Args {
    /// Address the HTTP server binds to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on
    #[arg(long, default_value_t = 8023)]
    pub port: u16,

    /// ECP port on the televisions
    #[arg(long, default_value_t = 8060)]
    pub device_port: u16,

    /// Timeout for each request sent to a television, in seconds
    #[arg(long, default_value_t = 3)]
    pub timeout_secs: u64,

    /// Log filter (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            port: self.device_port,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
