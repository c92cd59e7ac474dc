//! Command-line options for the daemon

use clap::Parser;
use simplequeue_api_rpc::RpcServerConfig;
use simplequeue_core::EngineConfig;
use std::path::PathBuf;

/// A simple in-memory buffer queue
#[derive(Parser, Debug)]
#[command(name = "simplequeue")]
#[command(about = "A simple in-memory buffer queue", long_about = None)]
#[command(version)]
pub struct Options {
    /// Address to listen on
    #[arg(long, env = "SIMPLEQUEUE_ADDRESS", default_value = "127.0.0.1")]
    pub address: String,

    /// Port to listen on
    #[arg(long, env = "SIMPLEQUEUE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// File to write data beyond --max-depth or --max-bytes
    #[arg(long, env = "SIMPLEQUEUE_OVERFLOW_LOG")]
    pub overflow_log: Option<String>,

    /// Memory limit in payload bytes across all queues (0 = unlimited)
    #[arg(long, env = "SIMPLEQUEUE_MAX_BYTES", default_value_t = 0)]
    pub max_bytes: u64,

    /// Maximum items across all queues (0 = unlimited)
    #[arg(long, env = "SIMPLEQUEUE_MAX_DEPTH", default_value_t = 0)]
    pub max_depth: u64,
}

impl Options {
    pub fn engine_config(&self) -> EngineConfig {
        let overflow_log = self
            .overflow_log
            .as_deref()
            .map(|path| PathBuf::from(shellexpand::tilde(path).into_owned()));
        EngineConfig::new(overflow_log, self.max_depth, self.max_bytes)
    }

    pub fn rpc_config(&self) -> RpcServerConfig {
        RpcServerConfig {
            host: self.address.clone(),
            port: self.port,
        }
    }
}
