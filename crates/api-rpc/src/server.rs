//! JSON-RPC Server
//!
//! Serves the queue API over HTTP using jsonrpsee.

use crate::handler::{RpcHandler, SharedEngine};
use crate::types::{DumpRequest, GetRequest, PutRequest, RotateRequest, StatsRequest};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 8080;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 picks an ephemeral port
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

/// Parse optional params, treating absent params as the default request
macro_rules! parse_or_default {
    ($params:expr, $ty:ty) => {
        $params.parse::<Option<$ty>>()?.unwrap_or_default()
    };
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, engine: SharedEngine) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(engine)),
        }
    }

    /// Like [`RpcServer::new`], reporting fatal rotation failures on `fatal_tx`
    pub fn with_fatal_notifier(
        config: RpcServerConfig,
        engine: SharedEngine,
        fatal_tx: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(engine).with_fatal_notifier(fatal_tx)),
        }
    }

    /// Start the JSON-RPC server.
    ///
    /// Returns the handle used to stop it and the address actually bound.
    pub async fn start(self) -> Result<(ServerHandle, SocketAddr), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let mut module = RpcModule::new(());

        // Register methods
        let handler = self.handler.clone();
        module
            .register_async_method("queue.put.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req = parse_or_default!(params, PutRequest);
                    handler.put(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.get.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req = parse_or_default!(params, GetRequest);
                    handler.get(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("queue.dump.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req = parse_or_default!(params, DumpRequest);
                    handler.dump(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        // Admin APIs
        let handler = self.handler.clone();
        module
            .register_async_method("admin.stats.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req = parse_or_default!(params, StatsRequest);
                    handler.stats(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("admin.rotate.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req = parse_or_default!(params, RotateRequest);
                    handler.rotate(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!(address = %local_addr, "JSON-RPC server started");

        let handle = server.start(module);
        Ok((handle, local_addr))
    }
}
