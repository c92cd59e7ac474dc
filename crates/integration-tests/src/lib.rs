//! Shared helpers for the cross-crate tests

use jsonrpsee::server::ServerHandle;
use simplequeue_api_rpc::handler::SharedEngine;
use simplequeue_api_rpc::{RpcServer, RpcServerConfig};
use simplequeue_core::Engine;
use simplequeue_sdk::QueueClient;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A server on an ephemeral localhost port plus a client pointed at it
pub struct TestDaemon {
    pub engine: SharedEngine,
    pub client: QueueClient,
    pub url: String,
    handle: ServerHandle,
}

impl TestDaemon {
    pub async fn start(engine: Engine) -> Self {
        let engine: SharedEngine = Arc::new(Mutex::new(engine));
        let config = RpcServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let (handle, addr) = RpcServer::new(config, engine.clone())
            .start()
            .await
            .expect("server starts");
        let url = format!("http://{}", addr);
        let client = QueueClient::connect(&url).await.expect("client connects");

        Self {
            engine,
            client,
            url,
            handle,
        }
    }

    pub async fn stop(self) {
        let _ = self.handle.stop();
        self.handle.stopped().await;
    }
}
