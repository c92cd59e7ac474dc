//! RPC Method Handlers
//!
//! Translates each JSON-RPC method into one engine operation.

use crate::error::to_rpc_error;
use crate::types::{
    DumpRequest, DumpResponse, GetRequest, GetResponse, PutRequest, PutResponse, RotateRequest,
    RotateResponse, StatsRequest, StatsResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use simplequeue_core::domain::queue_name_or_default;
use simplequeue_core::error::AppError;
use simplequeue_core::Engine;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error};

/// Shared handle to the engine; the lock keeps operations one-at-a-time
pub type SharedEngine = Arc<Mutex<Engine>>;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    engine: SharedEngine,
    fatal_tx: Option<mpsc::UnboundedSender<String>>,
}

impl RpcHandler {
    pub fn new(engine: SharedEngine) -> Self {
        Self {
            engine,
            fatal_tx: None,
        }
    }

    /// Report fatal errors (overflow log reopen failure) on `tx` so the
    /// process owner can terminate
    pub fn with_fatal_notifier(mut self, tx: mpsc::UnboundedSender<String>) -> Self {
        self.fatal_tx = Some(tx);
        self
    }

    /// queue.put.v1
    pub async fn put(&self, params: PutRequest) -> Result<PutResponse, ErrorObjectOwned> {
        let queue = queue_name_or_default(params.queue.as_deref()).to_string();
        let payload = params.data.map(String::into_bytes);

        let result = self.engine.lock().await.put(&queue, payload);
        let receipt = result.map_err(|e| self.fail(e))?;

        Ok(PutResponse {
            queue,
            depth: receipt.depth,
            evicted: receipt.evicted,
        })
    }

    /// queue.get.v1
    pub async fn get(&self, params: GetRequest) -> Result<GetResponse, ErrorObjectOwned> {
        let queue = queue_name_or_default(params.queue.as_deref()).to_string();
        let data = self
            .engine
            .lock()
            .await
            .get(&queue)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

        Ok(GetResponse { queue, data })
    }

    /// queue.dump.v1
    pub async fn dump(&self, params: DumpRequest) -> Result<DumpResponse, ErrorObjectOwned> {
        let queue = queue_name_or_default(params.queue.as_deref()).to_string();
        let bytes = self.engine.lock().await.render_dump(&queue);

        Ok(DumpResponse {
            queue,
            data: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// admin.stats.v1
    pub async fn stats(&self, params: StatsRequest) -> Result<StatsResponse, ErrorObjectOwned> {
        let body = self
            .engine
            .lock()
            .await
            .stats(params.format, params.reset)
            .map_err(to_rpc_error)?;

        Ok(StatsResponse {
            format: params.format,
            body,
        })
    }

    /// admin.rotate.v1
    pub async fn rotate(&self, _params: RotateRequest) -> Result<RotateResponse, ErrorObjectOwned> {
        let result = self.engine.lock().await.rotate_overflow_log();

        match result {
            Ok(rotated) => {
                debug!(rotated, "Rotation requested over RPC");
                Ok(RotateResponse { rotated })
            }
            Err(e) => {
                error!(error = %e, "Overflow log rotation failed");
                Err(self.fail(e))
            }
        }
    }

    /// Map an engine error, forwarding fatal ones to the process owner
    fn fail(&self, e: AppError) -> ErrorObjectOwned {
        if e.is_fatal() {
            if let Some(tx) = &self.fatal_tx {
                let _ = tx.send(e.to_string());
            }
        }
        to_rpc_error(e)
    }
}
