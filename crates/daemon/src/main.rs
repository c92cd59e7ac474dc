//! SimpleQueue - Main Entry Point
//! JSON-RPC server in front of an in-memory named-queue engine

mod logging;
mod options;
mod signals;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info};

// Import workspace crates
use simplequeue_api_rpc::RpcServer;
use simplequeue_core::{CapacityLimits, Engine};
use simplequeue_infra_fs::open_overflow_log;

use options::Options;
use signals::ExitReason;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let options = Options::parse();

    // 1. Initialize logging
    let log_guard = logging::init()?;

    info!("SimpleQueue v{} starting...", VERSION);

    // 2. Build the engine
    let config = options.engine_config();
    let overflow_log =
        open_overflow_log(&config).context("Refusing to start without the overflow log")?;

    let engine = Arc::new(Mutex::new(Engine::new(
        CapacityLimits::from(&config),
        overflow_log,
    )));

    // 3. Start JSON-RPC server
    let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();
    let rpc_server =
        RpcServer::with_fatal_notifier(options.rpc_config(), engine.clone(), fatal_tx);
    let (rpc_handle, addr) = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(address = %addr, "System ready. SIGHUP reopens the overflow log, Ctrl+C stops");

    // 4. Serve until a stop signal or a fatal error
    let reason = signals::wait_for_exit(&engine, &mut fatal_rx).await?;

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    match reason {
        ExitReason::Terminate => {
            info!("Shutdown signal received. Draining queues...");
            let report = engine.lock().await.shutdown();
            info!(
                drained = report.drained,
                persisted = report.persisted,
                "Shutdown complete."
            );
            Ok(())
        }
        ExitReason::Fatal(message) => {
            error!(error = %message, "Overflow log unavailable, exiting");
            drop(log_guard);
            std::process::exit(1);
        }
    }
}
