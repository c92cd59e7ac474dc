//! Process signal handling
//!
//! SIGHUP rotates the overflow log; Ctrl-C and SIGTERM end the service.

use anyhow::Result;
use simplequeue_api_rpc::handler::SharedEngine;
use tokio::sync::mpsc;
use tracing::info;

/// Why the service loop ended
#[derive(Debug)]
pub enum ExitReason {
    /// Clean termination: drain and exit 0
    Terminate,
    /// Overflow log lost: exit 1 without draining
    Fatal(String),
}

async fn rotate(engine: &SharedEngine) -> Option<ExitReason> {
    info!("SIGHUP received, reopening overflow log");
    match engine.lock().await.rotate_overflow_log() {
        Ok(_) => None,
        Err(e) => Some(ExitReason::Fatal(e.to_string())),
    }
}

/// Wait until the process should stop, handling rotation requests meanwhile
#[cfg(unix)]
pub async fn wait_for_exit(
    engine: &SharedEngine,
    fatal_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<ExitReason> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    let mut terminate = signal(SignalKind::terminate())?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(ExitReason::Terminate),
            _ = terminate.recv() => return Ok(ExitReason::Terminate),
            _ = hangup.recv() => {
                if let Some(reason) = rotate(engine).await {
                    return Ok(reason);
                }
            }
            Some(message) = fatal_rx.recv() => return Ok(ExitReason::Fatal(message)),
        }
    }
}

#[cfg(not(unix))]
pub async fn wait_for_exit(
    _engine: &SharedEngine,
    fatal_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<ExitReason> {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            Ok(ExitReason::Terminate)
        }
        Some(message) = fatal_rx.recv() => Ok(ExitReason::Fatal(message)),
    }
}
