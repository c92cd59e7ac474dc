// Overflow Log Controller - owns the overflow log handle across rotation and shutdown

use crate::error::{AppError, Result};
use crate::port::OverflowLog;
use std::io;
use tracing::{error, info, warn};

/// Exclusive owner of the optional overflow log.
///
/// Eviction borrows the handle for a single append; rotation swaps it at an
/// operation boundary; shutdown releases it.
///
/// A failed reopen marks the sink as lost until a later reopen succeeds.
pub struct OverflowLogController {
    log: Option<Box<dyn OverflowLog>>,
    lost: bool,
}

impl OverflowLogController {
    pub fn new(log: Option<Box<dyn OverflowLog>>) -> Self {
        Self { log, lost: false }
    }

    /// No sink configured: evicted payloads are discarded
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.log.is_some()
    }

    pub fn location(&self) -> Option<String> {
        self.log.as_ref().map(|log| log.location())
    }

    /// True after a reopen failed and before one succeeded
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Refuse work that could evict while the configured sink is lost
    pub fn ensure_writable(&self) -> Result<()> {
        match self.log.as_ref() {
            Some(log) if self.lost => Err(AppError::OverflowLogOpen {
                path: log.location(),
                source: io::Error::new(
                    io::ErrorKind::NotConnected,
                    "overflow log unavailable since failed reopen",
                ),
            }),
            _ => Ok(()),
        }
    }

    /// Persist one evicted payload if a sink is configured.
    ///
    /// A write failure does not stop the eviction; the payload is lost and the
    /// failure is logged.
    pub fn append(&mut self, payload: &[u8]) {
        if let Some(log) = self.log.as_mut() {
            if let Err(e) = log.append(payload) {
                error!(
                    location = %log.location(),
                    bytes = payload.len(),
                    error = %e,
                    "Failed to append to overflow log, payload dropped"
                );
            }
        }
    }

    /// Close and reopen the configured sink.
    ///
    /// Without a sink this is a no-op returning `Ok(false)`. A reopen failure
    /// is returned as [`AppError::OverflowLogOpen`], which is fatal.
    pub fn rotate(&mut self) -> Result<bool> {
        let Some(log) = self.log.as_mut() else {
            return Ok(false);
        };

        if let Err(source) = log.reopen() {
            self.lost = true;
            return Err(AppError::OverflowLogOpen {
                path: log.location(),
                source,
            });
        }
        self.lost = false;

        info!(location = %log.location(), "Reopened overflow log");
        Ok(true)
    }

    /// Flush and release the sink. Later appends are no-ops.
    pub fn close(&mut self) {
        if let Some(mut log) = self.log.take() {
            if let Err(e) = log.close() {
                warn!(location = %log.location(), error = %e, "Error closing overflow log");
            }
        }
    }
}

impl std::fmt::Debug for OverflowLogController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverflowLogController")
            .field("location", &self.location())
            .field("lost", &self.lost)
            .finish()
    }
}
