// Queue Engine - entry point for put/get/dump/stats, rotation and shutdown

use crate::application::log_controller::OverflowLogController;
use crate::application::overflow::{evict_oldest, CapacityLimits, OverflowController};
use crate::domain::{Dump, GlobalStats, Queue, Registry, StatsFormat, StatsSnapshot};
use crate::error::{AppError, Result};
use crate::port::{OverflowLog, RECORD_SEPARATOR};
use tracing::{debug, info};

/// Outcome of a successful put
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutReceipt {
    /// Depth of the target queue after capacity enforcement
    pub depth: u64,
    /// Entries evicted from the target queue by this put
    pub evicted: u64,
}

/// Outcome of the shutdown drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    pub queues: usize,
    pub drained: u64,
    pub persisted: bool,
}

/// One in-memory queue service.
///
/// Holds every queue and every process-wide counter. Operations take
/// `&mut self` and run to completion, so callers sharing an engine between
/// tasks serialize access behind a single lock.
#[derive(Debug)]
pub struct Engine {
    registry: Registry,
    totals: GlobalStats,
    overflow: OverflowController,
    overflow_log: OverflowLogController,
}

impl Engine {
    pub fn new(limits: CapacityLimits, overflow_log: Option<Box<dyn OverflowLog>>) -> Self {
        info!(
            max_depth = limits.max_depth,
            max_bytes = limits.max_bytes,
            overflow_log = overflow_log.is_some(),
            "Queue engine initialized"
        );
        Self {
            registry: Registry::new(),
            totals: GlobalStats::default(),
            overflow: OverflowController::new(limits),
            overflow_log: OverflowLogController::new(overflow_log),
        }
    }

    /// Engine with no limits and no overflow log
    pub fn unbounded() -> Self {
        Self::new(CapacityLimits::unlimited(), None)
    }

    /// Append `payload` to `queue`, creating the queue if needed, then
    /// enforce the global capacity limits against that queue.
    ///
    /// A missing payload is rejected without touching any state, and so is
    /// every put once the overflow log has been lost to a failed reopen.
    pub fn put(&mut self, queue: &str, payload: Option<Vec<u8>>) -> Result<PutReceipt> {
        let payload = payload.ok_or_else(|| AppError::Validation("missing data".to_string()))?;
        self.overflow_log.ensure_writable()?;

        let Self {
            registry,
            totals,
            overflow,
            overflow_log,
        } = self;

        let target = registry.get_or_create(queue);
        totals.record_put(payload.len());
        target.put(payload);

        let evicted = overflow.enforce(target, totals, overflow_log);
        if evicted > 0 {
            debug!(queue = %queue, evicted, "Capacity exceeded, evicted oldest entries");
        }

        Ok(PutReceipt {
            depth: target.depth(),
            evicted,
        })
    }

    /// Remove and return the oldest payload of `queue`.
    ///
    /// Unknown and empty queues both yield `None`; an unknown name is not registered.
    pub fn get(&mut self, queue: &str) -> Option<Vec<u8>> {
        let payload = self.registry.lookup_mut(queue)?.get()?;
        self.totals.record_get(payload.len());
        Some(payload)
    }

    /// Current payloads of `queue`, oldest first, without removing them
    pub fn dump(&self, queue: &str) -> Dump<'_> {
        self.registry
            .lookup(queue)
            .map(Queue::dump)
            .unwrap_or_else(Dump::empty)
    }

    /// Dump rendered as bytes, each payload followed by a newline
    pub fn render_dump(&self, queue: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for payload in self.dump(queue) {
            out.extend_from_slice(payload);
            out.extend_from_slice(RECORD_SEPARATOR);
        }
        out
    }

    /// Render stats, or reset the cumulative global counters.
    ///
    /// With `reset` the global `puts`, `gets` and `depth_high_water` are
    /// zeroed and nothing is rendered.
    pub fn stats(&mut self, format: StatsFormat, reset: bool) -> Result<Option<String>> {
        if reset {
            self.reset_stats();
            return Ok(None);
        }
        self.snapshot().render(format).map(Some)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            global: self.totals,
            queues: self
                .registry
                .iter()
                .map(|q| (q.name().to_string(), q.stats()))
                .collect(),
        }
    }

    /// Zero global puts/gets/depth_high_water. Per-queue counters are untouched.
    pub fn reset_stats(&mut self) {
        self.totals.reset();
        info!("Global stats reset");
    }

    pub fn global_stats(&self) -> GlobalStats {
        self.totals
    }

    pub fn queue(&self, name: &str) -> Option<&Queue> {
        self.registry.lookup(name)
    }

    pub fn queues(&self) -> impl Iterator<Item = &Queue> {
        self.registry.iter()
    }

    pub fn limits(&self) -> CapacityLimits {
        self.overflow.limits()
    }

    pub fn has_overflow_log(&self) -> bool {
        self.overflow_log.is_enabled()
    }

    /// Reopen the overflow log. `Ok(false)` when none is configured.
    ///
    /// An error here is fatal: the caller must terminate rather than keep
    /// running without the configured sink.
    pub fn rotate_overflow_log(&mut self) -> Result<bool> {
        self.overflow_log.rotate()
    }

    /// Evict every remaining entry of every queue, oldest first, then close
    /// the overflow log. Without a log the payloads are discarded.
    pub fn shutdown(&mut self) -> ShutdownReport {
        let persisted = self.overflow_log.is_enabled();
        let mut drained = 0;

        for queue in self.registry.iter_mut() {
            let mut from_queue = 0u64;
            while evict_oldest(queue, &mut self.totals, &mut self.overflow_log).is_some() {
                from_queue += 1;
            }
            if from_queue > 0 {
                debug!(queue = %queue.name(), drained = from_queue, "Drained queue");
            }
            drained += from_queue;
        }

        self.overflow_log.close();

        let report = ShutdownReport {
            queues: self.registry.len(),
            drained,
            persisted,
        };
        info!(
            queues = report.queues,
            drained = report.drained,
            persisted = report.persisted,
            "Shutdown drain complete"
        );
        report
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::unbounded()
    }
}
