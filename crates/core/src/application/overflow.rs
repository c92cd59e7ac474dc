// Capacity enforcement (global limits, relief from the queue that was just written)

use crate::application::log_controller::OverflowLogController;
use crate::config::EngineConfig;
use crate::domain::{GlobalStats, Queue};

/// Global capacity limits. Zero disables a dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityLimits {
    pub max_depth: u64,
    pub max_bytes: u64,
}

impl CapacityLimits {
    pub fn new(max_depth: u64, max_bytes: u64) -> Self {
        Self {
            max_depth,
            max_bytes,
        }
    }

    pub fn unlimited() -> Self {
        Self::default()
    }

    /// True when either configured limit is exceeded by the current totals
    pub fn is_breached(&self, totals: &GlobalStats) -> bool {
        (self.max_depth > 0 && totals.depth > self.max_depth)
            || (self.max_bytes > 0 && totals.bytes > self.max_bytes)
    }
}

impl From<&EngineConfig> for CapacityLimits {
    fn from(config: &EngineConfig) -> Self {
        Self::new(config.max_depth, config.max_bytes)
    }
}

/// Evicts oldest entries until the global limits hold again
#[derive(Debug, Clone, Copy, Default)]
pub struct OverflowController {
    limits: CapacityLimits,
}

impl OverflowController {
    pub fn new(limits: CapacityLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> CapacityLimits {
        self.limits
    }

    /// Evict from `queue` while the global totals breach a limit.
    ///
    /// Only `queue` is relieved. Once it is empty the loop stops even if
    /// other queues keep the totals over the limit. Returns the number of
    /// entries evicted.
    pub fn enforce(
        &self,
        queue: &mut Queue,
        totals: &mut GlobalStats,
        log: &mut OverflowLogController,
    ) -> u64 {
        let mut evicted = 0;
        while self.limits.is_breached(totals) {
            if evict_oldest(queue, totals, log).is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }
}

/// Remove the head of `queue`, appending it to the overflow log if one is
/// configured. Returns the evicted length, `None` if the queue was empty.
pub fn evict_oldest(
    queue: &mut Queue,
    totals: &mut GlobalStats,
    log: &mut OverflowLogController,
) -> Option<usize> {
    let entry = queue.pop_oldest()?;
    log.append(entry.as_bytes());
    totals.record_eviction(entry.len());
    Some(entry.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::InMemoryOverflowLog;

    fn filled(name: &str, payloads: &[&str], totals: &mut GlobalStats) -> Queue {
        let mut queue = Queue::new(name);
        for p in payloads {
            queue.put(*p);
            totals.record_put(p.len());
        }
        queue
    }

    #[test]
    fn test_limits_breach() {
        let totals = GlobalStats {
            depth: 3,
            bytes: 10,
            ..Default::default()
        };

        assert!(!CapacityLimits::unlimited().is_breached(&totals));
        assert!(CapacityLimits::new(2, 0).is_breached(&totals));
        assert!(!CapacityLimits::new(3, 0).is_breached(&totals));
        assert!(CapacityLimits::new(0, 9).is_breached(&totals));
        assert!(!CapacityLimits::new(0, 10).is_breached(&totals));
    }

    #[test]
    fn test_limits_from_config() {
        let config = EngineConfig::new(None, 5, 1024);
        assert_eq!(CapacityLimits::from(&config), CapacityLimits::new(5, 1024));
    }

    #[test]
    fn test_evict_oldest_logs_and_counts() {
        let mut totals = GlobalStats::default();
        let mut queue = filled("q", &["A", "BB"], &mut totals);
        let log = InMemoryOverflowLog::new();
        let mut controller = OverflowLogController::new(Some(Box::new(log.clone())));

        assert_eq!(evict_oldest(&mut queue, &mut totals, &mut controller), Some(1));

        assert_eq!(queue.depth(), 1);
        assert_eq!(queue.bytes(), 2);
        assert_eq!(totals.depth, 1);
        assert_eq!(totals.bytes, 2);
        assert_eq!(totals.overflow, 1);
        assert_eq!(log.contents(), b"A\n".to_vec());
    }

    #[test]
    fn test_evict_oldest_on_empty_queue() {
        let mut totals = GlobalStats::default();
        let mut queue = Queue::new("q");
        let mut controller = OverflowLogController::disabled();

        assert_eq!(evict_oldest(&mut queue, &mut totals, &mut controller), None);
        assert_eq!(totals.overflow, 0);
    }

    #[test]
    fn test_enforce_byte_limit() {
        let mut totals = GlobalStats::default();
        let mut queue = filled("q", &["aaaa", "bbbb", "cccc"], &mut totals);
        let mut log = OverflowLogController::disabled();
        let controller = OverflowController::new(CapacityLimits::new(0, 8));

        assert_eq!(controller.enforce(&mut queue, &mut totals, &mut log), 1);
        assert_eq!(totals.bytes, 8);
        assert_eq!(queue.dump().next(), Some(b"bbbb".as_slice()));
    }

    #[test]
    fn test_enforce_stops_when_queue_drained() {
        let mut totals = GlobalStats::default();
        let _other = filled("other", &["x", "y", "z"], &mut totals);
        let mut queue = filled("q", &["A"], &mut totals);
        let mut log = OverflowLogController::disabled();
        let controller = OverflowController::new(CapacityLimits::new(2, 0));

        let evicted = controller.enforce(&mut queue, &mut totals, &mut log);

        assert_eq!(evicted, 1);
        assert!(queue.is_empty());
        // "other" keeps the total over the limit; nothing cascades into it
        assert_eq!(totals.depth, 3);
    }
}
