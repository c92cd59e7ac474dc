// Domain Layer - Queues, entries and the stats model

pub mod entry;
pub mod queue;
pub mod registry;
pub mod stats;

// Re-exports
pub use entry::Entry;
pub use queue::{queue_name_or_default, Dump, Queue, QueueName, DEFAULT_QUEUE};
pub use registry::Registry;
pub use stats::{GlobalStats, QueueStats, StatsFormat, StatsSnapshot};
