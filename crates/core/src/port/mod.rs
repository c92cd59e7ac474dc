// Port Layer - Interfaces for external dependencies

pub mod overflow_log;

// Re-exports
pub use overflow_log::{InMemoryOverflowLog, OverflowLog, RECORD_SEPARATOR};
