// SimpleQueue Infrastructure - Filesystem Adapters
// Implements: OverflowLog

pub mod file_overflow_log;

pub use file_overflow_log::{open_overflow_log, FileOverflowLog};
