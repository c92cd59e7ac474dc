// Engine Configuration
//
// The three already-validated values the engine is built from.
// Parsing them (flags, env) is the daemon's job.

use std::path::PathBuf;

/// Startup configuration for one engine instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// File receiving payloads evicted by the capacity limits
    pub overflow_log: Option<PathBuf>,
    /// Global item limit across all queues (0 = unlimited)
    pub max_depth: u64,
    /// Global payload byte limit across all queues (0 = unlimited)
    pub max_bytes: u64,
}

impl EngineConfig {
    pub fn new(overflow_log: Option<PathBuf>, max_depth: u64, max_bytes: u64) -> Self {
        Self {
            overflow_log,
            max_depth,
            max_bytes,
        }
    }
}
