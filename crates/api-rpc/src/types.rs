//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.
//! Every request field is optional; omitted params parse as the default request.

use serde::{Deserialize, Serialize};
use simplequeue_core::domain::StatsFormat;

/// queue.put.v1 - Append a payload to a queue
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PutRequest {
    pub queue: Option<String>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    pub queue: String,
    pub depth: u64,
    pub evicted: u64,
}

/// queue.get.v1 - Remove the oldest payload of a queue
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetRequest {
    pub queue: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub queue: String,
    /// `null` when the queue is empty or was never written
    pub data: Option<String>,
}

/// queue.dump.v1 - List a queue's payloads without removing them
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DumpRequest {
    pub queue: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DumpResponse {
    pub queue: String,
    /// Each payload followed by a newline
    pub data: String,
}

/// admin.stats.v1 - Render or reset statistics
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatsRequest {
    pub format: StatsFormat,
    pub reset: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub format: StatsFormat,
    /// `null` after a reset
    pub body: Option<String>,
}

/// admin.rotate.v1 - Reopen the overflow log
#[derive(Debug, Default, Deserialize)]
pub struct RotateRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct RotateResponse {
    pub rotated: bool,
}
