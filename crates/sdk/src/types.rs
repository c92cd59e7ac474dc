//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};

/// Stats output selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsFormat {
    #[default]
    Text,
    Json,
}

/// Response from put operation
#[derive(Debug, Clone, Deserialize)]
pub struct PutResponse {
    pub queue: String,
    pub depth: u64,
    pub evicted: u64,
}

/// Response from get operation
#[derive(Debug, Clone, Deserialize)]
pub struct GetResponse {
    pub queue: String,
    pub data: Option<String>,
}

/// Response from dump operation
#[derive(Debug, Clone, Deserialize)]
pub struct DumpResponse {
    pub queue: String,
    pub data: String,
}

/// Response from stats operation
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub format: StatsFormat,
    pub body: Option<String>,
}

/// Response from rotate operation
#[derive(Debug, Clone, Deserialize)]
pub struct RotateResponse {
    pub rotated: bool,
}
