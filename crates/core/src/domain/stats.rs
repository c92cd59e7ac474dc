// Stats Model & Renderers

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;

/// Process-wide counters.
///
/// `depth` and `bytes` always equal the sums over all queues. `puts`, `gets`
/// and `depth_high_water` are cumulative since the last reset; `overflow`
/// counts evictions and is never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub puts: u64,
    pub gets: u64,
    pub depth: u64,
    pub depth_high_water: u64,
    pub bytes: u64,
    pub overflow: u64,
}

impl GlobalStats {
    pub(crate) fn record_put(&mut self, len: usize) {
        self.puts += 1;
        self.depth += 1;
        self.bytes += len as u64;
        if self.depth > self.depth_high_water {
            self.depth_high_water = self.depth;
        }
    }

    pub(crate) fn record_get(&mut self, len: usize) {
        self.gets += 1;
        self.depth -= 1;
        self.bytes -= len as u64;
    }

    pub(crate) fn record_eviction(&mut self, len: usize) {
        self.depth -= 1;
        self.bytes -= len as u64;
        self.overflow += 1;
    }

    /// Zero the cumulative counters. Resident `depth`/`bytes` and `overflow` stay.
    pub(crate) fn reset(&mut self) {
        self.puts = 0;
        self.gets = 0;
        self.depth_high_water = 0;
    }
}

/// Per-queue counters as reported in stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub puts: u64,
    pub gets: u64,
    pub depth: u64,
    pub depth_high_water: u64,
}

/// Output selector for stats rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsFormat {
    /// Line-oriented, for humans
    #[default]
    Text,
    /// Single JSON object
    Json,
}

impl FromStr for StatsFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(StatsFormat::Text),
            "json" => Ok(StatsFormat::Json),
            other => Err(AppError::Validation(format!(
                "unknown stats format '{}' (expected 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Point-in-time copy of global and per-queue counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(flatten)]
    pub global: GlobalStats,
    pub queues: BTreeMap<String, QueueStats>,
}

impl StatsSnapshot {
    pub fn render(&self, format: StatsFormat) -> Result<String> {
        match format {
            StatsFormat::Text => Ok(self.render_text()),
            StatsFormat::Json => self.render_json(),
        }
    }

    /// One JSON object with the global counters and a `queues` map
    pub fn render_json(&self) -> Result<String> {
        let mut body = serde_json::to_string(self)?;
        body.push('\n');
        Ok(body)
    }

    /// `key:value` lines, a blank gap, then one line per queue
    pub fn render_text(&self) -> String {
        let g = &self.global;
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out, "puts:{}", g.puts);
        let _ = writeln!(out, "gets:{}", g.gets);
        let _ = writeln!(out, "depth:{}", g.depth);
        let _ = writeln!(out, "depth_high_water:{}", g.depth_high_water);
        let _ = writeln!(out, "bytes:{}", g.bytes);
        let _ = writeln!(out, "overflow:{}", g.overflow);
        out.push_str("\n\n");

        for (name, q) in &self.queues {
            let _ = writeln!(
                out,
                "{:>20} gets:{} puts:{} depth:{} depth_high_water:{}",
                name, q.gets, q.puts, q.depth, q.depth_high_water
            );
        }
        out
    }
}
