//! SimpleQueue CLI - Command-line interface for the SimpleQueue daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "simplequeue-cli")]
#[command(about = "SimpleQueue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "SIMPLEQUEUE_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a payload to a queue
    Put {
        /// Queue name
        #[arg(short, long, default_value = "default")]
        queue: String,

        /// Payload
        data: String,
    },

    /// Remove and print the oldest payload of a queue
    Get {
        /// Queue name
        #[arg(short, long, default_value = "default")]
        queue: String,
    },

    /// Print every payload of a queue without removing them
    Dump {
        /// Queue name
        #[arg(short, long, default_value = "default")]
        queue: String,
    },

    /// Show or reset statistics
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Zero global puts/gets/high-water instead of printing
        #[arg(long)]
        reset: bool,
    },

    /// Reopen the daemon's overflow log
    Rotate,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Daemon's line-oriented rendering
    Text,
    /// Daemon's JSON rendering
    Json,
    /// Per-queue table
    Table,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct QueueCounters {
    puts: u64,
    gets: u64,
    depth: u64,
    depth_high_water: u64,
}

#[derive(Deserialize)]
struct StatsBody {
    queues: BTreeMap<String, QueueCounters>,
}

#[derive(Tabled)]
struct QueueRow {
    queue: String,
    puts: u64,
    gets: u64,
    depth: u64,
    depth_high_water: u64,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn queue_table(body: &str) -> Result<String> {
    let stats: StatsBody = serde_json::from_str(body).context("Invalid stats body")?;
    let rows: Vec<QueueRow> = stats
        .queues
        .into_iter()
        .map(|(queue, c)| QueueRow {
            queue,
            puts: c.puts,
            gets: c.gets,
            depth: c.depth,
            depth_high_water: c.depth_high_water,
        })
        .collect();
    Ok(Table::new(rows).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Put { queue, data } => {
            let params = json!({ "queue": queue, "data": data });
            let result = call_rpc(&cli.rpc_url, "queue.put.v1", params).await?;

            println!(
                "{} (depth {})",
                format!("✓ Put on '{}'", queue).green().bold(),
                result["depth"]
            );
            let evicted = result["evicted"].as_u64().unwrap_or(0);
            if evicted > 0 {
                println!("{}", format!("  {} oldest entries overflowed", evicted).yellow());
            }
        }

        Commands::Get { queue } => {
            let result = call_rpc(&cli.rpc_url, "queue.get.v1", json!({ "queue": queue })).await?;

            match result["data"].as_str() {
                Some(data) => println!("{}", data),
                None => eprintln!("{}", format!("Queue '{}' is empty", queue).yellow()),
            }
        }

        Commands::Dump { queue } => {
            let result = call_rpc(&cli.rpc_url, "queue.dump.v1", json!({ "queue": queue })).await?;
            print!("{}", result["data"].as_str().unwrap_or_default());
        }

        Commands::Stats { format, reset } => {
            let wire_format = match format {
                OutputFormat::Text => "text",
                OutputFormat::Json | OutputFormat::Table => "json",
            };
            let params = json!({ "format": wire_format, "reset": reset });
            let result = call_rpc(&cli.rpc_url, "admin.stats.v1", params).await?;

            if reset {
                println!("{}", "✓ Stats reset".green().bold());
                return Ok(());
            }

            let body = result["body"].as_str().unwrap_or_default();
            match format {
                OutputFormat::Table => println!("{}", queue_table(body)?),
                _ => print!("{}", body),
            }
        }

        Commands::Rotate => {
            let result = call_rpc(&cli.rpc_url, "admin.rotate.v1", json!({})).await?;

            if result["rotated"].as_bool().unwrap_or(false) {
                println!("{}", "✓ Overflow log reopened".green().bold());
            } else {
                println!("{}", "○ No overflow log configured".yellow());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_table_lists_each_queue() {
        let body = r#"{"puts":3,"gets":1,"depth":2,"depth_high_water":3,"bytes":2,"overflow":0,
            "queues":{"alpha":{"puts":2,"gets":1,"depth":1,"depth_high_water":2},
                      "beta":{"puts":1,"gets":0,"depth":1,"depth_high_water":1}}}"#;
        let table = queue_table(body).unwrap();

        assert!(table.contains("alpha"));
        assert!(table.contains("beta"));
        assert!(table.contains("depth_high_water"));
    }

    #[test]
    fn test_cli_parses_put() {
        let cli = Cli::try_parse_from(["simplequeue-cli", "put", "-q", "jobs", "hello"]).unwrap();
        match cli.command {
            Commands::Put { queue, data } => {
                assert_eq!(queue, "jobs");
                assert_eq!(data, "hello");
            }
            _ => panic!("expected put"),
        }
    }
}
