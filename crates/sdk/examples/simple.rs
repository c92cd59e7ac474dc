//! Simple SDK Example
//!
//! Demonstrates basic usage of the SimpleQueue SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package simplequeue-daemon -- --max-depth=100
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use simplequeue_sdk::{QueueClient, StatsFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SimpleQueue SDK - Simple Example");
    println!("================================\n");

    // 1. Connect to daemon
    println!("1. Connecting to daemon...");
    let client = QueueClient::connect("http://127.0.0.1:8080").await?;
    println!("   ✓ Connected\n");

    // 2. Put a few payloads
    println!("2. Putting payloads on 'example'...");
    for data in ["first", "second", "third"] {
        let response = client.put("example", data).await?;
        println!("   ✓ {} (depth {})", data, response.depth);
    }
    println!();

    // 3. Dump without consuming
    println!("3. Dumping queue...");
    for line in client.dump("example").await? {
        println!("     | {}", line);
    }
    println!();

    // 4. Get in FIFO order
    println!("4. Getting payloads...");
    while let Some(data) = client.get("example").await? {
        println!("   ✓ {}", data);
    }
    println!();

    // 5. Stats
    println!("5. Stats:");
    println!("{}", client.stats(StatsFormat::Text).await?);

    println!("✓ Example completed successfully!");

    Ok(())
}
