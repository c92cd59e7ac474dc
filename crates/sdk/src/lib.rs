//! SimpleQueue SDK - Rust Client Library
//!
//! Provides a convenient client for the SimpleQueue daemon.
//!
//! # Example
//!
//! ```no_run
//! use simplequeue_sdk::{QueueClient, StatsFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QueueClient::connect("http://127.0.0.1:8080").await?;
//!
//!     client.put("events", "hello").await?;
//!     let payload = client.get("events").await?;
//!     assert_eq!(payload.as_deref(), Some("hello"));
//!
//!     println!("{}", client.stats(StatsFormat::Text).await?);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::QueueClient;
pub use error::{Result, SdkError};
pub use types::{
    DumpResponse, GetResponse, PutResponse, RotateResponse, StatsFormat, StatsResponse,
};
