// SimpleQueue Core - Queue Engine & Ports
// NO infrastructure dependencies (filesystem and transport live in adapter crates)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{CapacityLimits, Engine, PutReceipt, ShutdownReport};
pub use config::EngineConfig;
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
