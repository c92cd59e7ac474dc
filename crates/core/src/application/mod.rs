// Application Layer - Engine, capacity enforcement, overflow log lifecycle

pub mod engine;
pub mod log_controller;
pub mod overflow;

// Re-exports
pub use engine::{Engine, PutReceipt, ShutdownReport};
pub use log_controller::OverflowLogController;
pub use overflow::{evict_oldest, CapacityLimits, OverflowController};
