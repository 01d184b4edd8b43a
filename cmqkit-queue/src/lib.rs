//! Message queues for cmqkit
//!
//! Provides:
//! - Queue creation parameters with the service's documented defaults
//! - GetQueueAttributes, CreateQueue
//! - AssertQueue (create if missing, tolerate creation races)

pub mod client;
mod params;

pub use client::QueueClient;
pub use params::QueueParams;
