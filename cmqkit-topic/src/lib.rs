//! Publish/subscribe topics for cmqkit
//!
//! Provides:
//! - Topic creation parameters (message size, filter type)
//! - GetTopicAttributes, CreateTopic
//! - AssertTopic (create if missing, tolerate creation races)

pub mod client;
mod params;

pub use client::TopicClient;
pub use params::{FilterType, TopicParams};
