//! cmqkit - idempotent provisioning for a cloud message-queue service
//!
//! cmqkit builds the flat action bodies the service expects for queues and
//! topics, and makes sure named resources exist without failing when several
//! processes race to create them. Signing and HTTP are left to a
//! [`Transport`] supplied by the caller.
//!
//! ```rust,no_run
//! use cmqkit::{CmqClient, Config, Transport};
//!
//! async fn provision<T: Transport>(transport: T) -> anyhow::Result<()> {
//!     let client = CmqClient::with_config(transport, Config::load()?);
//!     client.assert_queue("orders").await?;
//!     client.assert_topic("order-events").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;

pub use client::CmqClient;
pub use config::Config;
pub use endpoint::EndpointConfig;

pub use cmqkit_core::{
    ApiResponse, AssertError, Outcome, Reconciled, RequestParams, ResourceDescriptor,
    ResourceKind, Stage, StatusRule, StatusTable, StatusTables, Transport, TransportError,
};
pub use cmqkit_queue::{QueueClient, QueueParams};
pub use cmqkit_topic::{FilterType, TopicClient, TopicParams};
