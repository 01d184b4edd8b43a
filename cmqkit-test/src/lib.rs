//! Test utilities for cmqkit
//!
//! Provides utilities for exercising clients without a real service:
//! - An in-memory message-queue service answering with real status codes
//! - A transport wrapper that records requests and injects failures
//! - Tracing setup for test output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmqkit_test::{FakeCmq, RecordingTransport};
//!
//! #[tokio::test]
//! async fn test_queue() {
//!     let transport = RecordingTransport::new(FakeCmq::new());
//!     // Hand `transport` to a QueueClient or TopicClient
//!     assert_eq!(transport.total_calls(), 0);
//! }
//! ```

pub mod fake;
pub mod recording;

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use fake::{DuplicateStyle, FakeCmq, FakeResource};
pub use recording::RecordingTransport;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "cmqkit=debug";

/// Install a test-friendly tracing subscriber once per process
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}
