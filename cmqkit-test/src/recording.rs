//! Transport wrapper that records requests and injects failures

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use cmqkit_core::{ApiResponse, RequestParams, Transport, TransportError};
use parking_lot::Mutex;
use tokio::sync::Barrier;
use tracing::debug;

/// Wraps a transport, keeping every request it forwards
///
/// Failures registered with [`RecordingTransport::fail_on`] are returned for
/// every request with that action; the inner transport is not called.
pub struct RecordingTransport<T> {
    inner: T,
    requests: Mutex<Vec<RequestParams>>,
    failures: Mutex<HashMap<String, TransportError>>,
    read_barrier: Option<(Arc<Barrier>, usize)>,
    reads: AtomicUsize,
}

impl<T: Transport> RecordingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            read_barrier: None,
            reads: AtomicUsize::new(0),
        }
    }

    /// Hold the first `parties` attributes reads until all of them are answered
    ///
    /// Lets a test line up concurrent reconciliations so that all of them
    /// observe a missing resource before any of them creates it. Reads after
    /// the first `parties` pass straight through.
    pub fn with_read_barrier(mut self, parties: usize) -> Self {
        self.read_barrier = Some((Arc::new(Barrier::new(parties)), parties));
        self
    }

    pub fn fail_on(&self, action: impl Into<String>, error: TransportError) {
        self.failures.lock().insert(action.into(), error);
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn requests(&self) -> Vec<RequestParams> {
        self.requests.lock().clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.action().to_string())
            .collect()
    }

    pub fn calls(&self, action: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.action() == action)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl<T: Transport> Transport for RecordingTransport<T> {
    async fn request(&self, params: RequestParams) -> Result<ApiResponse, TransportError> {
        self.requests.lock().push(params.clone());

        let injected = self.failures.lock().get(params.action()).cloned();
        if let Some(error) = injected {
            debug!(action = %params.action(), error = %error, "Injecting transport failure");
            return Err(error);
        }

        let is_read = params.action().ends_with("Attributes");
        let response = self.inner.request(params).await;

        if is_read {
            if let Some((barrier, parties)) = &self.read_barrier {
                if self.reads.fetch_add(1, Ordering::SeqCst) < *parties {
                    barrier.wait().await;
                }
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeCmq;

    #[tokio::test]
    async fn test_records_and_counts() {
        let transport = RecordingTransport::new(FakeCmq::new());

        transport
            .request(RequestParams::new("GetQueueAttributes").with("queueName", "q"))
            .await
            .unwrap();
        transport
            .request(RequestParams::new("CreateQueue").with("queueName", "q"))
            .await
            .unwrap();

        assert_eq!(transport.total_calls(), 2);
        assert_eq!(transport.calls("CreateQueue"), 1);
        assert_eq!(transport.actions(), ["GetQueueAttributes", "CreateQueue"]);
        assert_eq!(transport.inner().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_skips_inner() {
        let transport = RecordingTransport::new(FakeCmq::new());
        transport.fail_on("CreateTopic", TransportError::Timeout);

        let result = transport
            .request(RequestParams::new("CreateTopic").with("topicName", "t"))
            .await;

        assert_eq!(result, Err(TransportError::Timeout));
        assert_eq!(transport.total_calls(), 1);
        assert!(transport.inner().is_empty());
    }

    #[tokio::test]
    async fn test_read_barrier_releases_after_first_parties() {
        let transport = RecordingTransport::new(FakeCmq::new()).with_read_barrier(2);
        let read = || {
            transport.request(RequestParams::new("GetQueueAttributes").with("queueName", "q"))
        };

        let (a, b) = tokio::join!(read(), read());
        assert_eq!(a.unwrap().code, 4440);
        assert_eq!(b.unwrap().code, 4440);

        let third = tokio::time::timeout(std::time::Duration::from_secs(5), read())
            .await
            .expect("read after the barrier should not wait");
        assert_eq!(third.unwrap().code, 4440);
        assert_eq!(transport.calls("GetQueueAttributes"), 3);
    }
}
