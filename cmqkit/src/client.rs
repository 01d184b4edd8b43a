//! Client bundling queues and topics over one transport

use std::sync::Arc;

use cmqkit_core::{AssertError, Reconciled, Transport};
use cmqkit_queue::QueueClient;
use cmqkit_topic::TopicClient;
use tracing::debug;

use crate::config::Config;

/// Queue and topic clients sharing one transport and one [`Config`]
pub struct CmqClient<T: ?Sized> {
    transport: Arc<T>,
    queues: QueueClient<Arc<T>>,
    topics: TopicClient<Arc<T>>,
    config: Config,
}

impl<T: Transport> CmqClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    pub fn with_config(transport: T, config: Config) -> Self {
        Self::from_shared(Arc::new(transport), config)
    }
}

impl<T: Transport + ?Sized> CmqClient<T> {
    /// Build from a transport that is already shared, e.g. `Arc<dyn Transport>`
    pub fn from_shared(transport: Arc<T>, config: Config) -> Self {
        debug!(
            region = %config.endpoint.region,
            inner_net = config.endpoint.inner_net,
            "Building client"
        );
        Self {
            queues: QueueClient::with_status_table(transport.clone(), config.status.queue.clone()),
            topics: TopicClient::with_status_table(transport.clone(), config.status.topic.clone()),
            transport,
            config,
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn queues(&self) -> &QueueClient<Arc<T>> {
        &self.queues
    }

    pub fn topics(&self) -> &TopicClient<Arc<T>> {
        &self.topics
    }

    /// Assert a queue, creating it with the configured queue parameters
    pub async fn assert_queue(&self, name: &str) -> Result<Reconciled, AssertError> {
        self.queues.assert_queue(name, &self.config.queue).await
    }

    /// Assert a topic, creating it with the configured topic parameters
    pub async fn assert_topic(&self, name: &str) -> Result<Reconciled, AssertError> {
        self.topics.assert_topic(name, &self.config.topic).await
    }
}
