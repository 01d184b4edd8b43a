//! Topic client

use cmqkit_core::{
    ActionClient, ApiResponse, AssertError, Reconciled, Reconciler, ResourceApi,
    ResourceDescriptor, StatusTable, StatusTables, Transport, TransportError,
};
use tracing::debug;

use crate::params::TopicParams;

/// Topic operations over one transport
#[derive(Debug, Clone)]
pub struct TopicClient<T> {
    reconciler: Reconciler<ActionClient<T>>,
}

impl<T: Transport> TopicClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_status_table(transport, StatusTable::default())
    }

    /// Topics may report not-found and duplicate names with their own codes
    pub fn with_status_table(transport: T, table: StatusTable) -> Self {
        let tables = StatusTables {
            topic: table,
            ..StatusTables::default()
        };
        Self {
            reconciler: Reconciler::with_tables(ActionClient::new(transport), tables),
        }
    }

    pub fn transport(&self) -> &T {
        self.reconciler.api().transport()
    }

    pub fn status_table(&self) -> &StatusTable {
        &self.reconciler.tables().topic
    }

    pub async fn get_topic_attributes(&self, name: &str) -> Result<ApiResponse, TransportError> {
        self.reconciler
            .api()
            .get_attributes(&ResourceDescriptor::topic(name))
            .await
    }

    pub async fn create_topic(
        &self,
        name: &str,
        params: &TopicParams,
    ) -> Result<ApiResponse, TransportError> {
        self.reconciler
            .api()
            .create_resource(&ResourceDescriptor::topic(name), params)
            .await
    }

    /// Make sure the topic exists, creating it with `params` if missing
    pub async fn assert_topic(
        &self,
        name: &str,
        params: &TopicParams,
    ) -> Result<Reconciled, AssertError> {
        debug!(topic = %name, "Asserting topic");
        self.reconciler
            .assert_resource(&ResourceDescriptor::topic(name), params)
            .await
    }
}
