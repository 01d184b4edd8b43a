//! Queue client

use cmqkit_core::{
    ActionClient, ApiResponse, AssertError, Reconciled, Reconciler, ResourceApi,
    ResourceDescriptor, StatusTable, StatusTables, Transport, TransportError,
};
use tracing::debug;

use crate::params::QueueParams;

/// Queue operations over one transport
#[derive(Debug, Clone)]
pub struct QueueClient<T> {
    reconciler: Reconciler<ActionClient<T>>,
}

impl<T: Transport> QueueClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_status_table(transport, StatusTable::default())
    }

    /// Use a custom status table for queue responses
    pub fn with_status_table(transport: T, table: StatusTable) -> Self {
        let tables = StatusTables {
            queue: table,
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
        &self.reconciler.tables().queue
    }

    /// Raw `GetQueueAttributes` answer
    pub async fn get_queue_attributes(&self, name: &str) -> Result<ApiResponse, TransportError> {
        self.reconciler
            .api()
            .get_attributes(&ResourceDescriptor::queue(name))
            .await
    }

    /// Raw `CreateQueue` answer; a duplicate name is reported as-is
    pub async fn create_queue(
        &self,
        name: &str,
        params: &QueueParams,
    ) -> Result<ApiResponse, TransportError> {
        self.reconciler
            .api()
            .create_resource(&ResourceDescriptor::queue(name), params)
            .await
    }

    /// Make sure the queue exists, creating it with `params` if missing
    pub async fn assert_queue(
        &self,
        name: &str,
        params: &QueueParams,
    ) -> Result<Reconciled, AssertError> {
        debug!(queue = %name, "Asserting queue");
        self.reconciler
            .assert_resource(&ResourceDescriptor::queue(name), params)
            .await
    }
}
