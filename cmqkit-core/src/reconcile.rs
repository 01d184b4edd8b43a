//! Assert-exists-or-create reconciliation for queues and topics
//!
//! One reconciliation issues at most one read and, only after the read has
//! completed, at most one create. Concurrent callers racing on the same name
//! all end in a success: the loser's duplicate-name answer is reported as
//! [`Reconciled::AlreadyCreated`].

use tracing::{info, warn};

use crate::error::{AssertError, Stage};
use crate::resource::{CreationParams, ResourceDescriptor};
use crate::response::ApiResponse;
use crate::status::{Outcome, StatusTable, StatusTables};
use crate::transport::ResourceApi;

/// Success-classified result of a reconciliation
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    /// The read found the resource; carries the attributes response
    Existing(ApiResponse),
    /// This call created the resource; carries the create response
    Created(ApiResponse),
    /// Another creator won the race; carries the duplicate-name response
    AlreadyCreated(ApiResponse),
}

impl Reconciled {
    pub fn response(&self) -> &ApiResponse {
        match self {
            Self::Existing(r) | Self::Created(r) | Self::AlreadyCreated(r) => r,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        match self {
            Self::Existing(r) | Self::Created(r) | Self::AlreadyCreated(r) => r,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Ensures named resources exist, bound to one [`ResourceApi`]
#[derive(Debug, Clone)]
pub struct Reconciler<A> {
    api: A,
    tables: StatusTables,
}

impl<A: ResourceApi> Reconciler<A> {
    pub fn new(api: A) -> Self {
        Self::with_tables(api, StatusTables::default())
    }

    pub fn with_tables(api: A, tables: StatusTables) -> Self {
        Self { api, tables }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tables(&self) -> &StatusTables {
        &self.tables
    }

    /// Make sure `resource` exists, creating it with `params` if it does not
    ///
    /// Transport failures are returned immediately and never taken as
    /// evidence that the resource is missing. Remote codes the status table
    /// does not recognise come back untouched in [`AssertError::Remote`].
    pub async fn assert_resource(
        &self,
        resource: &ResourceDescriptor,
        params: &dyn CreationParams,
    ) -> Result<Reconciled, AssertError> {
        if resource.name.is_empty() {
            return Err(AssertError::InvalidName(resource.name.clone()));
        }
        if params.kind() != resource.kind {
            return Err(AssertError::KindMismatch {
                resource: resource.kind,
                params: params.kind(),
            });
        }

        let table = self.tables.for_kind(resource.kind);

        let current = self
            .api
            .get_attributes(resource)
            .await
            .map_err(|source| AssertError::Transport {
                stage: Stage::Read,
                source,
            })?;

        match table.classify(&current) {
            Some(Outcome::Success) => {
                info!(kind = %resource.kind, name = %resource.name, "Resource already exists");
                Ok(Reconciled::Existing(current))
            }
            Some(Outcome::NotFound) => self.create(resource, params, table).await,
            _ => {
                warn!(
                    kind = %resource.kind,
                    name = %resource.name,
                    code = current.code,
                    message = %current.message,
                    "Unrecognised status while reading resource"
                );
                Err(AssertError::Remote {
                    stage: Stage::Read,
                    response: current,
                })
            }
        }
    }

    async fn create(
        &self,
        resource: &ResourceDescriptor,
        params: &dyn CreationParams,
        table: &StatusTable,
    ) -> Result<Reconciled, AssertError> {
        let created = self
            .api
            .create_resource(resource, params)
            .await
            .map_err(|source| AssertError::Transport {
                stage: Stage::Create,
                source,
            })?;

        match table.classify(&created) {
            Some(Outcome::Success) => {
                info!(kind = %resource.kind, name = %resource.name, "Created resource");
                Ok(Reconciled::Created(created))
            }
            Some(Outcome::DuplicateName) => {
                warn!(
                    kind = %resource.kind,
                    name = %resource.name,
                    code = created.code,
                    "Lost creation race, resource exists"
                );
                Ok(Reconciled::AlreadyCreated(created))
            }
            _ => Err(AssertError::Remote {
                stage: Stage::Create,
                response: created,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::error::TransportError;
    use crate::params::RequestParams;
    use crate::resource::ResourceKind;
    use crate::status::StatusRule;

    type Answer = Result<ApiResponse, TransportError>;

    /// Answers reads and creates from fixed scripts, counting calls
    #[derive(Default)]
    struct Scripted {
        reads: Mutex<VecDeque<Answer>>,
        creates: Mutex<VecDeque<Answer>>,
        read_calls: AtomicUsize,
        create_calls: AtomicUsize,
    }

    impl Scripted {
        fn new(reads: Vec<Answer>, creates: Vec<Answer>) -> Self {
            Self {
                reads: Mutex::new(reads.into()),
                creates: Mutex::new(creates.into()),
                ..Default::default()
            }
        }

        fn calls(&self) -> (usize, usize) {
            (
                self.read_calls.load(Ordering::SeqCst),
                self.create_calls.load(Ordering::SeqCst),
            )
        }
    }

    #[async_trait]
    impl ResourceApi for Scripted {
        async fn get_attributes(&self, _resource: &ResourceDescriptor) -> Answer {
            self.read_calls.fetch_add(1, Ordering::SeqCst);
            self.reads.lock().pop_front().expect("unexpected read")
        }

        async fn create_resource(
            &self,
            _resource: &ResourceDescriptor,
            _params: &dyn CreationParams,
        ) -> Answer {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.creates.lock().pop_front().expect("unexpected create")
        }
    }

    struct QueueDefaults;

    impl CreationParams for QueueDefaults {
        fn kind(&self) -> ResourceKind {
            ResourceKind::Queue
        }

        fn write_fields(&self, _request: &mut RequestParams) {}
    }

    fn orders() -> ResourceDescriptor {
        ResourceDescriptor::queue("orders")
    }

    #[tokio::test]
    async fn test_existing_resource_skips_create() {
        let reconciler = Reconciler::new(Scripted::new(vec![Ok(ApiResponse::ok())], vec![]));

        let result = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap();

        assert!(matches!(result, Reconciled::Existing(_)));
        assert_eq!(reconciler.api().calls(), (1, 0));
    }

    #[tokio::test]
    async fn test_missing_resource_is_created() {
        let reconciler = Reconciler::new(Scripted::new(
            vec![Ok(ApiResponse::error(4440, "queue is not exist"))],
            vec![Ok(ApiResponse::ok().with_attribute("queueId", "queue-abc"))],
        ));

        let result = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap();

        assert!(result.was_created());
        assert_eq!(
            result.response().attribute("queueId"),
            Some(&serde_json::Value::from("queue-abc"))
        );
        assert_eq!(reconciler.api().calls(), (1, 1));
    }

    #[tokio::test]
    async fn test_read_transport_failure_is_fail_fast() {
        let reconciler = Reconciler::new(Scripted::new(
            vec![Err(TransportError::Network("connection reset".into()))],
            vec![],
        ));

        let err = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap_err();

        assert!(matches!(
            err,
            AssertError::Transport { stage: Stage::Read, source: TransportError::Network(_) }
        ));
        assert_eq!(reconciler.api().calls(), (1, 0));
    }

    #[tokio::test]
    async fn test_unrecognised_read_code_passes_through() {
        let denied = ApiResponse::error(4100, "authentication failed").with_request_id("r-1");
        let reconciler = Reconciler::new(Scripted::new(vec![Ok(denied.clone())], vec![]));

        let err = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Read));
        assert_eq!(err.response(), Some(&denied));
        assert_eq!(reconciler.api().calls(), (1, 0));
    }

    #[tokio::test]
    async fn test_duplicate_read_code_is_not_success() {
        let reconciler = Reconciler::new(Scripted::new(
            vec![Ok(ApiResponse::error(4460, "duplicated"))],
            vec![],
        ));

        let err = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Read));
        assert_eq!(reconciler.api().calls(), (1, 0));
    }

    #[tokio::test]
    async fn test_create_transport_failure_propagates() {
        let reconciler = Reconciler::new(Scripted::new(
            vec![Ok(ApiResponse::error(4440, "not exist"))],
            vec![Err(TransportError::Timeout)],
        ));

        let err = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap_err();

        assert!(matches!(
            err,
            AssertError::Transport { stage: Stage::Create, source: TransportError::Timeout }
        ));
        assert_eq!(reconciler.api().calls(), (1, 1));
    }

    #[tokio::test]
    async fn test_dedicated_duplicate_code_is_success() {
        let reconciler = Reconciler::new(Scripted::new(
            vec![Ok(ApiResponse::error(4440, "not exist"))],
            vec![Ok(ApiResponse::error(4460, "queue is already existed"))],
        ));

        let result = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap();

        assert!(matches!(result, Reconciled::AlreadyCreated(ref r) if r.code == 4460));
    }

    #[tokio::test]
    async fn test_embedded_duplicate_marker_is_success() {
        let reconciler = Reconciler::new(Scripted::new(
            vec![Ok(ApiResponse::error(4440, "not exist"))],
            vec![Ok(ApiResponse::error(4000, "create failed, code (4460) duplicated name"))],
        ));

        let result = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap();

        assert!(matches!(result, Reconciled::AlreadyCreated(ref r) if r.code == 4000));
    }

    #[tokio::test]
    async fn test_other_create_error_passes_through() {
        let quota = ApiResponse::error(4000, "queue count exceeds limit");
        let reconciler = Reconciler::new(Scripted::new(
            vec![Ok(ApiResponse::error(4440, "not exist"))],
            vec![Ok(quota.clone())],
        ));

        let err = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Create));
        assert_eq!(err.response(), Some(&quota));
    }

    #[tokio::test]
    async fn test_empty_name_makes_no_calls() {
        let reconciler = Reconciler::new(Scripted::default());

        let err = reconciler
            .assert_resource(&ResourceDescriptor::queue(""), &QueueDefaults)
            .await
            .unwrap_err();

        assert!(matches!(err, AssertError::InvalidName(_)));
        assert_eq!(reconciler.api().calls(), (0, 0));
    }

    #[tokio::test]
    async fn test_whitespace_name_is_left_to_the_service() {
        let reconciler = Reconciler::new(Scripted::new(
            vec![Ok(ApiResponse::error(4000, "invalid queue name"))],
            vec![],
        ));

        let err = reconciler
            .assert_resource(&ResourceDescriptor::queue(" "), &QueueDefaults)
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Read));
        assert_eq!(reconciler.api().calls(), (1, 0));
    }

    #[tokio::test]
    async fn test_kind_mismatch_makes_no_calls() {
        let reconciler = Reconciler::new(Scripted::default());

        let err = reconciler
            .assert_resource(&ResourceDescriptor::topic("events"), &QueueDefaults)
            .await
            .unwrap_err();

        assert!(matches!(err, AssertError::KindMismatch { .. }));
        assert_eq!(reconciler.api().calls(), (0, 0));
    }

    #[tokio::test]
    async fn test_per_kind_table_override() {
        let mut tables = StatusTables::default();
        tables.queue = StatusTable::new(vec![
            StatusRule::code(0, Outcome::Success),
            StatusRule::code(10440, Outcome::NotFound),
        ]);
        let reconciler = Reconciler::with_tables(
            Scripted::new(
                vec![Ok(ApiResponse::error(10440, "missing"))],
                vec![Ok(ApiResponse::ok())],
            ),
            tables,
        );

        let result = reconciler.assert_resource(&orders(), &QueueDefaults).await.unwrap();

        assert!(result.was_created());
    }
}
