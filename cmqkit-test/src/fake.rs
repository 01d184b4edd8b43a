//! In-memory message-queue service

use async_trait::async_trait;
use cmqkit_core::status::{CODE_DUPLICATE_NAME, CODE_GENERIC_ERROR, CODE_NOT_FOUND};
use cmqkit_core::{ApiResponse, RequestParams, ResourceKind, Transport, TransportError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::{Map, Value};
use tracing::info;

/// How the fake reports a create for a name that already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateStyle {
    /// Dedicated duplicate-name code
    #[default]
    Dedicated,
    /// Generic error code with the duplicate-name code inside the message
    Embedded,
}

#[derive(Debug, Clone)]
pub struct FakeResource {
    pub name: String,
    pub kind: ResourceKind,
    pub id: String,
    pub create_time: i64,
    pub attributes: Map<String, Value>,
}

impl FakeResource {
    fn new(kind: ResourceKind, name: String, attributes: Map<String, Value>) -> Self {
        Self {
            id: format!("{}-{}", kind, uuid::Uuid::new_v4().simple()),
            create_time: chrono::Utc::now().timestamp(),
            name,
            kind,
            attributes,
        }
    }
}

enum Action {
    GetAttributes,
    Create,
}

fn parse_action(action: &str) -> Option<(ResourceKind, Action)> {
    match action {
        "GetQueueAttributes" => Some((ResourceKind::Queue, Action::GetAttributes)),
        "CreateQueue" => Some((ResourceKind::Queue, Action::Create)),
        "GetTopicAttributes" => Some((ResourceKind::Topic, Action::GetAttributes)),
        "CreateTopic" => Some((ResourceKind::Topic, Action::Create)),
        _ => None,
    }
}

/// Answers `Get*Attributes` and `Create*` the way the real service does
///
/// Creates are atomic per name, so concurrent creators see exactly one
/// success and duplicate-name errors for the rest.
#[derive(Debug, Default)]
pub struct FakeCmq {
    resources: DashMap<(ResourceKind, String), FakeResource>,
    duplicate_style: DuplicateStyle,
}

impl FakeCmq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_style(mut self, style: DuplicateStyle) -> Self {
        self.duplicate_style = style;
        self
    }

    /// Seed a resource as if some other client had created it
    pub fn insert(&self, kind: ResourceKind, name: &str) {
        let resource = FakeResource::new(kind, name.to_string(), Map::new());
        self.resources.insert((kind, name.to_string()), resource);
    }

    pub fn get(&self, kind: ResourceKind, name: &str) -> Option<FakeResource> {
        self.resources
            .get(&(kind, name.to_string()))
            .map(|r| r.value().clone())
    }

    pub fn contains(&self, kind: ResourceKind, name: &str) -> bool {
        self.resources.contains_key(&(kind, name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Answer one request synchronously
    pub fn handle(&self, params: &RequestParams) -> ApiResponse {
        let request_id = uuid::Uuid::new_v4().to_string();

        let Some((kind, action)) = parse_action(params.action()) else {
            return ApiResponse::error(
                CODE_GENERIC_ERROR,
                format!("unknown action: {}", params.action()),
            )
            .with_request_id(request_id);
        };

        let Some(name) = params.get_str(kind.name_field()) else {
            return ApiResponse::error(
                CODE_GENERIC_ERROR,
                format!("missing parameter: {}", kind.name_field()),
            )
            .with_request_id(request_id);
        };

        let response = match action {
            Action::GetAttributes => self.get_attributes(kind, name),
            Action::Create => self.create(kind, name, params),
        };
        response.with_request_id(request_id)
    }

    fn get_attributes(&self, kind: ResourceKind, name: &str) -> ApiResponse {
        match self.resources.get(&(kind, name.to_string())) {
            Some(resource) => {
                let mut response = ApiResponse::ok().with_attribute("createTime", resource.create_time);
                response.attributes.extend(resource.attributes.clone());
                response
            }
            None => ApiResponse::error(CODE_NOT_FOUND, format!("{} is not exist", kind)),
        }
    }

    fn create(&self, kind: ResourceKind, name: &str, params: &RequestParams) -> ApiResponse {
        match self.resources.entry((kind, name.to_string())) {
            Entry::Occupied(_) => self.duplicate(kind),
            Entry::Vacant(slot) => {
                let attributes = params
                    .fields()
                    .iter()
                    .filter(|(key, _)| key.as_str() != kind.name_field())
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                let resource = FakeResource::new(kind, name.to_string(), attributes);
                info!(kind = %kind, name = %name, id = %resource.id, "Creating resource");
                let id_field = match kind {
                    ResourceKind::Queue => "queueId",
                    ResourceKind::Topic => "topicId",
                };
                let response = ApiResponse::ok().with_attribute(id_field, resource.id.clone());
                slot.insert(resource);
                response
            }
        }
    }

    fn duplicate(&self, kind: ResourceKind) -> ApiResponse {
        match self.duplicate_style {
            DuplicateStyle::Dedicated => ApiResponse::error(
                CODE_DUPLICATE_NAME,
                format!("{} is already existed", kind),
            ),
            DuplicateStyle::Embedded => ApiResponse::error(
                CODE_GENERIC_ERROR,
                format!("({}){} name is duplicated", CODE_DUPLICATE_NAME, kind),
            ),
        }
    }
}

#[async_trait]
impl Transport for FakeCmq {
    async fn request(&self, params: RequestParams) -> Result<ApiResponse, TransportError> {
        Ok(self.handle(&params))
    }
}
