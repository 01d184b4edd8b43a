//! Endpoint selection data for transports

use cmqkit_core::ResourceKind;
use serde::{Deserialize, Serialize};

pub const BASE_HOST_INNER: &str = "api.tencentyun.com";
pub const BASE_HOST_OUTER: &str = "api.qcloud.com";

/// Where a transport should send requests for each resource kind
///
/// Queues and topics are separate services per region. Hosts on the inner
/// network are reached over plain HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub inner_net: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            inner_net: false,
        }
    }
}

fn default_region() -> String {
    "bj".to_string()
}

impl EndpointConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            inner_net: false,
        }
    }

    pub fn with_inner_net(mut self, inner_net: bool) -> Self {
        self.inner_net = inner_net;
        self
    }

    /// e.g. `cmq-queue-bj`
    pub fn service_type(&self, kind: ResourceKind) -> String {
        format!("cmq-{}-{}", kind, self.region)
    }

    pub fn base_host(&self) -> &'static str {
        if self.inner_net {
            BASE_HOST_INNER
        } else {
            BASE_HOST_OUTER
        }
    }

    pub fn scheme(&self) -> &'static str {
        if self.inner_net {
            "http"
        } else {
            "https"
        }
    }

    pub fn service_host(&self, kind: ResourceKind) -> String {
        format!("{}.{}", self.service_type(kind), self.base_host())
    }

    pub fn service_url(&self, kind: ResourceKind) -> String {
        format!("{}://{}", self.scheme(), self.service_host(kind))
    }
}
