//! Seams to the signed-HTTP collaborator

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;
use crate::params::RequestParams;
use crate::resource::{CreationParams, ResourceDescriptor};
use crate::response::ApiResponse;

/// Sends one action call to the service
///
/// Implementations own authentication, signing, endpoint selection and JSON
/// decoding. A returned `Ok` means the service answered; its `code` may still
/// be a business error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, params: RequestParams) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn request(&self, params: RequestParams) -> Result<ApiResponse, TransportError> {
        (**self).request(params).await
    }
}

/// The two remote operations the reconciler depends on
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn get_attributes(
        &self,
        resource: &ResourceDescriptor,
    ) -> Result<ApiResponse, TransportError>;

    async fn create_resource(
        &self,
        resource: &ResourceDescriptor,
        params: &dyn CreationParams,
    ) -> Result<ApiResponse, TransportError>;
}

/// [`ResourceApi`] over a [`Transport`], marshaling each call into the
/// service's flat action body
#[derive(Debug, Clone)]
pub struct ActionClient<T> {
    transport: T,
}

impl<T: Transport> ActionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn dispatch(&self, request: RequestParams) -> Result<ApiResponse, TransportError> {
        debug!(action = %request.action(), fields = request.len(), "Dispatching action");
        self.transport.request(request).await
    }
}

#[async_trait]
impl<T: Transport> ResourceApi for ActionClient<T> {
    async fn get_attributes(
        &self,
        resource: &ResourceDescriptor,
    ) -> Result<ApiResponse, TransportError> {
        self.dispatch(resource.get_attributes_request()).await
    }

    async fn create_resource(
        &self,
        resource: &ResourceDescriptor,
        params: &dyn CreationParams,
    ) -> Result<ApiResponse, TransportError> {
        self.dispatch(resource.create_request(params)).await
    }
}
