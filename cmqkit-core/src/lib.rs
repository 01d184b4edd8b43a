//! Core types and the resource reconciler for cmqkit
//!
//! This crate provides the request/response shapes shared by the queue and
//! topic clients, the status-code table used to classify remote answers, and
//! the assert-exists-or-create [`Reconciler`].

pub mod error;
pub mod params;
pub mod reconcile;
pub mod resource;
pub mod response;
pub mod status;
pub mod transport;

pub use error::{AssertError, Stage, TransportError};
pub use params::RequestParams;
pub use reconcile::{Reconciled, Reconciler};
pub use resource::{CreationParams, ResourceDescriptor, ResourceKind};
pub use response::ApiResponse;
pub use status::{Outcome, StatusRule, StatusTable, StatusTables};
pub use transport::{ActionClient, ResourceApi, Transport};
