//! # Controller Messages
//!
//! Requests a client can send to the running controller loop. They are
//! answered between poll cycles, never in the middle of one.

use super::ClientError;
use crate::dispatcher::AccessSnapshot;
use crate::model::{ResourceIndex, ResourceStatus};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the controller.
pub type Response<T> = oneshot::Sender<Result<T, ClientError>>;

#[derive(Debug)]
pub enum AccessRequest {
    Snapshot {
        respond_to: Response<AccessSnapshot>,
    },
    Status {
        resource: ResourceIndex,
        respond_to: Response<ResourceStatus>,
    },
}
