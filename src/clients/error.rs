//! Error types for talking to the controller loop.

use crate::model::ResourceIndex;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The controller loop is no longer receiving requests.
    #[error("Controller closed")]
    ControllerClosed,

    /// The controller dropped the response channel without answering.
    #[error("Controller dropped response channel")]
    ControllerDropped,

    #[error("Unknown resource: {0}")]
    UnknownResource(ResourceIndex),

    /// The controller task panicked or was aborted.
    #[error("Controller task failed: {0}")]
    TaskFailed(String),
}
