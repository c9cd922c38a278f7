use super::{AccessRequest, ClientError};
use crate::dispatcher::AccessSnapshot;
use crate::model::{ResourceIndex, ResourceStatus};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// A cloneable handle for reading controller state while it runs.
///
/// The controller owns the ledger exclusively; clients only ever see copies
/// taken between poll cycles.
#[derive(Clone)]
pub struct AccessClient {
    sender: mpsc::Sender<AccessRequest>,
}

impl AccessClient {
    pub fn new(sender: mpsc::Sender<AccessRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<AccessSnapshot, ClientError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AccessRequest::Snapshot { respond_to })
            .await
            .map_err(|_| ClientError::ControllerClosed)?;
        response.await.map_err(|_| ClientError::ControllerDropped)?
    }

    #[instrument(skip(self))]
    pub async fn status(&self, resource: ResourceIndex) -> Result<ResourceStatus, ClientError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AccessRequest::Status {
                resource,
                respond_to,
            })
            .await
            .map_err(|_| ClientError::ControllerClosed)?;
        response.await.map_err(|_| ClientError::ControllerDropped)?
    }
}
