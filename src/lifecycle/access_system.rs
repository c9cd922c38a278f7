use crate::clients::{AccessClient, ClientError};
use crate::framework::{Actuator, DisplaySink, TagReader, TokioClock};
use crate::lifecycle::{AccessConfig, AccessController, ConfigError};
use tracing::{error, info};

/// The runtime orchestrator for one access-controlled installation.
///
/// `AccessSystem` is responsible for:
/// - **Validation**: Rejecting a bad config before any output is touched
/// - **Lifecycle Management**: Spawning the controller task and stopping it
/// - **Wiring**: Handing the reader, actuator and display to the controller
///
/// # Example
///
/// ```ignore
/// let system = AccessSystem::start(&config, reader, relays, display)?;
///
/// let snapshot = system.client.snapshot().await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct AccessSystem {
    /// Client for querying the running controller
    pub client: AccessClient,

    /// Task handle of the controller loop (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl AccessSystem {
    /// Validates `config` and spawns the controller loop on the current runtime.
    pub fn start<R, A, D>(
        config: &AccessConfig,
        reader: R,
        actuator: A,
        display: D,
    ) -> Result<Self, ConfigError>
    where
        R: TagReader + 'static,
        A: Actuator + 'static,
        D: DisplaySink + 'static,
    {
        let (controller, client) =
            AccessController::new(config, reader, actuator, display, TokioClock::new(), 32)?;
        let handle = tokio::spawn(controller.run());
        info!(resources = config.resource_count, "System started");
        Ok(Self { client, handle })
    }

    /// Gracefully shuts the controller down.
    ///
    /// Dropping the client closes the request channel; the controller notices
    /// between poll cycles and leaves its loop. Other clones of the client keep
    /// the controller alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), ClientError> {
        info!("Shutting down system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Controller task failed: {:?}", e);
            return Err(ClientError::TaskFailed(e.to_string()));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
