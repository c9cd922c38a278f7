use crate::clients::{AccessClient, AccessRequest, ClientError};
use crate::dispatcher::ScanDispatcher;
use crate::framework::{Actuator, Clock, DisplaySink, TagReader};
use crate::lifecycle::{AccessConfig, ConfigError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

/// The cooperative control loop around a [`ScanDispatcher`].
///
/// # Architecture Note
/// This struct is the "Server" half: it owns the dispatcher (and with it the
/// ledger) plus the receiver end of the request channel. One task, one loop:
/// each iteration either answers a client request or, on every tick of the
/// `poll_interval` ticker, runs a full poll cycle. Requests never push a tick
/// back. A chosen poll cycle always runs to
/// completion before the loop looks at the channel again, so requests can
/// never observe a half-applied scan.
pub struct AccessController<R, A, D, C>
where
    R: TagReader,
    A: Actuator,
    D: DisplaySink,
    C: Clock,
{
    receiver: mpsc::Receiver<AccessRequest>,
    dispatcher: ScanDispatcher<R, A, D, C>,
    poll_interval: Duration,
}

impl<R, A, D, C> AccessController<R, A, D, C>
where
    R: TagReader,
    A: Actuator,
    D: DisplaySink,
    C: Clock,
{
    pub fn new(
        config: &AccessConfig,
        reader: R,
        actuator: A,
        display: D,
        clock: C,
        buffer_size: usize,
    ) -> Result<(Self, AccessClient), ConfigError> {
        let dispatcher = ScanDispatcher::new(config, reader, actuator, display, clock)?;
        let (sender, receiver) = mpsc::channel(buffer_size);
        let controller = Self {
            receiver,
            dispatcher,
            poll_interval: config.poll_interval(),
        };
        Ok((controller, AccessClient::new(sender)))
    }

    /// Runs startup, then polls until every client has been dropped.
    pub async fn run(mut self) {
        self.dispatcher.startup().await;
        info!("Controller started");

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(request) => respond(&self.dispatcher, request),
                    None => break,
                },
                _ = ticker.tick() => {
                    if let Some(outcome) = self.dispatcher.poll_cycle().await {
                        debug!(?outcome, "Cycle complete");
                    }
                }
            }
        }

        info!(scans = self.dispatcher.scans(), "Shutdown");
    }
}

fn respond<R, A, D, C>(dispatcher: &ScanDispatcher<R, A, D, C>, request: AccessRequest)
where
    R: TagReader,
    A: Actuator,
    D: DisplaySink,
    C: Clock,
{
    match request {
        AccessRequest::Snapshot { respond_to } => {
            debug!("Snapshot");
            let _ = respond_to.send(Ok(dispatcher.snapshot()));
        }
        AccessRequest::Status {
            resource,
            respond_to,
        } => {
            debug!(%resource, "Status");
            let result = dispatcher
                .ledger()
                .status(resource)
                .map_err(|_| ClientError::UnknownResource(resource));
            let _ = respond_to.send(result);
        }
    }
}
