//! # Scan Dispatcher
//!
//! The occupancy state machine: turns one tag scan into a ledger transition
//! plus its outward effects.
//!
//! ## Transition Table
//!
//! | Resource state | Scanned identity | Transition | Effects |
//! |---|---|---|---|
//! | Occupied by `id` | `id` | → Free | output off, log |
//! | Occupied by `other` | authorized for it | none | log, "already occupied" alert, flash that output |
//! | Free | authorized for it | → Occupied(`id`) | output on, log |
//! | any | not authorized | none | log, then "all occupied" alert if every resource is held, else "unauthorized" alert and flash every output |
//!
//! Ownership is tested before authorization. A tag that holds a resource
//! always releases it on its next scan, which is what lets the same tag toggle
//! its seat rather than collide with itself.
//!
//! ## One Poll Cycle
//!
//! 1. Retire an expired alert.
//! 2. Ask the reader for a new tag; return if there is none or the read fails.
//! 3. [`dispatch`](ScanDispatcher::dispatch) the identity.
//! 4. End the reader session.
//! 5. Debounce: block for `debounce_ms` so a lingering tag is not re-read.
//!
//! Every step of a cycle completes before the next cycle starts. Flash and
//! debounce delays are awaited in place, so the reader and alert timer are not
//! serviced meanwhile and nothing else can touch the ledger.

mod outcome;

pub use outcome::*;

use crate::actuation::{ActuationAdapter, FlashPattern};
use crate::feedback::{AlertKind, FeedbackChannel};
use crate::framework::{Actuator, Clock, DisplaySink, TagReader, TokioClock};
use crate::ledger::OccupancyLedger;
use crate::lifecycle::{AccessConfig, ConfigError};
use crate::model::{Identity, ResourceIndex, ResourceStatus};
use crate::registry::{Classification, IdentityRegistry};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub struct ScanDispatcher<R, A, D, C = TokioClock>
where
    R: TagReader,
    A: Actuator,
    D: DisplaySink,
    C: Clock,
{
    reader: R,
    actuation: ActuationAdapter<A>,
    display: D,
    clock: C,
    registry: IdentityRegistry,
    ledger: OccupancyLedger,
    feedback: FeedbackChannel,
    conflict_flash: FlashPattern,
    unauthorized_flash: FlashPattern,
    debounce: Duration,
    self_test_step: Duration,
    scans: u64,
}

impl<R, A, D, C> ScanDispatcher<R, A, D, C>
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
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = IdentityRegistry::new(config.authorized_set()?, config.resource_count);
        Ok(Self {
            reader,
            actuation: ActuationAdapter::new(actuator),
            display,
            clock,
            registry,
            ledger: OccupancyLedger::new(config.resource_count),
            feedback: FeedbackChannel::new(
                config.log_capacity,
                config.status_lines,
                config.alert_duration_ms,
            ),
            conflict_flash: config.conflict_flash,
            unauthorized_flash: config.unauthorized_flash,
            debounce: config.debounce(),
            self_test_step: config.self_test_step(),
            scans: 0,
        })
    }

    /// Power-on sequence: output self test, sync, first status view.
    pub async fn startup(&mut self) {
        info!(
            resources = self.registry.resource_count(),
            "--- Seat Access Controller ---"
        );
        self.actuation
            .self_test(self.ledger.len(), self.self_test_step)
            .await;
        self.actuation.sync(&self.ledger);
        self.feedback.log("System ready");
        self.render();
    }

    /// Runs one poll cycle. Returns the outcome if a tag was processed.
    pub async fn poll_cycle(&mut self) -> Option<ScanOutcome> {
        if self.feedback.tick(self.clock.now_ms()) {
            self.render();
        }

        if !self.reader.present().await {
            return None;
        }
        let id = match self.reader.read_identity().await {
            Ok(id) => id,
            Err(e) => {
                debug!(error = %e, "Read miss");
                return None;
            }
        };
        info!(target: "diagnostic", "Card scanned - UID: {}", id);

        let outcome = self.dispatch(&id).await;

        // Debounce even if the halt failed: the tag is still in the field
        if let Err(e) = self.reader.end_session().await {
            warn!(error = %e, "Session halt failed");
        }
        sleep(self.debounce).await;
        Some(outcome)
    }

    /// Applies one scan of `id` to the ledger and emits its feedback.
    pub async fn dispatch(&mut self, id: &Identity) -> ScanOutcome {
        self.scans += 1;
        debug!(identity = %id, scan = self.scans, "Dispatch");

        let owned = self.ledger.owned_by(id).next();
        if let Some(r) = owned {
            return self.release(r);
        }

        match self.registry.classify(id) {
            Classification::Unauthorized => self.deny(id).await,
            Classification::AuthorizedFor(r) => match self.ledger.status(r) {
                Ok(ResourceStatus::Free) => self.assign(r, id),
                Ok(ResourceStatus::Occupied(owner)) => self.conflict(r, owner, id).await,
                Err(e) => {
                    warn!(resource = %r, error = %e, "Authorized for unknown resource");
                    self.deny(id).await
                }
            },
        }
    }

    fn release(&mut self, r: ResourceIndex) -> ScanOutcome {
        if let Err(e) = self.ledger.release(r) {
            warn!(resource = %r, error = %e, "Release rejected");
        }
        self.actuation.sync(&self.ledger);
        self.feedback.log(format!("User has left {}", r));
        self.render();
        ScanOutcome::Released(r)
    }

    fn assign(&mut self, r: ResourceIndex, id: &Identity) -> ScanOutcome {
        if let Err(e) = self.ledger.claim(r, id.clone()) {
            warn!(resource = %r, error = %e, "Claim rejected");
        }
        self.actuation.sync(&self.ledger);
        self.feedback.log(format!("{} assigned", r));
        self.render();
        ScanOutcome::Assigned(r)
    }

    async fn conflict(&mut self, r: ResourceIndex, owner: Identity, id: &Identity) -> ScanOutcome {
        info!(resource = %r, identity = %id, owner = %owner, "Already occupied");
        self.feedback.log(format!("{} occupied", r));
        self.feedback.raise_alert(
            AlertKind::AlreadyOccupied,
            Some(id.to_string()),
            self.clock.now_ms(),
        );
        self.render();
        self.actuation
            .flash(&[r], self.conflict_flash, &self.ledger)
            .await;
        ScanOutcome::Conflict { resource: r, owner }
    }

    async fn deny(&mut self, id: &Identity) -> ScanOutcome {
        info!(identity = %id, "Access denied");
        self.feedback.log("Access denied");
        let all_occupied = self.ledger.all_occupied();
        if all_occupied {
            self.feedback
                .raise_alert(AlertKind::AllOccupied, Some(id.to_string()), self.clock.now_ms());
            self.render();
        } else {
            self.feedback
                .raise_alert(AlertKind::Unauthorized, Some(id.to_string()), self.clock.now_ms());
            self.render();
            let all: Vec<ResourceIndex> = self.ledger.indices().collect();
            self.actuation
                .flash(&all, self.unauthorized_flash, &self.ledger)
                .await;
        }
        ScanOutcome::Denied { all_occupied }
    }

    fn render(&mut self) {
        self.feedback.render(&self.ledger, &mut self.display);
    }

    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    pub fn feedback(&self) -> &FeedbackChannel {
        &self.feedback
    }

    pub fn scans(&self) -> u64 {
        self.scans
    }

    pub fn snapshot(&self) -> AccessSnapshot {
        AccessSnapshot {
            resources: self
                .ledger
                .indices()
                .filter_map(|r| self.ledger.status(r).ok())
                .collect(),
            log: self.feedback.event_log().iter().cloned().collect(),
            alert: self.feedback.active_alert().cloned(),
            scans: self.scans,
        }
    }
}
