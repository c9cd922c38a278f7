//! # Actuation Adapter
//!
//! Maps ledger state onto the physical outputs.
//!
//! [`ActuationAdapter::sync`] is the only operation that leaves outputs in a
//! steady state, and it derives every level from the [`OccupancyLedger`].
//! [`ActuationAdapter::flash`] pulses outputs for feedback and always finishes
//! by restoring each flashed output to its ledger-derived level, so no output
//! is ever left in a transient state once the call returns.

use crate::framework::Actuator;
use crate::ledger::OccupancyLedger;
use crate::model::{Resource, ResourceIndex};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// A feedback flash: `pulses` cycles of on for `on_ms`, then off for `off_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashPattern {
    pub pulses: u32,
    pub on_ms: u64,
    pub off_ms: u64,
}

impl FlashPattern {
    pub const fn new(pulses: u32, on_ms: u64, off_ms: u64) -> Self {
        Self {
            pulses,
            on_ms,
            off_ms,
        }
    }

    /// Wall time the flash blocks for.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(
            self.on_ms
                .saturating_add(self.off_ms)
                .saturating_mul(u64::from(self.pulses)),
        )
    }
}

pub struct ActuationAdapter<A: Actuator> {
    actuator: A,
}

impl<A: Actuator> ActuationAdapter<A> {
    pub fn new(actuator: A) -> Self {
        Self { actuator }
    }

    /// Drives every output to match its resource's `occupied` flag.
    pub fn sync(&mut self, ledger: &OccupancyLedger) {
        for (i, on) in ledger.occupancy().into_iter().enumerate() {
            self.actuator.set(ResourceIndex(i), on);
        }
        debug!(occupancy = ?ledger.occupancy(), "Synced");
    }

    /// Drives a single output to its ledger-derived level.
    pub fn sync_one(&mut self, r: ResourceIndex, ledger: &OccupancyLedger) {
        self.actuator.set(r, Self::level(r, ledger));
    }

    /// Pulses `indices` according to `pattern`, then restores each of them
    /// from `ledger`.
    pub async fn flash(
        &mut self,
        indices: &[ResourceIndex],
        pattern: FlashPattern,
        ledger: &OccupancyLedger,
    ) {
        debug!(?indices, ?pattern, "Flash");
        for _ in 0..pattern.pulses {
            for r in indices {
                self.actuator.set(*r, true);
            }
            sleep(Duration::from_millis(pattern.on_ms)).await;
            for r in indices {
                self.actuator.set(*r, false);
            }
            sleep(Duration::from_millis(pattern.off_ms)).await;
        }
        for r in indices {
            self.sync_one(*r, ledger);
        }
    }

    /// Power-on check: lights each output alone for `step`, in index order.
    pub async fn self_test(&mut self, count: usize, step: Duration) {
        info!(count, "Testing outputs...");
        for i in 0..count {
            let r = ResourceIndex(i);
            self.actuator.set(r, true);
            sleep(step).await;
            self.actuator.set(r, false);
        }
    }

    fn level(r: ResourceIndex, ledger: &OccupancyLedger) -> bool {
        ledger.get(r).is_some_and(Resource::occupied)
    }
}
