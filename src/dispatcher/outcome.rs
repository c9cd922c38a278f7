use crate::feedback::AlertOverlay;
use crate::model::{Identity, ResourceIndex, ResourceStatus};
use serde::{Deserialize, Serialize};

/// What a single scan did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// The owner scanned again and the resource is free now.
    Released(ResourceIndex),
    /// A free resource was assigned to the scanned identity.
    Assigned(ResourceIndex),
    /// The resource this identity may claim is held by `owner`. Nothing changed.
    Conflict {
        resource: ResourceIndex,
        owner: Identity,
    },
    /// The identity is not authorized. Nothing changed.
    Denied { all_occupied: bool },
}

impl ScanOutcome {
    /// True if the scan changed the ledger.
    pub fn is_transition(&self) -> bool {
        matches!(self, ScanOutcome::Released(_) | ScanOutcome::Assigned(_))
    }
}

/// Point-in-time view of the controller, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSnapshot {
    pub resources: Vec<ResourceStatus>,
    /// Full event log, oldest first.
    pub log: Vec<String>,
    pub alert: Option<AlertOverlay>,
    /// Scans dispatched since startup.
    pub scans: u64,
}

impl AccessSnapshot {
    pub fn occupancy(&self) -> Vec<bool> {
        self.resources.iter().map(ResourceStatus::is_occupied).collect()
    }
}
