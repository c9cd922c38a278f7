//! Error types for the Occupancy Ledger.

use crate::model::ResourceIndex;
use thiserror::Error;

/// Contract violations reported by [`OccupancyLedger`](super::OccupancyLedger).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// The index is outside the ledger.
    #[error("Unknown resource: {0}")]
    UnknownResource(ResourceIndex),

    /// `claim` on a resource that already has an owner.
    #[error("{resource} already occupied by {owner}")]
    AlreadyOccupied {
        resource: ResourceIndex,
        owner: String,
    },

    /// `release` on a free resource.
    #[error("{0} is not occupied")]
    NotOccupied(ResourceIndex),
}
