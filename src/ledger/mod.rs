//! # Occupancy Ledger
//!
//! The single source of truth for who holds which resource.
//!
//! ## Structure
//!
//! - [`OccupancyLedger`] - Ordered collection of [`Resource`]s indexed by [`ResourceIndex`]
//! - [`error`] - [`LedgerError`] for contract violations
//!
//! ## Contract
//!
//! `claim` requires a free resource and `release` an occupied one. The ledger
//! does not decide *whether* a transition should happen; the
//! [`ScanDispatcher`](crate::dispatcher::ScanDispatcher) checks first and only
//! ever requests legal transitions. A violation is reported as a
//! [`LedgerError`] and leaves the ledger untouched.
//!
//! The ledger is owned by exactly one dispatcher and needs no locking.

pub mod error;

pub use error::*;

use crate::model::{Identity, Resource, ResourceIndex, ResourceStatus};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyLedger {
    resources: Vec<Resource>,
}

impl OccupancyLedger {
    /// Creates a ledger with `count` free resources.
    pub fn new(count: usize) -> Self {
        Self {
            resources: vec![Resource::new(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, r: ResourceIndex) -> Option<&Resource> {
        self.resources.get(r.0)
    }

    pub fn status(&self, r: ResourceIndex) -> Result<ResourceStatus, LedgerError> {
        self.resource(r).map(Resource::status)
    }

    /// Assigns a free resource to `id`.
    pub fn claim(&mut self, r: ResourceIndex, id: Identity) -> Result<(), LedgerError> {
        let resource = self.resource_mut(r)?;
        if let Some(owner) = resource.owner() {
            return Err(LedgerError::AlreadyOccupied {
                resource: r,
                owner: owner.to_string(),
            });
        }
        info!(resource = %r, identity = %id, "Claimed");
        resource.set_owner(Some(id));
        Ok(())
    }

    /// Frees an occupied resource and returns its former owner.
    pub fn release(&mut self, r: ResourceIndex) -> Result<Identity, LedgerError> {
        let resource = self.resource_mut(r)?;
        match resource.owner().cloned() {
            Some(owner) => {
                resource.set_owner(None);
                info!(resource = %r, identity = %owner, "Released");
                Ok(owner)
            }
            None => Err(LedgerError::NotOccupied(r)),
        }
    }

    /// True iff `r` is occupied and its owner is byte-for-byte equal to `id`.
    pub fn owner_is(&self, r: ResourceIndex, id: &Identity) -> bool {
        self.get(r).and_then(Resource::owner) == Some(id)
    }

    /// Every resource currently held by `id`, in index order.
    pub fn owned_by<'a>(&'a self, id: &'a Identity) -> impl Iterator<Item = ResourceIndex> + 'a {
        self.indices().filter(move |r| self.owner_is(*r, id))
    }

    pub fn all_occupied(&self) -> bool {
        self.resources.iter().all(Resource::occupied)
    }

    /// Occupied flag per resource, in index order.
    pub fn occupancy(&self) -> Vec<bool> {
        self.resources.iter().map(Resource::occupied).collect()
    }

    pub fn indices(&self) -> impl Iterator<Item = ResourceIndex> {
        (0..self.resources.len()).map(ResourceIndex)
    }

    fn resource(&self, r: ResourceIndex) -> Result<&Resource, LedgerError> {
        self.resources.get(r.0).ok_or(LedgerError::UnknownResource(r))
    }

    fn resource_mut(&mut self, r: ResourceIndex) -> Result<&mut Resource, LedgerError> {
        debug!(resource = %r, "Mutating");
        self.resources
            .get_mut(r.0)
            .ok_or(LedgerError::UnknownResource(r))
    }
}
