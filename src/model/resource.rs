use serde::{Deserialize, Serialize};

use std::fmt::Display;

use super::Identity;

/// Zero-based, type-safe index of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIndex(pub usize);

impl From<usize> for ResourceIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl Display for ResourceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0 + 1)
    }
}

/// Represents one controllable seat or room and its indicator.
///
/// # Occupancy
/// A resource stores only its optional owner; `occupied()` is derived from it,
/// so the pair `(occupied, owner)` can never disagree.
///
/// Resources are created free at startup and only reset on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    owner: Option<Identity>,
}

impl Resource {
    /// Creates a free resource.
    pub fn new() -> Self {
        Self { owner: None }
    }

    pub fn occupied(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<&Identity> {
        self.owner.as_ref()
    }

    pub fn status(&self) -> ResourceStatus {
        match &self.owner {
            Some(id) => ResourceStatus::Occupied(id.clone()),
            None => ResourceStatus::Free,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Option<Identity>) {
        self.owner = owner;
    }
}

/// Observable state of a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceStatus {
    Free,
    Occupied(Identity),
}

impl ResourceStatus {
    pub fn is_occupied(&self) -> bool {
        matches!(self, ResourceStatus::Occupied(_))
    }
}

/// One row of the static authorization table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedEntry {
    pub identity: Identity,
    pub resource: ResourceIndex,
}

impl AuthorizedEntry {
    pub fn new(identity: impl Into<Identity>, resource: ResourceIndex) -> Self {
        Self {
            identity: identity.into(),
            resource,
        }
    }
}
