//! # Identity Registry
//!
//! Static authorization: which tag may claim which resource.
//!
//! The table is built once from [`AccessConfig`](crate::lifecycle::AccessConfig)
//! and never changes at runtime. Lookups are pure; an identity that is not in
//! the table is simply [`Classification::Unauthorized`], not an error.

pub mod error;

pub use error::*;

use crate::model::{AuthorizedEntry, Identity, ResourceIndex};
use std::collections::HashMap;
use tracing::debug;

/// Result of looking an identity up in the [`AuthorizedSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Unauthorized,
    AuthorizedFor(ResourceIndex),
}

/// Immutable mapping from identity to the one resource it may claim.
#[derive(Debug, Clone, Default)]
pub struct AuthorizedSet {
    entries: HashMap<Identity, ResourceIndex>,
}

impl AuthorizedSet {
    /// Builds the set, rejecting duplicates, out-of-range resources and
    /// identities whose length differs from `identity_len`.
    pub fn new(
        entries: impl IntoIterator<Item = AuthorizedEntry>,
        resource_count: usize,
        identity_len: usize,
    ) -> Result<Self, RegistryError> {
        let mut map = HashMap::new();
        for entry in entries {
            if entry.resource.0 >= resource_count {
                return Err(RegistryError::ResourceOutOfRange {
                    identity: entry.identity.to_string(),
                    resource: entry.resource.0,
                    resource_count,
                });
            }
            if entry.identity.len() != identity_len {
                return Err(RegistryError::IdentityLength {
                    identity: entry.identity.to_string(),
                    expected: identity_len,
                    actual: entry.identity.len(),
                });
            }
            let key = entry.identity.to_string();
            if map.insert(entry.identity, entry.resource).is_some() {
                return Err(RegistryError::DuplicateIdentity(key));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, id: &Identity) -> Option<ResourceIndex> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classifies scanned identities against an [`AuthorizedSet`].
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    authorized: AuthorizedSet,
    resource_count: usize,
}

impl IdentityRegistry {
    pub fn new(authorized: AuthorizedSet, resource_count: usize) -> Self {
        Self {
            authorized,
            resource_count,
        }
    }

    pub fn classify(&self, id: &Identity) -> Classification {
        let result = match self.authorized.get(id) {
            Some(resource) => Classification::AuthorizedFor(resource),
            None => Classification::Unauthorized,
        };
        debug!(identity = %id, ?result, "Classified");
        result
    }

    pub fn resource_count(&self) -> usize {
        self.resource_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_a() -> Identity {
        Identity::from([0x13, 0xA3, 0x50, 0x11])
    }

    fn tag_b() -> Identity {
        Identity::from([0x03, 0x32, 0xC0, 0x0D])
    }

    fn registry() -> IdentityRegistry {
        let set = AuthorizedSet::new(
            [
                AuthorizedEntry::new(tag_a(), ResourceIndex(0)),
                AuthorizedEntry::new(tag_b(), ResourceIndex(1)),
            ],
            2,
            4,
        )
        .unwrap();
        IdentityRegistry::new(set, 2)
    }

    #[test]
    fn test_classify_known_and_unknown() {
        let registry = registry();
        assert_eq!(
            registry.classify(&tag_a()),
            Classification::AuthorizedFor(ResourceIndex(0))
        );
        assert_eq!(
            registry.classify(&tag_b()),
            Classification::AuthorizedFor(ResourceIndex(1))
        );
        assert_eq!(
            registry.classify(&Identity::from([0xDE, 0xAD, 0xBE, 0xEF])),
            Classification::Unauthorized
        );
    }

    #[test]
    fn test_near_miss_is_unauthorized() {
        // One bit off from tag A
        let near = Identity::from([0x13, 0xA3, 0x50, 0x10]);
        assert_eq!(registry().classify(&near), Classification::Unauthorized);
    }

    #[test]
    fn test_rejects_duplicate_identity() {
        let result = AuthorizedSet::new(
            [
                AuthorizedEntry::new(tag_a(), ResourceIndex(0)),
                AuthorizedEntry::new(tag_a(), ResourceIndex(1)),
            ],
            2,
            4,
        );
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateIdentity("13 A3 50 11".to_string())
        );
    }

    #[test]
    fn test_rejects_out_of_range_resource() {
        let result = AuthorizedSet::new([AuthorizedEntry::new(tag_a(), ResourceIndex(2))], 2, 4);
        assert!(matches!(
            result,
            Err(RegistryError::ResourceOutOfRange { resource: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_identity_length() {
        let long = Identity::from([1, 2, 3, 4, 5, 6, 7]);
        let result = AuthorizedSet::new([AuthorizedEntry::new(long, ResourceIndex(0))], 2, 4);
        assert!(matches!(
            result,
            Err(RegistryError::IdentityLength { expected: 4, actual: 7, .. })
        ));
    }
}
