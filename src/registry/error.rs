//! Error types for the Identity Registry.

use thiserror::Error;

/// Errors that can occur while building the authorization table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    /// The same identity was listed more than once.
    #[error("Identity listed twice: {0}")]
    DuplicateIdentity(String),

    /// An entry names a resource the system does not have.
    #[error("Identity {identity} maps to resource {resource}, but only {resource_count} resources exist")]
    ResourceOutOfRange {
        identity: String,
        resource: usize,
        resource_count: usize,
    },

    /// An entry's identity length differs from the reader's UID length.
    #[error("Identity {identity} has {actual} bytes, expected {expected}")]
    IdentityLength {
        identity: String,
        expected: usize,
        actual: usize,
    },
}
