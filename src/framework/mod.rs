//! Hardware capability seams for the access controller.
//!
//! This module defines the narrow interfaces through which the occupancy state
//! machine reaches the outside world.
//!
//! # Main Components
//!
//! - [`TagReader`] - Presence signal, identity read and session halt
//! - [`Actuator`] - One binary output per resource
//! - [`DisplaySink`] - Status and alert rendering
//! - [`Clock`] / [`TokioClock`] - Monotonic time for alert expiry
//! - [`ReaderError`] - Non-fatal reader failures
//!
//! # Testing
//!
//! See [`mock`] module for in-memory doubles of every capability.

pub mod capability;
pub mod error;
pub mod mock;

// Re-export core types for convenience
pub use capability::*;
pub use error::*;
