//! # System Lifecycle & Orchestration
//!
//! Builds the controller from configuration, runs it, and stops it.
//!
//! ## Main Components
//!
//! - [`AccessConfig`] - Tunables and the static authorization table
//! - [`AccessController`] - The single cooperative loop owning the dispatcher
//! - [`AccessSystem`] - Spawns the controller task and shuts it down
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of the request channel
//! 2. **Controller detects closure** - `receiver.recv()` returns `None` between cycles
//! 3. **Await completion** - The task logs its scan count and exits
//!
//! A poll cycle in progress is never interrupted; shutdown waits for it.

pub mod access_system;
pub mod config;
pub mod controller;
pub mod tracing;

pub use access_system::*;
pub use config::*;
pub use controller::*;
pub use self::tracing::*;
