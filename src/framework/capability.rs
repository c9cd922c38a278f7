//! # Hardware Capabilities
//!
//! The controller never talks to hardware directly. Everything outside the
//! occupancy state machine is consumed through the narrow traits in this
//! module, so the same dispatcher runs against a real RC522 reader, a GPIO
//! relay bank, or the in-memory doubles in [`mock`](super::mock).
//!
//! | Trait | Role |
//! |---|---|
//! | [`TagReader`] | Presence signal, identity read, session halt |
//! | [`Actuator`] | One binary output per resource |
//! | [`DisplaySink`] | Status view and alert overlay |
//! | [`Clock`] | Monotonic milliseconds for alert expiry |

use async_trait::async_trait;
use tokio::time::Instant;

use super::error::ReaderError;
use crate::model::{Identity, ResourceIndex};

/// A contactless tag reader.
///
/// # Session Protocol
/// `read_identity` is only meaningful right after `present` returned `true`.
/// After every processed scan the caller invokes `end_session` so the same tag
/// is not reported as newly present on the next poll.
#[async_trait]
pub trait TagReader: Send {
    /// Returns `true` when a new tag has entered the field.
    async fn present(&mut self) -> bool;

    /// Selects the present tag and returns its identity.
    async fn read_identity(&mut self) -> Result<Identity, ReaderError>;

    /// Halts the tag and ends the reader session.
    async fn end_session(&mut self) -> Result<(), ReaderError>;
}

/// A bank of binary outputs, one per resource (relay, LED, lock...).
pub trait Actuator: Send {
    fn set(&mut self, resource: ResourceIndex, on: bool);
}

/// Where status and alert views end up.
pub trait DisplaySink: Send {
    /// Normal view: occupancy per resource and the most recent log lines, newest last.
    fn render_status(&mut self, occupied: &[bool], recent: &[String]);

    /// Alert view, shown instead of the status view while an alert is active.
    fn render_alert(&mut self, line1: &str, line2: &str, identity_hex: Option<&str>);
}

pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary fixed origin. Never goes backwards.
    fn now_ms(&self) -> u64;
}

/// [`Clock`] backed by `tokio::time::Instant`.
///
/// Follows tokio's paused clock in tests, so alert expiry and debounce share
/// one notion of time.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
