//! # Capability Errors
//!
//! Failures reported by hardware capabilities. None of them are fatal: the
//! dispatcher ends the current poll cycle and the next cycle is the retry.

use thiserror::Error;

/// Errors a [`TagReader`](super::TagReader) can report.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReaderError {
    /// The tag left the field or never answered the select.
    #[error("No tag answered the read")]
    NoTag,

    /// The tag answered but the frame was corrupt (CRC, collision, timeout).
    #[error("Tag read failed: {0}")]
    ReadFailed(String),

    /// Halting the tag or stopping the session failed.
    #[error("Reader session halt failed: {0}")]
    HaltFailed(String),
}
