use serde::{Deserialize, Serialize};

/// Which condition raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// An authorized tag tried to claim a resource held by someone else.
    AlreadyOccupied,
    /// An unknown tag was scanned while every resource was taken.
    AllOccupied,
    /// An unknown tag was scanned.
    Unauthorized,
}

impl AlertKind {
    /// The two display lines for this alert.
    pub fn lines(self) -> (&'static str, &'static str) {
        match self {
            AlertKind::AlreadyOccupied => ("ALREADY", "OCCUPIED"),
            AlertKind::AllOccupied => ("ALL SEATS", "OCCUPIED"),
            AlertKind::Unauthorized => ("UNAUTHORIZED", "ACCESS DENIED"),
        }
    }
}

/// A time-boxed overlay that hides the status view while it is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertOverlay {
    pub kind: AlertKind,
    pub line1: String,
    pub line2: String,
    /// Hex identity of the tag that caused the alert, if any.
    pub context: Option<String>,
    pub raised_at_ms: u64,
}

impl AlertOverlay {
    pub fn new(kind: AlertKind, context: Option<String>, raised_at_ms: u64) -> Self {
        let (line1, line2) = kind.lines();
        Self {
            kind,
            line1: line1.to_string(),
            line2: line2.to_string(),
            context,
            raised_at_ms,
        }
    }

    /// True once `duration_ms` has elapsed since the alert was raised.
    pub fn is_expired(&self, now_ms: u64, duration_ms: u64) -> bool {
        now_ms.saturating_sub(self.raised_at_ms) >= duration_ms
    }
}
