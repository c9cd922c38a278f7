//! # Feedback Channel
//!
//! Everything the user sees or that ends up in the diagnostic stream.
//!
//! ## Structure
//!
//! - [`EventLog`] - Bounded ring of recent status lines
//! - [`AlertOverlay`] / [`AlertKind`] - Transient alert that occludes the status view
//! - [`FeedbackChannel`] - Owns both and decides what the display shows
//!
//! ## Rendering Precedence
//!
//! While an alert is active only the alert view is rendered. Otherwise the
//! status view shows occupancy for every resource plus the newest
//! `status_lines` log entries, newest last.
//!
//! ## Alert Lifecycle
//!
//! There is no queue: the newest alert always replaces the current one. An
//! alert retires once `alert_duration_ms` has elapsed, either on [`tick`] or
//! just before a new alert is raised.
//!
//! [`tick`]: FeedbackChannel::tick

mod alert;
mod event_log;

pub use alert::*;
pub use event_log::*;

use crate::framework::DisplaySink;
use crate::ledger::OccupancyLedger;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct FeedbackChannel {
    log: EventLog,
    alert: Option<AlertOverlay>,
    alert_duration_ms: u64,
    status_lines: usize,
}

impl FeedbackChannel {
    pub fn new(log_capacity: usize, status_lines: usize, alert_duration_ms: u64) -> Self {
        Self {
            log: EventLog::new(log_capacity),
            alert: None,
            alert_duration_ms,
            status_lines,
        }
    }

    /// Appends a status line and mirrors it to the diagnostic output.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!(target: "diagnostic", "{}", line);
        self.log.push(line);
    }

    /// Raises an alert, replacing any alert that is still showing.
    pub fn raise_alert(&mut self, kind: AlertKind, context: Option<String>, now_ms: u64) {
        self.tick(now_ms);
        if let Some(previous) = &self.alert {
            debug!(previous = ?previous.kind, "Alert replaced");
        }
        let alert = AlertOverlay::new(kind, context, now_ms);
        info!(kind = ?alert.kind, line1 = %alert.line1, line2 = %alert.line2, "Alert raised");
        self.alert = Some(alert);
    }

    /// Retires the active alert if it has expired.
    ///
    /// Returns `true` when an alert was retired, meaning the status view
    /// should be rendered again.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let expired = self
            .alert
            .as_ref()
            .is_some_and(|a| a.is_expired(now_ms, self.alert_duration_ms));
        if expired {
            self.alert = None;
            debug!(now_ms, "Alert expired");
        }
        expired
    }

    pub fn active_alert(&self) -> Option<&AlertOverlay> {
        self.alert.as_ref()
    }

    pub fn recent(&self) -> Vec<String> {
        self.log.recent(self.status_lines)
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Renders the alert view if an alert is active, the status view otherwise.
    pub fn render(&self, ledger: &OccupancyLedger, display: &mut dyn DisplaySink) {
        match &self.alert {
            Some(alert) => {
                display.render_alert(&alert.line1, &alert.line2, alert.context.as_deref())
            }
            None => display.render_status(&ledger.occupancy(), &self.recent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{Frame, RecordingDisplay};
    use crate::model::{Identity, ResourceIndex};

    fn channel() -> FeedbackChannel {
        FeedbackChannel::new(5, 3, 3000)
    }

    #[test]
    fn test_alert_expires_after_duration() {
        let mut feedback = channel();
        feedback.raise_alert(AlertKind::Unauthorized, None, 1_000);

        assert!(!feedback.tick(3_999));
        assert!(feedback.active_alert().is_some());

        // Exactly at the boundary the alert is gone
        assert!(feedback.tick(4_000));
        assert!(feedback.active_alert().is_none());

        // Nothing left to retire
        assert!(!feedback.tick(10_000));
    }

    #[test]
    fn test_last_alert_wins() {
        let mut feedback = channel();
        feedback.raise_alert(AlertKind::AlreadyOccupied, None, 0);
        feedback.raise_alert(AlertKind::AllOccupied, Some("AA BB CC DD".into()), 500);

        let alert = feedback.active_alert().unwrap();
        assert_eq!(alert.kind, AlertKind::AllOccupied);
        assert_eq!(alert.raised_at_ms, 500);
        assert_eq!(alert.context.as_deref(), Some("AA BB CC DD"));

        // Timer restarted by the second alert
        assert!(!feedback.tick(3_000));
        assert!(feedback.tick(3_500));
    }

    #[test]
    fn test_render_prefers_alert() {
        let ledger = OccupancyLedger::new(2);
        let mut display = RecordingDisplay::new();
        let frames = display.handle();
        let mut feedback = channel();

        feedback.log("Access denied");
        feedback.raise_alert(AlertKind::Unauthorized, Some("DE AD BE EF".into()), 0);
        feedback.render(&ledger, &mut display);

        assert_eq!(
            frames.last().unwrap(),
            Frame::Alert {
                line1: "UNAUTHORIZED".into(),
                line2: "ACCESS DENIED".into(),
                identity: Some("DE AD BE EF".into()),
            }
        );

        feedback.tick(3_000);
        feedback.render(&ledger, &mut display);
        assert_eq!(
            frames.last().unwrap(),
            Frame::Status {
                occupied: vec![false, false],
                recent: vec!["Access denied".into()],
            }
        );
    }

    #[test]
    fn test_status_view_shows_three_newest_lines() {
        let mut ledger = OccupancyLedger::new(2);
        ledger
            .claim(ResourceIndex(1), Identity::from([1, 2, 3, 4]))
            .unwrap();
        let mut display = RecordingDisplay::new();
        let frames = display.handle();
        let mut feedback = channel();

        for line in ["one", "two", "three", "four", "five", "six"] {
            feedback.log(line);
        }
        assert_eq!(feedback.event_log().len(), 5);
        feedback.render(&ledger, &mut display);

        assert_eq!(
            frames.last().unwrap(),
            Frame::Status {
                occupied: vec![false, true],
                recent: vec!["four".into(), "five".into(), "six".into()],
            }
        );
    }
}
