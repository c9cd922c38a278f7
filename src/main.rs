//! # Seat Access Demo
//!
//! Runs the controller against a simulated board: a scripted reader replays a
//! short sequence of scans, relays and display frames are written to the log.
//!
//! The sequence mirrors the reference installation:
//! 1.  Tag A claims Seat 1.
//! 2.  Tag B claims Seat 2.
//! 3.  Tag A leaves Seat 1.
//! 4.  An unknown tag is denied.

use seat_access::framework::mock::{ScriptedReader, ScriptedScan};
use seat_access::framework::{Actuator, DisplaySink};
use seat_access::lifecycle::{setup_tracing, AccessConfig, AccessSystem};
use seat_access::model::{Identity, ResourceIndex};
use std::time::Duration;
use tracing::{info, info_span, Instrument};

const CONFIG_ENV: &str = "SEAT_ACCESS_CONFIG";

/// Relay bank that only logs.
struct LoggedRelays;

impl Actuator for LoggedRelays {
    fn set(&mut self, resource: ResourceIndex, on: bool) {
        info!(%resource, on, "Relay");
    }
}

/// Display that logs each frame.
struct LoggedDisplay;

impl DisplaySink for LoggedDisplay {
    fn render_status(&mut self, occupied: &[bool], recent: &[String]) {
        info!(?occupied, ?recent, "Display status");
    }

    fn render_alert(&mut self, line1: &str, line2: &str, identity_hex: Option<&str>) {
        info!(line1, line2, identity = identity_hex.unwrap_or("-"), "Display alert");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => AccessConfig::load(&path).map_err(|e| e.to_string())?,
        Err(_) => AccessConfig::default(),
    };
    info!(
        resources = config.resource_count,
        authorized = config.authorized.len(),
        "Starting seat access controller"
    );

    let mut script: Vec<ScriptedScan> = Vec::new();
    if let [first, second, ..] = config.authorized.as_slice() {
        script.push(ScriptedScan::Tag(first.identity.clone()));
        script.push(ScriptedScan::Tag(second.identity.clone()));
        script.push(ScriptedScan::Tag(first.identity.clone()));
    }
    script.push(ScriptedScan::tag(Identity::from([0xDE, 0xAD, 0xBE, 0xEF])));

    let reader = ScriptedReader::new(script);
    let reader_handle = reader.handle();
    let system = AccessSystem::start(&config, reader, LoggedRelays, LoggedDisplay)
        .map_err(|e| e.to_string())?;

    let span = info_span!("scan_replay");
    async {
        while reader_handle.remaining() > 0 {
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
        // Let the last cycle finish its debounce
        tokio::time::sleep(config.debounce() + Duration::from_millis(500)).await;
    }
    .instrument(span)
    .await;

    let snapshot = system.client.snapshot().await.map_err(|e| e.to_string())?;
    info!(
        occupancy = ?snapshot.occupancy(),
        scans = snapshot.scans,
        alert = ?snapshot.alert.as_ref().map(|a| a.kind),
        "Final state"
    );
    for line in &snapshot.log {
        info!(line = %line, "Event log");
    }

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Demo completed successfully");
    Ok(())
}
