//! # Seat Access
//!
//! > **Exclusive, revocable occupancy of seats and rooms, driven by tag scans.**
//!
//! A small fixed set of resources, each backed by one relay or indicator, is
//! handed out to contactless tags. A scan either claims a free resource,
//! releases the resource the tag already holds, or is rejected with an alert.
//! Tag readers, relays, displays and clocks are external collaborators behind
//! narrow traits; this crate is the state machine in between.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One Owner, One Loop
//!
//! The [`OccupancyLedger`](ledger::OccupancyLedger) is owned by exactly one
//! [`ScanDispatcher`](dispatcher::ScanDispatcher), which runs inside exactly one
//! task. Scans are processed strictly one at a time, so the ledger never needs
//! a lock. Flash sequences and the post-scan debounce are awaited in place.
//!
//! ### Outputs Follow the Ledger
//!
//! Every steady actuator level is derived from the ledger. Feedback flashes
//! always end by restoring the ledger-derived level; nothing writes an output
//! behind the ledger's back.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. No Fatal Errors in the Core
//! Read misses, unknown tags and occupied seats are *outcomes*
//! ([`ScanOutcome`](dispatcher::ScanOutcome)) surfaced through logs and alerts,
//! never errors that escape the poll loop. Typed errors (`thiserror`) are used
//! where something genuinely can fail: config validation, ledger contract
//! violations, reader I/O, and client requests.
//!
//! ### 2. Observability
//! We use `tracing` everywhere with structured fields. Event-log lines and
//! scanned UIDs are mirrored under the `diagnostic` target.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! [`Identity`](model::Identity), [`ResourceIndex`](model::ResourceIndex),
//! [`Resource`](model::Resource).
//!
//! ### 2. The Seams ([`framework`])
//! Capability traits for reader, actuator, display and clock, plus the
//! in-memory doubles in [`framework::mock`].
//!
//! ### 3. The Components
//! - [`registry`] - Who may claim what
//! - [`ledger`] - Who holds what
//! - [`dispatcher`] - One scan → one transition + effects
//! - [`feedback`] - Event log, alert overlay, rendering
//! - [`actuation`] - Ledger → outputs, flashes
//!
//! ### 4. The Orchestrator ([`lifecycle`]) and Interface ([`clients`])
//! [`AccessSystem`](lifecycle::AccessSystem) spawns the controller task;
//! [`AccessClient`](clients::AccessClient) reads its state between cycles.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Simulated reader replaying four scans
//! RUST_LOG=info cargo run
//!
//! # With a custom authorization table
//! SEAT_ACCESS_CONFIG=seats.json RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod actuation;
pub mod clients;
pub mod dispatcher;
pub mod feedback;
pub mod framework;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod registry;
