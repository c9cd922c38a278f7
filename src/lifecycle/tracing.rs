//! # Observability & Tracing
//!
//! Structured logging for the controller.
//!
//! ## Configuration
//!
//! Compact format without module prefixes (`with_target(false)`); verbosity is
//! controlled by the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Lifecycle**: Self test, startup, shutdown
//! - **Diagnostics**: Every scanned UID and every event-log line, emitted at
//!   `info` under the `diagnostic` target
//! - **Transitions**: Claims and releases with `resource` and `identity` fields
//! - **Feedback**: Alerts raised, replaced and expired
//! - **Reader Failures**: Read misses at `debug`, failed session halts at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Diagnostic output only
//! RUST_LOG=diagnostic=info cargo run
//!
//! # Transitions and alerts
//! RUST_LOG=info cargo run
//!
//! # Every poll, classification and flash
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**, scanning an unknown tag while Seat 2 is taken:
//!
//! ```text
//! INFO Card scanned - UID: DE AD BE EF
//! INFO Access denied identity=DE AD BE EF
//! INFO Access denied
//! INFO Alert raised kind=Unauthorized line1=UNAUTHORIZED line2=ACCESS DENIED
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Log lines stay short; structured fields carry the context
        .compact()
        .init();
}
