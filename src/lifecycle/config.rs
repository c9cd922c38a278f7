//! # Configuration
//!
//! All tunables of the controller plus the static authorization table.
//!
//! Every field has a default matching the two-seat reference installation, so
//! a config file only needs the values it changes:
//!
//! ```json
//! {
//!   "debounce_ms": 800,
//!   "authorized": [
//!     { "identity": "13 A3 50 11", "resource": 0 },
//!     { "identity": "03 32 C0 0D", "resource": 1 }
//!   ]
//! }
//! ```

use crate::actuation::FlashPattern;
use crate::model::{AuthorizedEntry, Identity, ResourceIndex};
use crate::registry::{AuthorizedSet, RegistryError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading or validating an [`AccessConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Invalid authorization table: {0}")]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Number of seats/rooms, one actuator each.
    pub resource_count: usize,
    /// UID length every authorized identity must have.
    pub identity_len: usize,
    /// How long an alert occludes the status view.
    pub alert_duration_ms: u64,
    /// Blocking delay after each processed scan.
    pub debounce_ms: u64,
    /// Capacity of the rolling event log.
    pub log_capacity: usize,
    /// Log lines shown in the status view.
    pub status_lines: usize,
    /// Idle delay between reader polls.
    pub poll_interval_ms: u64,
    /// How long each output is lit during the power-on self test.
    pub self_test_step_ms: u64,
    /// Pulse sequence on the contested resource when it is already occupied.
    pub conflict_flash: FlashPattern,
    /// Pulse sequence on every resource for an unknown tag.
    pub unauthorized_flash: FlashPattern,
    pub authorized: Vec<AuthorizedEntry>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            resource_count: 2,
            identity_len: 4,
            alert_duration_ms: 3000,
            debounce_ms: 1000,
            log_capacity: 5,
            status_lines: 3,
            poll_interval_ms: 20,
            self_test_step_ms: 500,
            conflict_flash: FlashPattern::new(2, 100, 100),
            unauthorized_flash: FlashPattern::new(3, 100, 100),
            authorized: vec![
                AuthorizedEntry::new(Identity::from([0x13, 0xA3, 0x50, 0x11]), ResourceIndex(0)),
                AuthorizedEntry::new(Identity::from([0x03, 0x32, 0xC0, 0x0D]), ResourceIndex(1)),
            ],
        }
    }
}

impl AccessConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resource_count == 0 {
            return Err(ConfigError::Invalid("resource_count must be at least 1".into()));
        }
        if self.identity_len == 0 {
            return Err(ConfigError::Invalid("identity_len must be at least 1".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be at least 1".into()));
        }
        if self.log_capacity < self.status_lines {
            return Err(ConfigError::Invalid(format!(
                "log_capacity ({}) is smaller than status_lines ({})",
                self.log_capacity, self.status_lines
            )));
        }
        self.authorized_set()?;
        Ok(())
    }

    pub fn authorized_set(&self) -> Result<AuthorizedSet, RegistryError> {
        AuthorizedSet::new(
            self.authorized.iter().cloned(),
            self.resource_count,
            self.identity_len,
        )
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn self_test_step(&self) -> Duration {
        Duration::from_millis(self.self_test_step_ms)
    }
}
