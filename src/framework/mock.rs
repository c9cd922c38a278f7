//! # Mock Framework
//!
//! In-memory doubles for every hardware capability.
//!
//! Each double is handed to the dispatcher by value, so it keeps its state
//! behind an `Arc<Mutex<..>>` and exposes a cloneable *handle* for the test
//! to inspect afterwards:
//!
//! ```ignore
//! let reader = ScriptedReader::new([ScriptedScan::tag([0x13, 0xA3, 0x50, 0x11])]);
//! let reader_handle = reader.handle();
//! let actuator = RecordingActuator::new(2);
//! let states = actuator.handle();
//!
//! let mut dispatcher = ScanDispatcher::new(&config, reader, actuator, display, clock)?;
//! dispatcher.poll_cycle().await;
//!
//! assert_eq!(states.states(), vec![true, false]);
//! assert_eq!(reader_handle.sessions_ended(), 1);
//! ```

use crate::framework::{Actuator, DisplaySink, ReaderError, TagReader};
use crate::model::{Identity, ResourceIndex};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// READER
// =============================================================================

/// One scripted presence event.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedScan {
    /// A tag enters the field and reads cleanly.
    Tag(Identity),
    /// A tag is detected but the read fails.
    ReadFails,
    /// A tag reads cleanly but halting the session fails.
    HaltFails(Identity),
}

impl ScriptedScan {
    pub fn tag(id: impl Into<Identity>) -> Self {
        ScriptedScan::Tag(id.into())
    }
}

#[derive(Debug, Default)]
struct ReaderState {
    script: VecDeque<ScriptedScan>,
    sessions_ended: usize,
    reads: usize,
}

/// A [`TagReader`] that replays a fixed list of scans, one per poll.
///
/// Once the script is exhausted `present()` keeps returning `false`.
pub struct ScriptedReader {
    state: Arc<Mutex<ReaderState>>,
    current: Option<ScriptedScan>,
}

impl ScriptedReader {
    pub fn new(script: impl IntoIterator<Item = ScriptedScan>) -> Self {
        let state = ReaderState {
            script: script.into_iter().collect(),
            ..ReaderState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            current: None,
        }
    }

    pub fn handle(&self) -> ReaderHandle {
        ReaderHandle {
            state: self.state.clone(),
        }
    }
}

#[async_trait]
impl TagReader for ScriptedReader {
    async fn present(&mut self) -> bool {
        let mut state = self.state.lock().unwrap();
        self.current = state.script.pop_front();
        self.current.is_some()
    }

    async fn read_identity(&mut self) -> Result<Identity, ReaderError> {
        self.state.lock().unwrap().reads += 1;
        match &self.current {
            Some(ScriptedScan::Tag(id)) | Some(ScriptedScan::HaltFails(id)) => Ok(id.clone()),
            Some(ScriptedScan::ReadFails) => {
                self.current = None;
                Err(ReaderError::ReadFailed("scripted CRC error".to_string()))
            }
            None => Err(ReaderError::NoTag),
        }
    }

    async fn end_session(&mut self) -> Result<(), ReaderError> {
        self.state.lock().unwrap().sessions_ended += 1;
        match self.current.take() {
            Some(ScriptedScan::HaltFails(_)) => {
                Err(ReaderError::HaltFailed("scripted halt error".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Test-side view of a [`ScriptedReader`].
#[derive(Clone)]
pub struct ReaderHandle {
    state: Arc<Mutex<ReaderState>>,
}

impl ReaderHandle {
    /// Appends a scan to the end of the script.
    pub fn push(&self, scan: ScriptedScan) {
        self.state.lock().unwrap().script.push_back(scan);
    }

    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap().script.len()
    }

    pub fn sessions_ended(&self) -> usize {
        self.state.lock().unwrap().sessions_ended
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }
}

// =============================================================================
// ACTUATOR
// =============================================================================

#[derive(Debug, Default)]
struct ActuatorState {
    states: Vec<bool>,
    history: Vec<(ResourceIndex, bool)>,
}

/// An [`Actuator`] that records every `set` call and the resulting output levels.
pub struct RecordingActuator {
    state: Arc<Mutex<ActuatorState>>,
}

impl RecordingActuator {
    pub fn new(outputs: usize) -> Self {
        let state = ActuatorState {
            states: vec![false; outputs],
            history: Vec::new(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn handle(&self) -> ActuatorHandle {
        ActuatorHandle {
            state: self.state.clone(),
        }
    }
}

impl Actuator for RecordingActuator {
    fn set(&mut self, resource: ResourceIndex, on: bool) {
        let mut state = self.state.lock().unwrap();
        if resource.0 >= state.states.len() {
            state.states.resize(resource.0 + 1, false);
        }
        state.states[resource.0] = on;
        state.history.push((resource, on));
    }
}

/// Test-side view of a [`RecordingActuator`].
#[derive(Clone)]
pub struct ActuatorHandle {
    state: Arc<Mutex<ActuatorState>>,
}

impl ActuatorHandle {
    /// Current output level of every actuator.
    pub fn states(&self) -> Vec<bool> {
        self.state.lock().unwrap().states.clone()
    }

    /// Every `set` call in order.
    pub fn history(&self) -> Vec<(ResourceIndex, bool)> {
        self.state.lock().unwrap().history.clone()
    }

    /// Calls made for a single actuator, in order.
    pub fn history_for(&self, resource: ResourceIndex) -> Vec<bool> {
        self.state
            .lock()
            .unwrap()
            .history
            .iter()
            .filter(|(r, _)| *r == resource)
            .map(|(_, on)| *on)
            .collect()
    }

    pub fn clear_history(&self) {
        self.state.lock().unwrap().history.clear();
    }
}

// =============================================================================
// DISPLAY
// =============================================================================

/// One rendered view.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Status {
        occupied: Vec<bool>,
        recent: Vec<String>,
    },
    Alert {
        line1: String,
        line2: String,
        identity: Option<String>,
    },
}

/// A [`DisplaySink`] that keeps every frame it was asked to render.
pub struct RecordingDisplay {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn handle(&self) -> DisplayHandle {
        DisplayHandle {
            frames: self.frames.clone(),
        }
    }
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render_status(&mut self, occupied: &[bool], recent: &[String]) {
        self.frames.lock().unwrap().push(Frame::Status {
            occupied: occupied.to_vec(),
            recent: recent.to_vec(),
        });
    }

    fn render_alert(&mut self, line1: &str, line2: &str, identity_hex: Option<&str>) {
        self.frames.lock().unwrap().push(Frame::Alert {
            line1: line1.to_string(),
            line2: line2.to_string(),
            identity: identity_hex.map(str::to_string),
        });
    }
}

/// Test-side view of a [`RecordingDisplay`].
#[derive(Clone)]
pub struct DisplayHandle {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl DisplayHandle {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().unwrap().last().cloned()
    }
}
