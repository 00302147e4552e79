//! Approach events

use crate::attributes::EventAttributes;
use crate::error::ModelError;
use crate::object::ObjectTrack;
use crate::plot::PlotData;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Event type assigned by the upstream event detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Approach test case, not yet analyzed
    Approach,
    /// Approach test case annotated with approach statistics
    StatApproach,
    /// Any other event type, passed through untouched
    #[serde(untagged)]
    Other(String),
}

/// Test case error flagged by an upstream stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestcaseErrorType {
    #[default]
    None,
    /// Object lost during the test case
    ObjectLost,
    /// Object ID changed during the test case
    ObjectChanged,
    /// Required signals missing in the recording
    SignalMissing,
    /// Ego speed outside the test case range
    EgoSpeedOutOfRange,
}

impl TestcaseErrorType {
    pub fn is_error(&self) -> bool {
        *self != Self::None
    }
}

/// One detected approach occurrence within a recording.
///
/// The event window is `[start_index, stop_index]` in global indices and
/// `ego_speed` holds one sample (m/s) per window cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: u64,
    pub event_type: EventType,
    #[serde(default)]
    pub testcase_error: TestcaseErrorType,
    pub start_index: usize,
    pub stop_index: usize,
    pub start_time: f64,
    pub stop_time: f64,
    pub ego_speed: Vec<f64>,
    pub object: ObjectTrack,
    #[serde(default)]
    pub attributes: EventAttributes,
    #[serde(default)]
    pub plot_data: PlotData,
}

impl Event {
    /// Number of cycles in the event window
    pub fn window_len(&self) -> usize {
        (self.stop_index + 1).saturating_sub(self.start_index)
    }

    /// Event window in object-relative indices
    pub fn relative_object_window(&self) -> Result<Range<usize>, ModelError> {
        let out_of_range = || ModelError::ObjectOutOfRange {
            object_start: self.object.start_index,
            object_end: self.object.end_index(),
            start: self.start_index,
            stop: self.stop_index,
        };

        let start = self
            .object
            .relative_index(self.start_index)
            .ok_or_else(out_of_range)?;
        let stop = self
            .object
            .relative_index(self.stop_index)
            .ok_or_else(out_of_range)?;
        Ok(start..stop + 1)
    }

    /// Check the event window against the ego and object signals
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.stop_index < self.start_index {
            return Err(ModelError::InvalidWindow {
                start: self.start_index,
                stop: self.stop_index,
            });
        }

        if self.ego_speed.len() != self.window_len() {
            return Err(ModelError::LengthMismatch {
                signal: "ego_speed",
                expected: self.window_len(),
                actual: self.ego_speed.len(),
            });
        }

        self.object.validate()?;
        self.relative_object_window().map(|_| ())
    }
}
