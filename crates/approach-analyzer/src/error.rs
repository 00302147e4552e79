//! Analyzer Error Types

use recording_model::ModelError;
use thiserror::Error;

/// Errors that abort the analysis of a single event
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzerError {
    /// Event or recording data is inconsistent
    #[error("Invalid event data: {0}")]
    Model(#[from] ModelError),

    /// Classification slices differ in length
    #[error("Slice length mismatch: preselect={preselect}, obstacle_detect={obstacle_detect}, observed_class={observed_class}")]
    SliceLengthMismatch {
        preselect: usize,
        obstacle_detect: usize,
        observed_class: usize,
    },

    /// Recording has no timestamps to align against
    #[error("Recording has no timestamps")]
    EmptyRecording,

    /// Timestamp outside the recording time range
    #[error("Timestamp {timestamp} outside recording range [{first}, {last}]")]
    TimestampOutOfRange { timestamp: f64, first: f64, last: f64 },

    /// Global index outside the recording
    #[error("Global index {index} outside recording of {len} cycles")]
    IndexOutOfRange { index: usize, len: usize },

    /// Global index outside the object lifetime
    #[error("Global index {index} outside object lifetime [{object_start}, {object_end})")]
    OutsideObject {
        index: usize,
        object_start: usize,
        object_end: usize,
    },

    /// Event carries no ego speed samples
    #[error("Event has no ego speed samples")]
    NoEgoSpeed,
}

impl AnalyzerError {
    /// Whether the error points at corrupt input data rather than a lookup miss
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            AnalyzerError::Model(_) | AnalyzerError::SliceLengthMismatch { .. } | AnalyzerError::NoEgoSpeed
        )
    }
}
