//! Model Error Types

use thiserror::Error;

/// Errors while building or checking recording and event data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Timestamps must be strictly increasing
    #[error("Timestamp at index {index} ({value}) does not increase over its predecessor ({previous})")]
    NonMonotonicTimestamps {
        index: usize,
        previous: f64,
        value: f64,
    },

    /// Two signals that must share a time base have different lengths
    #[error("{signal} has {actual} samples, expected {expected}")]
    LengthMismatch {
        signal: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Event stop index lies before its start index
    #[error("Invalid event window: start index {start} > stop index {stop}")]
    InvalidWindow { start: usize, stop: usize },

    /// Object signals do not cover the requested global index range
    #[error("Object covering [{object_start}, {object_end}) does not cover event window [{start}, {stop}]")]
    ObjectOutOfRange {
        object_start: usize,
        object_end: usize,
        start: usize,
        stop: usize,
    },
}
