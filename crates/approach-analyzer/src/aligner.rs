//! Timestamp to index alignment

use crate::error::AnalyzerError;
use recording_model::{ObjectTrack, Recording};

/// Index of the timestamp nearest to `timestamp`.
///
/// `timestamps` must be strictly increasing. On a tie between two neighbours
/// the earlier one wins. Timestamps outside `[first, last]` are rejected.
pub fn nearest_index(timestamps: &[f64], timestamp: f64) -> Result<usize, AnalyzerError> {
    let (first, last) = match (timestamps.first(), timestamps.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(AnalyzerError::EmptyRecording),
    };

    if !(timestamp >= first && timestamp <= last) {
        return Err(AnalyzerError::TimestampOutOfRange {
            timestamp,
            first,
            last,
        });
    }

    // first index with t >= timestamp, always within bounds after the range check
    let upper = timestamps.partition_point(|&t| t < timestamp);
    if upper == 0 {
        return Ok(0);
    }

    let lower = upper - 1;
    if timestamp - timestamps[lower] <= timestamps[upper] - timestamp {
        Ok(lower)
    } else {
        Ok(upper)
    }
}

/// Maps absolute timestamps onto recording and object index spaces
#[derive(Debug, Clone, Copy)]
pub struct IndexAligner<'r> {
    recording: &'r Recording,
}

impl<'r> IndexAligner<'r> {
    pub fn new(recording: &'r Recording) -> Self {
        Self { recording }
    }

    pub fn recording(&self) -> &'r Recording {
        self.recording
    }

    /// Global index of the nearest recording timestamp
    pub fn global_index(&self, timestamp: f64) -> Result<usize, AnalyzerError> {
        nearest_index(self.recording.timestamps(), timestamp)
    }

    /// Index relative to the object's first sample for an absolute timestamp.
    ///
    /// The object start itself maps to 0. Timestamps before the object start
    /// are rejected; the upper end is left to the caller.
    pub fn object_index(&self, object: &ObjectTrack, timestamp: f64) -> Result<usize, AnalyzerError> {
        let global_index = self.global_index(timestamp)?;
        global_index
            .checked_sub(object.start_index)
            .ok_or(AnalyzerError::OutsideObject {
                index: global_index,
                object_start: object.start_index,
                object_end: object.end_index(),
            })
    }
}
