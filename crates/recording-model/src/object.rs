//! Tracked lead object

use crate::codes::{ObservedClass, ObstacleDetectState, PreSelectState};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Lead vehicle or obstacle tracked over part of a recording.
///
/// All signals are indexed relative to the object: sample 0 belongs to
/// global index `start_index`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectTrack {
    /// Object ID from the tracker
    #[serde(default)]
    pub id: u32,

    /// Global index of the first object sample
    pub start_index: usize,

    /// Longitudinal distance (meters)
    pub distance_x: Vec<f64>,

    /// Pre-selection state
    pub preselect: Vec<PreSelectState>,

    /// Obstacle detection state
    pub obstacle_detect: Vec<ObstacleDetectState>,

    /// Observed class
    pub observed_class: Vec<ObservedClass>,
}

impl ObjectTrack {
    /// Number of object samples
    pub fn len(&self) -> usize {
        self.distance_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance_x.is_empty()
    }

    /// Global index one past the last object sample
    pub fn end_index(&self) -> usize {
        self.start_index + self.len()
    }

    /// Object-relative index for a global index, if the object exists there
    pub fn relative_index(&self, global_index: usize) -> Option<usize> {
        global_index
            .checked_sub(self.start_index)
            .filter(|&idx| idx < self.len())
    }

    /// Check that all object signals share one time base
    pub fn validate(&self) -> Result<(), ModelError> {
        let expected = self.distance_x.len();
        let lengths = [
            ("preselect", self.preselect.len()),
            ("obstacle_detect", self.obstacle_detect.len()),
            ("observed_class", self.observed_class.len()),
        ];

        for (signal, actual) in lengths {
            if actual != expected {
                return Err(ModelError::LengthMismatch {
                    signal,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(start_index: usize, len: usize) -> ObjectTrack {
        ObjectTrack {
            id: 7,
            start_index,
            distance_x: vec![50.0; len],
            preselect: vec![PreSelectState::FIRST_EGO_LANE; len],
            obstacle_detect: vec![ObstacleDetectState::OBSTACLE; len],
            observed_class: vec![ObservedClass::CAR; len],
        }
    }

    #[test]
    fn test_relative_index() {
        let obj = object(10, 5);
        assert_eq!(obj.end_index(), 15);
        assert_eq!(obj.relative_index(9), None);
        assert_eq!(obj.relative_index(10), Some(0));
        assert_eq!(obj.relative_index(14), Some(4));
        assert_eq!(obj.relative_index(15), None);
    }

    #[test]
    fn test_validate_length_mismatch() {
        let mut obj = object(0, 5);
        assert!(obj.validate().is_ok());

        obj.observed_class.pop();
        assert_eq!(
            obj.validate(),
            Err(ModelError::LengthMismatch {
                signal: "observed_class",
                expected: 5,
                actual: 4
            })
        );
    }
}
