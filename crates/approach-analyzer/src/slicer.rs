//! Scene slice extraction

use crate::aligner::IndexAligner;
use crate::error::AnalyzerError;
use recording_model::{ObjectTrack, ObservedClass, ObstacleDetectState, PreSelectState, TunnelState};

/// Classification signals of an object over one scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSlices<'o> {
    /// Object-relative index of the scene begin
    pub begin_index: usize,
    /// Object-relative index of the scene end (inclusive)
    pub end_index: usize,
    pub preselect: &'o [PreSelectState],
    pub obstacle_detect: &'o [ObstacleDetectState],
    pub observed_class: &'o [ObservedClass],
}

impl SceneSlices<'_> {
    /// Number of cycles in the scene
    pub fn len(&self) -> usize {
        self.preselect.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preselect.is_empty()
    }

    /// Whether the scene starts at the very first object sample
    pub fn starts_at_object_birth(&self) -> bool {
        self.begin_index == 0
    }
}

/// Slice the object signals over `[begin_ts, end_ts]`.
///
/// A scene end before its begin gives empty slices. A scene end past the
/// last object sample is an alignment error.
pub fn extract_scene<'o>(
    aligner: &IndexAligner<'_>,
    object: &'o ObjectTrack,
    begin_ts: f64,
    end_ts: f64,
) -> Result<SceneSlices<'o>, AnalyzerError> {
    let begin_index = aligner.object_index(object, begin_ts)?;
    let end_index = aligner.object_index(object, end_ts)?;

    if end_index < begin_index {
        return Ok(SceneSlices {
            begin_index,
            end_index,
            preselect: &[],
            obstacle_detect: &[],
            observed_class: &[],
        });
    }

    if end_index >= object.len() {
        return Err(AnalyzerError::OutsideObject {
            index: object.start_index + end_index,
            object_start: object.start_index,
            object_end: object.end_index(),
        });
    }

    let range = begin_index..end_index + 1;
    let slice_err = || AnalyzerError::SliceLengthMismatch {
        preselect: object.preselect.len(),
        obstacle_detect: object.obstacle_detect.len(),
        observed_class: object.observed_class.len(),
    };

    Ok(SceneSlices {
        begin_index,
        end_index,
        preselect: object.preselect.get(range.clone()).ok_or_else(slice_err)?,
        obstacle_detect: object.obstacle_detect.get(range.clone()).ok_or_else(slice_err)?,
        observed_class: object.observed_class.get(range).ok_or_else(slice_err)?,
    })
}

/// Tunnel detection state at the recording cycle nearest to `timestamp`
pub fn tunnel_state_at(aligner: &IndexAligner<'_>, timestamp: f64) -> Result<TunnelState, AnalyzerError> {
    let recording = aligner.recording();
    let index = aligner.global_index(timestamp)?;
    recording.tunnel_at(index).ok_or(AnalyzerError::IndexOutOfRange {
        index,
        len: recording.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{approach_event, recording_with_tunnel, recording, ts};
    use recording_model::Recording;

    #[test]
    fn test_inclusive_scene_slices() {
        let rec = recording(200);
        let mut ev = approach_event(50, 100, 60, 140, 20.0, |_| 80.0);
        ev.object.preselect[20] = PreSelectState::NOT_SELECTED;
        ev.object.preselect[30] = PreSelectState::FUSION_OBSTACLE;
        let aligner = IndexAligner::new(&rec);

        let scene = extract_scene(&aligner, &ev.object, ts(70), ts(80)).unwrap();
        assert_eq!(scene.begin_index, 20);
        assert_eq!(scene.end_index, 30);
        assert_eq!(scene.len(), 11);
        assert_eq!(scene.obstacle_detect.len(), 11);
        assert_eq!(scene.observed_class.len(), 11);
        assert_eq!(scene.preselect.first(), Some(&PreSelectState::NOT_SELECTED));
        assert_eq!(scene.preselect.last(), Some(&PreSelectState::FUSION_OBSTACLE));
        assert!(!scene.starts_at_object_birth());
    }

    #[test]
    fn test_scene_at_object_birth() {
        let rec = recording(200);
        let ev = approach_event(50, 100, 60, 140, 20.0, |_| 80.0);
        let scene = extract_scene(&IndexAligner::new(&rec), &ev.object, ts(50), ts(55)).unwrap();
        assert!(scene.starts_at_object_birth());
    }

    #[test]
    fn test_inverted_scene_is_empty() {
        let rec = recording(200);
        let ev = approach_event(50, 100, 60, 140, 20.0, |_| 80.0);
        let scene = extract_scene(&IndexAligner::new(&rec), &ev.object, ts(90), ts(80)).unwrap();
        assert!(scene.is_empty());
        assert!(scene.observed_class.is_empty());
    }

    #[test]
    fn test_scene_past_object_end() {
        let rec = recording(200);
        let ev = approach_event(50, 100, 60, 140, 20.0, |_| 80.0);
        assert!(matches!(
            extract_scene(&IndexAligner::new(&rec), &ev.object, ts(140), ts(150)),
            Err(AnalyzerError::OutsideObject { index: 150, .. })
        ));
    }

    #[test]
    fn test_scene_before_object_start() {
        let rec = recording(200);
        let ev = approach_event(50, 100, 60, 140, 20.0, |_| 80.0);
        assert!(matches!(
            extract_scene(&IndexAligner::new(&rec), &ev.object, ts(40), ts(80)),
            Err(AnalyzerError::OutsideObject { index: 40, .. })
        ));
    }

    #[test]
    fn test_truncated_signal_is_integrity_error() {
        let rec = recording(200);
        let mut ev = approach_event(50, 100, 60, 140, 20.0, |_| 80.0);
        ev.object.observed_class.truncate(25);
        let err = extract_scene(&IndexAligner::new(&rec), &ev.object, ts(70), ts(80)).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_tunnel_state_uses_global_index() {
        let mut tunnel = vec![TunnelState::NO_TUNNEL; 100];
        tunnel[42] = TunnelState::TUNNEL;
        let rec = Recording::new("tunnel", (0..100).map(ts).collect(), tunnel).unwrap();
        let aligner = IndexAligner::new(&rec);

        assert_eq!(tunnel_state_at(&aligner, ts(42)).unwrap(), TunnelState::TUNNEL);
        assert_eq!(tunnel_state_at(&aligner, ts(43)).unwrap(), TunnelState::NO_TUNNEL);

        let tunnel_rec = recording_with_tunnel(10, TunnelState::TUNNEL_PROBABLE);
        assert_eq!(
            tunnel_state_at(&IndexAligner::new(&tunnel_rec), ts(3)).unwrap(),
            TunnelState::TUNNEL_PROBABLE
        );
    }
}
