//! Shared fixtures for unit tests

use recording_model::{
    Event, EventAttributes, EventType, ObjectTrack, ObservedClass, ObstacleDetectState, PlotData,
    PreSelectState, Recording, TestcaseErrorType, TunnelState,
};

/// Cycle time of the synthetic recordings (seconds)
pub const CYCLE_S: f64 = 0.04;

/// Timestamp of a global index in the synthetic recordings
pub fn ts(index: usize) -> f64 {
    100.0 + index as f64 * CYCLE_S
}

pub fn recording(len: usize) -> Recording {
    recording_with_tunnel(len, TunnelState::NO_TUNNEL)
}

pub fn recording_with_tunnel(len: usize, tunnel: TunnelState) -> Recording {
    Recording::new(
        "20240312_141500_approach.rec",
        (0..len).map(ts).collect(),
        vec![tunnel; len],
    )
    .unwrap()
}

/// Approach event with a constant ego speed.
///
/// `distance` maps the object-relative index to the longitudinal distance.
pub fn approach_event(
    object_start: usize,
    object_len: usize,
    event_start: usize,
    event_stop: usize,
    speed_mps: f64,
    distance: impl Fn(usize) -> f64,
) -> Event {
    Event {
        id: 1,
        event_type: EventType::Approach,
        testcase_error: TestcaseErrorType::None,
        start_index: event_start,
        stop_index: event_stop,
        start_time: ts(event_start),
        stop_time: ts(event_stop),
        ego_speed: vec![speed_mps; event_stop + 1 - event_start],
        object: ObjectTrack {
            id: 12,
            start_index: object_start,
            distance_x: (0..object_len).map(distance).collect(),
            preselect: vec![PreSelectState::FIRST_EGO_LANE; object_len],
            obstacle_detect: vec![ObstacleDetectState::OBSTACLE; object_len],
            observed_class: vec![ObservedClass::CAR; object_len],
        },
        attributes: EventAttributes::default(),
        plot_data: PlotData::default(),
    }
}
