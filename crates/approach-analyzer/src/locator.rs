//! Threshold crossing search
//!
//! Scans the lead object distance over an event window and finds the first
//! cycle where the object comes closer than a speed-dependent time-gap
//! distance or a fixed distance.

use crate::config::ApproachConfig;
use crate::error::AnalyzerError;
use recording_model::{Event, Recording};
use tracing::debug;

/// Time-gap for a distance at the given ego speed.
///
/// At or below `min_speed_mps` the time-gap is undefined and
/// `stationary_timegap_s` is returned instead.
pub fn time_gap(distance_m: f64, speed_mps: f64, min_speed_mps: f64, stationary_timegap_s: f64) -> f64 {
    if speed_mps > min_speed_mps {
        distance_m / speed_mps
    } else {
        stationary_timegap_s
    }
}

/// First sample whose distance is below `speed * timegap_s + delta_m`
pub fn first_timegap_crossing(
    distance: &[f64],
    ego_speed: &[f64],
    timegap_s: f64,
    delta_m: f64,
) -> Option<usize> {
    distance
        .iter()
        .zip(ego_speed)
        .position(|(&d, &v)| d < v * timegap_s + delta_m)
}

/// First sample whose distance is below a fixed threshold
pub fn first_distance_crossing(distance: &[f64], threshold_m: f64) -> Option<usize> {
    distance.iter().position(|&d| d < threshold_m)
}

/// Threshold crossing resolved onto the recording time base
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Index relative to the event start
    pub event_index: usize,
    /// Global recording index
    pub global_index: usize,
    /// Recording timestamp (seconds)
    pub timestamp: f64,
}

/// Locates threshold crossings within approach events
#[derive(Debug, Clone)]
pub struct ThresholdLocator {
    min_speed_mps: f64,
    stationary_timegap_s: f64,
}

impl ThresholdLocator {
    pub fn new(config: &ApproachConfig) -> Self {
        Self {
            min_speed_mps: config.min_timegap_speed_mps,
            stationary_timegap_s: config.stationary_timegap_s,
        }
    }

    /// Object distance over the event window
    pub fn event_distance<'e>(&self, event: &'e Event) -> Result<&'e [f64], AnalyzerError> {
        event.validate()?;
        let window = event.relative_object_window()?;
        Ok(&event.object.distance_x[window])
    }

    /// Time-gap of every cycle of the event window
    pub fn time_gap_profile(&self, event: &Event) -> Result<Vec<f64>, AnalyzerError> {
        let distance = self.event_distance(event)?;
        Ok(distance
            .iter()
            .zip(&event.ego_speed)
            .map(|(&d, &v)| time_gap(d, v, self.min_speed_mps, self.stationary_timegap_s))
            .collect())
    }

    /// First cycle where the object is closer than the time-gap distance
    /// extended by `delta_m`. `None` if the threshold is never crossed.
    pub fn timegap_crossing(
        &self,
        recording: &Recording,
        event: &Event,
        timegap_s: f64,
        delta_m: f64,
    ) -> Result<Option<Crossing>, AnalyzerError> {
        let distance = self.event_distance(event)?;
        let Some(idx) = first_timegap_crossing(distance, &event.ego_speed, timegap_s, delta_m) else {
            return Ok(None);
        };

        debug!(
            "Event {}: time-gap {:.2}s+{}m crossed at event cycle {} (time-gap {:.2}s)",
            event.id,
            timegap_s,
            delta_m,
            idx,
            time_gap(distance[idx], event.ego_speed[idx], self.min_speed_mps, self.stationary_timegap_s)
        );
        self.resolve(recording, event, idx).map(Some)
    }

    /// First cycle where the object is closer than `threshold_m`.
    /// `None` if the threshold is never crossed.
    pub fn distance_crossing(
        &self,
        recording: &Recording,
        event: &Event,
        threshold_m: f64,
    ) -> Result<Option<Crossing>, AnalyzerError> {
        let distance = self.event_distance(event)?;
        match first_distance_crossing(distance, threshold_m) {
            Some(idx) => self.resolve(recording, event, idx).map(Some),
            None => Ok(None),
        }
    }

    /// The event start as a crossing
    pub fn event_start(&self, recording: &Recording, event: &Event) -> Result<Crossing, AnalyzerError> {
        self.resolve(recording, event, 0)
    }

    fn resolve(&self, recording: &Recording, event: &Event, event_index: usize) -> Result<Crossing, AnalyzerError> {
        let global_index = event.start_index + event_index;
        let timestamp = recording
            .timestamp_at(global_index)
            .ok_or(AnalyzerError::IndexOutOfRange {
                index: global_index,
                len: recording.len(),
            })?;

        Ok(Crossing {
            event_index,
            global_index,
            timestamp,
        })
    }
}

impl Default for ThresholdLocator {
    fn default() -> Self {
        Self::new(&ApproachConfig::default())
    }
}
