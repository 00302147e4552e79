//! Approach analysis configuration

use recording_model::TunnelState;
use serde::{Deserialize, Serialize};

/// Thresholds and plot settings for approach analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachConfig {
    /// Initial ego speed separating slow and fast approaches (km/h)
    pub speed_threshold_kmh: f64,

    /// Time-gap defining the point of undisturbed detection (seconds)
    pub timegap_threshold_s: f64,

    /// Distance added to the time-gap distance for the extended PUD (meters)
    pub distance_extension_m: f64,

    /// Fixed distance threshold for fast approaches (meters)
    pub distance_threshold_m: f64,

    /// Ego speed at or below which the time-gap is undefined (m/s)
    pub min_timegap_speed_mps: f64,

    /// Time-gap reported for a (nearly) stationary ego vehicle (seconds)
    pub stationary_timegap_s: f64,

    /// Tunnel detection code selecting the tunnel rule set
    pub tunnel_state: TunnelState,

    /// Gain applied to object state signals added to the plot
    pub plot_gain: f64,

    /// Cycles plotted before the event start
    pub plot_lookback_cycles: usize,

    /// Cycles plotted after the event stop
    pub plot_lookahead_cycles: usize,
}

impl Default for ApproachConfig {
    fn default() -> Self {
        Self {
            speed_threshold_kmh: 70.0,
            timegap_threshold_s: 4.0,
            distance_extension_m: 20.0,
            distance_threshold_m: 90.0,
            min_timegap_speed_mps: 1.0,
            stationary_timegap_s: 10_000.0,
            tunnel_state: TunnelState::TUNNEL,
            plot_gain: 10.0,
            plot_lookback_cycles: 30,
            plot_lookahead_cycles: 30,
        }
    }
}

impl ApproachConfig {
    /// Speed threshold converted to m/s
    pub fn speed_threshold_mps(&self) -> f64 {
        self.speed_threshold_kmh / 3.6
    }
}
