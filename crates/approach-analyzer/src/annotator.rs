//! Approach event annotation
//!
//! Per event:
//! - find the extended PUD (time-gap + distance extension), the PUD and the
//!   fixed-distance crossing
//! - pick the scene begin depending on the initial ego speed
//! - slice the object classification signals from scene begin to event stop
//! - classify the scene and write the result attributes onto the event

use crate::aligner::IndexAligner;
use crate::classifier::ConditionClassifier;
use crate::config::ApproachConfig;
use crate::error::AnalyzerError;
use crate::locator::{Crossing, ThresholdLocator};
use crate::slicer::{extract_scene, tunnel_state_at};
use recording_model::{ApproachCondition, Event, EventAttributes, Recording, TunnelState};
use serde::Serialize;
use std::ops::Range;
use tracing::{debug, info, warn};

/// Plot signal name of the scaled obstacle detection state
pub const PLOT_OBSTACLE_DETECT: &str = "ObstclDtct";

/// Plot signal name of the scaled observed class
pub const PLOT_OBSERVED_CLASS: &str = "ObsClass";

/// Crossing used to build the scene, and whether it was actually found
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneMark {
    pub global_index: usize,
    pub timestamp: f64,
    /// `false` if the threshold was never crossed and the event start was used
    pub found: bool,
}

impl SceneMark {
    fn new(crossing: Crossing, found: bool) -> Self {
        Self {
            global_index: crossing.global_index,
            timestamp: crossing.timestamp,
            found,
        }
    }
}

/// Timestamps that define the analyzed scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneTimestamps {
    pub extended_pud: SceneMark,
    pub pud: SceneMark,
    pub distance: SceneMark,
    pub scene_begin: SceneMark,
    pub scene_end: f64,
}

/// Result of analyzing one approach event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachAnnotation {
    pub event_applicable: bool,
    pub tunnel_state: TunnelState,
    pub condition: Option<ApproachCondition>,
    pub scene: SceneTimestamps,
    /// Number of cycles classified
    pub scene_cycles: usize,
    /// Time-gap (s) of every cycle of the event window
    pub time_gap_profile: Vec<f64>,
}

impl ApproachAnnotation {
    pub fn attributes(&self) -> EventAttributes {
        EventAttributes::analyzed(self.event_applicable, self.tunnel_state, self.condition)
    }
}

/// Stateless analyzer for single approach events
#[derive(Debug, Clone)]
pub struct ApproachAnnotator {
    config: ApproachConfig,
    locator: ThresholdLocator,
    classifier: ConditionClassifier,
}

impl ApproachAnnotator {
    pub fn new(config: ApproachConfig) -> Self {
        Self {
            locator: ThresholdLocator::new(&config),
            classifier: ConditionClassifier::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &ApproachConfig {
        &self.config
    }

    /// Analyze an event and write attributes and plot signals onto it.
    ///
    /// On error the event is left untouched.
    pub fn annotate(&self, recording: &Recording, event: &mut Event) -> Result<ApproachAnnotation, AnalyzerError> {
        let annotation = self.analyze(recording, event)?;

        let window = self.plot_window(event);
        let gain = self.config.plot_gain;
        let obstacle_detect = event.object.obstacle_detect[window.clone()]
            .iter()
            .map(|s| gain * f64::from(s.0))
            .collect();
        let observed_class = event.object.observed_class[window]
            .iter()
            .map(|c| gain * f64::from(c.0))
            .collect();
        event.plot_data.push(PLOT_OBSTACLE_DETECT, obstacle_detect);
        event.plot_data.push(PLOT_OBSERVED_CLASS, observed_class);

        event.attributes = annotation.attributes();
        Ok(annotation)
    }

    /// Analyze an event without modifying it
    pub fn analyze(&self, recording: &Recording, event: &Event) -> Result<ApproachAnnotation, AnalyzerError> {
        event.validate()?;
        info!(
            "Event {}: recording {} cycles, object {} lifetime {} cycles",
            event.id,
            recording.len(),
            event.object.id,
            event.object.len()
        );

        let time_gap_profile = self.locator.time_gap_profile(event)?;
        let timegap = self.config.timegap_threshold_s;
        let extended_pud = self.mark(
            recording,
            event,
            "extended PUD",
            self.locator
                .timegap_crossing(recording, event, timegap, self.config.distance_extension_m)?,
        )?;
        let pud = self.mark(
            recording,
            event,
            "PUD",
            self.locator.timegap_crossing(recording, event, timegap, 0.0)?,
        )?;
        let distance = self.mark(
            recording,
            event,
            "distance threshold",
            self.locator
                .distance_crossing(recording, event, self.config.distance_threshold_m)?,
        )?;
        info!(
            "Event {}: extended PUD at {:.3}s, PUD at {:.3}s, below {}m at {:.3}s",
            event.id, extended_pud.timestamp, pud.timestamp, self.config.distance_threshold_m, distance.timestamp
        );

        let mut event_applicable = true;
        if extended_pud.global_index == event.object.start_index {
            warn!("Event {}: object only comes to life under the threshold", event.id);
            event_applicable = false;
        }

        let aligner = IndexAligner::new(recording);
        let tunnel_state = tunnel_state_at(&aligner, extended_pud.timestamp)?;
        info!("Event {}: tunnel state at begin of scene: {}", event.id, tunnel_state);

        let initial_speed = event.ego_speed.first().copied().ok_or(AnalyzerError::NoEgoSpeed)?;
        let scene_begin = if initial_speed < self.config.speed_threshold_mps() {
            pud
        } else {
            // later in time means closer to the object
            if distance.global_index > pud.global_index {
                distance
            } else {
                pud
            }
        };
        debug!(
            "Event {}: initial ego speed {:.2}m/s, scene begins at {:.3}s",
            event.id, initial_speed, scene_begin.timestamp
        );

        let scene = extract_scene(&aligner, &event.object, scene_begin.timestamp, event.stop_time)?;
        if scene.starts_at_object_birth() && event_applicable {
            warn!("Event {}: scene begins at the first object cycle", event.id);
            event_applicable = false;
        }

        let condition = self.classifier.classify_scene(tunnel_state, &scene)?;
        match condition {
            Some(condition) => info!("Event {}: condition {} met", event.id, condition),
            None => info!("Event {}: no condition met", event.id),
        }

        Ok(ApproachAnnotation {
            event_applicable,
            tunnel_state,
            condition,
            scene: SceneTimestamps {
                extended_pud,
                pud,
                distance,
                scene_begin,
                scene_end: event.stop_time,
            },
            scene_cycles: scene.len(),
            time_gap_profile,
        })
    }

    /// Object-relative index range plotted for an event: the event window
    /// padded by the configured cycles, clipped to the object lifetime
    pub fn plot_window(&self, event: &Event) -> Range<usize> {
        let object = &event.object;
        let start = event
            .start_index
            .saturating_sub(self.config.plot_lookback_cycles)
            .max(object.start_index);
        let stop = (event.stop_index + self.config.plot_lookahead_cycles).min(object.end_index());

        if stop <= start {
            return 0..0;
        }
        start - object.start_index..stop - object.start_index
    }

    fn mark(
        &self,
        recording: &Recording,
        event: &Event,
        name: &str,
        crossing: Option<Crossing>,
    ) -> Result<SceneMark, AnalyzerError> {
        match crossing {
            Some(crossing) => Ok(SceneMark::new(crossing, true)),
            None => {
                warn!("Event {}: {} never crossed, using event start", event.id, name);
                let start = self.locator.event_start(recording, event)?;
                Ok(SceneMark::new(start, false))
            }
        }
    }
}

impl Default for ApproachAnnotator {
    fn default() -> Self {
        Self::new(ApproachConfig::default())
    }
}
