//! Approach condition classification
//!
//! A scene is classified by the first condition, in priority order, whose
//! predicate holds for every cycle of the scene. Tunnel scenes are judged by
//! a separate rule set, so both branches never compete.

use crate::config::ApproachConfig;
use crate::error::AnalyzerError;
use crate::slicer::SceneSlices;
use recording_model::{ApproachCondition, ObservedClass, ObstacleDetectState, PreSelectState, TunnelState};
use tracing::debug;

/// Observed classes that invalidate an obstacle classification
pub const EXCLUDED_CLASSES: [ObservedClass; 3] = [
    ObservedClass::GUARDRAIL,
    ObservedClass::CURVE_ENTRY,
    ObservedClass::UNKNOWN,
];

/// Signal states of one scene cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub preselect: PreSelectState,
    pub obstacle_detect: ObstacleDetectState,
    pub observed_class: ObservedClass,
}

impl Sample {
    fn has_valid_class(&self) -> bool {
        !EXCLUDED_CLASSES.contains(&self.observed_class)
    }
}

/// Per-cycle predicate of a condition
pub type Rule = fn(&Sample) -> bool;

fn first_ego_lane(s: &Sample) -> bool {
    s.preselect == PreSelectState::FIRST_EGO_LANE
}

fn valid_obstacle(s: &Sample) -> bool {
    s.obstacle_detect == ObstacleDetectState::OBSTACLE && s.has_valid_class()
}

fn valid_drivable(s: &Sample) -> bool {
    matches!(
        s.obstacle_detect,
        ObstacleDetectState::PROBABLY_UNDERDRIVABLE | ObstacleDetectState::PROBABLY_OVERRIDABLE
    ) && s.has_valid_class()
}

fn ego_lane_or_fusion(s: &Sample) -> bool {
    matches!(
        s.preselect,
        PreSelectState::FIRST_EGO_LANE | PreSelectState::FUSION_OBSTACLE
    )
}

fn valid_obstacle_or_drivable(s: &Sample) -> bool {
    matches!(
        s.obstacle_detect,
        ObstacleDetectState::OBSTACLE
            | ObstacleDetectState::PROBABLY_UNDERDRIVABLE
            | ObstacleDetectState::PROBABLY_OVERRIDABLE
    ) && s.has_valid_class()
}

/// Conditions outside tunnels, highest priority first
pub static OPEN_ROAD_RULES: [(ApproachCondition, Rule); 3] = [
    (ApproachCondition::A, first_ego_lane),
    (ApproachCondition::B, valid_obstacle),
    (ApproachCondition::C, valid_drivable),
];

/// Conditions inside tunnels, highest priority first
pub static TUNNEL_RULES: [(ApproachCondition, Rule); 2] = [
    (ApproachCondition::D, ego_lane_or_fusion),
    (ApproachCondition::E, valid_obstacle_or_drivable),
];

/// Classifies approach scenes into detection-quality conditions
#[derive(Debug, Clone)]
pub struct ConditionClassifier {
    tunnel_state: TunnelState,
}

impl ConditionClassifier {
    pub fn new(config: &ApproachConfig) -> Self {
        Self {
            tunnel_state: config.tunnel_state,
        }
    }

    /// Rule set applying to a tunnel state
    pub fn rules(&self, tunnel: TunnelState) -> &'static [(ApproachCondition, Rule)] {
        if tunnel == self.tunnel_state {
            &TUNNEL_RULES
        } else {
            &OPEN_ROAD_RULES
        }
    }

    /// First condition holding over the whole scene, `None` if no condition
    /// holds or the scene is empty. The three signals must have equal length.
    pub fn classify(
        &self,
        tunnel: TunnelState,
        preselect: &[PreSelectState],
        obstacle_detect: &[ObstacleDetectState],
        observed_class: &[ObservedClass],
    ) -> Result<Option<ApproachCondition>, AnalyzerError> {
        if preselect.len() != obstacle_detect.len() || preselect.len() != observed_class.len() {
            return Err(AnalyzerError::SliceLengthMismatch {
                preselect: preselect.len(),
                obstacle_detect: obstacle_detect.len(),
                observed_class: observed_class.len(),
            });
        }

        if preselect.is_empty() {
            return Ok(None);
        }

        let samples = || {
            preselect
                .iter()
                .zip(obstacle_detect)
                .zip(observed_class)
                .map(|((&preselect, &obstacle_detect), &observed_class)| Sample {
                    preselect,
                    obstacle_detect,
                    observed_class,
                })
        };

        for (condition, rule) in self.rules(tunnel) {
            if samples().all(|s| rule(&s)) {
                debug!("Condition {} holds over {} cycles", condition, preselect.len());
                return Ok(Some(*condition));
            }
        }
        Ok(None)
    }

    /// Classify extracted scene slices
    pub fn classify_scene(
        &self,
        tunnel: TunnelState,
        scene: &SceneSlices<'_>,
    ) -> Result<Option<ApproachCondition>, AnalyzerError> {
        self.classify(tunnel, scene.preselect, scene.obstacle_detect, scene.observed_class)
    }
}

impl Default for ConditionClassifier {
    fn default() -> Self {
        Self::new(&ApproachConfig::default())
    }
}

/// Classify with the default tunnel code
pub fn check_test_criteria(
    tunnel: TunnelState,
    preselect: &[PreSelectState],
    obstacle_detect: &[ObstacleDetectState],
    observed_class: &[ObservedClass],
) -> Result<Option<ApproachCondition>, AnalyzerError> {
    ConditionClassifier::default().classify(tunnel, preselect, obstacle_detect, observed_class)
}
