//! Result attributes written onto approach events

use crate::codes::TunnelState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Detection-quality condition that held over a whole approach scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApproachCondition {
    /// Object pre-selected as first in the ego lane
    A,
    /// Classified as obstacle with a valid object class
    B,
    /// Classified as probably under- or overdrivable with a valid object class
    C,
    /// Tunnel: pre-selected as first ego lane or fusion obstacle
    D,
    /// Tunnel: obstacle or probably under-/overdrivable with a valid object class
    E,
}

impl ApproachCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

impl fmt::Display for ApproachCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes consumed by downstream reporting.
///
/// `None` serializes as `null`, which is how unset attributes are reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventAttributes {
    pub event_applicable: Option<bool>,
    pub tunnel_state_of_scene: Option<TunnelState>,
    pub stat_approach_condition: Option<ApproachCondition>,
}

impl EventAttributes {
    /// Fixed annotation for events that are not analyzed
    pub fn not_applicable() -> Self {
        Self {
            event_applicable: Some(false),
            tunnel_state_of_scene: None,
            stat_approach_condition: None,
        }
    }

    /// Annotation of an analyzed event
    pub fn analyzed(
        event_applicable: bool,
        tunnel_state: TunnelState,
        condition: Option<ApproachCondition>,
    ) -> Self {
        Self {
            event_applicable: Some(event_applicable),
            tunnel_state_of_scene: Some(tunnel_state),
            stat_approach_condition: condition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_applicable_serializes_nulls() {
        let json = serde_json::to_string(&EventAttributes::not_applicable()).unwrap();
        assert_eq!(
            json,
            r#"{"event_applicable":false,"tunnel_state_of_scene":null,"stat_approach_condition":null}"#
        );
    }

    #[test]
    fn test_condition_label() {
        let attrs = EventAttributes::analyzed(true, TunnelState::TUNNEL, Some(ApproachCondition::D));
        let json = serde_json::to_string(&attrs).unwrap();
        assert!(json.contains(r#""stat_approach_condition":"D""#));
        assert!(json.contains(r#""tunnel_state_of_scene":2"#));
        assert_eq!(ApproachCondition::E.to_string(), "E");
    }
}
