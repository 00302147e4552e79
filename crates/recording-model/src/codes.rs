//! Sensor state codes
//!
//! The raw signals carry integer codes. Each signal gets a transparent newtype
//! so that codes of different signals cannot be mixed up, while codes without
//! a named constant are still carried through unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Object pre-selection state (`ObjPreSelect`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreSelectState(pub i32);

impl PreSelectState {
    pub const NOT_SELECTED: Self = Self(0);
    /// First object in the ego lane
    pub const FIRST_EGO_LANE: Self = Self(1);
    /// Selected by the fusion as a stationary obstacle
    pub const FUSION_OBSTACLE: Self = Self(2);
    pub const SECOND_EGO_LANE: Self = Self(3);
    pub const LEFT_LANE: Self = Self(4);
    pub const RIGHT_LANE: Self = Self(5);
}

/// Obstacle detection state (`Obj_ObstclDtct`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleDetectState(pub i32);

impl ObstacleDetectState {
    pub const NO_CLASS: Self = Self(0);
    pub const OBSTACLE: Self = Self(1);
    pub const PROBABLY_UNDERDRIVABLE: Self = Self(2);
    pub const PROBABLY_OVERRIDABLE: Self = Self(3);
    /// Signal not available in this cycle
    pub const NOT_AVAILABLE: Self = Self(4);
}

/// Observed object class (`Observed_Class`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservedClass(pub i32);

impl ObservedClass {
    pub const NO_CLASS: Self = Self(0);
    pub const POINT: Self = Self(1);
    pub const CAR: Self = Self(2);
    pub const TRUCK: Self = Self(3);
    pub const TWO_WHEELER: Self = Self(4);
    pub const GUARDRAIL: Self = Self(5);
    pub const CURVE_ENTRY: Self = Self(6);
    pub const UNKNOWN: Self = Self(7);
}

/// Tunnel detection state (`TunnelDtct`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TunnelState(pub i32);

impl TunnelState {
    pub const NO_TUNNEL: Self = Self(0);
    pub const TUNNEL_PROBABLE: Self = Self(1);
    pub const TUNNEL: Self = Self(2);
}

impl fmt::Display for TunnelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
