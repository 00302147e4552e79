//! Recording Model
//!
//! Data handed over by the recording data layer: the global time base of a
//! recording, approach events with their ego signals, and the tracked lead
//! object of each event.

mod attributes;
mod codes;
mod error;
mod event;
mod object;
mod plot;
mod recording;

pub use attributes::{ApproachCondition, EventAttributes};
pub use codes::{ObservedClass, ObstacleDetectState, PreSelectState, TunnelState};
pub use error::ModelError;
pub use event::{Event, EventType, TestcaseErrorType};
pub use object::ObjectTrack;
pub use plot::{PlotData, PlotSignal};
pub use recording::Recording;
