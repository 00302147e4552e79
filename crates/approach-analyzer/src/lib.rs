//! Approach Analyzer
//!
//! Classifies recorded approach events by detection quality:
//! - threshold crossing search (time-gap and fixed distance)
//! - timestamp alignment between recording and object index spaces
//! - scene slicing of the object classification signals
//! - ordered condition rules A-E, with a separate tunnel rule set
//! - per-recording batch loop writing the results onto the events

pub mod aligner;
pub mod annotator;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod locator;
pub mod slicer;

#[cfg(test)]
mod test_support;

pub use aligner::{nearest_index, IndexAligner};
pub use annotator::{ApproachAnnotation, ApproachAnnotator, SceneMark, SceneTimestamps};
pub use batch::{BatchProcessor, BatchSummary};
pub use classifier::{check_test_criteria, ConditionClassifier};
pub use config::ApproachConfig;
pub use error::AnalyzerError;
pub use locator::{Crossing, ThresholdLocator};
pub use slicer::{extract_scene, tunnel_state_at, SceneSlices};
