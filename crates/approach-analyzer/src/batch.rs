//! Per-recording event loop

use crate::annotator::ApproachAnnotator;
use recording_model::{Event, EventAttributes, EventType, Recording};
use serde::Serialize;
use tracing::{error, info};

/// Outcome counts of one recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Events classified and relabeled
    pub analyzed: usize,
    /// Events carrying an upstream test case error
    pub testcase_errors: usize,
    /// Events of other types, left untouched
    pub skipped: usize,
    /// Events whose analysis failed
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.analyzed + self.testcase_errors + self.skipped + self.failed
    }
}

/// Runs the approach annotation over all events of a recording
pub struct BatchProcessor {
    annotator: ApproachAnnotator,
    recording_filter: Vec<String>,
}

impl BatchProcessor {
    /// `recording_filter` restricts processing to recordings whose name
    /// contains one of the patterns; empty means all recordings
    pub fn new(annotator: ApproachAnnotator, recording_filter: Vec<String>) -> Self {
        Self {
            annotator,
            recording_filter,
        }
    }

    /// Whether events of a recording are processed at all
    pub fn is_configured_to_run(&self, recording_name: &str) -> bool {
        self.recording_filter.is_empty()
            || self
                .recording_filter
                .iter()
                .any(|pattern| recording_name.contains(pattern.as_str()))
    }

    /// Annotate all events of a recording.
    ///
    /// A failing event is logged and counted; the loop continues with the
    /// next event.
    pub fn process_file(&self, recording: &Recording, events: &mut [Event]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        if !self.is_configured_to_run(recording.name()) {
            info!("Recording {} not configured to run, skipping", recording.name());
            return summary;
        }

        info!("Recording {}: number of approach events: {}", recording.name(), events.len());

        for event in events.iter_mut() {
            if event.testcase_error.is_error() {
                info!("Event {}: test case error {:?}, not analyzed", event.id, event.testcase_error);
                event.attributes = EventAttributes::not_applicable();
                summary.testcase_errors += 1;
                continue;
            }

            if event.event_type != EventType::Approach {
                summary.skipped += 1;
                continue;
            }

            match self.annotator.annotate(recording, event) {
                Ok(_) => {
                    event.event_type = EventType::StatApproach;
                    summary.analyzed += 1;
                }
                Err(e) => {
                    error!("Event {}: analysis failed: {}", event.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Recording {}: {} analyzed, {} test case errors, {} skipped, {} failed",
            recording.name(),
            summary.analyzed,
            summary.testcase_errors,
            summary.skipped,
            summary.failed
        );
        summary
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(ApproachAnnotator::default(), Vec::new())
    }
}
