//! Approach Statistics Runner
//!
//! Loads layered settings, reads recording batches (one recording plus its
//! approach events) from JSON files and writes the annotated events back out.

use approach_analyzer::{ApproachAnnotator, ApproachConfig, BatchProcessor, BatchSummary};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use recording_model::{Event, Recording};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Settings file looked up in the working directory (any supported extension)
pub const DEFAULT_SETTINGS_FILE: &str = "approach-analyzer";

/// Environment variable overriding the settings file path
pub const SETTINGS_PATH_ENV: &str = "APPROACH_CONFIG";

/// Prefix of environment overrides, e.g. `APPROACH__APPROACH__DISTANCE_THRESHOLD_M=80`
pub const ENV_PREFIX: &str = "APPROACH";

/// Runner error types
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Invalid log level: {0}")]
    LogLevel(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid batch file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Runner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Recording name patterns to process; empty processes all recordings
    pub recording_filter: Vec<String>,

    /// Analysis thresholds
    pub approach: ApproachConfig,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            recording_filter: Vec::new(),
            approach: ApproachConfig::default(),
        }
    }
}

impl AnalyzerSettings {
    /// Load settings from the optional settings file and the environment
    pub fn load() -> Result<Self, RunnerError> {
        let path = std::env::var(SETTINGS_PATH_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
        Self::load_from(Config::builder().add_source(File::with_name(&path).required(false)))
    }

    /// Finish a settings builder with the environment overrides
    pub fn load_from(builder: ConfigBuilder<DefaultState>) -> Result<Self, RunnerError> {
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("recording_filter")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn log_level(&self) -> Result<Level, RunnerError> {
        self.log_level
            .parse()
            .map_err(|_| RunnerError::LogLevel(self.log_level.clone()))
    }

    /// Batch processor configured from these settings
    pub fn processor(&self) -> BatchProcessor {
        BatchProcessor::new(
            ApproachAnnotator::new(self.approach.clone()),
            self.recording_filter.clone(),
        )
    }
}

/// One recording and its events, as exchanged with the data layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingBatch {
    pub recording: Recording,
    pub events: Vec<Event>,
}

/// Annotated output of one recording
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub recording: &'a str,
    pub summary: BatchSummary,
    pub events: &'a [Event],
}

/// Initialize logging to stderr
pub fn init_logging(level: Level) -> Result<(), RunnerError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| RunnerError::Logging(e.to_string()))
}

/// Parse a recording batch from JSON
pub fn parse_batch(json: &str, path: &str) -> Result<RecordingBatch, RunnerError> {
    serde_json::from_str(json).map_err(|source| RunnerError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Read a recording batch file
pub fn read_batch(path: &Path) -> Result<RecordingBatch, RunnerError> {
    let path_str = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path_str.clone(),
        source,
    })?;
    debug!("Read {} bytes from {}", json.len(), path_str);
    parse_batch(&json, &path_str)
}

/// Annotate a batch and write its report as JSON
pub fn run_batch<W: Write>(
    processor: &BatchProcessor,
    batch: &mut RecordingBatch,
    out: &mut W,
) -> Result<BatchSummary, RunnerError> {
    let summary = processor.process_file(&batch.recording, &mut batch.events);
    let report = BatchReport {
        recording: batch.recording.name(),
        summary,
        events: &batch.events,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out).map_err(|source| RunnerError::Io {
        path: "<output>".to_string(),
        source,
    })?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use recording_model::{ApproachCondition, EventType};

    fn batch_json() -> String {
        let timestamps: Vec<String> = (0..60).map(|i| format!("{:.2}", 10.0 + i as f64 * 0.04)).collect();
        let tunnel = vec!["0"; 60].join(",");
        let distance: Vec<String> = (0..50).map(|i| format!("{:.1}", 150.0 - i as f64 * 2.0)).collect();
        let speed = vec!["25.0"; 41].join(",");

        format!(
            r#"{{
                "recording": {{
                    "name": "highway_a8.rec",
                    "timestamps": [{timestamps}],
                    "tunnel_detect": [{tunnel}]
                }},
                "events": [{{
                    "id": 7,
                    "event_type": "approach",
                    "start_index": 5,
                    "stop_index": 45,
                    "start_time": 10.2,
                    "stop_time": 11.8,
                    "ego_speed": [{speed}],
                    "object": {{
                        "start_index": 0,
                        "distance_x": [{distance}],
                        "preselect": [{preselect}],
                        "obstacle_detect": [{obstacle}],
                        "observed_class": [{classes}]
                    }}
                }}]
            }}"#,
            timestamps = timestamps.join(","),
            distance = distance.join(","),
            preselect = vec!["1"; 50].join(","),
            obstacle = vec!["1"; 50].join(","),
            classes = vec!["2"; 50].join(","),
        )
    }

    #[test]
    fn test_settings_defaults_and_file_overrides() {
        let builder = Config::builder().add_source(File::from_str(
            r#"
                log_level = "debug"
                recording_filter = ["highway"]

                [approach]
                distance_threshold_m = 80.0
            "#,
            FileFormat::Toml,
        ));
        let settings = AnalyzerSettings::load_from(builder).unwrap();

        assert_eq!(settings.log_level().unwrap(), Level::DEBUG);
        assert_eq!(settings.recording_filter, vec!["highway".to_string()]);
        assert_eq!(settings.approach.distance_threshold_m, 80.0);
        assert_eq!(settings.approach.timegap_threshold_s, 4.0);
    }

    #[test]
    fn test_invalid_log_level() {
        let settings = AnalyzerSettings {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(settings.log_level(), Err(RunnerError::LogLevel(_))));
    }

    #[test]
    fn test_run_batch_writes_annotated_events() {
        let mut batch = parse_batch(&batch_json(), "inline").unwrap();
        let processor = AnalyzerSettings::default().processor();

        let mut out = Vec::new();
        let summary = run_batch(&processor, &mut batch, &mut out).unwrap();
        assert_eq!(summary.analyzed, 1);
        assert_eq!(batch.events[0].event_type, EventType::StatApproach);
        assert_eq!(batch.events[0].attributes.stat_approach_condition, Some(ApproachCondition::A));

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["recording"], "highway_a8.rec");
        assert_eq!(report["events"][0]["attributes"]["stat_approach_condition"], "A");
        assert_eq!(report["events"][0]["attributes"]["event_applicable"], true);
        assert_eq!(report["events"][0]["plot_data"]["signals"][0]["name"], "ObstclDtct");
    }

    #[test]
    fn test_other_event_types_pass_through() {
        let json = batch_json().replacen(r#""event_type": "approach""#, r#""event_type": "follow""#, 1);
        let mut batch = parse_batch(&json, "inline").unwrap();
        assert_eq!(batch.events[0].event_type, EventType::Other("follow".to_string()));

        let processor = AnalyzerSettings::default().processor();
        let mut out = Vec::new();
        let summary = run_batch(&processor, &mut batch, &mut out).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.analyzed, 0);

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["events"][0]["event_type"], "follow");
        assert!(report["events"][0]["attributes"]["stat_approach_condition"].is_null());
    }

    #[test]
    fn test_invalid_batch_rejected() {
        let json = r#"{"recording": {"name": "r", "timestamps": [1.0, 0.5], "tunnel_detect": [0, 0]}, "events": []}"#;
        assert!(matches!(parse_batch(json, "bad.json"), Err(RunnerError::Parse { .. })));
    }
}
