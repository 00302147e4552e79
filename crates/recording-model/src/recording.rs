//! Per-file recording signals

use crate::codes::TunnelState;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw recording data as delivered by the data layer, before validation
#[derive(Debug, Clone, Deserialize)]
struct RawRecording {
    name: String,
    timestamps: Vec<f64>,
    tunnel_detect: Vec<TunnelState>,
}

/// Global time base of one recording plus the file-level tunnel signal.
///
/// Timestamps are strictly increasing, so global index and timestamp map
/// one-to-one. The tunnel signal is sampled on the same time base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecording")]
pub struct Recording {
    name: String,
    timestamps: Vec<f64>,
    tunnel_detect: Vec<TunnelState>,
}

impl Recording {
    /// Create a recording, validating the time base
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<f64>,
        tunnel_detect: Vec<TunnelState>,
    ) -> Result<Self, ModelError> {
        if let Some(index) = timestamps.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(ModelError::NonMonotonicTimestamps {
                index: index + 1,
                previous: timestamps[index],
                value: timestamps[index + 1],
            });
        }

        if tunnel_detect.len() != timestamps.len() {
            return Err(ModelError::LengthMismatch {
                signal: "tunnel_detect",
                expected: timestamps.len(),
                actual: tunnel_detect.len(),
            });
        }

        let name = name.into();
        debug!("Recording {} loaded with {} cycles", name, timestamps.len());

        Ok(Self {
            name,
            timestamps,
            tunnel_detect,
        })
    }

    /// Recording (file) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All timestamps of the recording in seconds
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Number of cycles
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamp at a global index
    pub fn timestamp_at(&self, index: usize) -> Option<f64> {
        self.timestamps.get(index).copied()
    }

    /// Tunnel state at a global index
    pub fn tunnel_at(&self, index: usize) -> Option<TunnelState> {
        self.tunnel_detect.get(index).copied()
    }
}

impl TryFrom<RawRecording> for Recording {
    type Error = ModelError;

    fn try_from(raw: RawRecording) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.timestamps, raw.tunnel_detect)
    }
}
