//! Per-event plot buffer

use serde::{Deserialize, Serialize};

/// Named signal for visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSignal {
    pub name: String,
    pub values: Vec<f64>,
}

/// Signals collected for plotting an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub signals: Vec<PlotSignal>,
}

impl PlotData {
    /// Append a named signal
    pub fn push(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.signals.push(PlotSignal {
            name: name.into(),
            values,
        });
    }

    /// Look up a signal by name
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.signals
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}
