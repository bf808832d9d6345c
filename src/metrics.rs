//! Raw per-video metrics, as produced by the analysis pipeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Flat map of metric name to measured value for a single video.
///
/// The analysis pipeline writes these as one JSON object:
///
/// ```json
/// {
///   "cuts_per_minute": 9.4,
///   "avg_shot_length": 6.2,
///   "prosocial_ratio": 0.81,
///   "duration_seconds": 312.0,
///   "duration_minutes": 5.2
/// }
/// ```
///
/// Metric names the scoring tables do not know are carried along untouched;
/// metrics the tables expect but the map lacks are scored neutrally.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawMetrics {
    values: BTreeMap<String, f64>,
}

impl RawMetrics {
    /// Measured value for `metric`, if the pipeline produced one.
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied()
    }

    pub fn contains(&self, metric: &str) -> bool {
        self.values.contains_key(metric)
    }

    /// Video length in seconds, when the pipeline recorded it.
    pub fn duration_seconds(&self) -> Option<f64> {
        self.get("duration_seconds")
    }

    pub fn duration_minutes(&self) -> Option<f64> {
        self.get("duration_minutes")
            .or_else(|| self.duration_seconds().map(|sec| sec / 60.0))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.values.iter()
    }
}

impl From<BTreeMap<String, f64>> for RawMetrics {
    fn from(values: BTreeMap<String, f64>) -> Self {
        RawMetrics { values }
    }
}

impl FromIterator<(String, f64)> for RawMetrics {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        RawMetrics {
            values: iter.into_iter().collect(),
        }
    }
}

/// Load raw metrics from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a JSON object of
/// numeric values.
pub fn load_raw_metrics(path: &Path) -> Result<RawMetrics> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open metrics file at {}", path.display()))?;

    let metrics: RawMetrics = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse metrics: invalid JSON in {}", path.display()))?;

    Ok(metrics)
}
