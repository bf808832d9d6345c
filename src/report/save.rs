use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metrics::RawMetrics;
use crate::scoring::{Evaluation, Interpretations, OverallScores, Recommendations};

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub source: String,
    pub evaluated_at: DateTime<Utc>,
    pub child_age: f64,
    pub age_band: String,
    pub age_band_label: String,
    pub duration_seconds: Option<f64>,
    pub duration_minutes: Option<f64>,
}

/// Full evaluation record, as written to disk.
///
/// Carries everything needed to re-read a past evaluation without the
/// original video: the raw metrics that were scored, every derived score,
/// and the warnings the scoring pass produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub raw_metrics: RawMetrics,
    pub dimension_scores: BTreeMap<String, f64>,
    pub overall_scores: OverallScores,
    pub interpretations: Interpretations,
    pub recommendations: Recommendations,
    pub warnings: Vec<String>,
}

impl Report {
    /// Assemble a report from an evaluation and the metrics it scored.
    pub fn new(
        source: &str,
        evaluation: &Evaluation,
        raw: &RawMetrics,
        warnings: Vec<String>,
    ) -> Self {
        Report {
            metadata: ReportMetadata {
                source: source.to_string(),
                evaluated_at: Utc::now(),
                child_age: evaluation.child_age,
                age_band: evaluation.age_band.clone(),
                age_band_label: evaluation.age_band_label.clone(),
                duration_seconds: raw.duration_seconds(),
                duration_minutes: raw.duration_minutes(),
            },
            raw_metrics: raw.clone(),
            dimension_scores: evaluation.dimension_scores.clone(),
            overall_scores: evaluation.overall_scores.clone(),
            interpretations: evaluation.interpretations.clone(),
            recommendations: evaluation.recommendations.clone(),
            warnings,
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

/// Save a report to a JSON file atomically
///
/// Uses atomic-write-file so an interrupted write never leaves a partial
/// report behind.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open report file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize report")?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}
