use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a metric's raw value relates to quality within an age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values score higher; `hard_min` marks the unacceptable floor.
    HigherBetter,
    /// Smaller values score higher; `hard_max` marks the unacceptable ceiling.
    LowerBetter,
    /// Values inside the ideal range score 1.0; both hard bounds apply.
    Mid,
}

/// One age bracket.
///
/// Bands are declared in ascending order and partition `[0, ∞)`: each
/// covers `[min_age, max_age)` and the last band also absorbs every age
/// at or above its upper edge.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AgeBand {
    /// Stable identifier referenced by metric and weight tables (e.g. "G3_3_5")
    pub id: String,

    /// Display name (e.g. "Preschool")
    pub label: String,

    /// Inclusive lower age in years
    pub min_age: f64,

    /// Exclusive upper age in years
    pub max_age: f64,
}

/// Scoring thresholds for one (metric, age band) pair.
///
/// `ideal_low..=ideal_high` is the range considered good for the band.
/// The hard bounds mark where the value becomes unacceptable: only the
/// bound(s) on the bad side of the direction are consulted, so a spec may
/// carry an extra bound that its direction never reads.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricSpec {
    pub direction: Direction,

    /// Lower edge of the ideal range
    pub ideal_low: f64,

    /// Upper edge of the ideal range
    pub ideal_high: f64,

    /// Value at or below which the metric scores 0 (default: 0)
    #[serde(default)]
    pub hard_min: Option<f64>,

    /// Value at or above which the metric scores 0 (default: unbounded)
    #[serde(default)]
    pub hard_max: Option<f64>,
}

impl MetricSpec {
    /// Lower acceptability bound, defaulting to 0 when not configured.
    pub fn hard_floor(&self) -> f64 {
        self.hard_min.unwrap_or(0.0)
    }

    /// Upper acceptability bound, defaulting to +∞ when not configured.
    pub fn hard_ceiling(&self) -> f64 {
        self.hard_max.unwrap_or(f64::INFINITY)
    }
}

/// A named cluster of related metrics whose normalized scores average
/// into one 0-100 dimension score.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DimensionSpec {
    pub name: String,

    /// Metric names this dimension aggregates, in display order
    pub metrics: Vec<String>,
}

/// The complete static scoring configuration: age bands, per-band metric
/// thresholds, dimension membership, and the two weight profiles.
///
/// Loaded once at startup and read-only afterwards.
///
/// Example YAML:
/// ```yaml
/// age_bands:
///   - { id: G3_3_5, label: "Preschool", min_age: 3, max_age: 5 }
/// metrics:
///   cuts_per_minute:
///     G3_3_5: { direction: mid, ideal_low: 4, ideal_high: 12, hard_max: 30 }
/// dimensions:
///   - name: Pacing
///     metrics: [cuts_per_minute]
/// development_weights:
///   G3_3_5: { Pacing: 1.0 }
/// brainrot_weights:
///   G3_3_5: { Pacing: 1.0 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringTables {
    /// Age brackets in ascending order
    pub age_bands: Vec<AgeBand>,

    /// metric name → band id → thresholds
    pub metrics: BTreeMap<String, BTreeMap<String, MetricSpec>>,

    /// Dimensions in display order
    pub dimensions: Vec<DimensionSpec>,

    /// band id → dimension name → Developmental Score weight
    pub development_weights: BTreeMap<String, BTreeMap<String, f64>>,

    /// band id → dimension name → Brainrot Index weight
    pub brainrot_weights: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ScoringTables {
    /// Thresholds for `metric` in `band`, if configured.
    pub fn metric_spec(&self, metric: &str, band: &str) -> Option<&MetricSpec> {
        self.metrics.get(metric).and_then(|by_band| by_band.get(band))
    }
}
