use std::collections::BTreeMap;

use crate::config::ScoringTables;
use crate::metrics::RawMetrics;
use crate::score_warn;

use super::normalize::normalize_metric;

/// Score given to a dimension none of whose metrics were measured.
pub const EMPTY_DIMENSION_SCORE: f64 = 50.0;

/// Compute a 0-100 score per declared dimension.
///
/// Each dimension averages the normalized scores of its metrics that are
/// present in `raw`; absent metrics are skipped with a warning rather than
/// counted as zero, so a pipeline that could not measure something does
/// not drag the dimension down. A dimension with no measured metrics at
/// all scores [`EMPTY_DIMENSION_SCORE`].
pub fn dimension_scores(
    tables: &ScoringTables,
    raw: &RawMetrics,
    band: &str,
) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();

    for dimension in &tables.dimensions {
        let mut normalized = Vec::with_capacity(dimension.metrics.len());

        for metric in &dimension.metrics {
            match raw.get(metric) {
                Some(value) => normalized.push(normalize_metric(tables, metric, value, band)),
                None => score_warn!("metric '{}' missing from raw metrics", metric),
            }
        }

        let score = if normalized.is_empty() {
            EMPTY_DIMENSION_SCORE
        } else {
            normalized.iter().sum::<f64>() / normalized.len() as f64 * 100.0
        };
        scores.insert(dimension.name.clone(), score);
    }

    scores
}
