use std::collections::BTreeMap;

use crate::config::ScoringTables;
use crate::score_warn;

/// Developmental Score: weighted blend of dimension scores using the
/// band's developmental weight profile. Higher is better.
pub fn development_score(
    tables: &ScoringTables,
    dimension_scores: &BTreeMap<String, f64>,
    band: &str,
) -> f64 {
    weighted_sum(
        tables,
        tables.development_weights.get(band),
        dimension_scores,
        band,
        "development weights",
        |score| score,
    )
}

/// Brainrot Index: weighted blend of dimension risk, where each
/// dimension's risk is the shortfall from its ideal (100 - score).
/// Higher means more concerning content.
pub fn brainrot_index(
    tables: &ScoringTables,
    dimension_scores: &BTreeMap<String, f64>,
    band: &str,
) -> f64 {
    weighted_sum(
        tables,
        tables.brainrot_weights.get(band),
        dimension_scores,
        band,
        "brainrot weights",
        |score| 100.0 - score,
    )
}

/// Weighted sum over dimension scores, with `transform` applied to each
/// score before weighting.
///
/// A band without a profile falls back to equal weights across the
/// declared dimensions. Dimensions weighted but unscored contribute 0;
/// both directions of mismatch between profile and scores are logged.
fn weighted_sum(
    tables: &ScoringTables,
    profile: Option<&BTreeMap<String, f64>>,
    dimension_scores: &BTreeMap<String, f64>,
    band: &str,
    profile_name: &str,
    transform: impl Fn(f64) -> f64,
) -> f64 {
    let equal_weights;
    let weights = match profile {
        Some(weights) => weights,
        None => {
            score_warn!("no {} for band {}, using equal weights", profile_name, band);
            equal_weights = equal_profile(tables);
            &equal_weights
        }
    };

    let mut total = 0.0;
    for (dimension, weight) in weights {
        match dimension_scores.get(dimension) {
            Some(score) => total += weight * transform(*score),
            None => score_warn!(
                "dimension '{}' has no score, contributing 0 to {}",
                dimension,
                profile_name
            ),
        }
    }

    for dimension in dimension_scores.keys() {
        if !weights.contains_key(dimension) {
            score_warn!(
                "dimension '{}' has no weight in {} for band {}",
                dimension,
                profile_name,
                band
            );
        }
    }

    total
}

fn equal_profile(tables: &ScoringTables) -> BTreeMap<String, f64> {
    let count = tables.dimensions.len().max(1);
    tables
        .dimensions
        .iter()
        .map(|dimension| (dimension.name.clone(), 1.0 / count as f64))
        .collect()
}
