use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ScoringTables;
use crate::metrics::RawMetrics;

const STRENGTH_THRESHOLD: f64 = 75.0;
const CONCERN_THRESHOLD: f64 = 50.0;

/// What stood out about the video, in plain language.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
}

/// Call out strong and weak dimensions, plus a few metric-level checks
/// that a dimension average could mask.
///
/// Dimensions are reported in declared order. The metric checks fire on
/// aggression above the band's ideal range, cut rate past 80% of the
/// band's hard limit, and prosocial ratio of at least 0.7; unmeasured
/// metrics are skipped, as are the threshold-relative checks when the
/// band carries no thresholds for them.
pub fn recommend(
    tables: &ScoringTables,
    dimension_scores: &BTreeMap<String, f64>,
    raw: &RawMetrics,
    band: &str,
) -> Recommendations {
    let mut strengths = Vec::new();
    let mut concerns = Vec::new();

    for dimension in &tables.dimensions {
        let Some(score) = dimension_scores.get(&dimension.name).copied() else {
            continue;
        };
        if score >= STRENGTH_THRESHOLD {
            strengths.push(format!("{}: Excellent ({:.0}/100)", dimension.name, score));
        } else if score < CONCERN_THRESHOLD {
            concerns.push(format!(
                "{}: Needs improvement ({:.0}/100)",
                dimension.name, score
            ));
        }
    }

    if let (Some(rate), Some(spec)) = (
        raw.get("aggression_rate"),
        tables.metric_spec("aggression_rate", band),
    ) {
        if rate > spec.ideal_high {
            concerns.push(format!("High aggression rate: {:.1} per minute", rate));
        }
    }

    if let (Some(rate), Some(spec)) = (
        raw.get("cuts_per_minute"),
        tables.metric_spec("cuts_per_minute", band),
    ) {
        if rate > spec.hard_ceiling() * 0.8 {
            concerns.push(format!("Very fast pacing: {:.1} cuts per minute", rate));
        }
    }

    if let Some(ratio) = raw.get("prosocial_ratio") {
        if ratio >= 0.7 {
            strengths.push(format!(
                "Strong prosocial content: {:.1}%",
                ratio * 100.0
            ));
        }
    }

    Recommendations {
        strengths,
        concerns,
    }
}
