use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ScoringTables;
use crate::metrics::RawMetrics;
use crate::score_warn;

use super::bands::resolve_age_band;
use super::composite::{brainrot_index, development_score};
use super::dimensions;
use super::interpret::{interpret_scores, Interpretations};
use super::recommend::{recommend, Recommendations};

#[derive(Debug, Clone, Serialize)]
pub struct OverallScores {
    pub development_score: f64,
    pub brainrot_index: f64,
}

/// Complete scoring result for one video at one child age.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub child_age: f64,
    pub age_band: String,
    pub age_band_label: String,
    pub dimension_scores: BTreeMap<String, f64>,
    pub overall_scores: OverallScores,
    pub interpretations: Interpretations,
    pub recommendations: Recommendations,
}

/// Run the full scoring pass: age band resolution, per-dimension scores,
/// both composite indices, interpretations, and recommendations.
///
/// Never fails. Gaps in the metrics or the tables degrade to neutral
/// defaults with warnings, so a partially analyzed video still gets a
/// best-effort score.
pub fn evaluate(tables: &ScoringTables, raw: &RawMetrics, child_age: f64) -> Evaluation {
    let (band_id, band_label) = match resolve_age_band(&tables.age_bands, child_age) {
        Some(band) => (band.id.clone(), band.label.clone()),
        None => {
            score_warn!("no age bands configured, scoring with neutral defaults");
            (String::new(), String::new())
        }
    };

    let dimension_scores = dimensions::dimension_scores(tables, raw, &band_id);
    let development = development_score(tables, &dimension_scores, &band_id);
    let brainrot = brainrot_index(tables, &dimension_scores, &band_id);
    let interpretations = interpret_scores(development, brainrot);
    let recommendations = recommend(tables, &dimension_scores, raw, &band_id);

    Evaluation {
        child_age,
        age_band: band_id,
        age_band_label: band_label,
        dimension_scores,
        overall_scores: OverallScores {
            development_score: development,
            brainrot_index: brainrot,
        },
        interpretations,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{builtin_tables, Direction};
    use crate::warnlog;

    /// Raw metrics hitting every configured metric's sweet spot for `band`.
    fn ideal_raw_metrics(band: &str) -> RawMetrics {
        let tables = builtin_tables();
        let mut values = BTreeMap::new();
        for dimension in &tables.dimensions {
            for metric in &dimension.metrics {
                let spec = tables.metric_spec(metric, band).unwrap();
                let value = match spec.direction {
                    Direction::HigherBetter => spec.ideal_high,
                    Direction::LowerBetter => spec.ideal_low,
                    Direction::Mid => (spec.ideal_low + spec.ideal_high) / 2.0,
                };
                values.insert(metric.clone(), value);
            }
        }
        values.into()
    }

    /// Raw metrics at or past every hard bound for `band`.
    fn worst_raw_metrics(band: &str) -> RawMetrics {
        let tables = builtin_tables();
        let mut values = BTreeMap::new();
        for dimension in &tables.dimensions {
            for metric in &dimension.metrics {
                let spec = tables.metric_spec(metric, band).unwrap();
                let value = match spec.direction {
                    Direction::HigherBetter => spec.hard_floor(),
                    Direction::LowerBetter => spec.hard_ceiling(),
                    Direction::Mid => {
                        if spec.hard_ceiling().is_finite() {
                            spec.hard_ceiling()
                        } else {
                            spec.hard_floor()
                        }
                    }
                };
                values.insert(metric.clone(), value);
            }
        }
        values.into()
    }

    #[test]
    fn test_ideal_content_scores_full_marks_in_every_band() {
        let ages = [1.0, 2.5, 4.0, 6.5];
        for age in ages {
            let tables = builtin_tables();
            let band = crate::scoring::resolve_age_band(&tables.age_bands, age)
                .unwrap()
                .id
                .clone();
            let raw = ideal_raw_metrics(&band);

            let (evaluation, warnings) = warnlog::capture(|| evaluate(tables, &raw, age));

            assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
            for (dimension, score) in &evaluation.dimension_scores {
                assert!(
                    (score - 100.0).abs() < 1e-6,
                    "{} scored {} at age {}",
                    dimension,
                    score,
                    age
                );
            }
            assert!((evaluation.overall_scores.development_score - 100.0).abs() < 1e-6);
            assert!(evaluation.overall_scores.brainrot_index.abs() < 1e-6);
            assert_eq!(evaluation.interpretations.overall, "Recommended");
        }
    }

    #[test]
    fn test_worst_content_bottoms_out() {
        let tables = builtin_tables();
        let raw = worst_raw_metrics("G1_0_2");

        let (evaluation, _) = warnlog::capture(|| evaluate(tables, &raw, 1.0));

        for (dimension, score) in &evaluation.dimension_scores {
            assert!(score.abs() < 1e-6, "{} scored {}", dimension, score);
        }
        assert!(evaluation.overall_scores.development_score.abs() < 1e-6);
        assert!((evaluation.overall_scores.brainrot_index - 100.0).abs() < 1e-6);
        assert_eq!(evaluation.interpretations.overall, "Not recommended");
        assert!(!evaluation.recommendations.concerns.is_empty());
    }

    #[test]
    fn test_band_resolved_from_age() {
        let tables = builtin_tables();
        let raw = ideal_raw_metrics("G3_3_5");

        let evaluation = evaluate(tables, &raw, 3.5);
        assert_eq!(evaluation.age_band, "G3_3_5");
        assert_eq!(evaluation.age_band_label, "Preschool");
        assert_eq!(evaluation.child_age, 3.5);
    }

    #[test]
    fn test_out_of_range_age_uses_last_band() {
        let tables = builtin_tables();
        let raw = ideal_raw_metrics("G4_5_8");

        let evaluation = evaluate(tables, &raw, 30.0);
        assert_eq!(evaluation.age_band, "G4_5_8");
        assert_eq!(evaluation.age_band_label, "Early Elementary");
    }

    #[test]
    fn test_empty_tables_still_evaluate() {
        let tables = ScoringTables {
            age_bands: vec![],
            metrics: BTreeMap::new(),
            dimensions: vec![],
            development_weights: BTreeMap::new(),
            brainrot_weights: BTreeMap::new(),
        };
        let raw: RawMetrics = [("cuts_per_minute".to_string(), 10.0)].into_iter().collect();

        let (evaluation, warnings) = warnlog::capture(|| evaluate(&tables, &raw, 3.0));

        assert_eq!(evaluation.age_band, "");
        assert!(evaluation.dimension_scores.is_empty());
        assert_eq!(evaluation.overall_scores.development_score, 0.0);
        assert_eq!(evaluation.overall_scores.brainrot_index, 0.0);
        assert!(warnings
            .iter()
            .any(|warning| warning.contains("no age bands configured")));
    }

    #[test]
    fn test_mixed_content_lands_between() {
        let tables = builtin_tables();
        // pacing at the hard limit, everything else ideal
        let mut raw = ideal_raw_metrics("G3_3_5");
        let worst = worst_raw_metrics("G3_3_5");
        let mut values: BTreeMap<String, f64> = raw.iter().map(|(k, v)| (k.clone(), *v)).collect();
        for metric in &tables.dimensions[0].metrics {
            values.insert(metric.clone(), worst.get(metric).unwrap());
        }
        raw = values.into();

        let (evaluation, _) = warnlog::capture(|| evaluate(tables, &raw, 4.0));

        let dev = evaluation.overall_scores.development_score;
        let brainrot = evaluation.overall_scores.brainrot_index;
        // G3_3_5 dev weights give Pacing 0.15: 0.85 * 100 = 85
        assert!((dev - 85.0).abs() < 1e-6);
        // brainrot weights give Pacing 0.35: risk 100 on Pacing alone
        assert!((brainrot - 35.0).abs() < 1e-6);
    }
}
