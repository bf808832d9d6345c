use std::collections::BTreeSet;

use anyhow::Result;

use crate::config::{Direction, ScoringTables};

/// How far a weight profile may drift from summing to 1.0 before
/// [`weight_warnings`] flags it.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Validate scoring tables at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_tables(tables: &ScoringTables) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Age bands: non-empty, well-formed, contiguous from age 0
    if tables.age_bands.is_empty() {
        errors.push("age_bands: at least one band is required".to_string());
    } else if tables.age_bands[0].min_age != 0.0 {
        errors.push(format!(
            "age_bands[0] ({}): must start at age 0, got {}",
            tables.age_bands[0].id, tables.age_bands[0].min_age
        ));
    }

    let mut seen_bands = BTreeSet::new();
    for (i, band) in tables.age_bands.iter().enumerate() {
        if !seen_bands.insert(band.id.as_str()) {
            errors.push(format!("age_bands: duplicate id '{}'", band.id));
        }
        if !(band.min_age < band.max_age) {
            errors.push(format!(
                "age_bands[{}] ({}): min_age {} is not below max_age {}",
                i, band.id, band.min_age, band.max_age
            ));
        }
        if i > 0 {
            let previous = &tables.age_bands[i - 1];
            if band.min_age != previous.max_age {
                errors.push(format!(
                    "age_bands[{}] ({}): starts at {} but the previous band ends at {}",
                    i, band.id, band.min_age, previous.max_age
                ));
            }
        }
    }

    let band_ids: BTreeSet<&str> = tables.age_bands.iter().map(|band| band.id.as_str()).collect();

    // Metric thresholds: known bands, sane ideal ranges, and finite hard
    // bounds outside the ideal range on the side the direction consults
    for (metric, by_band) in &tables.metrics {
        for (band, spec) in by_band {
            if !band_ids.contains(band.as_str()) {
                errors.push(format!("metrics.{}.{}: unknown age band", metric, band));
            }
            if !spec.ideal_low.is_finite() || !spec.ideal_high.is_finite() {
                errors.push(format!(
                    "metrics.{}.{}: ideal bounds must be finite",
                    metric, band
                ));
                continue;
            }
            if spec.ideal_low > spec.ideal_high {
                errors.push(format!(
                    "metrics.{}.{}: ideal_low {} exceeds ideal_high {}",
                    metric, band, spec.ideal_low, spec.ideal_high
                ));
            }
            if matches!(spec.direction, Direction::HigherBetter | Direction::Mid) {
                if let Some(floor) = spec.hard_min {
                    if !floor.is_finite() {
                        errors.push(format!(
                            "metrics.{}.{}: hard_min must be finite, got {}; omit it for an unbounded metric",
                            metric, band, floor
                        ));
                    } else if floor > spec.ideal_low {
                        errors.push(format!(
                            "metrics.{}.{}: hard_min {} is inside the ideal range (ideal_low {})",
                            metric, band, floor, spec.ideal_low
                        ));
                    }
                }
            }
            if matches!(spec.direction, Direction::LowerBetter | Direction::Mid) {
                if let Some(ceiling) = spec.hard_max {
                    if !ceiling.is_finite() {
                        errors.push(format!(
                            "metrics.{}.{}: hard_max must be finite, got {}; omit it for an unbounded metric",
                            metric, band, ceiling
                        ));
                    } else if ceiling < spec.ideal_high {
                        errors.push(format!(
                            "metrics.{}.{}: hard_max {} is inside the ideal range (ideal_high {})",
                            metric, band, ceiling, spec.ideal_high
                        ));
                    }
                }
            }
        }
    }

    // Dimensions: unique names
    let mut seen_dimensions = BTreeSet::new();
    for dimension in &tables.dimensions {
        if !seen_dimensions.insert(dimension.name.as_str()) {
            errors.push(format!("dimensions: duplicate name '{}'", dimension.name));
        }
    }

    let dimension_names: BTreeSet<&str> = tables
        .dimensions
        .iter()
        .map(|dimension| dimension.name.as_str())
        .collect();

    // Weight profiles: known bands, declared dimensions, usable weights
    for (profile_name, profile) in [
        ("development_weights", &tables.development_weights),
        ("brainrot_weights", &tables.brainrot_weights),
    ] {
        for (band, weights) in profile {
            if !band_ids.contains(band.as_str()) {
                errors.push(format!("{}.{}: unknown age band", profile_name, band));
            }
            for (dimension, weight) in weights {
                if !dimension_names.contains(dimension.as_str()) {
                    errors.push(format!(
                        "{}.{}: unknown dimension '{}'",
                        profile_name, band, dimension
                    ));
                }
                if !weight.is_finite() || *weight < 0.0 {
                    errors.push(format!(
                        "{}.{}.{}: weight must be finite and non-negative, got {}",
                        profile_name, band, dimension, weight
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Flag weight profiles that do not sum to ~1.0.
///
/// Composite scores are plain weighted sums with no renormalization; a
/// profile summing to 0.9 caps its composite at 90, so miscalibration is
/// surfaced here rather than silently corrected.
pub fn weight_warnings(tables: &ScoringTables) -> Vec<String> {
    let mut warnings = Vec::new();

    for (profile_name, profile) in [
        ("development weights", &tables.development_weights),
        ("brainrot weights", &tables.brainrot_weights),
    ] {
        for (band, weights) in profile {
            let sum: f64 = weights.values().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                warnings.push(format!(
                    "{} for band {} sum to {:.3}, expected ~1.0; composite scores will not span 0-100",
                    profile_name, band, sum
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{builtin_tables, MetricSpec, ScoringTables};

    fn sample_tables() -> ScoringTables {
        serde_saphyr::from_str(
            r#"
age_bands:
  - { id: G1_0_2, label: "Infant/Toddler", min_age: 0, max_age: 2 }
  - { id: G2_2_3, label: "Early Preschool", min_age: 2, max_age: 3 }
metrics:
  cuts_per_minute:
    G1_0_2: { direction: lower_better, ideal_low: 0, ideal_high: 6, hard_max: 20 }
    G2_2_3: { direction: lower_better, ideal_low: 0, ideal_high: 8, hard_max: 25 }
  avg_shot_length:
    G1_0_2: { direction: higher_better, ideal_low: 8, ideal_high: 100, hard_min: 2 }
    G2_2_3: { direction: mid, ideal_low: 6, ideal_high: 100, hard_min: 2 }
dimensions:
  - name: Pacing
    metrics: [cuts_per_minute, avg_shot_length]
development_weights:
  G1_0_2: { Pacing: 1.0 }
  G2_2_3: { Pacing: 1.0 }
brainrot_weights:
  G1_0_2: { Pacing: 1.0 }
  G2_2_3: { Pacing: 1.0 }
"#,
        )
        .unwrap()
    }

    fn spec(
        direction: Direction,
        lo: f64,
        hi: f64,
        floor: Option<f64>,
        ceiling: Option<f64>,
    ) -> MetricSpec {
        MetricSpec {
            direction,
            ideal_low: lo,
            ideal_high: hi,
            hard_min: floor,
            hard_max: ceiling,
        }
    }

    #[test]
    fn test_builtin_tables_validate() {
        assert!(validate_tables(builtin_tables()).is_ok());
        assert!(weight_warnings(builtin_tables()).is_empty());
    }

    #[test]
    fn test_sample_tables_validate() {
        assert!(validate_tables(&sample_tables()).is_ok());
    }

    #[test]
    fn test_empty_bands_rejected() {
        let mut tables = sample_tables();
        tables.age_bands.clear();
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least one band")));
    }

    #[test]
    fn test_bands_must_start_at_zero() {
        let mut tables = sample_tables();
        tables.age_bands[0].min_age = 0.5;
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors[0].contains("must start at age 0, got 0.5"));
    }

    #[test]
    fn test_band_gap_rejected() {
        let mut tables = sample_tables();
        tables.age_bands[1].min_age = 2.5;
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("starts at 2.5 but the previous band ends at 2")));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut tables = sample_tables();
        tables.age_bands[1].max_age = 1.5;
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("min_age 2 is not below max_age 1.5")));
    }

    #[test]
    fn test_duplicate_band_id_rejected() {
        let mut tables = sample_tables();
        tables.age_bands[1].id = "G1_0_2".to_string();
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("duplicate id 'G1_0_2'")));
    }

    #[test]
    fn test_metric_unknown_band_rejected() {
        let mut tables = sample_tables();
        tables.metrics.get_mut("cuts_per_minute").unwrap().insert(
            "G9_9_9".to_string(),
            spec(Direction::LowerBetter, 0.0, 6.0, None, Some(20.0)),
        );
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("metrics.cuts_per_minute.G9_9_9: unknown age band")));
    }

    #[test]
    fn test_inverted_ideal_range_rejected() {
        let mut tables = sample_tables();
        tables.metrics.get_mut("cuts_per_minute").unwrap().insert(
            "G1_0_2".to_string(),
            spec(Direction::LowerBetter, 6.0, 0.0, None, Some(20.0)),
        );
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("ideal_low 6 exceeds ideal_high 0")));
    }

    #[test]
    fn test_hard_bound_inside_ideal_rejected() {
        let mut tables = sample_tables();
        tables.metrics.get_mut("avg_shot_length").unwrap().insert(
            "G1_0_2".to_string(),
            spec(Direction::HigherBetter, 8.0, 100.0, Some(10.0), None),
        );
        tables.metrics.get_mut("cuts_per_minute").unwrap().insert(
            "G1_0_2".to_string(),
            spec(Direction::LowerBetter, 0.0, 6.0, None, Some(4.0)),
        );
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("hard_min 10 is inside the ideal range (ideal_low 8)")));
        assert!(errors
            .iter()
            .any(|e| e.contains("hard_max 4 is inside the ideal range (ideal_high 6)")));
    }

    #[test]
    fn test_hard_bound_at_ideal_edge_allowed() {
        let mut tables = sample_tables();
        // a zero-width transition zone is a step, not an error
        tables.metrics.get_mut("avg_shot_length").unwrap().insert(
            "G1_0_2".to_string(),
            spec(Direction::HigherBetter, 8.0, 100.0, Some(8.0), None),
        );
        assert!(validate_tables(&tables).is_ok());
    }

    #[test]
    fn test_unused_hard_bound_not_checked() {
        let mut tables = sample_tables();
        // lower_better never consults hard_min
        tables.metrics.get_mut("cuts_per_minute").unwrap().insert(
            "G1_0_2".to_string(),
            spec(Direction::LowerBetter, 0.0, 6.0, Some(3.0), Some(20.0)),
        );
        assert!(validate_tables(&tables).is_ok());
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let mut tables = sample_tables();
        tables.metrics.get_mut("avg_shot_length").unwrap().insert(
            "G1_0_2".to_string(),
            spec(
                Direction::HigherBetter,
                8.0,
                100.0,
                Some(f64::NEG_INFINITY),
                None,
            ),
        );
        tables.metrics.get_mut("avg_shot_length").unwrap().insert(
            "G2_2_3".to_string(),
            spec(Direction::Mid, 6.0, 100.0, Some(f64::NAN), None),
        );
        tables.metrics.get_mut("cuts_per_minute").unwrap().insert(
            "G1_0_2".to_string(),
            spec(Direction::LowerBetter, 0.0, 6.0, None, Some(f64::INFINITY)),
        );
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("avg_shot_length.G1_0_2: hard_min must be finite, got -inf")));
        assert!(errors
            .iter()
            .any(|e| e.contains("avg_shot_length.G2_2_3: hard_min must be finite, got NaN")));
        assert!(errors
            .iter()
            .any(|e| e.contains("cuts_per_minute.G1_0_2: hard_max must be finite, got inf")));
    }

    #[test]
    fn test_infinite_bound_from_yaml_rejected() {
        // user overrides can spell negative infinity as a YAML scalar
        let parsed: MetricSpec = serde_saphyr::from_str(
            "{ direction: higher_better, ideal_low: 8, ideal_high: 100, hard_min: -.inf }",
        )
        .unwrap();
        assert_eq!(parsed.hard_min, Some(f64::NEG_INFINITY));

        let mut tables = sample_tables();
        tables
            .metrics
            .get_mut("avg_shot_length")
            .unwrap()
            .insert("G1_0_2".to_string(), parsed);
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("metrics.avg_shot_length.G1_0_2: hard_min must be finite, got -inf")));
    }

    #[test]
    fn test_weight_unknown_dimension_rejected() {
        let mut tables = sample_tables();
        tables
            .development_weights
            .get_mut("G1_0_2")
            .unwrap()
            .insert("Glare".to_string(), 0.1);
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("development_weights.G1_0_2: unknown dimension 'Glare'")));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut tables = sample_tables();
        tables
            .brainrot_weights
            .get_mut("G2_2_3")
            .unwrap()
            .insert("Pacing".to_string(), -0.2);
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("brainrot_weights.G2_2_3.Pacing: weight must be finite and non-negative, got -0.2")));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut tables = sample_tables();
        tables.age_bands[0].min_age = 1.0; // error 1: band start
        tables
            .development_weights
            .get_mut("G1_0_2")
            .unwrap()
            .insert("Glare".to_string(), f64::NAN); // errors 2 and 3: unknown dimension, NaN weight
        let errors = validate_tables(&tables).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_weight_sum_warning() {
        let mut tables = sample_tables();
        tables
            .development_weights
            .get_mut("G1_0_2")
            .unwrap()
            .insert("Pacing".to_string(), 0.9);
        let warnings = weight_warnings(&tables);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0]
            .contains("development weights for band G1_0_2 sum to 0.900, expected ~1.0"));
    }

    #[test]
    fn test_weight_sum_within_tolerance() {
        let mut tables = sample_tables();
        tables
            .development_weights
            .get_mut("G1_0_2")
            .unwrap()
            .insert("Pacing".to_string(), 0.995);
        assert!(weight_warnings(&tables).is_empty());
    }
}
