use crate::config::{Direction, MetricSpec, ScoringTables};
use crate::score_warn;

/// Score substituted when a metric or band has no thresholds configured.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Lowest score inside the ideal range for directional metrics.
const IDEAL_BASE: f64 = 0.8;

/// Lowest score in the transition zones of mid metrics.
const MID_BASE: f64 = 0.5;

/// Normalize a raw metric value to a 0-1 score using the thresholds for
/// `band`.
///
/// Scoring is total: an unconfigured metric, a band without thresholds, or
/// a non-finite value scores [`NEUTRAL_SCORE`] with a warning instead of
/// failing. New metrics can appear in the pipeline output before the
/// tables catch up.
pub fn normalize_metric(tables: &ScoringTables, metric: &str, value: f64, band: &str) -> f64 {
    let Some(spec) = tables.metric_spec(metric, band) else {
        if tables.metrics.contains_key(metric) {
            score_warn!("no thresholds for '{}' in band {}, scoring neutral", metric, band);
        } else {
            score_warn!("unknown metric '{}', scoring neutral", metric);
        }
        return NEUTRAL_SCORE;
    };

    if !value.is_finite() {
        score_warn!("metric '{}' is not finite ({}), scoring neutral", metric, value);
        return NEUTRAL_SCORE;
    }

    score_value(spec, value)
}

/// Piecewise-linear scoring curve.
///
/// Values inside the ideal range score [IDEAL_BASE, 1.0] (mid metrics score
/// exactly 1.0 there); values between the ideal range and the hard bound
/// ramp linearly down to 0; values at or past the hard bound score 0.
fn score_value(spec: &MetricSpec, value: f64) -> f64 {
    let lo = spec.ideal_low;
    let hi = spec.ideal_high;

    match spec.direction {
        Direction::HigherBetter => {
            let floor = spec.hard_floor();
            if value >= hi {
                1.0
            } else if value <= floor {
                0.0
            } else if value >= lo {
                IDEAL_BASE + (1.0 - IDEAL_BASE) * position(value, lo, hi)
            } else {
                IDEAL_BASE * position(value, floor, lo)
            }
        }
        Direction::LowerBetter => {
            let ceiling = spec.hard_ceiling();
            if value <= lo {
                1.0
            } else if value >= ceiling {
                0.0
            } else if value <= hi {
                IDEAL_BASE + (1.0 - IDEAL_BASE) * (1.0 - position(value, lo, hi))
            } else {
                IDEAL_BASE * (1.0 - position(value, hi, ceiling))
            }
        }
        Direction::Mid => {
            let floor = spec.hard_floor();
            let ceiling = spec.hard_ceiling();
            if value >= lo && value <= hi {
                1.0
            } else if value < lo {
                if value <= floor {
                    0.0
                } else {
                    MID_BASE + (1.0 - MID_BASE) * position(value, floor, lo)
                }
            } else if value >= ceiling {
                0.0
            } else {
                MID_BASE + (1.0 - MID_BASE) * (1.0 - position(value, hi, ceiling))
            }
        }
    }
}

/// Fraction of the way `value` sits through `[lo, hi]`, clamped to [0, 1].
///
/// A zero-width interval acts as a step at `lo`. An endpoint at infinity
/// pins the fraction to its limit (0 when `hi` is infinite, 1 when `lo` is
/// negative infinity), so a transition zone with an unbounded edge
/// collapses to its limiting constant rather than dividing infinity by
/// infinity.
fn position(value: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        if value < lo {
            0.0
        } else {
            1.0
        }
    } else if lo == f64::NEG_INFINITY {
        1.0
    } else {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}
