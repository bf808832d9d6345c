use serde::Serialize;

/// Plain-language readings of the two composite scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretations {
    pub developmental: String,
    pub brainrot: String,
    pub overall: String,
}

/// Map the composite scores onto fixed verdict bands.
pub fn interpret_scores(development_score: f64, brainrot_index: f64) -> Interpretations {
    let developmental = if development_score >= 80.0 {
        "Excellent - Highly developmentally appropriate"
    } else if development_score >= 65.0 {
        "Good - Generally appropriate with some areas for improvement"
    } else if development_score >= 50.0 {
        "Fair - Some concerning elements, use with caution"
    } else if development_score >= 35.0 {
        "Poor - Multiple developmental concerns"
    } else {
        "Very Poor - Not recommended for this age group"
    };

    let brainrot = if brainrot_index <= 20.0 {
        "Very Low Risk - Safe and healthy content"
    } else if brainrot_index <= 40.0 {
        "Low Risk - Minor concerns, generally safe"
    } else if brainrot_index <= 60.0 {
        "Moderate Risk - Some problematic elements"
    } else if brainrot_index <= 80.0 {
        "High Risk - Multiple red flags, limit exposure"
    } else {
        "Very High Risk - Strongly discourage viewing"
    };

    let overall = if development_score >= 65.0 && brainrot_index <= 40.0 {
        "Recommended"
    } else if development_score >= 50.0 && brainrot_index <= 60.0 {
        "Acceptable with supervision"
    } else {
        "Not recommended"
    };

    Interpretations {
        developmental: developmental.to_string(),
        brainrot: brainrot.to_string(),
        overall: overall.to_string(),
    }
}
