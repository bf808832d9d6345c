pub mod bands;
pub mod composite;
pub mod dimensions;
pub mod engine;
pub mod interpret;
pub mod normalize;
pub mod recommend;
pub mod validation;

pub use bands::resolve_age_band;
pub use composite::{brainrot_index, development_score};
pub use dimensions::{dimension_scores, EMPTY_DIMENSION_SCORE};
pub use engine::{evaluate, Evaluation, OverallScores};
pub use interpret::{interpret_scores, Interpretations};
pub use normalize::{normalize_metric, NEUTRAL_SCORE};
pub use recommend::{recommend, Recommendations};
pub use validation::{validate_tables, weight_warnings};
