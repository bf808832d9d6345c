pub mod formatter;
pub mod save;

pub use formatter::{
    dimension_bar, format_quality_score, format_risk_score, render_summary, should_use_colors,
    suggest_age_range,
};
pub use save::{write_report, Report, ReportMetadata};
