use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::report::Report;

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;

/// Determine if colors should be used based on terminal detection
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Format a 0-100 quality score where higher is better
pub fn format_quality_score(score: f64, use_colors: bool) -> String {
    let text = format!("{:.1}/100", score);
    if !use_colors {
        return text;
    }

    if score >= 80.0 {
        format!("{}", text.green())
    } else if score >= 65.0 {
        format!("{}", text.yellow())
    } else if score >= 50.0 {
        format!("{}", text.red())
    } else {
        format!("{}", text.red().bold())
    }
}

/// Format a 0-100 risk score where lower is better
pub fn format_risk_score(score: f64, use_colors: bool) -> String {
    let text = format!("{:.1}/100", score);
    if !use_colors {
        return text;
    }

    if score <= 20.0 {
        format!("{}", text.green())
    } else if score <= 40.0 {
        format!("{}", text.yellow())
    } else if score <= 60.0 {
        format!("{}", text.red())
    } else {
        format!("{}", text.red().bold())
    }
}

/// Render a horizontal bar for a 0-100 score.
pub fn dimension_bar(score: f64, width: usize) -> String {
    // Float-to-int casts saturate, so NaN and negatives fill nothing.
    let filled = ((score / 100.0 * width as f64) as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One-line age-fit suggestion for the evaluated scores.
pub fn suggest_age_range(development_score: f64, brainrot_index: f64, child_age: f64) -> String {
    if development_score >= 65.0 && brainrot_index <= 40.0 {
        format!("Appropriate for age {:.0}", child_age)
    } else if development_score < 50.0 || brainrot_index > 60.0 {
        format!("Better suited for age {:.0}+", child_age + 1.5)
    } else {
        format!("Marginal for age {:.0}, consider supervision", child_age)
    }
}

/// Render the human-readable evaluation summary
pub fn render_summary(report: &Report, use_colors: bool) -> String {
    let width = get_terminal_width().map_or(RULE_WIDTH, |w| w.min(RULE_WIDTH));
    let heavy_rule = "=".repeat(width);
    let light_rule = "-".repeat(width);

    let mut out = String::new();

    out.push('\n');
    out.push_str(&heavy_rule);
    out.push('\n');
    if use_colors {
        out.push_str(&format!("{}", "EVALUATION SUMMARY".bold()));
    } else {
        out.push_str("EVALUATION SUMMARY");
    }
    out.push('\n');
    out.push_str(&heavy_rule);
    out.push('\n');

    out.push_str(&format!("\nVideo: {}\n", report.metadata.source));
    out.push_str(&format!(
        "Age: {} years ({})\n",
        report.metadata.child_age, report.metadata.age_band_label
    ));
    if let Some(minutes) = report.metadata.duration_minutes {
        out.push_str(&format!("Duration: {:.1} minutes\n", minutes));
    }

    out.push_str(&format!("\n{:^width$}\n", "SCORES", width = width));
    out.push_str(&light_rule);
    out.push('\n');

    let overall = &report.overall_scores;
    out.push_str(&format!(
        "  Developmental Score: {}\n",
        format_quality_score(overall.development_score, use_colors)
    ));
    out.push_str(&format!("    → {}\n", report.interpretations.developmental));
    out.push_str(&format!(
        "\n  Brainrot Index: {}\n",
        format_risk_score(overall.brainrot_index, use_colors)
    ));
    out.push_str(&format!("    → {}\n", report.interpretations.brainrot));
    out.push_str(&format!("\n  Overall: {}\n", report.interpretations.overall));
    out.push_str(&format!(
        "  Age fit: {}\n",
        suggest_age_range(
            overall.development_score,
            overall.brainrot_index,
            report.metadata.child_age
        )
    ));

    if !report.dimension_scores.is_empty() {
        out.push_str(&format!("\n{:^width$}\n", "DIMENSIONS", width = width));
        out.push_str(&light_rule);
        out.push('\n');
        for (name, score) in &report.dimension_scores {
            out.push_str(&format!(
                "  {:15} {} {}\n",
                name,
                dimension_bar(*score, BAR_WIDTH),
                format_quality_score(*score, use_colors)
            ));
        }
    }

    if !report.recommendations.strengths.is_empty() {
        out.push_str(&format!("\n{:^width$}\n", "STRENGTHS", width = width));
        out.push_str(&light_rule);
        out.push('\n');
        for strength in &report.recommendations.strengths {
            if use_colors {
                out.push_str(&format!("  {} {}\n", "✓".green(), strength));
            } else {
                out.push_str(&format!("  ✓ {}\n", strength));
            }
        }
    }

    if !report.recommendations.concerns.is_empty() {
        out.push_str(&format!("\n{:^width$}\n", "CONCERNS", width = width));
        out.push_str(&light_rule);
        out.push('\n');
        for concern in &report.recommendations.concerns {
            if use_colors {
                out.push_str(&format!("  {} {}\n", "⚠".yellow(), concern));
            } else {
                out.push_str(&format!("  ⚠ {}\n", concern));
            }
        }
    }

    out.push('\n');
    out.push_str(&heavy_rule);
    out.push('\n');

    out
}
