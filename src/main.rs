use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "mindsafe")]
#[command(about = "Developmental scoring for children's video content", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the extracted metrics JSON file
    metrics_file: PathBuf,

    /// Child age in years (e.g. 3.5)
    #[arg(short, long)]
    age: f64,

    /// Path to scoring tables (defaults to ~/.config/mindsafe/tables.yaml, then builtin)
    #[arg(short, long)]
    tables: Option<PathBuf>,

    /// Write the full evaluation report to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the full report as JSON on stdout instead of the summary
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Load scoring tables
    let tables = match mindsafe::config::load_tables(cli.tables.clone()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} age bands, {} metrics, {} dimensions",
            tables.age_bands.len(),
            tables.metrics.len(),
            tables.dimensions.len()
        );
    }

    // Validate scoring tables at startup
    if let Err(errors) = mindsafe::scoring::validate_tables(&tables) {
        eprintln!("Scoring table errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    for warning in mindsafe::scoring::weight_warnings(&tables) {
        eprintln!("warning: {}", warning);
    }

    if cli.age < 0.0 || cli.age > 10.0 {
        eprintln!(
            "warning: Age {} is outside typical range (0-8 years)",
            cli.age
        );
    }

    // Load raw metrics
    let raw = match mindsafe::metrics::load_raw_metrics(&cli.metrics_file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Metrics error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} raw metrics from {}",
            raw.len(),
            cli.metrics_file.display()
        );
    }

    // Score, collecting warnings for the report instead of losing them to stderr
    let (evaluation, warnings) =
        mindsafe::warnlog::capture(|| mindsafe::scoring::evaluate(&tables, &raw, cli.age));

    for warning in &warnings {
        eprintln!("warning: {}", warning);
    }

    let source = cli.metrics_file.display().to_string();
    let report = mindsafe::report::Report::new(&source, &evaluation, &raw, warnings);

    // Output results
    if cli.json {
        match report.to_json_string() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Report error: {}", e);
                std::process::exit(EXIT_OUTPUT);
            }
        }
    } else {
        let use_colors = mindsafe::report::should_use_colors();
        println!("{}", mindsafe::report::render_summary(&report, use_colors));
    }

    if let Some(output) = &cli.output {
        if let Err(e) = mindsafe::report::write_report(&report, output) {
            eprintln!("Failed to save report: {}", e);
            std::process::exit(EXIT_OUTPUT);
        }
        eprintln!("Report saved to {}", output.display());
    }

    if cli.verbose {
        eprintln!("Evaluated in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
