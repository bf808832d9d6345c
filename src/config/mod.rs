mod schema;

pub use schema::{AgeBand, DimensionSpec, Direction, MetricSpec, ScoringTables};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Builtin scoring tables, compiled into the binary.
const BUILTIN_TABLES: &str = include_str!("tables.yaml");

// The embedded tables are validated by the test suite; a parse failure here
// means the shipped asset is broken.
static BUILTIN: LazyLock<ScoringTables> = LazyLock::new(|| {
    serde_saphyr::from_str(BUILTIN_TABLES).expect("embedded tables.yaml is malformed")
});

/// Get the builtin scoring tables
pub fn builtin_tables() -> &'static ScoringTables {
    &BUILTIN
}

/// Get the config directory path (~/.config/mindsafe/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("mindsafe")
}

/// Get the user tables file path (~/.config/mindsafe/tables.yaml)
pub fn get_tables_path() -> PathBuf {
    get_config_dir().join("tables.yaml")
}

/// Load scoring tables from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to a tables file. If None, uses the user override
///   at ~/.config/mindsafe/tables.yaml when present, otherwise the builtin
///   tables.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given tables file does not exist
/// - The tables file cannot be read
/// - The YAML cannot be parsed
pub fn load_tables(path: Option<PathBuf>) -> Result<ScoringTables> {
    if let Some(tables_path) = path {
        if !tables_path.exists() {
            anyhow::bail!("Tables file not found at {}", tables_path.display());
        }
        return read_tables(&tables_path);
    }

    let user_path = get_tables_path();
    if user_path.exists() {
        return read_tables(&user_path);
    }

    Ok(builtin_tables().clone())
}

fn read_tables(path: &Path) -> Result<ScoringTables> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tables file at {}", path.display()))?;

    let tables: ScoringTables = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse scoring tables: invalid YAML in {}", path.display()))?;

    Ok(tables)
}
