//! Command-line surface and orchestration glue.
//!
//! Parses the flags, loads configuration, wires up the category table and
//! filters, runs the organizer and prints the summary. All the actual logic
//! lives in the other modules.

use crate::category::CategoryMap;
use crate::config::AppConfig;
use crate::organizer::{OrganizeOptions, Organizer};
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::PathBuf;

/// Organize and back up files by category (and date).
#[derive(Parser, Debug)]
#[command(name = "tidymove", version, about)]
pub struct Cli {
    /// Source directory to scan (recursive)
    #[arg(short, long)]
    pub source: PathBuf,

    /// Destination root directory
    #[arg(short, long)]
    pub dest: PathBuf,

    /// Copy files instead of moving them
    #[arg(long)]
    pub copy: bool,

    /// Show what would happen without changing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Create a date folder (YYYY-MM-DD) under each category
    #[arg(long)]
    pub by_date: bool,

    /// Skip files that are byte-identical (by SHA-256)
    #[arg(long)]
    pub skip_duplicates: bool,

    /// Path to a configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> OrganizeOptions {
        OrganizeOptions {
            copy: self.copy,
            dry_run: self.dry_run,
            by_date: self.by_date,
            skip_duplicates: self.skip_duplicates,
        }
    }
}

/// Runs one organization pass with the parsed arguments.
///
/// Loads configuration (explicit path, project file, home config or
/// defaults), applies category overrides, compiles the filters, runs the
/// organizer and prints the summary table.
///
/// # Errors
///
/// Returns a displayable message for configuration problems and for fatal
/// organizer errors; no summary is printed in that case.
pub fn run(cli: &Cli) -> Result<(), String> {
    let config = AppConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;

    let mut categories = CategoryMap::default();
    config
        .apply_categories(&mut categories)
        .map_err(|e| format!("Error in category overrides: {}", e))?;
    let filters = config
        .compile_filters()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    OutputFormatter::info(&format!(
        "Organizing {} -> {}",
        cli.source.display(),
        cli.dest.display()
    ));
    if cli.dry_run {
        OutputFormatter::dry_run_notice("No files will be modified.");
    }

    let summary = Organizer::new(cli.options(), &categories, &filters)
        .organize(&cli.source, &cli.dest)
        .map_err(|e| e.to_string())?;

    OutputFormatter::run_summary(&summary);
    Ok(())
}
