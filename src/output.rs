//! Output formatting and styling.
//!
//! Centralizes all terminal output: colored status lines, the scan spinner,
//! and the end-of-run summary table.

use crate::organizer::RunSummary;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark, to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a dimmed per-file skip line.
    pub fn skip(message: &str) {
        println!("{} {}", "-".dimmed(), message.dimmed());
    }

    /// Prints a dry-run line for an action that was only simulated.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a spinner shown while the source tree is being scanned.
    ///
    /// Drawn on stderr so the per-file lines on stdout stay clean; call
    /// `finish_and_clear` when the scan is done.
    pub fn scan_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid spinner template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints the four-counter summary table for a completed run.
    pub fn run_summary(summary: &RunSummary) {
        Self::header("Summary");

        let rows = [
            ("processed", summary.processed),
            ("moved", summary.moved),
            ("copied", summary.copied),
            ("skipped", summary.skipped),
        ];

        let width = rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);

        println!("{}", "-".repeat(width + 10));
        for (label, count) in rows {
            println!("{:<width$} | {}", label, count.to_string().green());
        }
        println!("{}", "-".repeat(width + 10));
    }
}
