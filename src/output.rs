//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status lines,
//! progress tracking for large batches, and the end-of-run summary block.
//! All user-visible notifications funnel through here so formatting can be
//! changed globally.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
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

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Creates a progress bar for a batch of file operations.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the aggregate archive summary.
    pub fn summary(found: usize, moved: usize, skipped: usize) {
        println!("\n{}", "SUMMARY".bold());
        println!(
            "  {} dated {} found",
            found.to_string().bold(),
            if found == 1 { "note" } else { "notes" }
        );
        println!("  {} moved", moved.to_string().green());
        println!("  {} skipped", skipped.to_string().yellow());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
