//! Command-line interface module for noteshelf.
//!
//! This module handles all CLI-related functionality including:
//! - Command dispatch for the two archive operations
//! - Settings resolution and date-format fallback
//! - Summary reporting

use chrono::Local;
use std::path::Path;

use crate::archiver::{self, Scope};
use crate::config::Settings;
use crate::format::CompiledFormat;
use crate::output::OutputFormatter;
use crate::vault::FsVault;

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy)]
pub enum ArchiveCommand {
    /// Scan the entire vault and archive old dated notes.
    ScanVault {
        /// If true, announce decisions without moving anything.
        dry_run: bool,
    },
    /// Relocate notes currently under the fixed legacy folder.
    RelocateLegacy {
        /// If true, announce decisions without moving anything.
        dry_run: bool,
    },
}

/// Runs the CLI application with the given command and vault path, using
/// settings from the default search locations.
///
/// # Examples
///
/// ```no_run
/// use noteshelf::cli::{ArchiveCommand, run_cli};
/// use std::path::Path;
///
/// let result = run_cli(
///     ArchiveCommand::ScanVault { dry_run: false },
///     Path::new("/path/to/vault"),
/// );
/// match result {
///     Ok(()) => println!("Archive run completed"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(command: ArchiveCommand, vault_path: &Path) -> Result<(), String> {
    let settings =
        Settings::load(None).map_err(|e| format!("Error loading settings: {}", e))?;
    run_cli_with_settings(command, vault_path, &settings)
}

/// Runs the CLI application with explicit settings.
///
/// This is the top of each public operation: any internal error below this
/// point surfaces here as a single user-visible message, while per-file
/// failures are reported inside the batch and never abort it.
pub fn run_cli_with_settings(
    command: ArchiveCommand,
    vault_path: &Path,
    settings: &Settings,
) -> Result<(), String> {
    let vault =
        FsVault::open(vault_path).map_err(|e| format!("Error opening vault: {}", e))?;

    // Validate first, compile second; an unusable format has already been
    // replaced by the default at this point.
    let format_string = settings.effective_format();
    let compiled = CompiledFormat::compile(&format_string)
        .map_err(|e| format!("Error compiling date format: {}", e))?;

    let (scope, dry_run) = match command {
        ArchiveCommand::ScanVault { dry_run } => (Scope::EntireVault, dry_run),
        ArchiveCommand::RelocateLegacy { dry_run } => (Scope::LegacyFolder, dry_run),
    };

    let scope_label = match scope {
        Scope::EntireVault => "entire vault".to_string(),
        Scope::LegacyFolder => format!("'{}' folder", archiver::LEGACY_FOLDER),
    };
    OutputFormatter::info(&format!(
        "Scanning {} ({}) for '{}' notes",
        vault_path.display(),
        scope_label,
        format_string
    ));

    let today = Local::now().date_naive();
    let summary = archiver::run(&vault, settings, &compiled, today, scope, dry_run);

    if summary.found == 0 {
        OutputFormatter::plain("No dated notes found.");
    } else if settings.show_summary_notification {
        OutputFormatter::summary(summary.found, summary.moved, summary.skipped);
    }

    if !dry_run && summary.moved > 0 {
        OutputFormatter::success(&format!(
            "Archived {} {} into '{}'",
            summary.moved,
            if summary.moved == 1 { "note" } else { "notes" },
            settings.target_folder
        ));
    }

    Ok(())
}
