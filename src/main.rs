use clap::Parser;
use noteshelf::cli::{ArchiveCommand, run_cli_with_settings};
use noteshelf::config::Settings;
use noteshelf::output::OutputFormatter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Archive dated daily notes into a target folder.
#[derive(Parser)]
#[command(name = "noteshelf", version, about)]
struct Cli {
    /// Vault directory to scan.
    vault: PathBuf,

    /// Only relocate notes under the legacy "Daily Notes" folder.
    #[arg(long)]
    legacy: bool,

    /// Show what would be archived without moving anything.
    #[arg(long)]
    dry_run: bool,

    /// Settings file to use instead of the default search locations.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured date format for this run.
    #[arg(long)]
    format: Option<String>,

    /// Override the configured target folder for this run.
    #[arg(long)]
    target: Option<String>,

    /// Partition the archive into <year>/<month> subfolders.
    #[arg(long)]
    year_month: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            OutputFormatter::error(&format!("Error loading settings: {}", e));
            return ExitCode::FAILURE;
        }
    };
    if let Some(format) = cli.format {
        settings.date_format = format;
    }
    if let Some(target) = cli.target {
        settings.target_folder = target;
    }
    if cli.year_month {
        settings.use_year_month_subfolders = true;
    }

    let command = if cli.legacy {
        ArchiveCommand::RelocateLegacy {
            dry_run: cli.dry_run,
        }
    } else {
        ArchiveCommand::ScanVault {
            dry_run: cli.dry_run,
        }
    };

    match run_cli_with_settings(command, &cli.vault, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e);
            ExitCode::FAILURE
        }
    }
}
