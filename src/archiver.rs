//! Classification and relocation of dated notes.
//!
//! This module decides, per candidate file, whether it should be moved into
//! the archive folder and where, then executes those decisions through the
//! [`Vault`] collaborator. Decision-making is pure ([`decide`]/[`plan`]) so
//! the dry-run pass and both archive operations share identical logic.

use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::format::CompiledFormat;
use crate::output::OutputFormatter;
use crate::vault::{NoteFile, Vault, VaultResult};

/// The folder the legacy relocation pass is restricted to.
pub const LEGACY_FOLDER: &str = "Daily Notes";

/// Which files a run considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every file in the vault.
    EntireVault,
    /// Only files under the fixed legacy folder.
    LegacyFolder,
}

/// Why a candidate file was not moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The filename matches the format shape but is not a valid date.
    Unparseable,
    /// The note is dated today and is never archived.
    SameDayAsToday,
    /// The file already lives under the target folder.
    AlreadyArchived,
}

impl SkipReason {
    fn describe(self) -> &'static str {
        match self {
            Self::Unparseable => "not a valid calendar date",
            Self::SameDayAsToday => "dated today",
            Self::AlreadyArchived => "already archived",
        }
    }
}

/// The outcome planned for one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveDecision {
    /// Move the file from `source` to `destination` (both vault-relative).
    Move {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Leave the file where it is.
    Skip { path: PathBuf, reason: SkipReason },
}

/// Aggregate counts for one archive run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Files whose name matched the date format.
    pub found: usize,
    /// Files moved into the archive.
    pub moved: usize,
    /// Files skipped (including failed moves, which are reported per-file).
    pub skipped: usize,
}

/// Decides what to do with one candidate file.
///
/// Returns `None` for files that are not candidates at all (wrong extension,
/// name doesn't match the compiled format). Candidates always produce a
/// decision: a move with its destination, or a skip with a reason.
pub fn decide(
    file: &NoteFile,
    settings: &Settings,
    compiled: &CompiledFormat,
    today: NaiveDate,
) -> Option<MoveDecision> {
    if file.extension != "md" {
        return None;
    }
    if !compiled.matches(&file.name) {
        return None;
    }

    let stem = file.name.strip_suffix(".md").unwrap_or(&file.name);
    let Some(date) = compiled.parse_stem(stem) else {
        return Some(MoveDecision::Skip {
            path: file.path.clone(),
            reason: SkipReason::Unparseable,
        });
    };

    // Calendar-day comparison only; today's note is never archived.
    if date == today {
        return Some(MoveDecision::Skip {
            path: file.path.clone(),
            reason: SkipReason::SameDayAsToday,
        });
    }

    let target = Path::new(&settings.target_folder);
    if file.path.starts_with(target) {
        return Some(MoveDecision::Skip {
            path: file.path.clone(),
            reason: SkipReason::AlreadyArchived,
        });
    }

    let destination = if settings.use_year_month_subfolders {
        target
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(&file.name)
    } else {
        target.join(&file.name)
    };

    Some(MoveDecision::Move {
        source: file.path.clone(),
        destination,
    })
}

/// Plans decisions for every candidate file within the scope.
pub fn plan(
    files: &[NoteFile],
    settings: &Settings,
    compiled: &CompiledFormat,
    today: NaiveDate,
    scope: Scope,
) -> Vec<MoveDecision> {
    files
        .iter()
        .filter(|file| match scope {
            Scope::EntireVault => true,
            Scope::LegacyFolder => file.path.starts_with(LEGACY_FOLDER),
        })
        .filter_map(|file| decide(file, settings, compiled, today))
        .collect()
}

/// Creates each missing ancestor directory of `destination`, parent-first.
/// Existing directories are left alone, so re-running is idempotent.
fn ensure_destination_dirs(vault: &dyn Vault, destination: &Path) -> VaultResult<()> {
    let mut ancestors: Vec<&Path> = destination
        .ancestors()
        .skip(1)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    ancestors.reverse();
    for dir in ancestors {
        if !vault.exists(dir) {
            vault.create_dir(dir)?;
        }
    }
    Ok(())
}

/// Runs one archive pass: plan every candidate, then execute the decisions.
///
/// Each file is processed to completion before the next begins. Per-file
/// failures (unparseable dates, failed moves) are reported through the vault
/// and counted as skipped; they never abort the batch. With `dry_run`, the
/// planned decisions are announced and nothing is touched.
pub fn run(
    vault: &dyn Vault,
    settings: &Settings,
    compiled: &CompiledFormat,
    today: NaiveDate,
    scope: Scope,
    dry_run: bool,
) -> ArchiveSummary {
    let files = vault.list_files();
    let decisions = plan(&files, settings, compiled, today, scope);

    let mut summary = ArchiveSummary {
        found: decisions.len(),
        ..ArchiveSummary::default()
    };

    if dry_run {
        for decision in &decisions {
            match decision {
                MoveDecision::Move {
                    source,
                    destination,
                } => {
                    OutputFormatter::dry_run_notice(&format!(
                        "Would move {} to {}",
                        source.display(),
                        destination.display()
                    ));
                    summary.moved += 1;
                }
                MoveDecision::Skip { path, reason } => {
                    OutputFormatter::dry_run_notice(&format!(
                        "Would skip {} ({})",
                        path.display(),
                        reason.describe()
                    ));
                    summary.skipped += 1;
                }
            }
        }
        return summary;
    }

    let progress = OutputFormatter::create_progress_bar(decisions.len() as u64);
    for decision in &decisions {
        match decision {
            MoveDecision::Move {
                source,
                destination,
            } => match execute_move(vault, source, destination) {
                Ok(()) => {
                    vault.notify(&format!(
                        "Archived {} to {}",
                        source.display(),
                        destination.display()
                    ));
                    summary.moved += 1;
                }
                Err(e) => {
                    OutputFormatter::error(&format!("Could not archive {}: {}", source.display(), e));
                    summary.skipped += 1;
                }
            },
            MoveDecision::Skip { path, reason } => {
                if *reason == SkipReason::Unparseable {
                    vault.notify(&format!(
                        "Skipping {}: {}",
                        path.display(),
                        reason.describe()
                    ));
                }
                summary.skipped += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    summary
}

fn execute_move(vault: &dyn Vault, source: &Path, destination: &Path) -> VaultResult<()> {
    ensure_destination_dirs(vault, destination)?;
    vault.rename(source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(path: &str) -> NoteFile {
        let path = PathBuf::from(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        NoteFile {
            name,
            path,
            extension,
        }
    }

    fn settings(target: &str, year_month: bool) -> Settings {
        Settings {
            target_folder: target.to_string(),
            use_year_month_subfolders: year_month,
            ..Settings::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
    }

    fn compiled() -> CompiledFormat {
        CompiledFormat::compile("DD-MM-YYYY").unwrap()
    }

    #[test]
    fn test_decide_flat_destination() {
        let decision = decide(
            &note("15-07-2019.md"),
            &settings("Archive", false),
            &compiled(),
            today(),
        );
        assert_eq!(
            decision,
            Some(MoveDecision::Move {
                source: PathBuf::from("15-07-2019.md"),
                destination: PathBuf::from("Archive/15-07-2019.md"),
            })
        );
    }

    #[test]
    fn test_decide_year_month_destination() {
        let decision = decide(
            &note("15-07-2019.md"),
            &settings("Archive", true),
            &compiled(),
            today(),
        );
        assert_eq!(
            decision,
            Some(MoveDecision::Move {
                source: PathBuf::from("15-07-2019.md"),
                destination: PathBuf::from("Archive/2019/07/15-07-2019.md"),
            })
        );
    }

    #[test]
    fn test_decide_ignores_non_candidates() {
        let config = settings("Archive", false);
        // Wrong extension.
        assert_eq!(
            decide(&note("15-07-2019.txt"), &config, &compiled(), today()),
            None
        );
        // Name doesn't match the format shape.
        assert_eq!(
            decide(&note("meeting-notes.md"), &config, &compiled(), today()),
            None
        );
    }

    #[test]
    fn test_decide_skips_invalid_calendar_date() {
        let decision = decide(
            &note("31-04-2021.md"),
            &settings("Archive", false),
            &compiled(),
            today(),
        );
        assert_eq!(
            decision,
            Some(MoveDecision::Skip {
                path: PathBuf::from("31-04-2021.md"),
                reason: SkipReason::Unparseable,
            })
        );
    }

    #[test]
    fn test_decide_never_moves_todays_note() {
        let decision = decide(
            &note("01-06-2021.md"),
            &settings("Archive", true),
            &compiled(),
            today(),
        );
        assert_eq!(
            decision,
            Some(MoveDecision::Skip {
                path: PathBuf::from("01-06-2021.md"),
                reason: SkipReason::SameDayAsToday,
            })
        );
    }

    #[test]
    fn test_decide_skips_already_archived() {
        for year_month in [false, true] {
            let decision = decide(
                &note("Archive/15-07-2019.md"),
                &settings("Archive", year_month),
                &compiled(),
                today(),
            );
            assert_eq!(
                decision,
                Some(MoveDecision::Skip {
                    path: PathBuf::from("Archive/15-07-2019.md"),
                    reason: SkipReason::AlreadyArchived,
                })
            );
        }
    }

    #[test]
    fn test_decide_archived_check_uses_path_components() {
        // "Archived Notes" is not under "Archive".
        let decision = decide(
            &note("Archived Notes/15-07-2019.md"),
            &settings("Archive", false),
            &compiled(),
            today(),
        );
        assert!(matches!(decision, Some(MoveDecision::Move { .. })));
    }

    #[test]
    fn test_plan_legacy_scope_filters_paths() {
        let files = vec![
            note("15-07-2019.md"),
            note("Daily Notes/16-07-2019.md"),
            note("Projects/17-07-2019.md"),
        ];
        let decisions = plan(
            &files,
            &settings("Archive", false),
            &compiled(),
            today(),
            Scope::LegacyFolder,
        );
        assert_eq!(
            decisions,
            vec![MoveDecision::Move {
                source: PathBuf::from("Daily Notes/16-07-2019.md"),
                destination: PathBuf::from("Archive/16-07-2019.md"),
            }]
        );
    }

    #[test]
    fn test_plan_entire_vault_takes_all_matching() {
        let files = vec![
            note("15-07-2019.md"),
            note("Daily Notes/16-07-2019.md"),
            note("notes.md"),
        ];
        let decisions = plan(
            &files,
            &settings("Archive", false),
            &compiled(),
            today(),
            Scope::EntireVault,
        );
        assert_eq!(decisions.len(), 2);
    }
}
