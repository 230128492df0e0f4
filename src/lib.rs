//! noteshelf - a dated-note archiving utility
//!
//! This library classifies markdown files by a date encoded in their filename
//! (under a configurable token format such as `DD-MM-YYYY`), and relocates old
//! daily notes into an archive folder, optionally partitioned into
//! year/month subfolders.

pub mod archiver;
pub mod cli;
pub mod config;
pub mod format;
pub mod output;
pub mod vault;

pub use archiver::{ArchiveSummary, MoveDecision, Scope, SkipReason};
pub use config::{ConfigError, Settings};
pub use format::{CompiledFormat, FormatError, FormatToken};
pub use vault::{FsVault, NoteFile, Vault, VaultError};

pub use cli::{ArchiveCommand, run_cli};
