//! Filesystem collaborator for the archiver.
//!
//! The archiver never touches the filesystem directly; it goes through the
//! [`Vault`] trait, which covers exactly the operations it needs: listing
//! markdown files, existence checks, directory creation, renames, and
//! fire-and-forget user notification. [`FsVault`] is the real implementation
//! over a vault root directory. All paths crossing this seam are relative to
//! the vault root.

use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputFormatter;

/// A candidate file supplied by the vault, with paths relative to its root.
#[derive(Debug, Clone)]
pub struct NoteFile {
    /// The file name including extension, e.g. `15-07-2019.md`.
    pub name: String,
    /// The vault-relative path, e.g. `Daily Notes/15-07-2019.md`.
    pub path: PathBuf,
    /// The file extension without the dot.
    pub extension: String,
}

/// Errors that can occur during vault filesystem operations.
#[derive(Debug)]
pub enum VaultError {
    /// The vault root path is invalid or doesn't exist.
    InvalidRoot {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a directory inside the vault.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { path, source } => {
                write!(f, "Invalid vault path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for VaultError {}

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// The narrow interface the archiver consumes.
pub trait Vault {
    /// All markdown files in the vault, in stable path order.
    fn list_files(&self) -> Vec<NoteFile>;

    /// Whether a vault-relative path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Creates a single directory. Fails if the parent is missing.
    fn create_dir(&self, path: &Path) -> VaultResult<()>;

    /// Renames/moves a file to a new vault-relative path.
    fn rename(&self, from: &Path, to: &Path) -> VaultResult<()>;

    /// Fire-and-forget user feedback; never blocks the batch.
    fn notify(&self, message: &str);
}

/// [`Vault`] implementation over a real directory tree.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Opens a vault rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidRoot` if the path does not exist or is not
    /// a directory.
    pub fn open(root: &Path) -> VaultResult<Self> {
        if !root.is_dir() {
            return Err(VaultError::InvalidRoot {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "vault path is not an existing directory",
                ),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Vault for FsVault {
    fn list_files(&self) -> Vec<NoteFile> {
        let pattern = self.root.join("**").join("*.md");
        let mut files = Vec::new();

        if let Ok(entries) = glob(&pattern.to_string_lossy()) {
            for entry in entries.flatten() {
                if !entry.is_file() {
                    continue;
                }
                let Ok(relative) = entry.strip_prefix(&self.root) else {
                    continue;
                };
                let Some(name) = entry.file_name().map(|n| n.to_string_lossy().to_string())
                else {
                    continue;
                };
                let extension = entry
                    .extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_default();
                files.push(NoteFile {
                    name,
                    path: relative.to_path_buf(),
                    extension,
                });
            }
        }

        // Iteration order is the contract callers rely on for stable output.
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    fn exists(&self, path: &Path) -> bool {
        self.absolute(path).exists()
    }

    fn create_dir(&self, path: &Path) -> VaultResult<()> {
        let absolute = self.absolute(path);
        fs::create_dir(&absolute).map_err(|e| VaultError::DirectoryCreationFailed {
            path: absolute,
            source: e,
        })
    }

    fn rename(&self, from: &Path, to: &Path) -> VaultResult<()> {
        let source = self.absolute(from);
        let destination = self.absolute(to);
        fs::rename(&source, &destination).map_err(|e| VaultError::FileMoveFailure {
            source,
            destination,
            source_error: e,
        })
    }

    fn notify(&self, message: &str) {
        OutputFormatter::plain(message);
    }
}
