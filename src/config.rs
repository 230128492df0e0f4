//! Persisted archiver settings.
//!
//! Settings are stored in TOML format and loaded into an immutable value
//! passed into each operation; nothing holds a live mutable settings object.
//! Missing fields fall back to their defaults, so a partial file is valid.
//!
//! # Configuration File Format
//!
//! ```toml
//! target_folder = "Old Daily Notes"
//! show_summary_notification = true
//! date_format = "DD-MM-YYYY"
//! use_year_month_subfolders = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::{self, DEFAULT_FORMAT};
use crate::output::OutputFormatter;

/// Errors that can occur during settings loading and saving.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Settings file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading or writing settings.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Settings file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid settings: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error accessing settings: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Archiver settings.
///
/// Deserialized from TOML; every field has a default so partial files load
/// cleanly. `date_format` is not trusted as-is - callers obtain a usable
/// format through [`Settings::effective_format`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Folder that archived notes are moved into, relative to the vault root.
    #[serde(default = "default_target_folder")]
    pub target_folder: String,

    /// Whether to print the aggregate summary after a run.
    #[serde(default = "default_show_summary")]
    pub show_summary_notification: bool,

    /// Date-format string describing how note filenames encode their date.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether to partition the archive into `<year>/<month>` subfolders.
    #[serde(default)]
    pub use_year_month_subfolders: bool,
}

fn default_target_folder() -> String {
    "Old Daily Notes".to_string()
}

fn default_show_summary() -> bool {
    true
}

fn default_date_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_folder: default_target_folder(),
            show_summary_notification: default_show_summary(),
            date_format: default_date_format(),
            use_year_month_subfolders: false,
        }
    }
}

impl Settings {
    /// Load settings from a file, with fallback to defaults.
    ///
    /// Attempts to load settings in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.noteshelf.toml` in the current directory
    /// 3. Look for `~/.config/noteshelf/config.toml` in home directory
    /// 4. Fall back to default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file is explicitly provided but cannot
    /// be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        // If explicitly specified, load from that path
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try current directory
        let local_config = PathBuf::from(".noteshelf.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try home directory
        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("noteshelf")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        // Fall back to defaults
        Ok(Self::default())
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if the file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Save settings to a file in TOML format.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigInvalid` if serialization fails, or
    /// `ConfigError::IoError` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))
    }

    /// Returns the date format to actually match against.
    ///
    /// An invalid `date_format` (no recognized tokens) is replaced by
    /// [`DEFAULT_FORMAT`] with a logged warning, so matching never runs with
    /// an unusable format.
    pub fn effective_format(&self) -> String {
        match format::validate(&self.date_format) {
            Ok(()) => self.date_format.clone(),
            Err(e) => {
                OutputFormatter::warning(&format!("{}; using '{}'", e, DEFAULT_FORMAT));
                DEFAULT_FORMAT.to_string()
            }
        }
    }
}
