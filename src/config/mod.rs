//! Configuration management for the daybook application.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults. It supports configuring the
//! entry storage directory and the editor command used to open entries.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_DIR`: Path to the entry storage directory (defaults to ~/.daybook)
//! - `DAYBOOK_EDITOR`: Editor to use for entries
//! - `EDITOR`, `VISUAL`: Fallback editors if DAYBOOK_EDITOR is not set
//!   (defaults to "vim" when none are set)
//! - `HOME`: Used for expanding the default storage directory path

use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the daybook application.
///
/// Holds the editor command used to open entries and the directory where
/// entry records are stored.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     editor: "nano".to_string(),
///     notes_dir: PathBuf::from("/path/to/notes"),
/// };
/// ```
pub struct Config {
    /// Editor command to use for opening entries.
    ///
    /// Loaded from environment variables in the following order of precedence:
    /// 1. DAYBOOK_EDITOR
    /// 2. EDITOR
    /// 3. VISUAL
    /// 4. Defaults to "vim" if none are set
    pub editor: String,

    /// Directory where entry records are stored.
    ///
    /// Loaded from the DAYBOOK_DIR environment variable with a fallback to
    /// ~/.daybook if not specified.
    pub notes_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &"[REDACTED_COMMAND]")
            .field("notes_dir", &"[REDACTED_PATH]")
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: "vim".to_string(),
            notes_dir: PathBuf::from(""),
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates an editor command string for security.
    ///
    /// The command must be a single token: not empty, no spaces, and no shell
    /// metacharacters. Editors needing arguments can be wrapped in a script.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        const FORBIDDEN_CHARS: &[char] =
            &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];

        for &ch in FORBIDDEN_CHARS.iter() {
            if editor_cmd.contains(ch) {
                return Err(AppError::Config(format!(
                    "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                    ch
                )));
            }
        }

        Ok(editor_cmd)
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The storage directory path is expanded with `shellexpand` to handle `~`
    /// and environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The storage directory path expansion fails
    /// - The editor command fails validation (empty, contains spaces or shell
    ///   metacharacters)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use daybook::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config with editor: {}", config.editor),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let editor_raw = env::var("DAYBOOK_EDITOR")
            .or_else(|_| env::var("EDITOR"))
            .or_else(|_| env::var("VISUAL"))
            .unwrap_or_else(|_| "vim".to_string());

        let editor = Config::validate_editor_command(&editor_raw)?;

        let notes_dir_str = env::var("DAYBOOK_DIR").unwrap_or_else(|_| {
            let home = env::var("HOME").unwrap_or_else(|_| "".to_string());
            format!("{}/.daybook", home)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&notes_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let notes_dir = PathBuf::from(expanded_path.into_owned());

        if notes_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Storage directory path is empty".to_string(),
            ));
        }

        Ok(Config {
            editor: editor.to_string(),
            notes_dir,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Storage directory path is empty" if the storage directory path is empty
    /// - "Editor command is empty" if the editor is empty
    /// - "Storage directory must be an absolute path" if the path is relative
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::Config;
    /// use std::path::PathBuf;
    ///
    /// let valid_config = Config {
    ///     editor: "vim".to_string(),
    ///     notes_dir: PathBuf::from("/absolute/path"),
    /// };
    /// assert!(valid_config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.notes_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Storage directory path is empty".to_string(),
            ));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.notes_dir.is_absolute() {
            return Err(AppError::Config(
                "Storage directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}
