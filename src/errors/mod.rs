//! Error handling utilities for the daybook application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as
//! the convenience type alias `AppResult` for functions that can return these
//! errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with
/// external editors.
///
/// Each variant captures relevant context such as the editor command and the
/// underlying IO error, so failures can be reported with a usable hint.
///
/// # Examples
///
/// ```
/// use daybook::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}. Please check system resources, disk space, or editor installation.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. This may indicate an issue with editor configuration or the file being edited.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },

    /// Error when a detached (GUI) editor showed no activity within the
    /// modification-detection window and was terminated.
    #[error("Editor '{command}' timed out: no changes were detected before the deadline and the process was terminated. The entry was not saved.")]
    Timeout {
        /// The editor command that timed out
        command: String,
    },
}

/// Represents specific error cases that can occur in the entry storage layer.
///
/// The storage layer keeps one JSON record per date under a single root
/// directory; these variants distinguish an unusable location, a record that
/// exists but cannot be parsed, and a failed write.
///
/// # Examples
///
/// ```
/// use daybook::errors::StorageError;
/// use std::path::PathBuf;
/// use std::io::{self, ErrorKind};
///
/// let error = StorageError::Access {
///     path: PathBuf::from("/notes"),
///     source: io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
/// };
/// assert!(format!("{}", error).contains("/notes"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage root (or a record file within it) could not be read or
    /// created. Fatal; not retried.
    #[error("Cannot access entry storage at {path}: {source}. Please check that the directory exists and is readable.")]
    Access {
        /// The location that could not be accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A record for the given date exists but failed to deserialize.
    #[error("Entry for {date} is corrupt and could not be read: {source}")]
    Corruption {
        /// The date key of the unreadable record
        date: String,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Writing a record failed (permission, disk full, ...). Not retried
    /// automatically; the caller must make a fresh save attempt.
    #[error("Failed to write entry for {date}: {source}. Please check disk space and permissions on the storage directory.")]
    Write {
        /// The date key of the record that could not be written
        date: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the daybook application.
///
/// This enum is the central error type used across the application, with
/// variants for different error categories. It uses `thiserror` for deriving
/// the `Error` trait implementation and formatted error messages.
///
/// Note: This type does not implement `Clone` to avoid losing error context
/// when cloning `std::io::Error` values.
///
/// # Examples
///
/// Converting from an IO error:
/// ```
/// use daybook::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the entry storage layer.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors when interacting with the external editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
