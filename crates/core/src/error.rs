//! Core error types for anchorgate file operations.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for durable file operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("failed to read file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("failed to write file '{path}': {reason}")]
    FileWriteFailed { path: PathBuf, reason: String },

    #[error("failed to create directory '{path}': {reason}")]
    DirectoryCreationFailed { path: PathBuf, reason: String },

    #[error("file already exists: {path}")]
    AlreadyExists { path: PathBuf },

    #[error("JSON parse error in '{path}': {reason}")]
    JsonParseFailed { path: PathBuf, reason: String },

    #[error("JSON encode error: {reason}")]
    JsonEncodeFailed { reason: String },
}

impl Error {
    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a file write error.
    pub fn file_write_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileWriteFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a directory creation error.
    pub fn directory_creation_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DirectoryCreationFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON encode error.
    pub fn json_encode_failed(reason: impl Into<String>) -> Self {
        Self::JsonEncodeFailed {
            reason: reason.into(),
        }
    }

    /// The path the failing operation touched, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::FileReadFailed { path, .. }
            | Self::FileWriteFailed { path, .. }
            | Self::DirectoryCreationFailed { path, .. }
            | Self::AlreadyExists { path }
            | Self::JsonParseFailed { path, .. } => Some(path),
            Self::JsonEncodeFailed { .. } => None,
        }
    }
}
