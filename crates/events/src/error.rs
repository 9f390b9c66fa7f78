//! Error types for the events crate.

use std::fmt;

/// Result type alias for event operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Event sink error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Writing to a sink failed.
    SinkFailed { sink: String, reason: String },
    /// Serialization error.
    Serialization { reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinkFailed { sink, reason } => {
                write!(f, "event sink '{sink}' failed: {reason}")
            }
            Self::Serialization { reason } => {
                write!(f, "serialization error: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create a sink failed error.
    pub fn sink_failed(sink: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SinkFailed {
            sink: sink.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }
}

impl From<anchorgate_core::Error> for Error {
    fn from(err: anchorgate_core::Error) -> Self {
        match err {
            anchorgate_core::Error::JsonEncodeFailed { reason } => Self::serialization(reason),
            other => Self::sink_failed(
                other
                    .path()
                    .map_or_else(|| "unknown".to_string(), |p| p.display().to_string()),
                other.to_string(),
            ),
        }
    }
}
