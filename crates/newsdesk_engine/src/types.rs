use std::fmt;
use std::path::PathBuf;

use newsdesk_core::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    RunCompleted(Result<Vec<Record>, ApiError>),
    /// Path of the saved download on success.
    ExportCompleted(Result<PathBuf, ApiError>),
    LogLine(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// Response body was not what the endpoint promises.
    Decode,
    /// The download could not be written locally.
    Persist,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Persist => write!(f, "could not save file"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
