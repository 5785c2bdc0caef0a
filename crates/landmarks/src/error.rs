//! Error types for the landmarks engine

use dom::DomError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No landmarks on this page")]
    NoLandmarks,

    #[error("Landmark index {index} out of range ({len} landmarks)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown request: {0}")]
    UnknownRequest(String),

    #[error("Malformed {kind} request: {source}")]
    MalformedRequest {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Badge report failed: {0}")]
    Report(#[from] ReportError),

    #[error("DOM error: {0}")]
    Dom(DomError),

    #[error("Engine stopped")]
    EngineStopped,
}

impl From<DomError> for EngineError {
    fn from(err: DomError) -> Self {
        match err {
            DomError::IndexOutOfRange { index, len } => EngineError::IndexOutOfRange { index, len },
            other => EngineError::Dom(other),
        }
    }
}

/// Failure to deliver an outbound report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Listener disconnected")]
    Disconnected,

    #[error("Report rejected: {0}")]
    Rejected(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
