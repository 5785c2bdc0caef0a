//! Error types for DOM operations
//!
//! Simple, flat error hierarchy.

use crate::types::ElementHandle;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Stale element handle: {0}")]
    StaleHandle(ElementHandle),

    #[error("Index {index} out of range for {len} landmarks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Cannot insert {child} under {parent}: would create a cycle")]
    HierarchyRequest {
        parent: ElementHandle,
        child: ElementHandle,
    },

    #[error("Missing field in document JSON: {0}")]
    MissingField(&'static str),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
