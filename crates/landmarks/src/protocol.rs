//! Message protocol types
//!
//! Requests and outbound messages are JSON objects tagged by a `"request"`
//! field, e.g. `{"request": "focus-landmark", "index": 2}`.

use dom::LandmarkSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, Result};

/// Requests handled by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "kebab-case")]
pub enum Request {
    GetLandmarks,
    FocusLandmark { index: usize },
    NextLandmark,
    PrevLandmark,
    MainLandmark,
    TriggerRefresh,
}

const REQUEST_KINDS: &[&str] = &[
    "get-landmarks",
    "focus-landmark",
    "next-landmark",
    "prev-landmark",
    "main-landmark",
    "trigger-refresh",
];

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::GetLandmarks => "get-landmarks",
            Request::FocusLandmark { .. } => "focus-landmark",
            Request::NextLandmark => "next-landmark",
            Request::PrevLandmark => "prev-landmark",
            Request::MainLandmark => "main-landmark",
            Request::TriggerRefresh => "trigger-refresh",
        }
    }

    /// Decode a request message
    ///
    /// An unrecognised (or missing) kind is `UnknownRequest`; a known kind
    /// with a bad payload is `MalformedRequest`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let kind = match value.get("request") {
            Some(Value::String(kind)) => kind.as_str(),
            Some(other) => return Err(EngineError::UnknownRequest(other.to_string())),
            None => return Err(EngineError::UnknownRequest(value.to_string())),
        };
        if !REQUEST_KINDS.contains(&kind) {
            return Err(EngineError::UnknownRequest(kind.to_string()));
        }
        Request::deserialize(value).map_err(|source| EngineError::MalformedRequest {
            kind: kind.to_string(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|source| {
            EngineError::MalformedRequest {
                kind: "unparsed".to_string(),
                source,
            }
        })?;
        Self::from_value(&value)
    }

    /// Map a keyboard shortcut command to its request
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "next-landmark" => Some(Request::NextLandmark),
            "prev-landmark" => Some(Request::PrevLandmark),
            _ => None,
        }
    }
}

/// User-visible notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notice {
    NoLandmarksFound,
    NoMainLandmarkFound,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoLandmarksFound => "No landmarks found.",
            Notice::NoMainLandmarkFound => "No main landmark found.",
        }
    }
}

/// Replies to requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response", rename_all = "kebab-case")]
pub enum Response {
    Landmarks { landmarks: Vec<LandmarkSummary> },
    /// `highlighted` is false if the element vanished before it could be drawn
    Focused { index: usize, highlighted: bool },
    Notice { notice: Notice },
    Refreshed { count: usize },
}

/// Messages sent out of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "kebab-case")]
pub enum Outbound {
    UpdateBadge { landmarks: usize },
}

/// Badge text for a landmark count: blank for none, else the number
pub fn badge_text(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        count.to_string()
    }
}
