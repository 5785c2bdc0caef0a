//! Diagnostic logger gated by the stored `debugInfo` option
//!
//! The option is read asynchronously, so the logger starts out pending.
//! Whoever loads options completes it through [`LoggerInit`]; the engine
//! waits on [`DiagnosticLogger::ready`] before doing anything worth logging.

use std::fmt::Display;
use tokio::sync::watch;

use crate::config::OptionsChange;
use crate::error::{EngineError, Result};

/// Shared diagnostic logger context
///
/// Cloning is cheap; every clone observes the same option value.
#[derive(Debug, Clone)]
pub struct DiagnosticLogger {
    state: watch::Receiver<Option<bool>>,
}

/// Write side of the logger: completes initialization and applies changes
#[derive(Debug)]
pub struct LoggerInit {
    tx: watch::Sender<Option<bool>>,
}

impl DiagnosticLogger {
    /// A logger waiting for the stored option
    pub fn pending() -> (Self, LoggerInit) {
        let (tx, rx) = watch::channel(None);
        (Self { state: rx }, LoggerInit { tx })
    }

    /// A logger that is ready straight away
    pub fn ready_with(debug_info: bool) -> (Self, LoggerInit) {
        let (logger, init) = Self::pending();
        init.complete(debug_info);
        (logger, init)
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Wait until the option has been loaded, returning its value
    pub async fn ready(&self) -> Result<bool> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| EngineError::EngineStopped)?;
        Ok(state.unwrap_or(false))
    }

    pub fn enabled(&self) -> bool {
        matches!(*self.state.borrow(), Some(true))
    }

    /// Emit a diagnostic message if `debugInfo` is on
    pub fn log(&self, message: impl Display) {
        if self.enabled() {
            tracing::info!(target: "landmarks::diagnostics", "{}", message);
        }
    }
}

impl LoggerInit {
    /// Record the loaded option value and release anyone waiting on `ready`
    pub fn complete(&self, debug_info: bool) {
        self.tx.send_replace(Some(debug_info));
    }

    /// Apply a live change from the options store
    pub fn apply(&self, change: &OptionsChange) {
        if let Some(debug_info) = change.debug_info {
            tracing::debug!("[Logger] debugInfo changed to {}", debug_info);
            self.tx.send_replace(Some(debug_info));
        }
    }
}
