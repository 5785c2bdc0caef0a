//! Landmark events for in-process listeners (demos, tests, UI glue)
//!
//! Events fan out over a broadcast channel. A listener that falls more than
//! the channel capacity behind loses the oldest events and sees `Lagged`;
//! the engine never waits for listeners.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events kept for a slow listener before it starts lagging
const EVENT_CAPACITY: usize = 256;

/// Something observable the engine did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum LandmarkEvent {
    /// The index was rebuilt
    LandmarksUpdated { count: usize },
    /// A landmark was highlighted
    Focused { index: usize },
    /// The highlight was cleared
    Cleared,
    /// A refresh request was handled
    Refreshed,
    /// Change observation stopped after a failed report
    ObservationStopped,
}

pub struct EventBus {
    tx: broadcast::Sender<LandmarkEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Send to every current listener; returns how many there were
    pub fn publish(&self, event: LandmarkEvent) -> usize {
        tracing::trace!("[Events] {:?}", event);
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LandmarkEvent> {
        self.tx.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
