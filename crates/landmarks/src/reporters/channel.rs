//! Channel Reporter - forwards badge updates as outbound messages
//!
//! The receiving end stands in for the extension's background context.
//! Sending never waits: a badge only shows the latest count, so an update that
//! finds the channel full is dropped. Once the receiver is dropped every
//! report fails with `Disconnected`.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::ReportError;
use crate::protocol::Outbound;
use crate::reporter::BadgeReporter;

pub struct ChannelReporter {
    tx: mpsc::Sender<Outbound>,
}

impl ChannelReporter {
    pub fn new(tx: mpsc::Sender<Outbound>) -> Self {
        Self { tx }
    }

    /// Reporter plus the receiving end of its channel
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl BadgeReporter for ChannelReporter {
    fn name(&self) -> &str {
        "ChannelReporter"
    }

    async fn update_badge(&self, count: usize) -> Result<(), ReportError> {
        match self.tx.try_send(Outbound::UpdateBadge { landmarks: count }) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("[ChannelReporter] Listener is behind, dropping badge update ({})", count);
                Ok(())
            }
            Err(TrySendError::Closed(_)) => Err(ReportError::Disconnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_forwards_update() {
        let (reporter, mut rx) = ChannelReporter::channel(4);
        reporter.update_badge(3).await.unwrap();
        assert_eq!(rx.recv().await, Some(Outbound::UpdateBadge { landmarks: 3 }));
    }

    #[tokio::test]
    async fn test_full_channel_drops_update() {
        let (reporter, mut rx) = ChannelReporter::channel(1);
        reporter.update_badge(1).await.unwrap();
        reporter.update_badge(2).await.unwrap();

        assert_eq!(rx.recv().await, Some(Outbound::UpdateBadge { landmarks: 1 }));
        assert!(rx.try_recv().is_err());

        reporter.update_badge(3).await.unwrap();
        assert_eq!(rx.recv().await, Some(Outbound::UpdateBadge { landmarks: 3 }));
    }

    #[tokio::test]
    async fn test_dropped_receiver_disconnects() {
        let (reporter, rx) = ChannelReporter::channel(4);
        drop(rx);
        assert_eq!(reporter.update_badge(1).await, Err(ReportError::Disconnected));
    }
}
