//! Badge Board - per-tab badge text, as the toolbar would show it
//!
//! Responsibilities:
//! - Apply the badge text rule (blank for zero, else the count)
//! - Keep one badge per tab
//! - Accept `update-badge` messages and reject anything else

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{EngineError, ReportError, Result};
use crate::protocol::{badge_text, Outbound};
use crate::reporter::BadgeReporter;

/// Tab identifier as used by the host browser
pub type TabId = u32;

#[derive(Debug, Default)]
pub struct BadgeBoard {
    badges: DashMap<TabId, String>,
}

impl BadgeBoard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_count(&self, tab: TabId, count: usize) {
        self.badges.insert(tab, badge_text(count));
    }

    /// Current badge text for a tab, `None` if never set
    pub fn text(&self, tab: TabId) -> Option<String> {
        self.badges.get(&tab).map(|t| t.value().clone())
    }

    /// Forget a closed tab
    pub fn remove(&self, tab: TabId) {
        self.badges.remove(&tab);
    }

    /// Handle a raw message sent from a tab's engine
    pub fn handle_message(&self, tab: TabId, message: &Value) -> Result<()> {
        match message.get("request").and_then(Value::as_str) {
            Some("update-badge") => {
                let Outbound::UpdateBadge { landmarks } =
                    serde_json::from_value(message.clone()).map_err(|source| {
                        EngineError::MalformedRequest {
                            kind: "update-badge".to_string(),
                            source,
                        }
                    })?;
                self.set_count(tab, landmarks);
                Ok(())
            }
            _ => Err(EngineError::UnknownRequest(message.to_string())),
        }
    }

    /// A reporter writing to this board for one tab
    pub fn reporter(self: &Arc<Self>, tab: TabId) -> TabBadgeReporter {
        TabBadgeReporter {
            board: Arc::clone(self),
            tab,
        }
    }
}

/// Reports one tab's landmark count to a [`BadgeBoard`]
pub struct TabBadgeReporter {
    board: Arc<BadgeBoard>,
    tab: TabId,
}

#[async_trait]
impl BadgeReporter for TabBadgeReporter {
    fn name(&self) -> &str {
        "TabBadgeReporter"
    }

    async fn update_badge(&self, count: usize) -> std::result::Result<(), ReportError> {
        self.board.set_count(self.tab, count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_badge_per_tab() {
        let board = BadgeBoard::new();
        board.set_count(1, 0);
        board.set_count(2, 5);

        assert_eq!(board.text(1).as_deref(), Some(""));
        assert_eq!(board.text(2).as_deref(), Some("5"));
        assert_eq!(board.text(3), None);

        board.remove(2);
        assert_eq!(board.text(2), None);
    }

    #[test]
    fn test_handle_message() {
        let board = BadgeBoard::new();
        board
            .handle_message(9, &json!({"request": "update-badge", "landmarks": 11}))
            .unwrap();
        assert_eq!(board.text(9).as_deref(), Some("11"));

        assert!(matches!(
            board.handle_message(9, &json!({"request": "update-badge", "landmarks": "many"})),
            Err(EngineError::MalformedRequest { .. })
        ));
        assert!(matches!(
            board.handle_message(9, &json!({"request": "get-landmarks"})),
            Err(EngineError::UnknownRequest(_))
        ));
        assert_eq!(board.text(9).as_deref(), Some("11"));
    }

    #[tokio::test]
    async fn test_tab_reporter() {
        let board = BadgeBoard::new();
        let reporter = board.reporter(4);
        reporter.update_badge(2).await.unwrap();
        assert_eq!(board.text(4).as_deref(), Some("2"));
    }
}
