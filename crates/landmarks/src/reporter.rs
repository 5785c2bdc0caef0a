//! Badge reporting - tells the outside world how many landmarks there are
//!
//! Every rebuild of the index is reported to all registered reporters.
//! A failed report means the listener is gone; the engine reacts by
//! stopping change observation.

use async_trait::async_trait;
use futures_util::future::join_all;

use crate::error::ReportError;

/// Receiver of landmark counts
#[async_trait]
pub trait BadgeReporter: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Report a new landmark count
    async fn update_badge(&self, count: usize) -> Result<(), ReportError>;
}

/// Reporter manager - fans a count out to every reporter
#[derive(Default)]
pub struct ReporterManager {
    reporters: Vec<Box<dyn BadgeReporter>>,
}

impl ReporterManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, reporter: Box<dyn BadgeReporter>) {
        tracing::debug!("Registered badge reporter: {}", reporter.name());
        self.reporters.push(reporter);
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    /// Report to all reporters concurrently
    ///
    /// Every reporter is tried; the first failure is returned.
    pub async fn report(&self, count: usize) -> Result<(), ReportError> {
        let results = join_all(self.reporters.iter().map(|r| async move {
            let result = r.update_badge(count).await;
            if let Err(e) = &result {
                tracing::warn!("[{}] Badge update failed: {}", r.name(), e);
            }
            result
        }))
        .await;

        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingReporter {
        name: String,
        last: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl BadgeReporter for CountingReporter {
        fn name(&self) -> &str {
            &self.name
        }

        async fn update_badge(&self, count: usize) -> Result<(), ReportError> {
            self.last.store(count, Ordering::SeqCst);
            if self.fail {
                Err(ReportError::Disconnected)
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_report_reaches_all() {
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));
        let mut manager = ReporterManager::new();
        manager.register(Box::new(CountingReporter {
            name: "a".to_string(),
            last: a.clone(),
            fail: false,
        }));
        manager.register(Box::new(CountingReporter {
            name: "b".to_string(),
            last: b.clone(),
            fail: false,
        }));

        manager.report(5).await.unwrap();
        assert_eq!(a.load(Ordering::SeqCst), 5);
        assert_eq!(b.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_failure_still_reports_to_others() {
        let ok = Arc::new(AtomicUsize::new(0));
        let mut manager = ReporterManager::new();
        manager.register(Box::new(CountingReporter {
            name: "gone".to_string(),
            last: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }));
        manager.register(Box::new(CountingReporter {
            name: "ok".to_string(),
            last: ok.clone(),
            fail: false,
        }));

        assert_eq!(manager.report(2).await, Err(ReportError::Disconnected));
        assert_eq!(ok.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_manager() {
        assert!(ReporterManager::new().report(1).await.is_ok());
    }
}
