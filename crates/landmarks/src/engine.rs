//! Landmarks Engine
//!
//! Owns everything that is derived from the page: the landmark index, the
//! navigation cursor, the focus overlay and the rescan scheduler. The page
//! itself is shared; the engine only reads it to scan and writes to it to
//! draw highlights.
//!
//! All methods take `&mut self`, so whoever drives the engine (see
//! [`crate::runtime`]) decides the order of operations and scans can never
//! overlap.

use dom::{is_relevant, scan_document, ChangeBatch, DomArena, LandmarkIndex, LandmarkRegion, LandmarkSummary};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::time::Instant;

use crate::config::EngineConfig;
use crate::cursor::NavigationCursor;
use crate::error::{EngineError, ReportError, Result};
use crate::events::{EventBus, LandmarkEvent};
use crate::logger::DiagnosticLogger;
use crate::overlay::{FocusOverlay, OverlayState};
use crate::reporter::{BadgeReporter, ReporterManager};
use crate::scheduler::{Schedule, Scheduler};

/// Outcome of a focus request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focused {
    /// Index of the region in the current landmark index
    pub index: usize,
    /// False if the element vanished before the highlight could be drawn
    pub highlighted: bool,
}

pub struct LandmarksEngine {
    config: EngineConfig,
    document: Arc<RwLock<DomArena>>,

    index: LandmarkIndex,
    cursor: NavigationCursor,
    overlay: FocusOverlay,
    scheduler: Scheduler,

    reporters: ReporterManager,
    logger: DiagnosticLogger,
    events: EventBus,

    bootstrapped: bool,
    observing: bool,
}

impl LandmarksEngine {
    pub fn new(config: EngineConfig, document: Arc<RwLock<DomArena>>, logger: DiagnosticLogger) -> Self {
        let scheduler = Scheduler::new(config.scheduler);
        Self {
            config,
            document,
            index: LandmarkIndex::new(),
            cursor: NavigationCursor::new(),
            overlay: FocusOverlay::new(),
            scheduler,
            reporters: ReporterManager::new(),
            logger,
            events: EventBus::new(),
            bootstrapped: false,
            observing: false,
        }
    }

    pub fn register_reporter(&mut self, reporter: Box<dyn BadgeReporter>) {
        self.reporters.register(reporter);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LandmarkEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn document(&self) -> &Arc<RwLock<DomArena>> {
        &self.document
    }

    pub fn index(&self) -> &LandmarkIndex {
        &self.index
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Deadline of a deferred rescan, if one is pending
    pub fn rescan_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Wait for the logger, do the first scan and start observing changes
    ///
    /// A failed badge report here is returned to the caller.
    pub async fn bootstrap(&mut self) -> Result<()> {
        self.logger.ready().await?;
        self.logger.log("Bootstrapping Landmarks");
        {
            let document = self.document.read().await;
            self.logger
                .log(format_args!("Document has {} nodes", document.len()));
        }
        self.find_landmarks_and_update_badge().await?;
        self.bootstrapped = true;
        self.observing = true;
        Ok(())
    }

    /// Rebuild the index from the current page
    async fn rescan(&mut self) -> Result<usize> {
        let index = {
            let document = self.document.read().await;
            scan_document(&document)?
        };
        self.index = index;
        self.cursor.reset();

        let count = self.index.count();
        self.logger.log(format_args!("Found {} landmarks", count));
        self.events.publish(LandmarkEvent::LandmarksUpdated { count });
        Ok(count)
    }

    /// Rescan and report the new count
    ///
    /// Only a failed report during bootstrap is an error. Afterwards it stops
    /// change observation and the rescan still counts as done.
    pub async fn find_landmarks_and_update_badge(&mut self) -> Result<()> {
        let count = self.rescan().await?;
        if let Err(e) = self.reporters.report(count).await {
            if !self.bootstrapped {
                return Err(e.into());
            }
            if self.observing {
                self.stop_observing(&e);
            } else {
                tracing::debug!("[Engine] Badge update failed after observation stopped: {}", e);
            }
        }
        Ok(())
    }

    fn stop_observing(&mut self, cause: &ReportError) {
        tracing::warn!("[Engine] Stopping change observation: {}", cause);
        self.observing = false;
        self.scheduler.reset();
        self.events.publish(LandmarkEvent::ObservationStopped);
    }

    /// Handle one batch of change notifications
    pub async fn on_changes(&mut self, batch: ChangeBatch) -> Result<()> {
        if !self.observing {
            return Ok(());
        }

        match self.scheduler.notify(Instant::now()) {
            Schedule::Immediate => {
                if is_relevant(&batch) {
                    self.find_landmarks_and_update_badge().await?;
                }
            }
            Schedule::Deferred { deadline } => {
                tracing::trace!("[Engine] Rescan deferred until {:?}", deadline);
            }
        }
        Ok(())
    }

    /// Run the deferred rescan if it is due; returns whether it ran
    pub async fn on_deadline(&mut self) -> Result<bool> {
        if !self.scheduler.fire(Instant::now()) {
            return Ok(false);
        }
        self.logger.log("Running consolidated rescan");
        self.find_landmarks_and_update_badge().await?;
        Ok(true)
    }

    pub fn describe_all(&self) -> Vec<LandmarkSummary> {
        self.index.describe_all()
    }

    async fn focus_region(&mut self, region: &LandmarkRegion) -> Focused {
        let highlighted = {
            let mut document = self.document.write().await;
            self.overlay.focus(&mut *document, region)
        };
        self.events.publish(LandmarkEvent::Focused {
            index: region.document_order_index,
        });
        Focused {
            index: region.document_order_index,
            highlighted,
        }
    }

    fn ensure_landmarks(&self) -> Result<()> {
        if self.index.is_empty() {
            return Err(EngineError::NoLandmarks);
        }
        Ok(())
    }

    /// Jump to a landmark by index and highlight it
    pub async fn focus_index(&mut self, index: usize) -> Result<Focused> {
        self.ensure_landmarks()?;
        let region = self.cursor.jump_to(&self.index, index)?.clone();
        Ok(self.focus_region(&region).await)
    }

    pub async fn focus_next(&mut self) -> Result<Focused> {
        let region = self.cursor.next(&self.index)?.clone();
        Ok(self.focus_region(&region).await)
    }

    pub async fn focus_previous(&mut self) -> Result<Focused> {
        let region = self.cursor.previous(&self.index)?.clone();
        Ok(self.focus_region(&region).await)
    }

    /// Highlight the first main landmark; `None` if the page has none
    pub async fn focus_main(&mut self) -> Option<Focused> {
        let region = self.index.main_region()?.clone();
        Some(self.focus_region(&region).await)
    }

    /// Remove the highlight
    pub async fn clear_highlight(&mut self) {
        let mut document = self.document.write().await;
        if self.overlay.highlighted().is_some() {
            self.overlay.clear(&mut *document);
            self.events.publish(LandmarkEvent::Cleared);
        }
    }

    /// Treat the page as new: drop the highlight and rescan right away
    pub async fn refresh(&mut self) -> Result<usize> {
        self.logger.log("Landmarks: trigger-refresh");
        self.clear_highlight().await;
        self.find_landmarks_and_update_badge().await?;
        self.events.publish(LandmarkEvent::Refreshed);
        Ok(self.index.count())
    }
}
