//! Landmarks - keyboard navigation between ARIA landmark regions
//!
//! This crate keeps a live index of a page's landmarks (banner, navigation,
//! main, ...) and lets a user step through them, highlighting one at a time.
//! The page model and the scanner live in the `dom` crate; this crate adds the
//! engine around them: change throttling, the navigation cursor, the focus
//! overlay, badge reporting and the request protocol.
//!
//! # Architecture
//!
//! 1. **One owner**: a single task owns the engine state, callers hold an
//!    [`EngineHandle`]
//! 2. **Handles, not pointers**: regions refer to elements by generational
//!    handle, so a removed element is detected instead of dereferenced
//! 3. **Reporters behind a trait**: badge updates go to any [`BadgeReporter`]

pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod events;
pub mod logger;
pub mod overlay;
pub mod protocol;
pub mod reporter;
pub mod reporters;
pub mod router;
pub mod runtime;
pub mod scheduler;

pub use config::{EngineConfig, OptionsChange, SchedulerConfig};
pub use cursor::NavigationCursor;
pub use engine::{Focused, LandmarksEngine};
pub use error::{EngineError, ReportError, Result};
pub use events::{EventBus, LandmarkEvent};
pub use logger::{DiagnosticLogger, LoggerInit};
pub use overlay::{FocusOverlay, HighlightSurface, OverlayState};
pub use protocol::{badge_text, Notice, Outbound, Request, Response};
pub use reporter::{BadgeReporter, ReporterManager};
pub use reporters::{BadgeBoard, ChannelReporter, TabBadgeReporter};
pub use runtime::{spawn, EngineHandle};
pub use scheduler::{Schedule, Scheduler};
