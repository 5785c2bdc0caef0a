//! Page tree storage and landmark scanning
//!
//! A small arena-backed page tree plus the scanner that turns it into an
//! ordered list of landmark regions.
//!
//! ## Core Design
//!
//! ```text
//! JSON / host page → DomArena (slots) → scan() → LandmarkIndex
//!                        ↓
//!                  ElementHandle (slot + generation)
//! ```
//!
//! Handles never own the element they point at. Once an element is removed
//! its handle stops resolving, and every consumer treats that as an ordinary
//! `None`/`StaleHandle` case.

pub mod arena;
pub mod error;
pub mod landmark;
pub mod loader;
pub mod mutation;
pub mod scanner;
pub mod serializer;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use landmark::{LandmarkIndex, LandmarkRegion, LandmarkRole, LandmarkSummary};
pub use loader::{load_document, load_document_str};
pub use mutation::{is_relevant, ChangeBatch, MutationRecord};
pub use scanner::{scan, scan_document};
pub use serializer::OutlineSerializer;
pub use types::*;
