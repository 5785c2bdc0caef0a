//! Focus overlay: highlights one landmark at a time
//!
//! ```text
//! Idle ──focus(r)──▶ Highlighting(r) ──focus(s)──▶ Highlighting(s)
//!  ▲                        │
//!  └────────clear()─────────┘          Idle ──clear()──▶ Idle
//! ```
//!
//! Focusing always clears the previous highlight first. A region whose element
//! has been removed since the scan is skipped silently and leaves the overlay
//! idle.

use dom::{DomArena, ElementHandle, LandmarkRegion};

/// Something that can draw a highlight on an element
pub trait HighlightSurface {
    /// Outline the element, scroll it into view and give it focus
    fn apply_highlight(&mut self, element: ElementHandle) -> dom::Result<()>;

    /// Undo `apply_highlight`
    fn remove_highlight(&mut self, element: ElementHandle) -> dom::Result<()>;
}

impl HighlightSurface for DomArena {
    fn apply_highlight(&mut self, element: ElementHandle) -> dom::Result<()> {
        self.set_outline(element, true)?;
        self.scroll_into_view(element)?;
        self.focus(element)
    }

    fn remove_highlight(&mut self, element: ElementHandle) -> dom::Result<()> {
        self.set_outline(element, false)?;
        if self.focused() == Some(element) {
            self.blur();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Idle,
    Highlighting(ElementHandle),
}

#[derive(Debug, Default)]
pub struct FocusOverlay {
    state: OverlayState,
}

impl FocusOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn highlighted(&self) -> Option<ElementHandle> {
        match self.state {
            OverlayState::Idle => None,
            OverlayState::Highlighting(element) => Some(element),
        }
    }

    /// Highlight `region`, replacing any current highlight
    ///
    /// Returns whether the highlight was drawn.
    pub fn focus<S: HighlightSurface>(&mut self, surface: &mut S, region: &LandmarkRegion) -> bool {
        self.clear(surface);

        match surface.apply_highlight(region.element) {
            Ok(()) => {
                self.state = OverlayState::Highlighting(region.element);
                true
            }
            Err(e) => {
                tracing::debug!("[Overlay] Skipping {} landmark: {}", region.role, e);
                false
            }
        }
    }

    /// Remove the current highlight, if any
    pub fn clear<S: HighlightSurface>(&mut self, surface: &mut S) {
        if let OverlayState::Highlighting(element) = std::mem::take(&mut self.state) {
            // The element may be gone already; nothing left to undo then
            if let Err(e) = surface.remove_highlight(element) {
                tracing::trace!("[Overlay] Highlighted element vanished: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::scan_document;

    fn page() -> (DomArena, dom::LandmarkIndex) {
        let mut arena = DomArena::new();
        let body = arena.create_element("body");
        arena.append_child(arena.root(), body).unwrap();
        for tag in ["nav", "main"] {
            let el = arena.create_element(tag);
            arena.append_child(body, el).unwrap();
        }
        let index = scan_document(&arena).unwrap();
        (arena, index)
    }

    #[test]
    fn test_focus_highlights_and_focuses() {
        let (mut arena, index) = page();
        let mut overlay = FocusOverlay::new();
        let nav = index.region_at(0).unwrap();

        assert!(overlay.focus(&mut arena, nav));
        assert_eq!(overlay.state(), OverlayState::Highlighting(nav.element));
        assert_eq!(arena.outlined(), vec![nav.element]);
        assert_eq!(arena.focused(), Some(nav.element));
        assert_eq!(arena.scrolled_to(), Some(nav.element));
    }

    #[test]
    fn test_refocus_leaves_single_highlight() {
        let (mut arena, index) = page();
        let mut overlay = FocusOverlay::new();
        let nav = index.region_at(0).unwrap();
        let main = index.region_at(1).unwrap();

        overlay.focus(&mut arena, nav);
        overlay.focus(&mut arena, main);
        assert_eq!(arena.outlined(), vec![main.element]);

        // clear() then focus() matches focus() alone
        overlay.clear(&mut arena);
        overlay.focus(&mut arena, main);
        assert_eq!(arena.outlined(), vec![main.element]);
        assert_eq!(overlay.highlighted(), Some(main.element));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (mut arena, index) = page();
        let mut overlay = FocusOverlay::new();
        overlay.clear(&mut arena);
        assert_eq!(overlay.state(), OverlayState::Idle);

        overlay.focus(&mut arena, index.region_at(0).unwrap());
        overlay.clear(&mut arena);
        overlay.clear(&mut arena);
        assert_eq!(overlay.state(), OverlayState::Idle);
        assert!(arena.outlined().is_empty());
        assert_eq!(arena.focused(), None);
    }

    #[test]
    fn test_removed_element_is_silent_noop() {
        let (mut arena, index) = page();
        let mut overlay = FocusOverlay::new();
        let nav = index.region_at(0).unwrap();
        arena.remove(nav.element).unwrap();

        assert!(!overlay.focus(&mut arena, nav));
        assert_eq!(overlay.state(), OverlayState::Idle);
        assert!(arena.outlined().is_empty());
    }

    #[test]
    fn test_highlighted_element_removed_then_refocus() {
        let (mut arena, index) = page();
        let mut overlay = FocusOverlay::new();
        let nav = index.region_at(0).unwrap();
        let main = index.region_at(1).unwrap();

        overlay.focus(&mut arena, nav);
        arena.remove(nav.element).unwrap();

        assert!(overlay.focus(&mut arena, main));
        assert_eq!(overlay.highlighted(), Some(main.element));
    }
}
