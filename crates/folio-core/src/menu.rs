#![forbid(unsafe_code)]

//! Mobile navigation panel toggle.
//!
//! The toggle control flips the nav panel between `display: flex` and
//! `display: none` and swaps its glyph; following any link in the panel
//! closes it.

use crate::element::PageElement;

/// Glyph shown on the toggle while the panel is open.
pub const OPEN_GLYPH: &str = "✕";
/// Glyph shown on the toggle while the panel is closed.
pub const CLOSED_GLYPH: &str = "☰";

/// Open/closed state of the mobile nav panel.
#[derive(Debug)]
pub struct MobileMenu<E> {
    toggle: Option<E>,
    panel: Option<E>,
    open: bool,
}

impl<E: PageElement> MobileMenu<E> {
    /// Starts closed. The stylesheet decides the initial panel visibility,
    /// so nothing is written until the first transition.
    pub fn new(toggle: Option<E>, panel: Option<E>) -> Self {
        Self {
            toggle,
            panel,
            open: false,
        }
    }

    /// Handle a click on the toggle control. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_open(!self.open);
        self.open
    }

    /// Handle a click on a link inside the panel. Only an open panel is
    /// touched, so the desktop layout keeps its stylesheet display.
    pub fn close(&mut self) {
        if self.open {
            self.set_open(false);
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        if let Some(panel) = &self.panel {
            panel.set_style("display", if open { "flex" } else { "none" });
        }
        if let Some(toggle) = &self.toggle {
            toggle.set_text(if open { OPEN_GLYPH } else { CLOSED_GLYPH });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    #[test]
    fn toggle_round_trip() {
        let toggle = FakeElement::new();
        let panel = FakeElement::new();
        let mut menu = MobileMenu::new(Some(toggle.clone()), Some(panel.clone()));

        assert!(menu.toggle());
        assert_eq!(panel.style("display").as_deref(), Some("flex"));
        assert_eq!(toggle.text(), OPEN_GLYPH);

        assert!(!menu.toggle());
        assert_eq!(panel.style("display").as_deref(), Some("none"));
        assert_eq!(toggle.text(), CLOSED_GLYPH);
    }

    #[test]
    fn link_click_closes_open_panel() {
        let toggle = FakeElement::new();
        let panel = FakeElement::new();
        let mut menu = MobileMenu::new(Some(toggle.clone()), Some(panel.clone()));
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
        assert_eq!(panel.style("display").as_deref(), Some("none"));
        assert_eq!(toggle.text(), CLOSED_GLYPH);
    }

    #[test]
    fn closing_a_closed_panel_writes_nothing() {
        let panel = FakeElement::new();
        let mut menu = MobileMenu::new(None, Some(panel.clone()));
        menu.close();
        assert_eq!(panel.style("display"), None);
    }

    #[test]
    fn works_without_toggle() {
        let panel = FakeElement::new();
        let mut menu = MobileMenu::new(None, Some(panel.clone()));
        menu.toggle();
        menu.close();
        assert_eq!(panel.style("display").as_deref(), Some("none"));
    }
}
