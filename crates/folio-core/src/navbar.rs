#![forbid(unsafe_code)]

//! Navbar `scrolled` marker.

use crate::element::PageElement;

/// Puts the scrolled marker on the navbar once the page leaves the top.
#[derive(Debug)]
pub struct NavbarState<E> {
    navbar: Option<E>,
    scrolled_after: f64,
    scrolled_class: String,
    scrolled: bool,
}

impl<E: PageElement> NavbarState<E> {
    pub fn new(navbar: Option<E>, scrolled_after: f64, scrolled_class: impl Into<String>) -> Self {
        Self {
            navbar,
            scrolled_after,
            scrolled_class: scrolled_class.into(),
            scrolled: false,
        }
    }

    /// Marker is on iff `scroll_y` is strictly past the configured offset.
    pub fn update(&mut self, scroll_y: f64) -> bool {
        self.scrolled = scroll_y > self.scrolled_after;
        if let Some(navbar) = &self.navbar {
            navbar.set_class(&self.scrolled_class, self.scrolled);
        }
        self.scrolled
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}
