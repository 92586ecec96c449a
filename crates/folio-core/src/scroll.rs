#![forbid(unsafe_code)]

//! Scroll-driven active-section tracking.
//!
//! On every scroll event the tracker picks the section the reader has reached
//! (or is about to reach, biased early by a fixed lookahead) and mirrors the
//! choice into the navigation links' `active` marker.
//!
//! # Invariants
//!
//! 1. The chosen section is the last one, in document order, whose
//!    `offset_top - lookahead <= scroll_y`. With sections ordered by offset
//!    that is the greatest qualifying offset.
//! 2. After any recomputation at most one nav item carries the marker, and
//!    it is the one targeting the chosen section.
//! 3. Recomputing twice at the same position yields identical state.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | No sections | Empty collection | Nothing active |
//! | Above first threshold | `scroll_y` too small | All markers cleared |
//! | Section without id | Missing `id` attribute | It can win, but matches no link |

use tracing::debug;

use crate::element::PageElement;

/// Index of the active section for `scroll_y`, given section offsets in
/// document order.
///
/// ```
/// use folio_core::scroll::active_section_index;
///
/// assert_eq!(active_section_index([0.0, 800.0, 1600.0], 750.0, 200.0), Some(1));
/// assert_eq!(active_section_index([300.0], 0.0, 200.0), None);
/// ```
#[must_use]
pub fn active_section_index(
    offsets: impl IntoIterator<Item = f64>,
    scroll_y: f64,
    lookahead: f64,
) -> Option<usize> {
    let mut current = None;
    for (idx, offset_top) in offsets.into_iter().enumerate() {
        if scroll_y >= offset_top - lookahead {
            current = Some(idx);
        }
    }
    current
}

/// Section id a nav link points at (`href="#about"` → `about`).
#[must_use]
pub fn nav_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|target| !target.is_empty())
}

/// Tracks the current section and owns the nav items' `active` marker.
#[derive(Debug)]
pub struct ScrollTracker<E> {
    sections: Vec<E>,
    nav_items: Vec<E>,
    lookahead: f64,
    active_class: String,
    current: Option<String>,
}

impl<E: PageElement> ScrollTracker<E> {
    /// Build a tracker over exactly these sections and nav items.
    pub fn new(
        sections: Vec<E>,
        nav_items: Vec<E>,
        lookahead: f64,
        active_class: impl Into<String>,
    ) -> Self {
        Self {
            sections,
            nav_items,
            lookahead,
            active_class: active_class.into(),
            current: None,
        }
    }

    /// Recompute the active section for `scroll_y` and update nav markers.
    ///
    /// Returns the id of the active section, if any.
    pub fn recompute_active_section(&mut self, scroll_y: f64) -> Option<&str> {
        let winner = active_section_index(
            self.sections.iter().map(PageElement::offset_top),
            scroll_y,
            self.lookahead,
        );
        let current = winner.and_then(|idx| self.sections[idx].id());

        for item in &self.nav_items {
            item.set_class(&self.active_class, false);
        }
        if let Some(id) = current.as_deref() {
            for item in &self.nav_items {
                let href = item.attribute("href");
                if href.as_deref().and_then(nav_target) == Some(id) {
                    item.set_class(&self.active_class, true);
                }
            }
        }

        if current != self.current {
            debug!(
                scroll_y,
                from = self.current.as_deref().unwrap_or(""),
                to = current.as_deref().unwrap_or(""),
                "active section changed"
            );
            self.current = current;
        }
        self.current.as_deref()
    }

    /// Id of the section chosen by the last recomputation.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn sections(&self) -> &[E] {
        &self.sections
    }

    #[must_use]
    pub fn nav_items(&self) -> &[E] {
        &self.nav_items
    }
}
