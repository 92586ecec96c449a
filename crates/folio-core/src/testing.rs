#![forbid(unsafe_code)]

//! In-memory fake DOM elements for native tests.
//!
//! [`FakeElement`] is a cheap, clonable handle: clones share state, so a test
//! can hand one copy to a tracker or observer and inspect another.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::element::{ElementRect, PageElement};

#[derive(Debug, Default)]
struct FakeState {
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    text: String,
    offset_top: f64,
    rect: ElementRect,
    /// Number of `set_style` calls per property.
    style_writes: BTreeMap<String, usize>,
}

/// Shared-state fake implementing [`PageElement`].
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    state: Rc<RefCell<FakeState>>,
}

impl FakeElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A `<section id=..>` at the given page offset.
    #[must_use]
    pub fn section(id: &str, offset_top: f64) -> Self {
        Self::new().with_attribute("id", id).with_offset_top(offset_top)
    }

    /// A nav link pointing at `#target`.
    #[must_use]
    pub fn nav_link(target: &str) -> Self {
        Self::new().with_attribute("href", &format!("#{target}"))
    }

    /// A progress bar declaring `width` through `data-width`.
    #[must_use]
    pub fn progress_bar(width: &str) -> Self {
        Self::new()
            .with_class("skill-progress")
            .with_attribute("data-width", width)
    }

    #[must_use]
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.state.borrow_mut().classes.insert(class.to_owned());
        self
    }

    #[must_use]
    pub fn with_offset_top(self, offset_top: f64) -> Self {
        self.state.borrow_mut().offset_top = offset_top;
        self
    }

    #[must_use]
    pub fn with_rect(self, rect: ElementRect) -> Self {
        self.set_rect(rect);
        self
    }

    /// Move the element relative to the viewport (simulates scrolling).
    pub fn set_rect(&self, rect: ElementRect) {
        self.state.borrow_mut().rect = rect;
    }

    /// Current text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    /// How many times `property` was written through `set_style`.
    #[must_use]
    pub fn style_writes(&self, property: &str) -> usize {
        self.state
            .borrow()
            .style_writes
            .get(property)
            .copied()
            .unwrap_or(0)
    }

    /// Whether two handles refer to the same fake element.
    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl PageElement for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let mut state = self.state.borrow_mut();
        if enabled {
            state.classes.insert(class.to_owned());
        } else {
            state.classes.remove(class);
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state
            .styles
            .insert(property.to_owned(), value.to_owned());
        *state.style_writes.entry(property.to_owned()).or_default() += 1;
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.state.borrow_mut().text);
    }

    fn offset_top(&self) -> f64 {
        self.state.borrow().offset_top
    }

    fn client_rect(&self) -> ElementRect {
        self.state.borrow().rect
    }
}
