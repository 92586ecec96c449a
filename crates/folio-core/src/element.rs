#![forbid(unsafe_code)]

//! Element abstraction the behavior layer is written against.
//!
//! The page's DOM is owned by the host. Everything in this crate reaches it
//! through [`PageElement`], so the same logic runs against `web-sys` handles
//! in the browser and against `testing::FakeElement` in native tests.
//!
//! All methods take `&self`: element handles are shared references into a
//! tree the host mutates, exactly like DOM handles.

/// Bounding box of an element relative to the viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementRect {
    /// Distance from the viewport top to the element's top edge.
    pub top: f64,
    /// Rendered height.
    pub height: f64,
}

impl ElementRect {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A handle to one element of the host page.
pub trait PageElement {
    /// Attribute value, or `None` if absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Whether `class` is in the element's class list.
    fn has_class(&self, class: &str) -> bool;

    /// Add (`enabled = true`) or remove a class. Idempotent.
    fn set_class(&self, class: &str, enabled: bool);

    /// Current inline style value for `property`, or `None` if unset.
    fn style(&self, property: &str) -> Option<String>;

    /// Set one inline style property.
    fn set_style(&self, property: &str, value: &str);

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// Vertical offset from the top of the page.
    fn offset_top(&self) -> f64;

    /// Viewport-relative bounding box.
    fn client_rect(&self) -> ElementRect;

    /// The element's `id` attribute.
    fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }
}
