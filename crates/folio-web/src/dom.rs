#![forbid(unsafe_code)]

//! `web-sys` implementation of [`PageElement`].

use folio_core::{ElementRect, PageElement};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// A live DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(HtmlElement);

impl DomElement {
    pub fn as_element(&self) -> &Element {
        &self.0
    }

    pub fn html(&self) -> &HtmlElement {
        &self.0
    }
}

impl From<HtmlElement> for DomElement {
    fn from(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl PageElement for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let list = self.0.class_list();
        let result = if enabled {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if result.is_err() {
            warn!(class, "class list rejected token");
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, property: &str, value: &str) {
        if self.0.style().set_property(property, value).is_err() {
            warn!(property, value, "style write rejected");
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn offset_top(&self) -> f64 {
        f64::from(self.0.offset_top())
    }

    fn client_rect(&self) -> ElementRect {
        let rect = self.0.get_bounding_client_rect();
        ElementRect::new(rect.top(), rect.height())
    }
}

/// Every HTML element matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<DomElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(DomElement)
        .collect()
}

/// First HTML element matching `selector`.
pub fn query_one(document: &Document, selector: &str) -> Option<DomElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(DomElement)
}
