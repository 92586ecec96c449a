#![forbid(unsafe_code)]

//! Host-driven façade over every behavior of the page.
//!
//! The host (the wasm shim in the browser, a fake DOM in tests) collects the
//! page's elements once, builds a [`PageController`], and forwards events:
//!
//! ```text
//! DOMContentLoaded → init(scroll_y)
//! scroll           → on_scroll(scroll_y)
//! intersections    → on_intersections(batch)      // unobserve the result
//! toggle / link    → toggle_menu() / close_menu()
//! form submit      → submit_contact(values, now)  // block if not allowed
//! timer            → tick(now)                    // render transitions
//! clicks           → settings_event(event)        // render command
//! ```
//!
//! No JS/WASM types here.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::PageConfig;
use crate::contact::{ContactError, ContactValues};
use crate::element::PageElement;
use crate::menu::MobileMenu;
use crate::navbar::NavbarState;
use crate::reveal::{IntersectionEntry, IntersectionRule, RevealObserver, WatchId};
use crate::scroll::ScrollTracker;
use crate::settings::{SettingsCommand, SettingsEvent, SettingsMenu};
use crate::toast::{Severity, Toast, ToastQueue, ToastTransition};

/// Element collections the controller operates on.
#[derive(Debug)]
pub struct PageElements<E> {
    pub sections: Vec<E>,
    pub nav_items: Vec<E>,
    pub progress_bars: Vec<E>,
    pub navbar: Option<E>,
    pub menu_toggle: Option<E>,
    pub nav_panel: Option<E>,
}

impl<E> Default for PageElements<E> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            nav_items: Vec::new(),
            progress_bars: Vec::new(),
            navbar: None,
            menu_toggle: None,
            nav_panel: None,
        }
    }
}

/// Result of a contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// `Ok` lets the native submit proceed; `Err` must block it.
    pub outcome: Result<(), ContactError>,
    /// Toast to render.
    pub toast: Toast,
}

impl Submission {
    #[must_use]
    pub fn allowed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// All page behavior, generic over the host's element handle.
#[derive(Debug)]
pub struct PageController<E> {
    config: PageConfig,
    tracker: ScrollTracker<E>,
    reveal: RevealObserver<E>,
    navbar: NavbarState<E>,
    menu: MobileMenu<E>,
    settings: SettingsMenu,
    toasts: ToastQueue,
}

impl<E: PageElement + Clone> PageController<E> {
    /// Wire the behaviors to `elements`. Progress bars are zeroed here,
    /// before anything is watched.
    pub fn new(config: PageConfig, elements: PageElements<E>) -> Self {
        let PageElements {
            sections,
            nav_items,
            progress_bars,
            navbar,
            menu_toggle,
            nav_panel,
        } = elements;

        let rule = IntersectionRule {
            threshold: config.reveal_threshold,
            bottom_margin: config.reveal_bottom_margin_px,
        };
        let reveal = RevealObserver::attach(
            sections.clone(),
            progress_bars,
            rule,
            config.classes.revealed.clone(),
            config.width_attribute.clone(),
        );
        let tracker = ScrollTracker::new(
            sections,
            nav_items,
            config.scroll_lookahead_px,
            config.classes.active.clone(),
        );
        let navbar = NavbarState::new(
            navbar,
            config.navbar_scrolled_after_px,
            config.classes.scrolled.clone(),
        );
        let toasts = ToastQueue::new(config.toast_visible(), config.toast_exit());

        Self {
            tracker,
            reveal,
            navbar,
            menu: MobileMenu::new(menu_toggle, nav_panel),
            settings: SettingsMenu::new(),
            toasts,
            config,
        }
    }

    /// Establish scroll-dependent state for a page loaded mid-scroll.
    pub fn init(&mut self, scroll_y: f64) {
        self.on_scroll(scroll_y);
        info!(
            sections = self.tracker.sections().len(),
            nav_items = self.tracker.nav_items().len(),
            watched = self.reveal.len(),
            "portfolio loaded"
        );
    }

    /// Scroll event: recompute the active section and the navbar marker.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<&str> {
        self.navbar.update(scroll_y);
        self.tracker.recompute_active_section(scroll_y)
    }

    /// One batch from the host's intersection observer.
    pub fn on_intersections(
        &mut self,
        entries: impl IntoIterator<Item = IntersectionEntry>,
    ) -> Vec<WatchId> {
        self.reveal.handle_batch(entries)
    }

    /// Geometric reveal pass for hosts without an intersection observer.
    pub fn reveal_visible(&mut self, viewport_height: f64) -> Vec<WatchId> {
        self.reveal.reveal_visible(viewport_height)
    }

    /// Mobile menu toggle clicked. Returns whether the panel is now open.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu.toggle()
    }

    /// A link inside the mobile nav panel was clicked.
    pub fn close_menu(&mut self) {
        self.menu.close();
    }

    /// Validate a contact submission and queue the matching toast.
    pub fn submit_contact(&mut self, values: &ContactValues, now: Duration) -> Submission {
        let outcome = values.validate();
        let (message, severity) = match outcome {
            Ok(()) => (self.config.messages.sending.clone(), Severity::Info),
            Err(ContactError::MissingField(field)) => {
                warn!(field = field.id(), "contact form blocked: missing field");
                (self.config.messages.missing_fields.clone(), Severity::Error)
            }
            Err(ContactError::MalformedEmail) => {
                warn!("contact form blocked: malformed email");
                (self.config.messages.invalid_email.clone(), Severity::Error)
            }
        };
        let toast = self.toasts.show(message, severity, now).clone();
        Submission { outcome, toast }
    }

    /// Show an arbitrary toast.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: Duration) -> Toast {
        self.toasts.show(message, severity, now).clone()
    }

    /// Advance the toast clock.
    pub fn tick(&mut self, now: Duration) -> Vec<ToastTransition> {
        self.toasts.tick(now)
    }

    /// Feed the settings popover state machine.
    pub fn settings_event(&mut self, event: SettingsEvent) -> Option<SettingsCommand> {
        self.settings.handle(event)
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn tracker(&self) -> &ScrollTracker<E> {
        &self.tracker
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealObserver<E> {
        &self.reveal
    }

    #[must_use]
    pub fn navbar(&self) -> &NavbarState<E> {
        &self.navbar
    }

    #[must_use]
    pub fn menu(&self) -> &MobileMenu<E> {
        &self.menu
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsMenu {
        &self.settings
    }

    #[must_use]
    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactField;
    use crate::testing::FakeElement;

    fn page() -> (PageController<FakeElement>, FakeElement) {
        let navbar = FakeElement::new();
        let elements = PageElements {
            sections: vec![
                FakeElement::section("home", 0.0),
                FakeElement::section("about", 800.0),
            ],
            nav_items: vec![FakeElement::nav_link("home"), FakeElement::nav_link("about")],
            navbar: Some(navbar.clone()),
            ..PageElements::default()
        };
        (PageController::new(PageConfig::default(), elements), navbar)
    }

    #[test]
    fn init_mid_page_sets_scroll_state() {
        let (mut page, navbar) = page();
        page.init(700.0);
        assert_eq!(page.tracker().current(), Some("about"));
        assert!(navbar.has_class("scrolled"));
    }

    #[test]
    fn init_at_top() {
        let (mut page, navbar) = page();
        page.init(0.0);
        assert_eq!(page.tracker().current(), Some("home"));
        assert!(!navbar.has_class("scrolled"));
    }

    #[test]
    fn sections_are_watched() {
        let (page, _) = page();
        assert_eq!(page.reveal().len(), 2);
    }

    #[test]
    fn missing_field_uses_missing_message() {
        let (mut page, _) = page();
        let values = ContactValues::new().with(ContactField::Email, "a@b.com");
        let submission = page.submit_contact(&values, Duration::ZERO);
        assert!(!submission.allowed());
        assert_eq!(submission.toast.severity, Severity::Error);
        assert_eq!(submission.toast.message, page.config().messages.missing_fields);
    }

    #[test]
    fn notify_queues_toast() {
        let (mut page, _) = page();
        let toast = page.notify("done", Severity::Success, Duration::ZERO);
        assert_eq!(page.toasts().get(toast.id).map(|t| t.severity), Some(Severity::Success));
    }
}
