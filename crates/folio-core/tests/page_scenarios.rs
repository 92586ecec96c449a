//! End-to-end scenarios driven through `PageController` over the fake DOM.

use std::time::Duration;

use folio_core::contact::{ContactError, ContactField, ContactValues};
use folio_core::reveal::IntersectionEntry;
use folio_core::settings::{SettingsCommand, SettingsEvent};
use folio_core::testing::FakeElement;
use folio_core::toast::{Severity, ToastTransition};
use folio_core::{ElementRect, PageConfig, PageController, PageElement, PageElements};
use pretty_assertions::assert_eq;

struct Page {
    controller: PageController<FakeElement>,
    sections: Vec<FakeElement>,
    nav: Vec<FakeElement>,
    bar: FakeElement,
}

fn page() -> Page {
    let sections = vec![
        FakeElement::section("home", 0.0),
        FakeElement::section("about", 800.0),
        FakeElement::section("skills", 1600.0),
    ];
    let nav: Vec<FakeElement> = ["home", "about", "skills"]
        .into_iter()
        .map(FakeElement::nav_link)
        .collect();
    let bar = FakeElement::progress_bar("80%");
    let elements = PageElements {
        sections: sections.clone(),
        nav_items: nav.clone(),
        progress_bars: vec![bar.clone()],
        navbar: Some(FakeElement::new()),
        menu_toggle: Some(FakeElement::new()),
        nav_panel: Some(FakeElement::new()),
    };
    Page {
        controller: PageController::new(PageConfig::default(), elements),
        sections,
        nav,
        bar,
    }
}

fn filled(email: &str) -> ContactValues {
    ContactValues::new()
        .with(ContactField::Name, "Mohammed")
        .with(ContactField::Email, email)
        .with(ContactField::CountryCode, "+966")
        .with(ContactField::Phone, "500000000")
        .with(ContactField::Subject, "Project")
        .with(ContactField::Message, "Hello")
}

#[test]
fn scroll_750_activates_section_at_800() {
    let mut p = page();
    p.controller.init(0.0);
    assert_eq!(p.controller.on_scroll(750.0), Some("about"));

    let active: Vec<bool> = p.nav.iter().map(|n| n.has_class("active")).collect();
    assert_eq!(active, vec![false, true, false]);
}

#[test]
fn progress_bar_80_percent_reveals_once() {
    let mut p = page();
    assert_eq!(p.bar.style("width").as_deref(), Some("0%"));

    let id = p
        .controller
        .reveal()
        .find(|el| el.same_node(&p.bar))
        .expect("bar is watched");
    assert_eq!(
        p.controller.on_intersections([IntersectionEntry::new(id, true)]),
        vec![id]
    );
    assert_eq!(p.bar.style("width").as_deref(), Some("80%"));
    assert_eq!(p.bar.style_writes("width"), 2);

    p.controller.on_intersections([IntersectionEntry::new(id, false)]);
    assert!(p.controller.on_intersections([IntersectionEntry::new(id, true)]).is_empty());
    assert_eq!(p.bar.style_writes("width"), 2);
    assert!(p.bar.has_class("fade-in"));
}

#[test]
fn bad_email_blocks_without_sending_toast() {
    let mut p = page();
    let submission = p.controller.submit_contact(&filled("bad-email"), Duration::ZERO);

    assert_eq!(submission.outcome, Err(ContactError::MalformedEmail));
    assert_eq!(submission.toast.severity, Severity::Error);
    let sending = &p.controller.config().messages.sending;
    assert!(p.controller.toasts().iter().all(|t| &t.message != sending));
    assert_eq!(p.controller.toasts().len(), 1);
}

#[test]
fn valid_form_shows_sending_and_proceeds() {
    let mut p = page();
    let submission = p.controller.submit_contact(&filled("a@b.com"), Duration::ZERO);

    assert!(submission.allowed());
    assert_eq!(submission.toast.severity, Severity::Info);
    assert_eq!(submission.toast.message, p.controller.config().messages.sending);
}

#[test]
fn sending_toast_expires_after_three_seconds() {
    let mut p = page();
    let start = Duration::from_millis(500);
    let id = p.controller.submit_contact(&filled("a@b.com"), start).toast.id;

    assert!(p.controller.tick(start + Duration::from_millis(2999)).is_empty());
    assert_eq!(
        p.controller.tick(start + Duration::from_secs(3)),
        vec![ToastTransition::BeginExit(id)]
    );
    assert_eq!(
        p.controller.tick(start + Duration::from_millis(3300)),
        vec![ToastTransition::Remove(id)]
    );
    assert!(p.controller.toasts().is_empty());
}

#[test]
fn geometric_fallback_reveals_sections_in_view() {
    let mut p = page();
    p.sections[0].set_rect(ElementRect::new(0.0, 700.0));
    p.sections[1].set_rect(ElementRect::new(800.0, 700.0));
    p.sections[2].set_rect(ElementRect::new(1600.0, 700.0));
    p.bar.set_rect(ElementRect::new(1700.0, 10.0));

    let revealed = p.controller.reveal_visible(900.0);
    assert_eq!(revealed.len(), 1);
    assert!(p.sections[0].has_class("fade-in"));
    assert!(!p.sections[1].has_class("fade-in"));
    assert_eq!(p.bar.style("width").as_deref(), Some("0%"));
}

#[test]
fn mobile_menu_and_settings_flow() {
    let mut p = page();
    assert!(p.controller.toggle_menu());
    p.controller.close_menu();
    assert!(!p.controller.menu().is_open());

    assert_eq!(
        p.controller.settings_event(SettingsEvent::ButtonClicked),
        Some(SettingsCommand::Show)
    );
    assert_eq!(
        p.controller.settings_event(SettingsEvent::DocumentClicked {
            inside_button: false,
            inside_menu: false,
        }),
        Some(SettingsCommand::Hide)
    );
}

#[test]
fn settings_links_scroll_in_page_or_navigate_natively() {
    let mut p = page();
    p.controller.settings_event(SettingsEvent::ButtonClicked);
    assert_eq!(
        p.controller.settings_event(SettingsEvent::LinkChosen("#projects".into())),
        Some(SettingsCommand::HideAndNavigate("#projects".into()))
    );

    p.controller.settings_event(SettingsEvent::ButtonClicked);
    assert_eq!(
        p.controller.settings_event(SettingsEvent::LinkChosen("#home".into())),
        Some(SettingsCommand::Hide)
    );
    assert!(!p.controller.settings().is_open());
}

#[test]
fn empty_page_degrades_to_no_ops() {
    let mut controller: PageController<FakeElement> =
        PageController::new(PageConfig::default(), PageElements::default());
    controller.init(5000.0);
    assert_eq!(controller.on_scroll(12_000.0), None);
    assert!(controller.reveal_visible(800.0).is_empty());
    assert!(controller.reveal().is_empty());
    assert!(controller.toggle_menu());
}
