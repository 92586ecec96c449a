#![forbid(unsafe_code)]

//! `wasm-bindgen` exports and DOM event wiring.
//!
//! All listeners live for the lifetime of the page, so their closures are
//! leaked with `Closure::forget`. Shared state sits in one
//! `Rc<RefCell<Runtime>>`; every handler takes its borrow, updates the
//! controller and releases it before touching anything that can call back
//! into the module.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Duration;

use folio_core::anchor::smooth_scroll_target;
use folio_core::contact::ContactValues;
use folio_core::reveal::IntersectionEntry;
use folio_core::settings::{SettingsCommand, SettingsEvent};
use folio_core::toast::{self, Toast, ToastId, ToastTransition};
use folio_core::{PageConfig, PageController, PageElement, PageElements};
use js_sys::{Array, Reflect};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::console;
use crate::dom::{self, DomElement};
use crate::options;

/// Marks the popover's close control.
const CLOSE_MARKER: &str = "data-folio-close";
/// Marks the popover's navigation links.
const LINK_MARKER: &str = "data-folio-link";

struct Runtime {
    controller: PageController<DomElement>,
    window: Window,
    document: Document,
    /// `None` when the host has no `IntersectionObserver`.
    observer: Option<IntersectionObserver>,
    toast_nodes: HashMap<ToastId, DomElement>,
    popover: Option<Element>,
}

type Shared = Rc<RefCell<Runtime>>;

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console::install_panic_hook();
}

/// Attach every page behavior to the current document.
///
/// `options` is an optional JSON object overriding any subset of the page
/// configuration. Call once, after the document has been parsed (module
/// scripts already run at that point).
#[wasm_bindgen]
pub fn boot(options: Option<String>) -> Result<(), JsValue> {
    console::install_panic_hook();
    let config = options::resolve_config(options.as_deref()).map_err(js_error)?;
    console::install(options::max_level(&config));

    let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| js_error("window has no document"))?;

    let elements = collect_elements(&document, &config);
    let shared: Shared = Rc::new(RefCell::new(Runtime {
        controller: PageController::new(config, elements),
        window: window.clone(),
        document: document.clone(),
        observer: None,
        toast_nodes: HashMap::new(),
        popover: None,
    }));

    wire_reveal(&shared)?;
    wire_scroll(&shared)?;
    wire_mobile_menu(&shared)?;
    wire_anchors(&shared)?;
    wire_contact_form(&shared)?;
    wire_settings(&shared)?;
    wire_load(&window)?;

    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let mut rt = shared.borrow_mut();
    rt.controller.init(scroll_y);
    if rt.observer.is_none() {
        let height = viewport_height(&rt.window);
        rt.controller.reveal_visible(height);
    }
    Ok(())
}

fn collect_elements(document: &Document, config: &PageConfig) -> PageElements<DomElement> {
    let selectors = &config.selectors;
    PageElements {
        sections: dom::query_all(document, &selectors.sections),
        nav_items: dom::query_all(document, &selectors.nav_items),
        progress_bars: dom::query_all(document, &selectors.progress_bars),
        navbar: dom::query_one(document, &selectors.navbar),
        menu_toggle: dom::query_one(document, &selectors.menu_toggle),
        nav_panel: dom::query_one(document, &selectors.nav_panel),
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn now(window: &Window) -> Duration {
    let ms = window.performance().map_or(0.0, |p| p.now());
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

fn smooth_scroll_to(document: &Document, selector: &str) {
    let Ok(Some(target)) = document.query_selector(selector) else {
        debug!(selector, "scroll target not found");
        return;
    };
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}

// -- Reveal -----------------------------------------------------------------

fn wire_reveal(shared: &Shared) -> Result<(), JsValue> {
    let mut rt = shared.borrow_mut();
    let supported = Reflect::has(&rt.window, &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false);
    if !supported {
        warn!("IntersectionObserver unavailable, revealing from scroll position");
        return Ok(());
    }

    let state = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let mut guard = state.borrow_mut();
            let rt = &mut *guard;
            let batch: Vec<IntersectionEntry> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    let id = rt
                        .controller
                        .reveal()
                        .find(|el| el.as_element() == &target)?;
                    Some(IntersectionEntry::new(id, entry.is_intersecting()))
                })
                .collect();
            for id in rt.controller.on_intersections(batch) {
                if let Some(sub) = rt.controller.reveal().subscription(id) {
                    observer.unobserve(sub.element().as_element());
                }
            }
        },
    );

    let rule = rt.controller.reveal().rule();
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(rule.threshold));
    init.set_root_margin(&rule.root_margin());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    // Progress bars were zeroed when the controller was built.
    for (_, element) in rt.controller.reveal().pending() {
        observer.observe(element.as_element());
    }
    rt.observer = Some(observer);
    Ok(())
}

// -- Scroll -----------------------------------------------------------------

fn wire_scroll(shared: &Shared) -> Result<(), JsValue> {
    let window = shared.borrow().window.clone();
    let state = Rc::clone(shared);
    listen(&window, "scroll", move |_| {
        let mut guard = state.borrow_mut();
        let rt = &mut *guard;
        let scroll_y = rt.window.scroll_y().unwrap_or(0.0);
        rt.controller.on_scroll(scroll_y);
        if rt.observer.is_none() {
            let height = viewport_height(&rt.window);
            rt.controller.reveal_visible(height);
        }
    })
}

// -- Navigation chrome ------------------------------------------------------

fn wire_mobile_menu(shared: &Shared) -> Result<(), JsValue> {
    let rt = shared.borrow();
    let selectors = &rt.controller.config().selectors;

    if let Some(toggle) = dom::query_one(&rt.document, &selectors.menu_toggle) {
        let state = Rc::clone(shared);
        listen(toggle.html(), "click", move |_| {
            let open = state.borrow_mut().controller.toggle_menu();
            debug!(open, "mobile menu toggled");
        })?;
    }

    let links = dom::query_all(&rt.document, &format!("{} a", selectors.nav_panel));
    for link in links {
        let state = Rc::clone(shared);
        listen(link.html(), "click", move |_| {
            state.borrow_mut().controller.close_menu();
        })?;
    }
    Ok(())
}

fn wire_anchors(shared: &Shared) -> Result<(), JsValue> {
    let rt = shared.borrow();
    for anchor in dom::query_all(&rt.document, &rt.controller.config().selectors.anchor_links) {
        let document = rt.document.clone();
        let href_source = anchor.clone();
        listen(anchor.html(), "click", move |event| {
            let Some(href) = href_source.attribute("href") else {
                return;
            };
            if let Some(selector) = smooth_scroll_target(&href) {
                event.prevent_default();
                smooth_scroll_to(&document, selector);
            }
        })?;
    }
    Ok(())
}

fn wire_load(window: &Window) -> Result<(), JsValue> {
    let document = window.document();
    listen(window, "load", move |_| {
        if let Some(body) = document.as_ref().and_then(Document::body) {
            DomElement::from(body).set_style("opacity", "1");
        }
    })
}

// -- Contact form & toasts --------------------------------------------------

fn field_value(document: &Document, id: &str) -> Option<String> {
    let Some(element) = document.get_element_by_id(id) else {
        warn!(id, "contact field not found");
        return None;
    };
    Reflect::get(&element, &JsValue::from_str("value"))
        .ok()
        .and_then(|value| value.as_string())
}

fn wire_contact_form(shared: &Shared) -> Result<(), JsValue> {
    let rt = shared.borrow();
    let Some(form) = dom::query_one(&rt.document, &rt.controller.config().selectors.contact_form)
    else {
        return Ok(());
    };
    let state = Rc::clone(shared);
    listen(form.html(), "submit", move |event| {
        let submission = {
            let mut guard = state.borrow_mut();
            let rt = &mut *guard;
            let values = ContactValues::from_lookup(|id| field_value(&rt.document, id));
            let at = now(&rt.window);
            rt.controller.submit_contact(&values, at)
        };
        if !submission.allowed() {
            event.prevent_default();
        }
        show_toast(&state, &submission.toast);
    })
}

/// Render `toast` and schedule its exit and removal.
fn show_toast(shared: &Shared, toast: &Toast) {
    let mut guard = shared.borrow_mut();
    let rt = &mut *guard;
    let Some(body) = rt.document.body() else {
        return;
    };
    let node = match rt
        .document
        .create_element("div")
        .map(|el| el.unchecked_into::<HtmlElement>())
    {
        Ok(node) => node,
        Err(err) => {
            warn!(?err, "toast element creation failed");
            return;
        }
    };
    node.set_class_name(&toast.severity.class_name());
    node.set_text_content(Some(&toast.message));
    if let Err(err) = node.set_attribute("style", &toast::inline_style(toast.severity)) {
        warn!(?err, toast = toast.id.get(), "toast style rejected");
    }
    if body.append_child(&node).is_err() {
        return;
    }
    rt.toast_nodes.insert(toast.id, DomElement::from(node));

    let shown = now(&rt.window);
    let (exit_after, remove_after) = rt.controller.toasts().schedule();
    for delay in [exit_after, remove_after] {
        schedule_toast_clock(shared, &rt.window, shown + delay, delay);
    }
}

fn schedule_toast_clock(shared: &Shared, window: &Window, due: Duration, delay: Duration) {
    let state = Rc::clone(shared);
    let callback = Closure::once_into_js(move || run_toast_clock(&state, due));
    let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)
        .is_err()
    {
        warn!(delay_ms, "toast timer could not be scheduled");
    }
}

/// Timers fire no earlier than requested, but the host clock may be coarser;
/// never tick before `due`.
fn run_toast_clock(shared: &Shared, due: Duration) {
    let mut guard = shared.borrow_mut();
    let rt = &mut *guard;
    let at = now(&rt.window).max(due);
    for transition in rt.controller.tick(at) {
        match transition {
            ToastTransition::BeginExit(id) => {
                if let Some(node) = rt.toast_nodes.get(&id) {
                    node.set_style("animation", toast::EXIT_ANIMATION);
                }
            }
            ToastTransition::Remove(id) => {
                if let Some(node) = rt.toast_nodes.remove(&id) {
                    node.html().remove();
                }
            }
        }
    }
}

// -- Settings popover -------------------------------------------------------

fn wire_settings(shared: &Shared) -> Result<(), JsValue> {
    let rt = shared.borrow();
    let selectors = rt.controller.config().selectors.clone();
    if dom::query_one(&rt.document, &selectors.settings_button).is_none() {
        return Ok(());
    }
    let document = rt.document.clone();
    let state = Rc::clone(shared);
    // One delegated listener covers the button, the popover controls and
    // outside clicks.
    listen(&document, "click", move |event| {
        let Some(target) = event_element(&event) else {
            return;
        };
        let settings_event = if closest(&target, &selectors.settings_button).is_some() {
            SettingsEvent::ButtonClicked
        } else if closest(&target, &format!("[{CLOSE_MARKER}]")).is_some() {
            SettingsEvent::CloseClicked
        } else if let Some(link) = closest(&target, &format!("[{LINK_MARKER}]")) {
            SettingsEvent::LinkChosen(link.get_attribute("href").unwrap_or_default())
        } else {
            SettingsEvent::DocumentClicked {
                inside_button: false,
                inside_menu: closest(&target, &selectors.settings_menu).is_some(),
            }
        };
        let native_link = matches!(settings_event, SettingsEvent::LinkChosen(_));
        let command = state.borrow_mut().controller.settings_event(settings_event);
        match command {
            Some(SettingsCommand::HideAndNavigate(href)) => {
                event.prevent_default();
                apply_settings_command(&state, SettingsCommand::HideAndNavigate(href));
            }
            // A disconnected anchor cannot navigate; keep it in the tree
            // until the browser has followed it.
            Some(SettingsCommand::Hide) if native_link => hide_popover_after_click(&state),
            Some(command) => apply_settings_command(&state, command),
            None => {}
        }
    })
}

fn hide_popover_after_click(shared: &Shared) {
    let mut guard = shared.borrow_mut();
    let rt = &mut *guard;
    let Some(popover) = rt.popover.take() else {
        return;
    };
    if let Ok(html) = popover.clone().dyn_into::<HtmlElement>() {
        DomElement::from(html).set_style("display", "none");
    }
    let callback = Closure::once_into_js(move || popover.remove());
    if rt
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
        .is_err()
    {
        warn!("settings popover removal could not be scheduled");
    }
}

fn apply_settings_command(shared: &Shared, command: SettingsCommand) {
    let mut guard = shared.borrow_mut();
    let rt = &mut *guard;
    match command {
        SettingsCommand::Show => match render_popover(&rt.document, rt.controller.config()) {
            Ok(popover) => rt.popover = Some(popover),
            Err(err) => warn!(?err, "settings popover could not be rendered"),
        },
        SettingsCommand::Hide => {
            if let Some(popover) = rt.popover.take() {
                popover.remove();
            }
        }
        SettingsCommand::HideAndNavigate(href) => {
            if let Some(popover) = rt.popover.take() {
                popover.remove();
            }
            if let Some(selector) = smooth_scroll_target(&href) {
                smooth_scroll_to(&rt.document, selector);
            }
        }
    }
}

const POPOVER_STYLE: &str = "position: fixed; top: 80px; right: 20px; background-color: white; \
     border: 1px solid rgba(212, 175, 55, 0.2); border-radius: 0.75rem; \
     box-shadow: 0 10px 30px rgba(0, 0, 0, 0.15); z-index: 2000; min-width: 220px; \
     overflow: hidden; animation: slideInRight 0.3s ease;";
const CLOSE_STYLE: &str = "width: 100%; padding: 0.75rem 1rem; border: none; \
     background-color: transparent; text-align: right; cursor: pointer; font-size: 1.25rem;";
const LINK_STYLE: &str = "display: block; padding: 0.75rem 1rem; color: #1A1A1A; \
     text-decoration: none; border-top: 1px solid rgba(212, 175, 55, 0.2);";

fn render_popover(document: &Document, config: &PageConfig) -> Result<Element, JsValue> {
    let root = document.create_element("div")?;
    // The menu selector is usually a class selector; keep the class in sync.
    if let Some(class) = config.selectors.settings_menu.strip_prefix('.') {
        root.set_class_name(class);
    }
    let panel = document.create_element("div")?;
    panel.set_attribute("style", POPOVER_STYLE)?;

    let close = document.create_element("button")?;
    close.set_attribute(CLOSE_MARKER, "")?;
    close.set_attribute("style", CLOSE_STYLE)?;
    close.set_text_content(Some("✕"));
    panel.append_child(&close)?;

    for link in &config.settings_links {
        let anchor = document.create_element("a")?;
        anchor.set_attribute("href", &link.href)?;
        anchor.set_attribute(LINK_MARKER, "")?;
        anchor.set_attribute("style", LINK_STYLE)?;
        anchor.set_text_content(Some(&link.label));
        panel.append_child(&anchor)?;
    }

    root.append_child(&panel)?;
    let body = document
        .body()
        .ok_or_else(|| js_error("document has no body"))?;
    body.append_child(&root)?;
    info!(links = config.settings_links.len(), "settings menu opened");
    Ok(root)
}
