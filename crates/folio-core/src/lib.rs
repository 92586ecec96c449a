#![forbid(unsafe_code)]

//! Behavior layer for the folio single-page portfolio.
//!
//! # Role
//! `folio-core` holds every piece of page behavior as plain Rust state over
//! an injected element abstraction ([`element::PageElement`]). The browser
//! binding lives in `folio-web`; nothing here touches JS or WASM types, so
//! the whole crate is exercised by native tests against a fake DOM
//! (`testing::FakeElement`, behind the `test-helpers` feature).
//!
//! # Components
//! - [`scroll::ScrollTracker`]: active-section highlighting on scroll.
//! - [`reveal::RevealObserver`]: one-shot reveal-on-intersection, including
//!   progress bar width animation.
//! - [`navbar::NavbarState`], [`menu::MobileMenu`], [`anchor`]: navigation
//!   chrome.
//! - [`contact`]: contact form validation.
//! - [`toast::ToastQueue`]: transient notifications on a host clock.
//! - [`settings::SettingsMenu`]: settings popover state machine.
//! - [`page::PageController`]: the façade a host drives.

pub mod anchor;
pub mod config;
pub mod contact;
pub mod element;
pub mod menu;
pub mod navbar;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod settings;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod toast;

pub use config::{ConfigError, PageConfig};
pub use element::{ElementRect, PageElement};
pub use page::{PageController, PageElements, Submission};
