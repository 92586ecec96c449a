#![forbid(unsafe_code)]

//! Settings popover: a dismissible menu of in-page links.
//!
//! ```text
//!            ButtonClicked
//!   Closed ─────────────────▶ Open
//!     ▲                         │
//!     └─────────────────────────┘
//!   CloseClicked | LinkChosen | click outside button and menu
//! ```
//!
//! The host renders the popover on [`SettingsCommand::Show`] and removes it on
//! [`SettingsCommand::Hide`]. A click on the open button also bubbles to the
//! document; it arrives as a [`SettingsEvent::DocumentClicked`] with
//! `inside_button` set and is ignored.
//!
//! Only links with an in-page scroll target are intercepted. Any other link
//! (`#home`, `#`, another page) just closes the popover and the browser
//! follows it natively.

use crate::anchor::smooth_scroll_target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Input to the popover state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    ButtonClicked,
    CloseClicked,
    /// A menu link was chosen; carries its `href`.
    LinkChosen(String),
    DocumentClicked {
        inside_button: bool,
        inside_menu: bool,
    },
}

/// What the host must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    Show,
    Hide,
    /// Hide, cancel the native navigation, then smooth-scroll to the link
    /// target.
    HideAndNavigate(String),
}

/// Open/closed state of the settings popover.
#[derive(Debug, Clone, Default)]
pub struct SettingsMenu {
    state: MenuState,
}

impl SettingsMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Apply `event`. Returns a command only when the state changed.
    pub fn handle(&mut self, event: SettingsEvent) -> Option<SettingsCommand> {
        match (self.state, event) {
            (MenuState::Closed, SettingsEvent::ButtonClicked) => {
                self.state = MenuState::Open;
                Some(SettingsCommand::Show)
            }
            (MenuState::Open, SettingsEvent::CloseClicked) => {
                self.state = MenuState::Closed;
                Some(SettingsCommand::Hide)
            }
            (MenuState::Open, SettingsEvent::LinkChosen(href)) => {
                self.state = MenuState::Closed;
                if smooth_scroll_target(&href).is_some() {
                    Some(SettingsCommand::HideAndNavigate(href))
                } else {
                    Some(SettingsCommand::Hide)
                }
            }
            (
                MenuState::Open,
                SettingsEvent::DocumentClicked {
                    inside_button: false,
                    inside_menu: false,
                },
            ) => {
                self.state = MenuState::Closed;
                Some(SettingsCommand::Hide)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTSIDE: SettingsEvent = SettingsEvent::DocumentClicked {
        inside_button: false,
        inside_menu: false,
    };

    #[test]
    fn button_opens_once() {
        let mut menu = SettingsMenu::new();
        assert_eq!(menu.handle(SettingsEvent::ButtonClicked), Some(SettingsCommand::Show));
        assert_eq!(menu.handle(SettingsEvent::ButtonClicked), None);
        assert!(menu.is_open());
    }

    #[test]
    fn button_click_bubbling_to_document_keeps_open() {
        let mut menu = SettingsMenu::new();
        menu.handle(SettingsEvent::ButtonClicked);
        let bubbled = SettingsEvent::DocumentClicked {
            inside_button: true,
            inside_menu: false,
        };
        assert_eq!(menu.handle(bubbled), None);
        assert!(menu.is_open());
    }

    #[test]
    fn click_inside_menu_keeps_open() {
        let mut menu = SettingsMenu::new();
        menu.handle(SettingsEvent::ButtonClicked);
        let inside = SettingsEvent::DocumentClicked {
            inside_button: false,
            inside_menu: true,
        };
        assert_eq!(menu.handle(inside), None);
    }

    #[test]
    fn outside_click_closes() {
        let mut menu = SettingsMenu::new();
        menu.handle(SettingsEvent::ButtonClicked);
        assert_eq!(menu.handle(OUTSIDE), Some(SettingsCommand::Hide));
        assert_eq!(menu.state(), MenuState::Closed);
        assert_eq!(menu.handle(OUTSIDE), None);
    }

    #[test]
    fn close_control_closes() {
        let mut menu = SettingsMenu::new();
        menu.handle(SettingsEvent::ButtonClicked);
        assert_eq!(menu.handle(SettingsEvent::CloseClicked), Some(SettingsCommand::Hide));
    }

    #[test]
    fn link_closes_and_navigates() {
        let mut menu = SettingsMenu::new();
        menu.handle(SettingsEvent::ButtonClicked);
        assert_eq!(
            menu.handle(SettingsEvent::LinkChosen("#skills".into())),
            Some(SettingsCommand::HideAndNavigate("#skills".into()))
        );
        assert!(!menu.is_open());
    }

    #[test]
    fn links_without_scroll_target_are_left_to_the_browser() {
        for href in ["#home", "#", "https://example.com/cv.pdf"] {
            let mut menu = SettingsMenu::new();
            menu.handle(SettingsEvent::ButtonClicked);
            assert_eq!(
                menu.handle(SettingsEvent::LinkChosen(href.into())),
                Some(SettingsCommand::Hide),
                "{href}"
            );
            assert!(!menu.is_open());
        }
    }

    #[test]
    fn closed_menu_ignores_close_events() {
        let mut menu = SettingsMenu::new();
        assert_eq!(menu.handle(SettingsEvent::CloseClicked), None);
        assert_eq!(menu.handle(SettingsEvent::LinkChosen("#about".into())), None);
    }
}
