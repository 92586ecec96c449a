#![forbid(unsafe_code)]

//! Page configuration: thresholds, selectors, marker classes, messages.
//!
//! Every field has a default matching the stock portfolio markup, so a host
//! only passes the values it wants to change:
//!
//! ```
//! use folio_core::config::PageConfig;
//!
//! let config = PageConfig::from_json(r#"{"scroll_lookahead_px": 120}"#).unwrap();
//! assert_eq!(config.scroll_lookahead_px, 120.0);
//! assert_eq!(config.reveal_bottom_margin_px, 100.0);
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Errors from loading a [`PageConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Malformed JSON or a field of the wrong type.
    Json(String),
    /// A field parsed but its value is out of range.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "config JSON error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// CSS selectors used to locate page elements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub sections: String,
    pub nav_items: String,
    pub progress_bars: String,
    pub navbar: String,
    pub menu_toggle: String,
    pub nav_panel: String,
    pub contact_form: String,
    pub settings_button: String,
    pub settings_menu: String,
    pub anchor_links: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            sections: "section".into(),
            nav_items: ".nav-links a".into(),
            progress_bars: ".skill-progress".into(),
            navbar: "nav".into(),
            menu_toggle: ".menu-toggle".into(),
            nav_panel: ".nav-links".into(),
            contact_form: "#contactForm".into(),
            settings_button: ".settings-btn".into(),
            settings_menu: ".settings-menu".into(),
            anchor_links: "a[href^=\"#\"]".into(),
        }
    }
}

/// Marker classes written onto elements. The stylesheet owns their look.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkerClasses {
    pub active: String,
    pub revealed: String,
    pub scrolled: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            active: "active".into(),
            revealed: "fade-in".into(),
            scrolled: "scrolled".into(),
        }
    }
}

/// User-facing strings, in the page's content language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub missing_fields: String,
    pub invalid_email: String,
    pub sending: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_fields: "يرجى ملء جميع الحقول المطلوبة".into(),
            invalid_email: "يرجى إدخال بريد إلكتروني صحيح".into(),
            sending: "جاري إرسال رسالتك...".into(),
        }
    }
}

/// One entry of the settings popover.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuLink {
    pub href: String,
    pub label: String,
}

impl MenuLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

fn default_settings_links() -> Vec<MenuLink> {
    vec![
        MenuLink::new("#about", "عني"),
        MenuLink::new("#skills", "مهاراتي"),
        MenuLink::new("#projects", "أعمالي"),
        MenuLink::new("#contact", "التواصل"),
    ]
}

/// Full configuration for one page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// A section activates once the scroll position is within this many
    /// pixels of its top.
    pub scroll_lookahead_px: f64,
    /// Fraction of an element's area that must be visible to reveal it.
    pub reveal_threshold: f64,
    /// Distance above the viewport bottom that counts as the trigger edge.
    pub reveal_bottom_margin_px: f64,
    /// Navbar gets the scrolled marker strictly past this offset.
    pub navbar_scrolled_after_px: f64,
    pub toast_visible_ms: u64,
    pub toast_exit_ms: u64,
    /// Attribute carrying a progress bar's target width.
    pub width_attribute: String,
    pub selectors: Selectors,
    pub classes: MarkerClasses,
    pub messages: Messages,
    #[serde(default = "default_settings_links")]
    pub settings_links: Vec<MenuLink>,
    /// Maximum log level forwarded to the console (`trace` .. `error`, `off`).
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_lookahead_px: 200.0,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 100.0,
            navbar_scrolled_after_px: 50.0,
            toast_visible_ms: 3000,
            toast_exit_ms: 300,
            width_attribute: "data-width".into(),
            selectors: Selectors::default(),
            classes: MarkerClasses::default(),
            messages: Messages::default(),
            settings_links: default_settings_links(),
            log_level: "info".into(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON override document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal_threshold",
                reason: "must be within 0.0..=1.0",
            });
        }
        let pixels = [
            ("scroll_lookahead_px", self.scroll_lookahead_px),
            ("reveal_bottom_margin_px", self.reveal_bottom_margin_px),
            ("navbar_scrolled_after_px", self.navbar_scrolled_after_px),
        ];
        for (field, value) in pixels {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite, non-negative pixel value",
                });
            }
        }
        if self.toast_visible_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "toast_visible_ms",
                reason: "must be greater than zero",
            });
        }
        if self.width_attribute.is_empty() {
            return Err(ConfigError::Invalid {
                field: "width_attribute",
                reason: "must not be empty",
            });
        }
        let selectors = [
            ("selectors.sections", &self.selectors.sections),
            ("selectors.nav_items", &self.selectors.nav_items),
            ("selectors.progress_bars", &self.selectors.progress_bars),
            ("selectors.navbar", &self.selectors.navbar),
            ("selectors.menu_toggle", &self.selectors.menu_toggle),
            ("selectors.nav_panel", &self.selectors.nav_panel),
            ("selectors.contact_form", &self.selectors.contact_form),
            ("selectors.settings_button", &self.selectors.settings_button),
            ("selectors.settings_menu", &self.selectors.settings_menu),
            ("selectors.anchor_links", &self.selectors.anchor_links),
        ];
        for (field, selector) in selectors {
            if selector.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "selector must not be empty",
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    #[must_use]
    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn partial_nested_override_keeps_siblings() {
        let config = PageConfig::from_json(r#"{"classes": {"revealed": "visible"}}"#).unwrap();
        assert_eq!(config.classes.revealed, "visible");
        assert_eq!(config.classes.active, "active");
        assert_eq!(config.settings_links.len(), 4);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = PageConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let err = PageConfig::from_json(r#"{"reveal_threshold": 1.5}"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "reveal_threshold",
                reason: "must be within 0.0..=1.0",
            }
        );
    }

    #[test]
    fn negative_lookahead_is_rejected() {
        let err = PageConfig::from_json(r#"{"scroll_lookahead_px": -1}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "scroll_lookahead_px",
                ..
            }
        ));
    }

    #[test]
    fn blank_selector_is_rejected() {
        let err = PageConfig::from_json(r#"{"selectors": {"sections": "  "}}"#).unwrap_err();
        assert!(err.to_string().contains("selectors.sections"));
    }

    #[test]
    fn durations_follow_millisecond_fields() {
        let config = PageConfig::default();
        assert_eq!(config.toast_visible(), Duration::from_secs(3));
        assert_eq!(config.toast_exit(), Duration::from_millis(300));
    }
}
