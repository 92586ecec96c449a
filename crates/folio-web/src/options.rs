#![forbid(unsafe_code)]

//! Boot option parsing shared by the wasm exports and native tests.

use folio_core::{ConfigError, PageConfig};
use tracing::level_filters::LevelFilter;

/// Resolve the optional JSON passed to `boot` into a validated config.
///
/// `None`, an empty string and whitespace all mean "stock configuration".
pub fn resolve_config(options: Option<&str>) -> Result<PageConfig, ConfigError> {
    match options.map(str::trim) {
        None | Some("") => Ok(PageConfig::default()),
        Some(json) => PageConfig::from_json(json),
    }
}

/// Console log ceiling for `config`. Unknown names fall back to `INFO`.
pub fn max_level(config: &PageConfig) -> LevelFilter {
    config.log_level.parse().unwrap_or(LevelFilter::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_options_use_defaults() {
        assert_eq!(resolve_config(None).unwrap(), PageConfig::default());
        assert_eq!(resolve_config(Some("  ")).unwrap(), PageConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = resolve_config(Some(r#"{"navbar_scrolled_after_px": 80}"#)).unwrap();
        assert_eq!(config.navbar_scrolled_after_px, 80.0);
    }

    #[test]
    fn invalid_options_surface_errors() {
        assert!(resolve_config(Some("[1, 2")).is_err());
        assert!(resolve_config(Some(r#"{"reveal_threshold": -0.5}"#)).is_err());
    }

    #[test]
    fn level_names_parse() {
        let mut config = PageConfig::default();
        assert_eq!(max_level(&config), LevelFilter::INFO);
        config.log_level = "debug".into();
        assert_eq!(max_level(&config), LevelFilter::DEBUG);
        config.log_level = "off".into();
        assert_eq!(max_level(&config), LevelFilter::OFF);
        config.log_level = "loud".into();
        assert_eq!(max_level(&config), LevelFilter::INFO);
    }
}
