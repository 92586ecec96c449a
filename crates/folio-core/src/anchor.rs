#![forbid(unsafe_code)]

//! In-page anchor interception for smooth scrolling.

/// Hrefs left to the browser's native jump.
const NATIVE_HREFS: [&str; 2] = ["#", "#home"];

/// Decide whether a click on an anchor with `href` should be intercepted.
///
/// Returns the selector of the element to smooth-scroll to, or `None` to let
/// the default navigation happen.
///
/// ```
/// use folio_core::anchor::smooth_scroll_target;
///
/// assert_eq!(smooth_scroll_target("#skills"), Some("#skills"));
/// assert_eq!(smooth_scroll_target("#home"), None);
/// assert_eq!(smooth_scroll_target("https://example.com"), None);
/// ```
#[must_use]
pub fn smooth_scroll_target(href: &str) -> Option<&str> {
    if !href.starts_with('#') || NATIVE_HREFS.contains(&href) {
        return None;
    }
    Some(href)
}
