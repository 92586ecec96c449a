#![forbid(unsafe_code)]

//! One-shot reveal-on-intersection.
//!
//! Every section and progress bar is registered once as a [`Subscription`].
//! The first intersection report for a subscription fires it: the element gets
//! the revealed marker, a progress bar gets its declared width, and the
//! subscription is spent. Later reports for a spent subscription are ignored,
//! whatever they say.
//!
//! The host's intersection primitive (the browser `IntersectionObserver`) only
//! produces [`IntersectionEntry`] batches. Hosts without one can evaluate
//! [`IntersectionRule`] against bounding boxes via
//! [`RevealObserver::reveal_visible`].
//!
//! # Invariants
//!
//! 1. `revealed` goes false → true at most once per element, never back.
//! 2. Progress bars read `0%` from [`RevealObserver::attach`] until revealed,
//!    and exactly their declared width afterwards.
//! 3. Entries are applied in batch order.

use tracing::{debug, warn};

use crate::element::{ElementRect, PageElement};

/// What a watched element is, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    Section,
    ProgressBar,
}

/// Stable handle to one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(usize);

impl WatchId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One intersection report from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: WatchId,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    #[must_use]
    pub const fn new(id: WatchId, is_intersecting: bool) -> Self {
        Self {
            id,
            is_intersecting,
        }
    }
}

/// Visibility threshold plus a bottom margin pulled in from the viewport edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRule {
    /// Minimum visible fraction of the element's height.
    pub threshold: f64,
    /// The trigger edge sits this far above the viewport bottom.
    pub bottom_margin: f64,
}

impl Default for IntersectionRule {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 100.0,
        }
    }
}

impl IntersectionRule {
    /// Root margin string for the platform observer (`0px 0px -100px 0px`).
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin)
    }

    /// Whether an element with viewport-relative `rect` counts as
    /// intersecting a viewport `viewport_height` pixels tall.
    ///
    /// Only the vertical axis is considered.
    #[must_use]
    pub fn is_intersecting(&self, rect: ElementRect, viewport_height: f64) -> bool {
        let root_bottom = viewport_height - self.bottom_margin;
        if root_bottom <= 0.0 {
            return false;
        }
        if rect.height <= 0.0 {
            return rect.top >= 0.0 && rect.top <= root_bottom;
        }
        let overlap = rect.bottom().min(root_bottom) - rect.top.max(0.0);
        if overlap <= 0.0 {
            return false;
        }
        overlap / rect.height >= self.threshold
    }
}

/// A per-element one-shot reveal subscription.
#[derive(Debug)]
pub struct Subscription<E> {
    element: E,
    kind: WatchKind,
    fired: bool,
}

impl<E: PageElement> Subscription<E> {
    fn new(element: E, kind: WatchKind) -> Self {
        Self {
            element,
            kind,
            fired: false,
        }
    }

    /// Apply the reveal unless already fired. Returns whether it fired now.
    fn fire(&mut self, revealed_class: &str, width_attribute: &str) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        self.element.set_class(revealed_class, true);
        if self.kind == WatchKind::ProgressBar {
            match self.element.attribute(width_attribute) {
                Some(width) => self.element.set_style("width", &width),
                None => warn!(width_attribute, "progress bar has no target width"),
            }
        }
        true
    }

    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    #[must_use]
    pub fn kind(&self) -> WatchKind {
        self.kind
    }

    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.fired
    }
}

/// Owner of all reveal subscriptions for a page.
#[derive(Debug)]
pub struct RevealObserver<E> {
    subscriptions: Vec<Subscription<E>>,
    rule: IntersectionRule,
    revealed_class: String,
    width_attribute: String,
}

impl<E: PageElement> RevealObserver<E> {
    /// Reset progress bars to `0%`, then register every section and progress
    /// bar exactly once (sections first, each group in document order).
    pub fn attach(
        sections: Vec<E>,
        progress_bars: Vec<E>,
        rule: IntersectionRule,
        revealed_class: impl Into<String>,
        width_attribute: impl Into<String>,
    ) -> Self {
        for bar in &progress_bars {
            bar.set_style("width", "0%");
        }
        let subscriptions = sections
            .into_iter()
            .map(|el| Subscription::new(el, WatchKind::Section))
            .chain(
                progress_bars
                    .into_iter()
                    .map(|el| Subscription::new(el, WatchKind::ProgressBar)),
            )
            .collect();
        Self {
            subscriptions,
            rule,
            revealed_class: revealed_class.into(),
            width_attribute: width_attribute.into(),
        }
    }

    /// Process one intersection batch in order. Returns the ids revealed by
    /// this batch; the host should stop observing them.
    pub fn handle_batch(
        &mut self,
        entries: impl IntoIterator<Item = IntersectionEntry>,
    ) -> Vec<WatchId> {
        let mut fired = Vec::new();
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            let Some(sub) = self.subscriptions.get_mut(entry.id.0) else {
                continue;
            };
            if sub.fire(&self.revealed_class, &self.width_attribute) {
                debug!(id = entry.id.0, kind = ?sub.kind, "revealed");
                fired.push(entry.id);
            }
        }
        fired
    }

    /// Evaluate [`IntersectionRule`] for every pending subscription against
    /// its current bounding box and reveal the ones inside.
    pub fn reveal_visible(&mut self, viewport_height: f64) -> Vec<WatchId> {
        let rule = self.rule;
        let entries: Vec<IntersectionEntry> = self
            .pending()
            .map(|(id, el)| {
                IntersectionEntry::new(id, rule.is_intersecting(el.client_rect(), viewport_height))
            })
            .collect();
        self.handle_batch(entries)
    }

    /// First subscription whose element satisfies `matches`.
    pub fn find(&self, mut matches: impl FnMut(&E) -> bool) -> Option<WatchId> {
        self.subscriptions
            .iter()
            .position(|sub| matches(&sub.element))
            .map(WatchId)
    }

    /// Subscriptions that have not fired yet.
    pub fn pending(&self) -> impl Iterator<Item = (WatchId, &E)> {
        self.subscriptions
            .iter()
            .enumerate()
            .filter(|(_, sub)| !sub.fired)
            .map(|(idx, sub)| (WatchId(idx), &sub.element))
    }

    #[must_use]
    pub fn subscription(&self, id: WatchId) -> Option<&Subscription<E>> {
        self.subscriptions.get(id.0)
    }

    #[must_use]
    pub fn is_revealed(&self, id: WatchId) -> bool {
        self.subscription(id).is_some_and(Subscription::is_fired)
    }

    /// Total number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    #[must_use]
    pub fn rule(&self) -> IntersectionRule {
        self.rule
    }
}
