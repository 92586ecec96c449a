//! Property-based invariant tests for scroll tracking and reveal.
//!
//! **Scroll Tracker:**
//! 1. The active section is the one with the greatest offset not exceeding
//!    `scroll_y + lookahead`, or none.
//! 2. At most one nav item is active after any recomputation.
//! 3. Recomputing twice at the same position is idempotent.
//!
//! **Reveal Observer:**
//! 4. Revealed never goes back to false, whatever the batch sequence.
//! 5. Progress widths are `0%` until revealed and exactly the declared width
//!    after, in any reveal order.
//! 6. Each element's width is written at most twice (reset, then reveal).

use folio_core::PageElement;
use folio_core::reveal::{IntersectionEntry, IntersectionRule, RevealObserver, WatchId};
use folio_core::scroll::ScrollTracker;
use folio_core::testing::FakeElement;
use proptest::prelude::*;

const LOOKAHEAD: f64 = 200.0;

// ── Strategies ────────────────────────────────────────────────────────────

/// Strictly increasing section offsets, as laid out in a document.
fn offsets_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(1u32..=1500, 0..=8).prop_map(|gaps| {
        let mut top = 0.0;
        gaps.into_iter()
            .map(|gap| {
                top += f64::from(gap);
                top
            })
            .collect()
    })
}

fn tracker_for(offsets: &[f64]) -> ScrollTracker<FakeElement> {
    let sections = offsets
        .iter()
        .enumerate()
        .map(|(i, top)| FakeElement::section(&format!("s{i}"), *top))
        .collect();
    let nav = (0..offsets.len())
        .map(|i| FakeElement::nav_link(&format!("s{i}")))
        .collect();
    ScrollTracker::new(sections, nav, LOOKAHEAD, "active")
}

fn active_count(tracker: &ScrollTracker<FakeElement>) -> usize {
    tracker
        .nav_items()
        .iter()
        .filter(|item| item.has_class("active"))
        .count()
}

fn batch_strategy(len: usize) -> impl Strategy<Value = Vec<Vec<(usize, bool)>>> {
    let entry = (0..len.max(1), any::<bool>());
    proptest::collection::vec(proptest::collection::vec(entry, 0..=6), 0..=10)
}

// ── Scroll Tracker ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn active_is_greatest_qualifying_offset(
        offsets in offsets_strategy(),
        scroll_y in 0.0f64..=15_000.0,
    ) {
        let mut tracker = tracker_for(&offsets);
        let active = tracker.recompute_active_section(scroll_y).map(str::to_owned);

        let expected = offsets
            .iter()
            .enumerate()
            .filter(|(_, top)| scroll_y >= **top - LOOKAHEAD)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| format!("s{i}"));
        prop_assert_eq!(active, expected);
    }

    #[test]
    fn at_most_one_nav_item_active(
        offsets in offsets_strategy(),
        positions in proptest::collection::vec(0.0f64..=15_000.0, 1..=12),
    ) {
        let mut tracker = tracker_for(&offsets);
        for y in positions {
            let active = tracker.recompute_active_section(y).is_some();
            prop_assert_eq!(active_count(&tracker), usize::from(active));
        }
    }

    #[test]
    fn recompute_is_idempotent(
        offsets in offsets_strategy(),
        scroll_y in 0.0f64..=15_000.0,
    ) {
        let mut tracker = tracker_for(&offsets);
        let first = tracker.recompute_active_section(scroll_y).map(str::to_owned);
        let flags: Vec<bool> = tracker.nav_items().iter().map(|n| n.has_class("active")).collect();

        let second = tracker.recompute_active_section(scroll_y).map(str::to_owned);
        let again: Vec<bool> = tracker.nav_items().iter().map(|n| n.has_class("active")).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(flags, again);
    }
}

// ── Reveal Observer ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn revealed_is_monotonic(
        section_count in 1usize..=5,
        batches in batch_strategy(5),
    ) {
        let sections: Vec<FakeElement> =
            (0..section_count).map(|i| FakeElement::section(&format!("s{i}"), 0.0)).collect();
        let mut observer = RevealObserver::attach(
            sections.clone(),
            Vec::new(),
            IntersectionRule::default(),
            "fade-in",
            "data-width",
        );

        let mut seen = vec![false; section_count];
        for batch in batches {
            let entries: Vec<_> = batch
                .into_iter()
                .filter(|(i, _)| *i < section_count)
                .map(|(i, hit)| IntersectionEntry::new(id_of(&observer, &sections[i]), hit))
                .collect();
            for entry in &entries {
                if entry.is_intersecting {
                    seen[entry.id.index()] = true;
                }
            }
            observer.handle_batch(entries);
            for (i, section) in sections.iter().enumerate() {
                prop_assert_eq!(section.has_class("fade-in"), seen[i]);
            }
        }
    }

    #[test]
    fn progress_width_tracks_reveal_in_any_order(
        widths in proptest::collection::vec(0u8..=100, 1..=6),
        batches in batch_strategy(6),
    ) {
        let bars: Vec<FakeElement> = widths
            .iter()
            .map(|w| FakeElement::progress_bar(&format!("{w}%")))
            .collect();
        let mut observer = RevealObserver::attach(
            Vec::new(),
            bars.clone(),
            IntersectionRule::default(),
            "fade-in",
            "data-width",
        );

        for bar in &bars {
            let width = bar.style("width");
            prop_assert_eq!(width.as_deref(), Some("0%"));
        }

        for batch in batches {
            let entries: Vec<_> = batch
                .into_iter()
                .filter(|(i, _)| *i < bars.len())
                .map(|(i, hit)| IntersectionEntry::new(id_of(&observer, &bars[i]), hit))
                .collect();
            observer.handle_batch(entries);

            for (bar, w) in bars.iter().zip(&widths) {
                let id = id_of(&observer, bar);
                let expected = if observer.is_revealed(id) {
                    format!("{w}%")
                } else {
                    "0%".to_owned()
                };
                prop_assert_eq!(bar.style("width"), Some(expected));
                prop_assert!(bar.style_writes("width") <= 2);
            }
        }
    }
}

fn id_of(observer: &RevealObserver<FakeElement>, element: &FakeElement) -> WatchId {
    observer
        .find(|el| el.same_node(element))
        .expect("element is registered")
}
