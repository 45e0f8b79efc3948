//! Font-size statistics over a document's spans.
//!
//! Headings are inferred without layout metadata: the most frequent
//! rounded font size is taken as body text, and up to four distinct
//! larger sizes map to heading levels H1..H4, largest first.

use std::collections::BTreeMap;

use crate::model::{HeadingLevel, Span};

/// Occurrence counts per font size, keyed by integer tenths of a point.
///
/// Built once per document and discarded after the level map is derived.
#[derive(Debug, Clone, Default)]
pub struct FontHistogram {
    counts: BTreeMap<i32, usize>,
}

impl FontHistogram {
    /// Build a histogram over every span of one document.
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut histogram = Self::default();
        for span in spans {
            histogram.add(span.size_tenths());
        }
        histogram
    }

    /// Record one observation of a size (in tenths).
    pub fn add(&mut self, size_tenths: i32) {
        *self.counts.entry(size_tenths).or_insert(0) += 1;
    }

    /// Whether no sizes were observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The body text size: the size with the highest count.
    ///
    /// Ties break to the smallest of the tied sizes, which the ascending
    /// BTreeMap iteration gives for free (a strictly-greater count is
    /// required to displace the current winner).
    pub fn body_size_tenths(&self) -> Option<i32> {
        let mut best: Option<(i32, usize)> = None;
        for (&size, &count) in &self.counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((size, count)),
            }
        }
        best.map(|(size, _)| size)
    }

    /// Distinct sizes strictly greater than the body size, descending.
    pub fn sizes_above_body(&self) -> Vec<i32> {
        let Some(body) = self.body_size_tenths() else {
            return Vec::new();
        };
        self.counts.keys().rev().copied().filter(|&s| s > body).collect()
    }

    /// The `n` largest distinct sizes in the histogram, descending.
    pub fn largest_sizes(&self, n: usize) -> Vec<i32> {
        self.counts.keys().rev().take(n).copied().collect()
    }
}

/// Mapping from font size (tenths) to heading level.
///
/// Invariants: at most 4 entries, sizes strictly descending from H1 to H4,
/// and the body size is excluded unless the fallback path produced the map.
#[derive(Debug, Clone, Default)]
pub struct HeadingLevelMap {
    /// (size in tenths, level), size descending
    entries: Vec<(i32, HeadingLevel)>,
    used_fallback: bool,
}

impl HeadingLevelMap {
    /// Derive the level map from a histogram.
    ///
    /// When no size exceeds the body size, the map falls back to the 2
    /// largest distinct sizes overall so sparse documents still yield
    /// heading candidates.
    pub fn from_histogram(histogram: &FontHistogram) -> Self {
        let mut sizes = histogram.sizes_above_body();
        let mut used_fallback = false;

        if sizes.is_empty() && !histogram.is_empty() {
            sizes = histogram.largest_sizes(2);
            used_fallback = true;
        }

        let entries = sizes
            .into_iter()
            .zip(HeadingLevel::ALL)
            .collect();

        Self {
            entries,
            used_fallback,
        }
    }

    /// The level for a size, if the size participates in the map.
    pub fn level_for(&self, size_tenths: i32) -> Option<HeadingLevel> {
        self.entries
            .iter()
            .find(|(size, _)| *size == size_tenths)
            .map(|(_, level)| *level)
    }

    /// Number of mapped sizes (0..=4).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no sizes are mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the 2-largest fallback produced this map.
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Mapped sizes in H1..H4 order.
    pub fn sizes(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(|(size, _)| *size)
    }
}
