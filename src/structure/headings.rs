//! Heading detection over a document's line spans.

use crate::model::{Heading, Span};
use crate::structure::{FontHistogram, HeadingLevelMap};

/// Classifies lines as headings by their rounded font size.
///
/// Deterministic: identical span input always yields identical headings,
/// including under histogram tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier;

impl HeadingClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Detect headings across a whole document.
    ///
    /// Builds the font histogram over every span, derives the level map,
    /// then emits one heading per line whose rounded size participates in
    /// the map and whose trimmed text is non-empty.
    pub fn classify(&self, spans: &[Span]) -> Vec<Heading> {
        if spans.is_empty() {
            return Vec::new();
        }

        let histogram = FontHistogram::from_spans(spans);
        let level_map = HeadingLevelMap::from_histogram(&histogram);
        if level_map.used_fallback() {
            log::debug!(
                "no font size exceeds body text; using {} largest sizes as heading candidates",
                level_map.len()
            );
        }

        self.classify_with_map(spans, &level_map)
    }

    /// Detect headings using an already-derived level map.
    pub fn classify_with_map(&self, spans: &[Span], level_map: &HeadingLevelMap) -> Vec<Heading> {
        let mut headings = Vec::new();
        for span in spans {
            let Some(level) = level_map.level_for(span.size_tenths()) else {
                continue;
            };
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }
            headings.push(Heading {
                level,
                text: text.to_string(),
                page_number: span.page_number,
            });
        }
        headings
    }
}
