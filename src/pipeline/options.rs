//! Pipeline configuration.

use crate::rank::{DEFAULT_MIN_SENTENCE_CHARS, DEFAULT_TOP_SECTIONS, DEFAULT_TOP_SENTENCES};
use crate::structure::DEFAULT_MIN_PAGE_CHARS;

/// Options for a processing run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// How many sections the ranker retains
    pub top_sections: usize,

    /// How many sentences the refiner keeps per section
    pub top_sentences: usize,

    /// Minimum trimmed page text length for a page to count as content
    pub min_page_chars: usize,

    /// Minimum trimmed sentence length for a refinement candidate
    pub min_sentence_chars: usize,
}

impl PipelineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many sections the ranker retains.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.top_sections = n;
        self
    }

    /// Set how many sentences the refiner keeps per section.
    pub fn with_top_sentences(mut self, n: usize) -> Self {
        self.top_sentences = n;
        self
    }

    /// Set the page content-significance floor.
    pub fn with_min_page_chars(mut self, chars: usize) -> Self {
        self.min_page_chars = chars;
        self
    }

    /// Set the minimum sentence candidate length.
    pub fn with_min_sentence_chars(mut self, chars: usize) -> Self {
        self.min_sentence_chars = chars;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_sections: DEFAULT_TOP_SECTIONS,
            top_sentences: DEFAULT_TOP_SENTENCES,
            min_page_chars: DEFAULT_MIN_PAGE_CHARS,
            min_sentence_chars: DEFAULT_MIN_SENTENCE_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PipelineOptions::default();
        assert_eq!(options.top_sections, 5);
        assert_eq!(options.top_sentences, 5);
        assert_eq!(options.min_page_chars, 100);
        assert_eq!(options.min_sentence_chars, 20);
    }

    #[test]
    fn test_builder_chaining() {
        let options = PipelineOptions::new()
            .with_top_sections(3)
            .with_min_page_chars(50);
        assert_eq!(options.top_sections, 3);
        assert_eq!(options.min_page_chars, 50);
        assert_eq!(options.top_sentences, 5);
    }
}
