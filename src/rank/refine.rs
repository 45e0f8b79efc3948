//! Sentence-level refinement of ranked sections.

use crate::embed::{cosine_similarity, embed_checked, EmbeddingModel};
use crate::error::Result;
use crate::model::{RankedSection, RefinedSubsection};

/// Default number of sentences kept per section.
pub const DEFAULT_TOP_SENTENCES: usize = 5;

/// Default minimum trimmed sentence length; shorter candidates are noise.
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 20;

/// Sentence candidates are produced by splitting on the literal ". "
/// delimiter. This is an intentional heuristic kept for output parity
/// with the established extraction behavior, not sentence-boundary
/// detection: abbreviations and decimals can split incorrectly.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Picks the most query-relevant sentences out of a ranked section.
pub struct SubsectionRefiner<'a> {
    model: &'a dyn EmbeddingModel,
    top_k: usize,
    min_chars: usize,
}

impl<'a> SubsectionRefiner<'a> {
    pub fn new(model: &'a dyn EmbeddingModel) -> Self {
        Self {
            model,
            top_k: DEFAULT_TOP_SENTENCES,
            min_chars: DEFAULT_MIN_SENTENCE_CHARS,
        }
    }

    /// Override how many sentences are kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Override the minimum trimmed sentence length.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Refine one section. Returns `None` when every sentence candidate
    /// is filtered out; the section then simply has no refinement.
    ///
    /// Selected sentences are concatenated in tail-of-ascending-argsort
    /// order: 5th-best similarity first, best last. This mirrors the
    /// established selection procedure and is asserted by tests as a
    /// named behavior; it is neither document order nor descending score.
    pub fn refine(
        &self,
        section: &RankedSection,
        query_embedding: &[f32],
    ) -> Result<Option<RefinedSubsection>> {
        let candidates: Vec<&str> = section
            .text
            .split(SENTENCE_DELIMITER)
            .filter(|s| s.trim().chars().count() > self.min_chars)
            .collect();

        if candidates.is_empty() {
            log::debug!(
                "'{}' ({} p.{}): no sentence candidates survive filtering, skipping refinement",
                section.section_title,
                section.document_id,
                section.page_number
            );
            return Ok(None);
        }

        let texts: Vec<String> = candidates.iter().map(|s| s.to_string()).collect();
        let embeddings = embed_checked(self.model, &texts)?;
        let scores: Vec<f32> = embeddings
            .iter()
            .map(|e| cosine_similarity(query_embedding, e))
            .collect();

        // Stable argsort ascending, then keep the tail.
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let tail = &order[order.len().saturating_sub(self.top_k)..];

        let refined_text = tail
            .iter()
            .map(|&i| candidates[i])
            .collect::<Vec<_>>()
            .join(SENTENCE_DELIMITER)
            .trim()
            .to_string();

        Ok(Some(RefinedSubsection {
            document_id: section.document_id.clone(),
            refined_text,
            page_number: section.page_number,
        }))
    }
}
