//! Semantic relevance ranking of section candidates.

mod refine;

pub use refine::{SubsectionRefiner, DEFAULT_MIN_SENTENCE_CHARS, DEFAULT_TOP_SENTENCES};

use crate::embed::{cosine_similarity, embed_checked, EmbeddingModel};
use crate::error::{Error, Result};
use crate::model::{RankedSection, Section};

/// Default number of sections retained per run.
pub const DEFAULT_TOP_SECTIONS: usize = 5;

/// Scores sections against the run query and keeps the top k.
pub struct RelevanceRanker<'a> {
    model: &'a dyn EmbeddingModel,
    top_k: usize,
}

impl<'a> RelevanceRanker<'a> {
    pub fn new(model: &'a dyn EmbeddingModel) -> Self {
        Self {
            model,
            top_k: DEFAULT_TOP_SECTIONS,
        }
    }

    /// Override how many sections are retained.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Rank sections by cosine similarity to the query embedding.
    ///
    /// The sort is stable and descending by score, so equal scores keep
    /// insertion order (documents in input order, sections in
    /// heading-encounter order). Dense ranks 1..k are assigned to the
    /// retained sections. An empty candidate list is fatal.
    pub fn rank(
        &self,
        sections: Vec<Section>,
        query_embedding: &[f32],
    ) -> Result<Vec<RankedSection>> {
        if sections.is_empty() {
            return Err(Error::NoContent);
        }

        let texts: Vec<String> = sections.iter().map(|s| s.text.clone()).collect();
        let embeddings = embed_checked(self.model, &texts)?;

        let mut scored: Vec<Section> = sections;
        for (section, embedding) in scored.iter_mut().zip(&embeddings) {
            section.score = Some(cosine_similarity(query_embedding, embedding));
        }

        // Vec::sort_by is stable; descending score keeps original order
        // among ties.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(self.top_k);

        let mut ranked = Vec::with_capacity(scored.len());
        for (i, mut section) in scored.into_iter().enumerate() {
            section.importance_rank = Some(i as u32 + 1);
            if let Some(section) = RankedSection::from_section(section) {
                log::debug!(
                    "rank {}: '{}' ({} p.{}) score {:.4}",
                    section.importance_rank,
                    section.section_title,
                    section.document_id,
                    section.page_number,
                    section.score
                );
                ranked.push(section);
            }
        }
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::HashedEmbedder;

    fn section(doc: &str, title: &str, text: &str) -> Section {
        Section::new(doc, title, text, 1)
    }

    fn query_vec(model: &HashedEmbedder, query: &str) -> Vec<f32> {
        let mut vectors = model.embed(&[query.to_string()]).unwrap();
        vectors.remove(0)
    }

    #[test]
    fn test_rank_empty_is_fatal() {
        let model = HashedEmbedder::new();
        let query = query_vec(&model, "anything");
        let result = RelevanceRanker::new(&model).rank(vec![], &query);
        assert!(matches!(result, Err(Error::NoContent)));
    }

    #[test]
    fn test_rank_keeps_at_most_top_k() {
        let model = HashedEmbedder::new();
        let query = query_vec(&model, "cooking recipes");

        let sections: Vec<Section> = (0..8)
            .map(|i| section("a.pdf", &format!("S{}", i), &format!("text number {}", i)))
            .collect();
        let ranked = RelevanceRanker::new(&model).rank(sections, &query).unwrap();

        assert_eq!(ranked.len(), 5);
        let ranks: Vec<u32> = ranked.iter().map(|s| s.importance_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rank_fewer_than_top_k() {
        let model = HashedEmbedder::new();
        let query = query_vec(&model, "anything at all");

        let sections = vec![
            section("a.pdf", "One", "first candidate text"),
            section("a.pdf", "Two", "second candidate text"),
        ];
        let ranked = RelevanceRanker::new(&model).rank(sections, &query).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].importance_rank, 1);
        assert_eq!(ranked[1].importance_rank, 2);
    }

    #[test]
    fn test_rank_orders_by_similarity() {
        let model = HashedEmbedder::new();
        let query = query_vec(&model, "Travel Planner - plan a beach holiday");

        let sections = vec![
            section("a.pdf", "Ledger", "quarterly accounting ledger entries and tax notes"),
            section(
                "b.pdf",
                "Beaches",
                "plan a beach holiday with coastal hotels and beach activities",
            ),
        ];
        let ranked = RelevanceRanker::new(&model).rank(sections, &query).unwrap();

        assert_eq!(ranked[0].section_title, "Beaches");
        assert!(ranked[0].score >= ranked[1].score);
        assert_eq!(ranked[0].importance_rank, 1);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let model = HashedEmbedder::new();
        let query = query_vec(&model, "some query");

        // Identical texts embed identically, so scores tie exactly.
        let sections = vec![
            section("first.pdf", "A", "identical body text"),
            section("second.pdf", "B", "identical body text"),
            section("third.pdf", "C", "identical body text"),
        ];
        let ranked = RelevanceRanker::new(&model).rank(sections, &query).unwrap();

        let docs: Vec<&str> = ranked.iter().map(|s| s.document_id.as_str()).collect();
        assert_eq!(docs, vec!["first.pdf", "second.pdf", "third.pdf"]);
    }
}
