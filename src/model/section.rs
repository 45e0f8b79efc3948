//! Section candidates and their ranked / refined forms.

use serde::{Deserialize, Serialize};

/// A candidate section: one heading paired with the full text of its page.
///
/// `score` and `importance_rank` are unset until the relevance ranker has
/// run. A section is never shared across documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Source document filename
    pub document_id: String,

    /// The heading text that anchors this section
    pub section_title: String,

    /// Full text of the containing page
    pub text: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Cosine similarity against the run query, set by the ranker
    pub score: Option<f32>,

    /// Dense rank 1..k among the retained sections, set by the ranker
    pub importance_rank: Option<u32>,
}

impl Section {
    /// Create an unranked section.
    pub fn new(
        document_id: impl Into<String>,
        section_title: impl Into<String>,
        text: impl Into<String>,
        page_number: u32,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            section_title: section_title.into(),
            text: text.into(),
            page_number,
            score: None,
            importance_rank: None,
        }
    }
}

/// A section that survived ranking: score and rank are guaranteed present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source document filename
    pub document_id: String,

    /// The heading text that anchors this section
    pub section_title: String,

    /// Full text of the containing page
    pub text: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Cosine similarity against the run query
    pub score: f32,

    /// Dense rank, 1 = most relevant
    pub importance_rank: u32,
}

impl RankedSection {
    /// Promote a scored section. Returns `None` if the ranker never
    /// populated score and rank.
    pub fn from_section(section: Section) -> Option<Self> {
        let score = section.score?;
        let importance_rank = section.importance_rank?;
        Some(Self {
            document_id: section.document_id,
            section_title: section.section_title,
            text: section.text,
            page_number: section.page_number,
            score,
            importance_rank,
        })
    }
}

/// The refined sentence extract of one ranked section.
///
/// Holds no back-reference to its section; its lifetime is independent
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinedSubsection {
    /// Source document filename
    pub document_id: String,

    /// Top-scoring sentences joined with ". "
    pub refined_text: String,

    /// Page number of the originating section
    pub page_number: u32,
}
