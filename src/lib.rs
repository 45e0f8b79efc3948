//! # pdfsieve
//!
//! Persona-driven PDF section extraction and semantic relevance ranking.
//!
//! Given a set of PDF documents plus a persona and a job-to-be-done,
//! pdfsieve infers a heading structure from raw typography (font-size
//! clustering, no layout metadata required), pairs each heading with its
//! page text, ranks those sections by embedding similarity to the query,
//! and refines the top sections down to their most relevant sentences.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsieve::{process_run, HashedEmbedder, RunInput};
//!
//! fn main() -> pdfsieve::Result<()> {
//!     let config = std::fs::read_to_string("input/input.json")?;
//!     let input: RunInput = serde_json::from_str(&config)?;
//!
//!     let output = process_run(&input, "input", Box::new(HashedEmbedder::new()))?;
//!     println!("{}", pdfsieve::report::to_json(&output, Default::default())?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! documents -> spans -> headings -> sections -> ranking -> refinement -> output
//! ```
//!
//! - **Structure inference**: the most frequent rounded font size is body
//!   text; up to four larger sizes become H1..H4.
//! - **Two-stage ranking**: sections first, then sentences within the top
//!   sections, both against one shared query embedding.
//! - **Capabilities, not globals**: text extraction and the embedding
//!   model are traits injected by the caller.

pub mod embed;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod source;
pub mod structure;

// Re-export commonly used types
pub use embed::{cosine_similarity, EmbeddingModel, HashedEmbedder};
pub use error::{Error, Result};
pub use model::{
    DocumentRef, Heading, HeadingLevel, JobToBeDone, Persona, RankedSection, RefinedSubsection,
    RunInput, RunOutput, Section, Span,
};
pub use pipeline::{Pipeline, PipelineOptions};
pub use rank::{RelevanceRanker, SubsectionRefiner};
pub use report::JsonFormat;
pub use source::{DocumentOpener, FsOpener, LopdfTextSource, PdfTextSource};
pub use structure::{FontHistogram, HeadingClassifier, HeadingLevelMap, SectionBuilder};

use std::path::Path;

/// Process a run over PDF files in a directory, with default options.
///
/// Documents are opened relative to `input_dir`; missing or unreadable
/// files are logged and skipped.
pub fn process_run<P: AsRef<Path>>(
    input: &RunInput,
    input_dir: P,
    model: Box<dyn EmbeddingModel>,
) -> Result<RunOutput> {
    process_run_with_options(input, input_dir, model, PipelineOptions::default())
}

/// Process a run with custom pipeline options.
pub fn process_run_with_options<P: AsRef<Path>>(
    input: &RunInput,
    input_dir: P,
    model: Box<dyn EmbeddingModel>,
    options: PipelineOptions,
) -> Result<RunOutput> {
    let opener = FsOpener::new(input_dir.as_ref());
    Pipeline::new(model).with_options(options).process(input, &opener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_run_no_readable_documents() {
        let input = RunInput {
            documents: vec![DocumentRef {
                filename: "nope.pdf".to_string(),
                title: None,
            }],
            persona: Persona {
                role: "Anyone".to_string(),
            },
            job_to_be_done: JobToBeDone {
                task: "anything".to_string(),
            },
        };

        let dir = tempfile::tempdir().unwrap();
        let result = process_run(&input, dir.path(), Box::new(HashedEmbedder::new()));
        assert!(matches!(result, Err(Error::NoContent)));
    }
}
