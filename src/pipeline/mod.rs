//! The run orchestrator: documents in, ranked + refined sections out.

mod options;

pub use options::PipelineOptions;

use crate::embed::{embed_checked, EmbeddingModel};
use crate::error::Result;
use crate::model::{RefinedSubsection, RunInput, RunOutput, Section};
use crate::rank::{RelevanceRanker, SubsectionRefiner};
use crate::report;
use crate::source::{collect_spans, DocumentOpener};
use crate::structure::{HeadingClassifier, SectionBuilder};

/// A configured processing pipeline.
///
/// Owns the embedding model for the lifetime of the run; the model is
/// passed explicitly to the ranker and refiner, never reached through
/// global state. Documents are processed sequentially in input order;
/// the only parallelism lives inside the embedding batches.
pub struct Pipeline {
    model: Box<dyn EmbeddingModel>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline with default options.
    pub fn new(model: Box<dyn EmbeddingModel>) -> Self {
        Self {
            model,
            options: PipelineOptions::default(),
        }
    }

    /// Replace the pipeline options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the full pipeline over the configured documents.
    ///
    /// Per-document failures (missing file, unparsable PDF, no spans, no
    /// headings) are logged and skipped; the run only fails when nothing
    /// at all was extracted, or when embedding fails.
    pub fn process(&self, input: &RunInput, opener: &dyn DocumentOpener) -> Result<RunOutput> {
        let sections = self.extract_sections(input, opener);

        let query = input.query();
        log::debug!("query: '{}', {} section candidates", query, sections.len());

        let mut query_vectors = embed_checked(self.model.as_ref(), &[query])?;
        let query_embedding = query_vectors.remove(0);

        let ranker = RelevanceRanker::new(self.model.as_ref()).with_top_k(self.options.top_sections);
        let ranked = ranker.rank(sections, &query_embedding)?;

        let refiner = SubsectionRefiner::new(self.model.as_ref())
            .with_top_k(self.options.top_sentences)
            .with_min_chars(self.options.min_sentence_chars);
        let mut refined: Vec<RefinedSubsection> = Vec::new();
        for section in &ranked {
            if let Some(subsection) = refiner.refine(section, &query_embedding)? {
                refined.push(subsection);
            }
        }

        Ok(report::assemble(input, &ranked, refined))
    }

    /// Extract section candidates from every document, skipping failures.
    fn extract_sections(&self, input: &RunInput, opener: &dyn DocumentOpener) -> Vec<Section> {
        let classifier = HeadingClassifier::new();
        let builder = SectionBuilder::new().with_min_page_chars(self.options.min_page_chars);

        let mut sections = Vec::new();
        for document in &input.documents {
            let filename = &document.filename;

            let source = match opener.open(filename) {
                Ok(source) => source,
                Err(e) => {
                    log::warn!("{}: cannot open, skipping ({})", filename, e);
                    continue;
                }
            };

            let spans = match collect_spans(source.as_ref()) {
                Ok(spans) => spans,
                Err(e) => {
                    log::warn!("{}: span extraction failed, skipping ({})", filename, e);
                    continue;
                }
            };
            if spans.is_empty() {
                log::warn!("{}: no text spans, skipping", filename);
                continue;
            }

            let headings = classifier.classify(&spans);
            if headings.is_empty() {
                log::warn!("{}: no headings detected, contributes no sections", filename);
                continue;
            }

            match builder.build(filename, source.as_ref(), &headings) {
                Ok(doc_sections) => {
                    log::debug!(
                        "{}: {} headings, {} content sections",
                        filename,
                        headings.len(),
                        doc_sections.len()
                    );
                    sections.extend(doc_sections);
                }
                Err(e) => {
                    log::warn!("{}: section building failed, skipping ({})", filename, e);
                }
            }
        }
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::HashedEmbedder;
    use crate::model::{DocumentRef, JobToBeDone, Persona};
    use crate::source::{MemoryOpener, MemoryTextSource};

    fn input(files: &[&str]) -> RunInput {
        RunInput {
            documents: files
                .iter()
                .map(|f| DocumentRef {
                    filename: f.to_string(),
                    title: None,
                })
                .collect(),
            persona: Persona {
                role: "Researcher".to_string(),
            },
            job_to_be_done: JobToBeDone {
                task: "find relevant material".to_string(),
            },
        }
    }

    fn content_doc() -> MemoryTextSource {
        let body =
            "A long paragraph of relevant material for the researcher to find. ".repeat(3);
        let mut source = MemoryTextSource::default();
        source.push_page(&[
            ("Relevant Material", 18.0),
            (body.as_str(), 12.0),
            (body.as_str(), 12.0),
            (body.as_str(), 12.0),
        ]);
        source
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(Box::new(HashedEmbedder::new()))
    }

    #[test]
    fn test_process_missing_document_is_skipped() {
        let mut opener = MemoryOpener::new();
        opener.insert("present.pdf", content_doc());

        let output = pipeline()
            .process(&input(&["missing.pdf", "present.pdf"]), &opener)
            .unwrap();

        assert_eq!(output.extracted_sections.len(), 1);
        assert_eq!(output.extracted_sections[0].document, "present.pdf");
        // Metadata still names both configured documents.
        assert_eq!(output.metadata.input_documents.len(), 2);
    }

    #[test]
    fn test_process_all_documents_empty_is_fatal() {
        let opener = MemoryOpener::new();
        let result = pipeline().process(&input(&["gone.pdf"]), &opener);
        assert!(matches!(result, Err(crate::Error::NoContent)));
    }

    #[test]
    fn test_process_spanless_document_contributes_nothing() {
        let mut opener = MemoryOpener::new();
        opener.insert("empty.pdf", MemoryTextSource::default());
        opener.insert("real.pdf", content_doc());

        let output = pipeline()
            .process(&input(&["empty.pdf", "real.pdf"]), &opener)
            .unwrap();
        assert!(output
            .extracted_sections
            .iter()
            .all(|s| s.document == "real.pdf"));
    }
}
