//! Section building: pairing headings with their page text.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Heading, Section};
use crate::source::PdfTextSource;

/// Minimum trimmed page text length for a page to count as content.
/// Chosen to exclude title and near-blank pages.
pub const DEFAULT_MIN_PAGE_CHARS: usize = 100;

/// Builds section candidates from detected headings.
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    min_page_chars: usize,
}

impl SectionBuilder {
    pub fn new() -> Self {
        Self {
            min_page_chars: DEFAULT_MIN_PAGE_CHARS,
        }
    }

    /// Override the content-significance floor.
    pub fn with_min_page_chars(mut self, chars: usize) -> Self {
        self.min_page_chars = chars;
        self
    }

    /// Build one section per heading whose page carries enough text.
    ///
    /// The section text is the full page text, not just the heading line.
    /// Several headings on one page intentionally yield several sections
    /// with identical text but distinct titles: each is a separate rank
    /// anchor. Page text is fetched once per page.
    pub fn build(
        &self,
        document_id: &str,
        source: &dyn PdfTextSource,
        headings: &[Heading],
    ) -> Result<Vec<Section>> {
        let mut page_texts: HashMap<u32, String> = HashMap::new();
        let mut sections = Vec::new();

        for heading in headings {
            let text = match page_texts.get(&heading.page_number) {
                Some(text) => text.clone(),
                None => {
                    let text = source.page_text(heading.page_number)?;
                    page_texts.insert(heading.page_number, text.clone());
                    text
                }
            };

            if text.trim().chars().count() <= self.min_page_chars {
                log::debug!(
                    "{}: page {} below content floor, dropping heading '{}'",
                    document_id,
                    heading.page_number,
                    heading.text
                );
                continue;
            }

            sections.push(Section::new(
                document_id,
                heading.text.clone(),
                text,
                heading.page_number,
            ));
        }

        Ok(sections)
    }
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;
    use crate::source::MemoryTextSource;

    fn heading(text: &str, page: u32) -> Heading {
        Heading {
            level: HeadingLevel::H1,
            text: text.to_string(),
            page_number: page,
        }
    }

    fn long_line() -> String {
        "This page carries a paragraph of meaningful content. ".repeat(3)
    }

    #[test]
    fn test_build_keeps_content_pages() {
        let mut source = MemoryTextSource::default();
        source.push_page(&[(long_line().as_str(), 12.0)]);

        let sections = SectionBuilder::new()
            .build("doc.pdf", &source, &[heading("Intro", 1)])
            .unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].document_id, "doc.pdf");
        assert_eq!(sections[0].section_title, "Intro");
        assert_eq!(sections[0].page_number, 1);
        assert!(sections[0].score.is_none());
    }

    #[test]
    fn test_build_drops_short_pages() {
        let mut source = MemoryTextSource::default();
        source.push_page(&[("short title page", 12.0)]);

        let sections = SectionBuilder::new()
            .build("doc.pdf", &source, &[heading("Cover", 1)])
            .unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_floor_is_strict() {
        // Exactly at the floor is still dropped; one past it survives.
        let at_floor = "x".repeat(100);
        let past_floor = "x".repeat(101);

        let mut source = MemoryTextSource::default();
        source.push_page(&[(at_floor.as_str(), 12.0)]);
        source.push_page(&[(past_floor.as_str(), 12.0)]);

        let builder = SectionBuilder::new();
        let headings = [heading("A", 1), heading("B", 2)];
        let sections = builder.build("doc.pdf", &source, &headings).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_title, "B");
    }

    #[test]
    fn test_multiple_headings_same_page() {
        let mut source = MemoryTextSource::default();
        source.push_page(&[(long_line().as_str(), 12.0)]);

        let headings = [heading("First", 1), heading("Second", 1)];
        let sections = SectionBuilder::new()
            .build("doc.pdf", &source, &headings)
            .unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text, sections[1].text);
        assert_ne!(sections[0].section_title, sections[1].section_title);
    }
}
