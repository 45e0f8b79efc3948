//! Text source capabilities and span collection.
//!
//! The pipeline never parses PDF bytes itself; it consumes line spans and
//! page text through the [`PdfTextSource`] capability. A [`DocumentOpener`]
//! maps filenames to sources so tests can substitute in-memory documents
//! for real files.

mod lopdf_source;

pub use lopdf_source::{FsOpener, LopdfTextSource};

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::Span;

/// Per-page text access for one document.
pub trait PdfTextSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Line spans of a page (1-indexed), in reading order.
    fn line_spans(&self, page: u32) -> Result<Vec<Span>>;

    /// Full plain text of a page (1-indexed).
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Opens a named document as a text source.
pub trait DocumentOpener {
    fn open(&self, filename: &str) -> Result<Box<dyn PdfTextSource>>;
}

/// Collect and normalize every span of a document.
///
/// Text is NFC-normalized and internal whitespace runs are collapsed to
/// single spaces; everything else is forwarded untouched. An empty result
/// means the document has no extractable lines.
pub fn collect_spans(source: &dyn PdfTextSource) -> Result<Vec<Span>> {
    let mut spans = Vec::new();
    for page in 1..=source.page_count() {
        for mut span in source.line_spans(page)? {
            span.text = normalize_text(&span.text);
            spans.push(span);
        }
    }
    Ok(spans)
}

/// NFC normalization plus whitespace collapse.
pub fn normalize_text(text: &str) -> String {
    static WS: OnceLock<Regex> = OnceLock::new();
    let ws = WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"));

    let composed: String = text.nfc().collect();
    ws.replace_all(&composed, " ").into_owned()
}

/// A page held in memory, for tests and callers that already have text.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    /// Line spans of the page
    pub spans: Vec<Span>,
    /// Full page text
    pub text: String,
}

/// An in-memory text source.
#[derive(Debug, Clone, Default)]
pub struct MemoryTextSource {
    pages: Vec<MemoryPage>,
}

impl MemoryTextSource {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self { pages }
    }

    /// Append a page built from `(text, font_size)` lines; the page text
    /// is the lines joined with spaces.
    pub fn push_page(&mut self, lines: &[(&str, f32)]) {
        let page_number = self.pages.len() as u32 + 1;
        let spans = lines
            .iter()
            .map(|(text, size)| Span::new(*text, *size, page_number))
            .collect();
        let text = lines
            .iter()
            .map(|(text, _)| *text)
            .collect::<Vec<_>>()
            .join(" ");
        self.pages.push(MemoryPage { spans, text });
    }
}

impl PdfTextSource for MemoryTextSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn line_spans(&self, page: u32) -> Result<Vec<Span>> {
        self.page(page).map(|p| p.spans.clone())
    }

    fn page_text(&self, page: u32) -> Result<String> {
        self.page(page).map(|p| p.text.clone())
    }
}

impl MemoryTextSource {
    fn page(&self, page: u32) -> Result<&MemoryPage> {
        if page == 0 {
            return Err(crate::Error::PageOutOfRange(page, self.page_count()));
        }
        self.pages
            .get((page - 1) as usize)
            .ok_or(crate::Error::PageOutOfRange(page, self.page_count()))
    }
}

/// Opener over a fixed set of in-memory documents.
#[derive(Default)]
pub struct MemoryOpener {
    documents: HashMap<String, MemoryTextSource>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filename: impl Into<String>, source: MemoryTextSource) {
        self.documents.insert(filename.into(), source);
    }
}

impl DocumentOpener for MemoryOpener {
    fn open(&self, filename: &str) -> Result<Box<dyn PdfTextSource>> {
        self.documents
            .get(filename)
            .cloned()
            .map(|s| Box::new(s) as Box<dyn PdfTextSource>)
            .ok_or_else(|| crate::Error::Other(format!("document not found: {}", filename)))
    }
}
