//! lopdf-backed text source.
//!
//! Walks page content streams tracking the text state (`Tf` font and size,
//! `Tm`/`Td`/`TD`/`T*` positioning) to recover per-fragment typography,
//! then merges fragments sharing a baseline into line spans. Page text
//! comes from lopdf's plain extraction.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::Span;
use crate::source::{DocumentOpener, PdfTextSource};

/// A text source backed by a parsed lopdf document.
pub struct LopdfTextSource {
    doc: LopdfDocument,
}

impl LopdfTextSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<Fragment>> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&page)
            .ok_or(Error::PageOutOfRange(page, pages.len() as u32))?;

        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.doc.get_page_content(page_id)?;
        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut fragments = Vec::new();
        let mut state = TextState::default();

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => state.begin_text(),
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            state.font = name.clone();
                        }
                        state.font_size = number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = number(&op.operands[0]).unwrap_or(0.0);
                        let ty = number(&op.operands[1]).unwrap_or(0.0);
                        state.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        state.set_matrix(
                            number(&op.operands[0]).unwrap_or(1.0),
                            number(&op.operands[3]).unwrap_or(1.0),
                            number(&op.operands[4]).unwrap_or(0.0),
                            number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => state.next_line(),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        self.push_fragment(&mut fragments, &state, &fonts, bytes);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        let mut combined = Vec::new();
                        for item in items {
                            if let Object::String(bytes, _) = item {
                                combined.extend_from_slice(bytes);
                            }
                        }
                        self.push_fragment(&mut fragments, &state, &fonts, &combined);
                    }
                }
                "'" | "\"" => {
                    state.next_line();
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        self.push_fragment(&mut fragments, &state, &fonts, bytes);
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }

    fn push_fragment(
        &self,
        fragments: &mut Vec<Fragment>,
        state: &TextState,
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        bytes: &[u8],
    ) {
        let font_dict = fonts.get(&state.font);
        let text = match font_dict.and_then(|f| f.get_font_encoding(&self.doc).ok()) {
            Some(encoding) => LopdfDocument::decode_text(&encoding, bytes).unwrap_or_default(),
            None => decode_fallback(bytes),
        };
        if text.trim().is_empty() {
            return;
        }

        let is_bold = font_dict
            .and_then(|f| f.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| {
                let name = String::from_utf8_lossy(n).to_lowercase();
                name.contains("bold") || name.contains("black") || name.contains("heavy")
            })
            .unwrap_or(false);

        fragments.push(Fragment {
            text,
            x: state.x,
            y: state.y,
            font_size: state.effective_size(),
            is_bold,
        });
    }
}

impl PdfTextSource for LopdfTextSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn line_spans(&self, page: u32) -> Result<Vec<Span>> {
        let fragments = self.page_fragments(page)?;
        Ok(merge_into_lines(fragments, page))
    }

    fn page_text(&self, page: u32) -> Result<String> {
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(e.to_string()))
    }
}

/// A positioned piece of text from the content stream.
#[derive(Debug, Clone)]
struct Fragment {
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    is_bold: bool,
}

/// Text positioning state while walking a content stream.
#[derive(Debug, Clone)]
struct TextState {
    font: Vec<u8>,
    font_size: f32,
    scale: f32,
    x: f32,
    y: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: Vec::new(),
            font_size: 12.0,
            scale: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl TextState {
    fn begin_text(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.scale = 1.0;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.x += tx;
        self.y += ty;
    }

    fn set_matrix(&mut self, a: f32, d: f32, e: f32, f: f32) {
        // Only the scale and translation components matter for line
        // grouping; rotation is rare in body text and is ignored.
        self.scale = ((a * a + d * d) / 2.0).sqrt().max(f32::MIN_POSITIVE);
        self.x = e;
        self.y = f;
    }

    fn next_line(&mut self) {
        self.y -= self.font_size.max(1.0);
    }

    fn effective_size(&self) -> f32 {
        self.font_size * self.scale
    }
}

/// Merge fragments sharing a baseline into one span per visual line.
///
/// The line's font size is length-weighted over its fragments and a line
/// counts as bold when more than half of its characters are.
fn merge_into_lines(mut fragments: Vec<Fragment>, page_number: u32) -> Vec<Span> {
    if fragments.is_empty() {
        return Vec::new();
    }

    // PDF Y grows upward: sort top-to-bottom, then left-to-right.
    fragments.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut spans = Vec::new();
    let mut line: Vec<Fragment> = Vec::new();

    for fragment in fragments {
        let same_line = line
            .last()
            .map(|prev| (fragment.y - prev.y).abs() <= prev.font_size * 0.3)
            .unwrap_or(false);

        if !same_line && !line.is_empty() {
            spans.push(flush_line(std::mem::take(&mut line), page_number));
        }
        line.push(fragment);
    }
    if !line.is_empty() {
        spans.push(flush_line(line, page_number));
    }

    spans
}

fn flush_line(mut fragments: Vec<Fragment>, page_number: u32) -> Span {
    // Baselines inside a line can jitter, so restore reading order.
    fragments.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let mut text = String::new();
    let mut weighted_size = 0.0_f32;
    let mut total_chars = 0usize;
    let mut bold_chars = 0usize;

    for fragment in &fragments {
        if !text.is_empty() && !text.ends_with(' ') && !fragment.text.starts_with(' ') {
            text.push(' ');
        }
        text.push_str(&fragment.text);

        let chars = fragment.text.chars().count();
        weighted_size += fragment.font_size * chars as f32;
        total_chars += chars;
        if fragment.is_bold {
            bold_chars += chars;
        }
    }

    let font_size = if total_chars > 0 {
        weighted_size / total_chars as f32
    } else {
        fragments.first().map(|f| f.font_size).unwrap_or(12.0)
    };

    let mut span = Span::new(text, font_size, page_number);
    span.is_bold = total_chars > 0 && bold_chars * 2 > total_chars;
    span
}

/// Helper to extract a number from a PDF object.
fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode text bytes when the font carries no usable encoding.
fn decode_fallback(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&units).unwrap_or_default();
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1 fallback
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Opens documents from a directory on disk.
pub struct FsOpener {
    dir: PathBuf,
}

impl FsOpener {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentOpener for FsOpener {
    fn open(&self, filename: &str) -> Result<Box<dyn PdfTextSource>> {
        let path = self.dir.join(filename);
        let source = LopdfTextSource::open(&path)?;
        Ok(Box::new(source))
    }
}
