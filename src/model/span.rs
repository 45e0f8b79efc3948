//! Line-level text spans and detected headings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A line of text on a page, with its typography.
///
/// Spans are delivered by the text-extraction layer one per visual line
/// (fragments sharing a baseline are already merged) and are immutable
/// once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// The line's text content
    pub text: String,

    /// Font size in points (length-weighted over the line's fragments)
    pub font_size: f32,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Whether the line is predominantly bold
    pub is_bold: bool,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font_size: f32, page_number: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            page_number,
            is_bold: false,
        }
    }

    /// Mark the span as bold.
    pub fn bold(mut self) -> Self {
        self.is_bold = true;
        self
    }

    /// Font size rounded to one decimal place, as integer tenths.
    ///
    /// Keying on tenths absorbs floating-point rendering noise while
    /// keeping the histogram keys hashable and ordered.
    pub fn size_tenths(&self) -> i32 {
        (self.font_size * 10.0).round() as i32
    }
}

/// Heading level inferred from font size (largest size = H1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// All levels in rank order, largest font first.
    pub const ALL: [HeadingLevel; 4] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
    ];

    /// Numeric depth (1 for H1, 4 for H4).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A heading line detected in a document.
///
/// Invariant: `text` is non-empty after trimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heading {
    /// Inferred level
    pub level: HeadingLevel,

    /// Heading text (trimmed)
    pub text: String,

    /// Page number the heading appears on (1-indexed)
    pub page_number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_tenths_rounds() {
        assert_eq!(Span::new("x", 11.96, 1).size_tenths(), 120);
        assert_eq!(Span::new("x", 12.04, 1).size_tenths(), 120);
        assert_eq!(Span::new("x", 12.05, 1).size_tenths(), 121);
    }

    #[test]
    fn test_heading_level_order() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
        assert_eq!(HeadingLevel::ALL.len(), 4);
    }
}
