//! Offset to line/column mapping.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Unit in which [`Position::character`] is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum PositionEncoding {
    /// Bytes of UTF-8.
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// UTF-16 code units (the LSP default).
    #[default]
    #[serde(rename = "utf-16", alias = "utf16")]
    Utf16,
    /// Unicode scalar values.
    #[serde(rename = "utf-32", alias = "utf32")]
    Utf32,
}

impl PositionEncoding {
    fn measure(self, segment: &str) -> usize {
        match self {
            Self::Utf8 => segment.len(),
            Self::Utf16 => segment.encode_utf16().count(),
            Self::Utf32 => segment.chars().count(),
        }
    }
}

/// 0-indexed line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}

/// Line start table for one version of a document's text.
///
/// Lines are split on `\n`; a preceding `\r` stays part of the line content.
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset.
    ///
    /// Offsets past the end clamp to the end of the text; offsets inside a
    /// multi-byte character snap back to its first byte.
    #[must_use]
    pub fn position(&self, offset: usize, encoding: PositionEncoding) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let character = encoding.measure(&self.text[start..offset]);
        Position::new(line as u32, character as u32)
    }

    #[must_use]
    pub fn range(&self, offsets: Range<usize>, encoding: PositionEncoding) -> TextRange {
        TextRange::new(
            self.position(offsets.start, encoding),
            self.position(offsets.end, encoding),
        )
    }
}
