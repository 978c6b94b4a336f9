//! Byte spans and line/column lookup over source text.
//!
//! Tokens record the byte range they were scanned from and errors carry a
//! span. Turning an offset into a line and column only happens when an error
//! is printed, so the [`LineMap`] is built on demand by the caller.

use std::fmt;

/// A byte offset into source text.
pub type TextPos = u32;

/// A half-open byte range `start..start + length`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(start <= end, "span bounds out of order: {}..{}", start, end);
        Self::new(start, end - start)
    }

    /// A zero-length span, e.g. the end of input.
    #[inline]
    pub fn empty(at: TextPos) -> Self {
        Self::new(at, 0)
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// A 1-based line and column. Columns count bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start offsets of every line in a source text.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i as TextPos + 1))
            .collect();
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Locate `offset`. A newline belongs to the line it ends; offsets past
    /// the end of the text land on the last line.
    pub fn locate(&self, offset: TextPos) -> SourceLocation {
        // line_starts[0] == 0, so at least one start is <= offset.
        let index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        SourceLocation {
            line: index as u32 + 1,
            column: offset - self.line_starts[index] + 1,
        }
    }
}
