//! Source locations for scanned tokens.
//!
//! Spans are measured in bytes because the scanner never requires the
//! input to be valid UTF-8.

/// Represents a location span in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset from the start of the input (0-based).
    pub offset: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number in bytes (1-based).
    pub column: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a new span with the given position and length.
    pub fn new(offset: usize, line: usize, column: usize, length: usize) -> Self {
        Self {
            offset,
            line,
            column,
            length,
        }
    }

    /// Creates a zero-length span at the given position.
    pub fn point(offset: usize, line: usize, column: usize) -> Self {
        Self::new(offset, line, column, 0)
    }

    /// Returns the end offset of this span.
    pub fn end_offset(&self) -> usize {
        self.offset + self.length
    }

    /// Returns a span covering `length` bytes starting `delta` bytes into this one.
    ///
    /// The result stays on the same line.
    pub fn sub(&self, delta: usize, length: usize) -> Span {
        Span::new(self.offset + delta, self.line, self.column + delta, length)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 1, 1, 0)
    }
}
