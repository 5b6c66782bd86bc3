//! Character-level position mapping
//!
//! The alignment engine works on Unicode scalar values, while spans handed to
//! callers are byte ranges into the UTF-8 input so they can be sliced directly.
//! [`CharOffsets`] translates between the two.

use serde::{Deserialize, Serialize};

/// Represents a span of text as a half-open byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CharSpan {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Create a point span (zero-width)
    pub fn point(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Borrow the covered slice of `text`.
    ///
    /// Returns an empty string when the span falls outside `text` or off a
    /// char boundary, so callers never panic on a span from another string.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Byte offset of every char boundary in a string
///
/// `byte_offset(i)` is the byte position of the `i`-th char; `byte_offset(len)`
/// is the total byte length.
#[derive(Debug, Clone)]
pub struct CharOffsets {
    offsets: Vec<usize>,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(pos, _)| pos).collect();
        offsets.push(text.len());
        Self { offsets }
    }

    /// Number of chars in the indexed text
    pub fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Byte offset of the char at `char_index` (clamped to the text end)
    pub fn byte_offset(&self, char_index: usize) -> usize {
        let last = self.offsets.len() - 1;
        self.offsets[char_index.min(last)]
    }

    /// Convert a char index range into a byte span
    pub fn span(&self, char_start: usize, char_end: usize) -> CharSpan {
        CharSpan::new(self.byte_offset(char_start), self.byte_offset(char_end))
    }
}
