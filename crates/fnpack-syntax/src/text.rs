//! Source text positions and the line index used to translate between them.
//!
//! Byte offsets are the currency of node ranges; line positions are what
//! symbol locations carry. [`TextDocument`] converts between the two.

use serde::{Deserialize, Serialize};

/// A half-open byte range within a source document.
///
/// `start` is inclusive and `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Creates a range from byte offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the length of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` when the range covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when `other` lies entirely within this range.
    #[must_use]
    pub const fn contains_range(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A zero-based line number and byte offset within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LinePosition {
    line: u32,
    offset: u32,
}

impl LinePosition {
    /// Creates a new line position.
    #[must_use]
    pub const fn new(line: u32, offset: u32) -> Self {
        Self { line, offset }
    }

    /// Returns the zero-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the zero-based byte offset within the line.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

/// A start and end [`LinePosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LineRange {
    start: LinePosition,
    end: LinePosition,
}

impl LineRange {
    /// Creates a line range.
    #[must_use]
    pub const fn new(start: LinePosition, end: LinePosition) -> Self {
        Self { start, end }
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> LinePosition {
        self.start
    }

    /// Returns the end position.
    #[must_use]
    pub const fn end(&self) -> LinePosition {
        self.end
    }
}

/// Source text with a precomputed line index.
///
/// Serializes as the bare source string; the line index is rebuilt on load.
///
/// # Example
///
/// ```
/// use fnpack_syntax::{LinePosition, TextDocument};
///
/// let document = TextDocument::new("service\n/hello");
/// assert_eq!(document.text_position_from(LinePosition::new(1, 1)), Some(9));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TextDocument {
    text: String,
    line_starts: Vec<usize>,
}

impl TextDocument {
    /// Indexes `text` into a document.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let source: String = text.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self {
            text: source,
            line_starts,
        }
    }

    /// Returns the full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of lines, counting a trailing empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Translates a line position into a byte offset.
    ///
    /// Returns `None` when the line does not exist or the offset runs past
    /// the end of that line.
    #[must_use]
    pub fn text_position_from(&self, position: LinePosition) -> Option<usize> {
        let line = usize::try_from(position.line()).ok()?;
        let offset = usize::try_from(position.offset()).ok()?;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next_start| next_start - 1);
        let absolute = line_start.checked_add(offset)?;
        (absolute <= line_end).then_some(absolute)
    }

    /// Translates a byte offset into a line position.
    ///
    /// Returns `None` when the offset lies past the end of the text.
    #[must_use]
    pub fn line_position_from(&self, offset: usize) -> Option<LinePosition> {
        if offset > self.text.len() {
            return None;
        }
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .checked_sub(1)?;
        let line_start = *self.line_starts.get(line)?;
        Some(LinePosition::new(
            u32::try_from(line).ok()?,
            u32::try_from(offset - line_start).ok()?,
        ))
    }

    /// Translates a byte range into a line range.
    #[must_use]
    pub fn line_range_from(&self, range: TextRange) -> Option<LineRange> {
        Some(LineRange::new(
            self.line_position_from(range.start())?,
            self.line_position_from(range.end())?,
        ))
    }

    /// Returns the text covered by `range`, if it lies on character
    /// boundaries inside the document.
    #[must_use]
    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.text.get(range.start()..range.end())
    }
}

impl From<String> for TextDocument {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<TextDocument> for String {
    fn from(document: TextDocument) -> Self {
        document.text
    }
}
