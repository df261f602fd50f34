//! Line and column lookup.
//!
//! Lines and columns here are 1-based, as reported by
//! `std::panic::Location`. Columns count characters, not bytes.

use text_size::{TextRange, TextSize};

/// A 1-based line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    /// 1-based line number.
    pub line: u32,
    /// 1-based character column.
    pub col: u32,
}

/// Precomputed line starts for a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    /// Builds the index for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(128);
        line_starts.push(TextSize::from(0));
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(to_size(idx + 1));
            }
        }
        Self {
            line_starts,
            len: to_size(text.len()),
        }
    }

    /// Number of lines (a trailing newline starts an empty last line).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte range of a 1-based line, without its line terminator.
    #[must_use]
    pub fn line_range(&self, text: &str, line: u32) -> Option<TextRange> {
        let idx = usize::try_from(line).ok()?.checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let mut end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.len, |next| *next - TextSize::from(1));
        if end > start && text.as_bytes().get(usize::from(end) - 1) == Some(&b'\r') {
            end -= TextSize::from(1);
        }
        Some(TextRange::new(start, end))
    }

    /// The 1-based line containing `offset`.
    #[must_use]
    pub fn line_of(&self, offset: TextSize) -> u32 {
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(next) => next.saturating_sub(1),
        };
        u32::try_from(idx + 1).unwrap_or(u32::MAX)
    }

    /// Converts a byte offset into a 1-based line and character column.
    #[must_use]
    pub fn line_col(&self, text: &str, offset: TextSize) -> LineCol {
        let line = self.line_of(offset);
        let start = self.line_starts[usize::try_from(line - 1).unwrap_or(0)];
        let col = text
            .get(usize::from(start)..usize::from(offset))
            .map_or(0, |prefix| prefix.chars().count());
        LineCol {
            line,
            col: u32::try_from(col + 1).unwrap_or(u32::MAX),
        }
    }

    /// Converts a 1-based line and character column into a byte offset.
    ///
    /// Columns past the end of the line clamp to the line end.
    #[must_use]
    pub fn offset(&self, text: &str, line: u32, col: u32) -> Option<TextSize> {
        let range = self.line_range(text, line)?;
        let line_text = &text[range];
        let skip = usize::try_from(col.max(1) - 1).ok()?;
        let within = line_text
            .char_indices()
            .nth(skip)
            .map_or(line_text.len(), |(idx, _)| idx);
        Some(range.start() + to_size(within))
    }
}

fn to_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of_offsets() {
        let text = "ab\ncd\n\nef";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_of(0.into()), 1);
        assert_eq!(index.line_of(2.into()), 1);
        assert_eq!(index.line_of(3.into()), 2);
        assert_eq!(index.line_of(7.into()), 4);
    }

    #[test]
    fn test_line_range_strips_crlf() {
        let text = "one\r\ntwo";
        let index = LineIndex::new(text);
        let first = index.line_range(text, 1).unwrap();
        assert_eq!(&text[first], "one");
        let second = index.line_range(text, 2).unwrap();
        assert_eq!(&text[second], "two");
        assert_eq!(index.line_range(text, 3), None);
        assert_eq!(index.line_range(text, 0), None);
    }

    #[test]
    fn test_columns_count_chars() {
        let text = "let é = ic!(é);";
        let index = LineIndex::new(text);
        let offset = index.offset(text, 1, 9).unwrap();
        assert_eq!(&text[usize::from(offset)..usize::from(offset) + 3], "ic!");
        assert_eq!(index.line_col(text, offset), LineCol { line: 1, col: 9 });
    }

    #[test]
    fn test_offset_clamps_to_line_end() {
        let text = "ab\ncd";
        let index = LineIndex::new(text);
        assert_eq!(index.offset(text, 1, 40), Some(2.into()));
    }
}
