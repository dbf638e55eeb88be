//! Source text model.
//!
//! A [`Source`] owns the program text of one compilation unit together with a
//! precomputed line index. It is immutable once built and is shared (through
//! `Arc`) by every token, diagnostic and parser that refers to it.

use thiserror::Error;

use crate::position::Position;

/// An offset that does not fall inside the source text.
///
/// This signals a bug in position bookkeeping, not malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("offset {offset} out of range for source of length {len}")]
pub struct IndexError {
    /// The offending offset
    pub offset: usize,
    /// Length of the source text in characters
    pub len: usize,
}

/// Immutable program text plus its line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    name: String,
    /// Text with every `\r` removed
    text: String,
    chars: Vec<char>,
    lines: Vec<String>,
    /// `prefix_sum_lengths[i]` is the character count of lines `0..=i`,
    /// line breaks excluded
    prefix_sum_lengths: Vec<usize>,
    /// Character offset in `text` at which each line starts
    line_starts: Vec<usize>,
}

impl Source {
    /// Create a source from a name (conventionally a file name) and its text.
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        let text = text.replace('\r', "");
        let chars: Vec<char> = text.chars().collect();
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();

        let mut accumulated = 0;
        let mut prefix_sum_lengths = Vec::with_capacity(lines.len());
        let mut line_starts = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            line_starts.push(accumulated + index);
            accumulated += line.chars().count();
            prefix_sum_lengths.push(accumulated);
        }

        Self {
            name: name.into(),
            text,
            chars,
            lines,
            prefix_sum_lengths,
            line_starts,
        }
    }

    /// The source name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The CR-stripped text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// All lines, split on `\n`.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line `n` (0-based). Panics if the line does not exist.
    pub fn line(&self, n: usize) -> &str {
        &self.lines[n]
    }

    /// The character at `offset`, or an [`IndexError`].
    pub fn try_char_at(&self, offset: usize) -> Result<char, IndexError> {
        self.chars.get(offset).copied().ok_or_else(|| self.index_error(offset))
    }

    /// The character at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is outside `[0, len)`.
    pub fn char_at(&self, offset: usize) -> char {
        self.try_char_at(offset).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The characters in `[start, end)`, or an [`IndexError`].
    pub fn try_slice(&self, start: usize, end: usize) -> Result<String, IndexError> {
        if end > self.chars.len() {
            return Err(self.index_error(end));
        }
        if start > end {
            return Err(self.index_error(start));
        }
        Ok(self.chars[start..end].iter().collect())
    }

    /// The characters in `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.try_slice(start, end).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Number of characters on line `n`, line break excluded.
    pub fn line_length(&self, n: usize) -> usize {
        if n == 0 {
            return self.prefix_sum_lengths[0];
        }
        self.prefix_sum_lengths[n] - self.prefix_sum_lengths[n - 1]
    }

    /// Column of a line-content offset `index` on `line`.
    pub fn offset_on_line(&self, index: usize, line: usize) -> usize {
        if line == 0 {
            return index;
        }
        index - self.prefix_sum_lengths[line - 1]
    }

    /// The line containing a line-content offset.
    ///
    /// Finds the leftmost prefix sum strictly greater than `offset`, so an
    /// offset sitting on a line boundary resolves to the start of the next
    /// line. Returns `lines().len()` when the offset is past every line.
    pub fn line_of(&self, offset: usize) -> usize {
        let mut left = 0usize;
        let mut right = self.prefix_sum_lengths.len();
        let mut candidate = self.prefix_sum_lengths.len();
        while left < right {
            let middle = left + (right - left) / 2;
            if self.prefix_sum_lengths[middle] > offset {
                candidate = candidate.min(middle);
                right = middle;
            } else {
                left = middle + 1;
            }
        }
        candidate
    }

    /// Map a position over `text` (line breaks counted) into line-content
    /// coordinates (line breaks not counted), the system
    /// [`Position::transform`] works in.
    pub fn content_position(&self, position: Position) -> Position {
        Position::new(
            self.content_offset(position.start),
            self.content_offset(position.end),
        )
    }

    fn content_offset(&self, offset: usize) -> usize {
        let breaks_before = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        offset - breaks_before
    }

    /// The line terminated by the line break at text offset `offset`, if
    /// that character is a line break.
    pub fn line_ended_by(&self, offset: usize) -> Option<usize> {
        let next = self.line_starts.binary_search(&(offset + 1)).ok()?;
        next.checked_sub(1)
    }

    /// Byte offset in `text` of the character at `offset`, clamped to the
    /// text length.
    pub fn byte_offset(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    fn index_error(&self, offset: usize) -> IndexError {
        IndexError {
            offset,
            len: self.chars.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_carriage_returns() {
        let source = Source::new("test", "a\r\nbc\r\n");
        assert_eq!(source.text(), "a\nbc\n");
        assert_eq!(source.lines(), &["a", "bc", ""]);
        assert_eq!(source.line_length(0), 1);
        assert_eq!(source.line_length(1), 2);
        assert_eq!(source.line_length(2), 0);
    }

    #[test]
    fn test_char_access() {
        let source = Source::new("test", "héllo");
        assert_eq!(source.len(), 5);
        assert_eq!(source.char_at(1), 'é');
        assert_eq!(source.slice(1, 4), "éll");
        assert!(source.try_char_at(5).is_err());
        assert!(source.try_slice(3, 6).is_err());
        assert!(source.try_slice(4, 3).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_char_at_panics_out_of_range() {
        Source::new("test", "abc").char_at(3);
    }

    #[test]
    fn test_line_of_boundaries() {
        // Content prefix sums: [3, 5, 9]
        let source = Source::new("test", "abc\nde\nfghi");
        assert_eq!(source.line_of(0), 0);
        assert_eq!(source.line_of(2), 0);
        assert_eq!(source.line_of(3), 1);
        assert_eq!(source.line_of(4), 1);
        assert_eq!(source.line_of(5), 2);
        assert_eq!(source.line_of(8), 2);
        assert_eq!(source.line_of(9), 3);
    }

    #[test]
    fn test_content_position() {
        let source = Source::new("test", "abc\nde\nfghi");
        // `d` is text offset 4, content offset 3
        assert_eq!(source.content_position(Position::at(4)), Position::at(3));
        // `f` is text offset 7, content offset 5
        assert_eq!(source.content_position(Position::new(0, 7)), Position::new(0, 5));
        // The line break after `abc` resolves to the next line's start
        assert_eq!(source.content_position(Position::at(3)), Position::at(3));
    }

    #[test]
    fn test_line_ended_by() {
        let source = Source::new("test", "abc\nde\n");
        assert_eq!(source.line_ended_by(3), Some(0));
        assert_eq!(source.line_ended_by(6), Some(1));
        assert_eq!(source.line_ended_by(0), None);
        assert_eq!(source.line_ended_by(4), None);
        assert_eq!(source.line_ended_by(7), None);
    }

    #[test]
    fn test_byte_offset() {
        let source = Source::new("test", "aé b");
        assert_eq!(source.byte_offset(0), 0);
        assert_eq!(source.byte_offset(2), 3);
        assert_eq!(source.byte_offset(10), source.text().len());
    }
}
