//! Character-offset ranges and their projection onto lines.

use std::fmt;

use serde::Serialize;

use crate::source::Source;

/// An inclusive character-offset range `[start, end]`.
///
/// Token positions index [`Source::text`]. [`Position::transform`] works on
/// line-content offsets instead; use [`Source::content_position`] to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "position start {start} after end {end}");
        Self { start, end }
    }

    /// A single-point position.
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// The smallest position covering both `self` and `other`.
    pub fn merge(&self, other: &Position) -> Position {
        Position {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Project this position, in line-content coordinates, onto the lines
    /// of `source`.
    ///
    /// A position on one line yields one span. A position crossing lines
    /// yields one span per line: the first runs to the end of its line, the
    /// middle ones cover their whole line, the last starts at column 0.
    /// Offsets past the final line are clamped onto it.
    pub fn transform(&self, source: &Source) -> Vec<LineSpan> {
        let last_line = source.lines().len() - 1;
        let start_line = source.line_of(self.start).min(last_line);
        let end_line = source.line_of(self.end).min(last_line);

        let start_col = source.offset_on_line(self.start, start_line);
        let end_col = source.offset_on_line(self.end, end_line);

        if start_line == end_line {
            return vec![LineSpan {
                line: start_line,
                start_col,
                end_col,
            }];
        }

        let mut spans = Vec::with_capacity(end_line - start_line + 1);
        spans.push(LineSpan {
            line: start_line,
            start_col,
            end_col: source.line_length(start_line).saturating_sub(1),
        });
        for line in start_line + 1..end_line {
            spans.push(LineSpan {
                line,
                start_col: 0,
                end_col: source.line_length(line).saturating_sub(1),
            });
        }
        spans.push(LineSpan {
            line: end_line,
            start_col: 0,
            end_col,
        });
        spans
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A [`Position`] projected onto one physical line. All fields are 0-based
/// and the column range is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineSpan {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl fmt::Display for LineSpan {
    /// `line L, column C` or `line L, column C:C2`, 1-based.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_col < self.end_col {
            write!(
                f,
                "line {}, column {}:{}",
                self.line + 1,
                self.start_col + 1,
                self.end_col + 1
            )
        } else {
            write!(f, "line {}, column {}", self.line + 1, self.start_col + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(line: usize, start_col: usize, end_col: usize) -> LineSpan {
        LineSpan {
            line,
            start_col,
            end_col,
        }
    }

    #[test]
    fn test_single_line() {
        let source = Source::new("test", "Hello, World");
        assert_eq!(Position::new(0, 3).transform(&source), vec![span(0, 0, 3)]);
    }

    #[test]
    fn test_multiline_source_single_line_span() {
        let source = Source::new("test", "Several\nLines\r\nBefore\nHello\r\nWorld");
        assert_eq!(Position::new(18, 21).transform(&source), vec![span(3, 0, 3)]);
    }

    #[test]
    fn test_three_line_span() {
        let source = Source::new("test", "Long\nContent\r\nAcross\nLines");
        assert_eq!(
            Position::new(4, 20).transform(&source),
            vec![span(1, 0, 6), span(2, 0, 5), span(3, 0, 3)]
        );
    }

    #[test]
    fn test_span_starting_mid_line() {
        let source = Source::new("test", "abc\ndef");
        assert_eq!(
            Position::new(1, 4).transform(&source),
            vec![span(0, 1, 2), span(1, 0, 1)]
        );
    }

    #[test]
    fn test_end_of_input_clamps_to_last_line() {
        let source = Source::new("test", "abc\ndef");
        assert_eq!(Position::at(6).transform(&source), vec![span(1, 3, 3)]);
        let source = Source::new("test", "abc");
        assert_eq!(Position::at(3).transform(&source), vec![span(0, 3, 3)]);
    }

    #[test]
    fn test_merge() {
        let a = Position::new(3, 5);
        let b = Position::new(8, 10);
        assert_eq!(a.merge(&b), Position::new(3, 10));
        assert_eq!(b.merge(&a), Position::new(3, 10));
        assert_eq!(a.merge(&b).len(), 8);
    }

    #[test]
    fn test_line_span_display() {
        assert_eq!(span(0, 0, 3).to_string(), "line 1, column 1:4");
        assert_eq!(span(2, 4, 4).to_string(), "line 3, column 5");
    }
}
