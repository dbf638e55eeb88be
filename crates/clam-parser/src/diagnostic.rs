//! Diagnostic infrastructure for error reporting
//!
//! A [`Diagnostic`] is a message with an optional source-anchored position.
//! It renders in the compact caret style:
//!
//! ```text
//! error: expected `;`, found `print`
//!   at main.lox (line 2, column 1)
//!     1 var x = 1
//!     2 print x;
//!       ^ at here
//! ```
//!
//! The same diagnostic can also be converted to a codespan-reporting
//! diagnostic or to a serializable [`JsonDiagnostic`].

use std::fmt;
use std::io;
use std::sync::Arc;

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use serde::{Deserialize, Serialize};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::position::{LineSpan, Position};
use crate::source::Source;

/// Number of lines printed above the offending line.
const CONTEXT_LINES: usize = 2;

const LOCATION_INDENT: &str = "  ";
const SOURCE_INDENT: &str = "    ";

/// A user-facing error report.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    message: String,
    position: Option<Position>,
    source: Option<Arc<Source>>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            position: None,
            source: None,
        }
    }

    /// Anchor the diagnostic at a position over the source text.
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach the source the position refers to.
    pub fn attach(mut self, source: Arc<Source>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn source(&self) -> Option<&Arc<Source>> {
        self.source.as_ref()
    }

    /// Line spans covered by this diagnostic. Empty unless both a source
    /// and a position are present.
    ///
    /// A single-character position on a line break is shown one column past
    /// the end of the line it terminates.
    pub fn line_spans(&self) -> Vec<LineSpan> {
        let (Some(source), Some(position)) = (&self.source, self.position) else {
            return Vec::new();
        };
        match source.line_ended_by(position.start) {
            Some(line) if position.start == position.end => {
                let column = source.line_length(line);
                vec![LineSpan {
                    line,
                    start_col: column,
                    end_col: column,
                }]
            }
            _ => source.content_position(position).transform(source),
        }
    }

    /// Render to a color-capable writer.
    pub fn render<W: WriteColor + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(out, "error: ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_intense(true))?;
        writeln!(out, "{}", self.message)?;
        out.reset()?;

        let Some(source) = &self.source else {
            return Ok(());
        };
        for span in self.line_spans() {
            writeln!(out, "{LOCATION_INDENT}at {} ({span})", source.name())?;

            let width = digits(span.line + 1);
            out.set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
            for line in span.line.saturating_sub(CONTEXT_LINES)..=span.line {
                writeln!(out, "{SOURCE_INDENT}{:>width$} {}", line + 1, source.line(line))?;
            }
            out.reset()?;

            write!(out, "{SOURCE_INDENT}{:>width$} {}", "", " ".repeat(span.start_col))?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true))?;
            let underline = span.end_col.saturating_sub(span.start_col) + 1;
            write!(out, "{} at here", "^".repeat(underline))?;
            out.reset()?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Render to stderr through a buffer.
    ///
    /// Whatever was rendered is flushed even when rendering fails partway.
    pub fn emit(&self, color: ColorChoice) -> io::Result<()> {
        let writer = BufferWriter::stderr(color);
        let mut buffer = writer.buffer();
        let rendered = self.render(&mut buffer);
        writer.print(&buffer)?;
        rendered
    }

    /// Convert to a codespan-reporting diagnostic over [`Diagnostic::codespan_file`].
    pub fn to_codespan(&self) -> CsDiagnostic<()> {
        let diagnostic = CsDiagnostic::error().with_message(&self.message);
        match (&self.source, self.position) {
            (Some(source), Some(position)) => {
                let start = source.byte_offset(position.start);
                let end = source.byte_offset(position.end + 1).max(start);
                diagnostic.with_labels(vec![Label::primary((), start..end)])
            }
            _ => diagnostic,
        }
    }

    /// The codespan file matching [`Diagnostic::to_codespan`] labels.
    pub fn codespan_file(&self) -> Option<SimpleFile<String, String>> {
        self.source
            .as_ref()
            .map(|source| SimpleFile::new(source.name().to_string(), source.text().to_string()))
    }

    /// Render through codespan-reporting to stderr.
    pub fn emit_rich(&self, color: ColorChoice) -> Result<(), codespan_reporting::files::Error> {
        let file = self
            .codespan_file()
            .unwrap_or_else(|| SimpleFile::new(String::new(), String::new()));
        let writer = StandardStream::stderr(color);
        let config = term::Config::default();
        let mut out = writer.lock();
        let emitted = term::emit(&mut out, &config, &file, &self.to_codespan());
        emitted
    }

    /// Convert to the JSON representation.
    pub fn to_json(&self) -> JsonDiagnostic {
        JsonDiagnostic::from_diagnostic(self)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = NoColor::new(Vec::new());
        self.render(&mut out).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&out.into_inner()))
    }
}

impl std::error::Error for Diagnostic {}

/// A non-empty, position-ordered collection of diagnostics.
#[derive(Debug, Clone)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    /// Wrap a list of diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if `diagnostics` is empty.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        assert!(!diagnostics.is_empty(), "diagnostics must not be empty");
        Diagnostics(diagnostics)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn first(&self) -> &Diagnostic {
        &self.0[0]
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }

    /// Render every diagnostic, separated by blank lines.
    pub fn render<W: WriteColor + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for (index, diagnostic) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            diagnostic.render(out)?;
        }
        Ok(())
    }

    /// Render every diagnostic to stderr in a single buffered write.
    pub fn emit(&self, color: ColorChoice) -> io::Result<()> {
        let writer = BufferWriter::stderr(color);
        let mut buffer = writer.buffer();
        let rendered = self.render(&mut buffer);
        writer.print(&buffer)?;
        rendered
    }

    pub fn to_json(&self) -> Vec<JsonDiagnostic> {
        self.0.iter().map(Diagnostic::to_json).collect()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Diagnostics(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = NoColor::new(Vec::new());
        self.render(&mut out).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&out.into_inner()))
    }
}

impl std::error::Error for Diagnostics {}

/// JSON representation of a diagnostic for editor integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub severity: String,
    pub message: String,
    /// Source name, when a source is attached
    pub file: Option<String>,
    pub spans: Vec<JsonSpan>,
}

/// One line of a diagnostic's position, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSpan {
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl JsonDiagnostic {
    pub fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        let spans = diagnostic
            .line_spans()
            .into_iter()
            .map(|span| JsonSpan {
                line: span.line + 1,
                start_column: span.start_col + 1,
                end_column: span.end_col + 1,
            })
            .collect();
        JsonDiagnostic {
            severity: "error".to_string(),
            message: diagnostic.message.clone(),
            file: diagnostic.source.as_ref().map(|s| s.name().to_string()),
            spans,
        }
    }
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
