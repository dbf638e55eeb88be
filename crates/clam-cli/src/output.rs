//! Shared colored output utilities for CLI commands.
//!
//! Uses `termcolor` for cross-platform colored terminal output.
//! Respects `NO_COLOR` environment variable and `--color` flag.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

use crate::ColorWhen;

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: ColorWhen) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    choice_from_flag(flag)
}

fn choice_from_flag(flag: ColorWhen) -> ColorChoice {
    match flag {
        ColorWhen::Auto => ColorChoice::Auto,
        ColorWhen::Always => ColorChoice::Always,
        ColorWhen::Never => ColorChoice::Never,
    }
}

/// Write text with a specific color and style.
pub fn write_styled<W: WriteColor + ?Sized>(
    out: &mut W,
    text: &str,
    color: Option<Color>,
    bold: bool,
) -> io::Result<()> {
    let mut spec = ColorSpec::new();
    spec.set_fg(color).set_bold(bold);
    out.set_color(&spec)?;
    write!(out, "{}", text)?;
    out.reset()
}

/// Green bold text.
pub fn success<W: WriteColor + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    write_styled(out, text, Some(Color::Green), true)
}

/// Red bold text.
pub fn failure<W: WriteColor + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    write_styled(out, text, Some(Color::Red), true)
}

/// Cyan text.
pub fn info<W: WriteColor + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    write_styled(out, text, Some(Color::Cyan), false)
}
