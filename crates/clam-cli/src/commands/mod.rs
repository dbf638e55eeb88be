//! Subcommand implementations.

pub mod check;
pub mod parse;
pub mod repl;
pub mod tokens;

use std::path::Path;

use anyhow::Context;

/// Read a source file, returning its display name and text.
pub fn read_source(path: &Path) -> anyhow::Result<(String, String)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), chars = text.chars().count(), "read source");
    Ok((path.display().to_string(), text))
}
