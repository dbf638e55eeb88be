//! `clam tokens`: Print the token stream of a file.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clam_parser::{scan_all, Source};
use termcolor::{ColorChoice, StandardStream};

use crate::output;

pub fn execute(file: &Path, json: bool, color: ColorChoice) -> anyhow::Result<()> {
    let (name, text) = super::read_source(file)?;
    let source = Arc::new(Source::new(name.as_str(), &text));

    let tokens = match scan_all(&source) {
        Ok(tokens) => tokens,
        Err(diagnostic) => {
            diagnostic.emit(color)?;
            anyhow::bail!("{} has a lexical error", name);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    let stdout = StandardStream::stdout(color);
    let mut out = stdout.lock();
    for token in &tokens {
        output::info(&mut out, &format!("{:>12}", token.position.to_string()))?;
        writeln!(out, "  {:<14} {}", format!("{:?}", token.kind), token.lexeme)?;
    }
    Ok(())
}
