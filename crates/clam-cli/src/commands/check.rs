//! `clam check`: Report syntax errors.

use std::io::Write;
use std::path::PathBuf;

use termcolor::{ColorChoice, StandardStream};

use crate::output;
use crate::DiagnosticFormat;

/// Check every file. Returns whether all of them parsed.
pub fn execute(files: &[PathBuf], format: DiagnosticFormat, color: ColorChoice) -> anyhow::Result<bool> {
    let mut failed = 0usize;

    for file in files {
        let (name, text) = super::read_source(file)?;
        let diagnostics = match clam_parser::parse(name.as_str(), &text) {
            Ok(_) => {
                if format != DiagnosticFormat::Json {
                    let stdout = StandardStream::stdout(color);
                    let mut out = stdout.lock();
                    output::success(&mut out, "ok")?;
                    writeln!(out, "  {}", name)?;
                }
                continue;
            }
            Err(diagnostics) => diagnostics,
        };

        failed += 1;
        tracing::info!(file = %name, errors = diagnostics.len(), "check failed");
        match format {
            DiagnosticFormat::Caret => diagnostics.emit(color)?,
            DiagnosticFormat::Rich => {
                for diagnostic in &diagnostics {
                    diagnostic.emit_rich(color)?;
                }
            }
            DiagnosticFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&diagnostics.to_json())?);
            }
        }
    }

    if failed > 0 && format != DiagnosticFormat::Json {
        let stderr = StandardStream::stderr(color);
        let mut err = stderr.lock();
        output::failure(&mut err, "failed")?;
        writeln!(err, "  {} of {} file(s) have syntax errors", failed, files.len())?;
    }
    Ok(failed == 0)
}
