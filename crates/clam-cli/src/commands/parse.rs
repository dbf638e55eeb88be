//! `clam parse`: Print the syntax tree of a file.

use std::path::Path;

use clam_parser::ast::unparse;
use termcolor::ColorChoice;

use crate::EmitFormat;

pub fn execute(file: &Path, emit: EmitFormat, color: ColorChoice) -> anyhow::Result<()> {
    let (name, text) = super::read_source(file)?;

    let program = match clam_parser::parse(name.as_str(), &text) {
        Ok(program) => program,
        Err(diagnostics) => {
            diagnostics.emit(color)?;
            anyhow::bail!("{} has {} syntax error(s)", name, diagnostics.len());
        }
    };

    match emit {
        EmitFormat::Pretty => print!("{}", unparse(&program)),
        EmitFormat::Json => println!("{}", serde_json::to_string_pretty(&program)?),
        EmitFormat::Debug => println!("{:#?}", program),
    }
    Ok(())
}
