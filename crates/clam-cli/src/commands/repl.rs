//! `clam repl`: Interactive parsing session.
//!
//! Each input is parsed as a program, or failing that as a bare expression,
//! and echoed back as normalized source. Input with unclosed delimiters
//! continues on the next line.

use clam_parser::ast::unparse;
use clam_parser::{parse, parse_expression, Diagnostics};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use termcolor::{ColorChoice, StandardStream};

use crate::output;

const PROMPT: &str = "clam> ";
const CONTINUATION_PROMPT: &str = "  ... ";
const INPUT_NAME: &str = "<repl>";

pub fn execute(color: ColorChoice) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;

    // Load history if it exists
    let history_path = dirs::home_dir().map(|h| h.join(".clam").join("repl_history"));
    if let Some(ref path) = history_path {
        let _ = editor.load_history(path);
    }

    println!("Clam v{} REPL", env!("CARGO_PKG_VERSION"));
    println!("Enter an empty line or press Ctrl-D to quit\n");

    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        };

        match editor.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    if buffer.is_empty() {
                        break;
                    }
                    // In multi-line mode, empty line is appended
                    buffer.push('\n');
                    continue;
                }

                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                if is_incomplete(&buffer) {
                    continue;
                }

                let input = std::mem::take(&mut buffer);
                let _ = editor.add_history_entry(&input);

                match evaluate(&input) {
                    Ok(text) => {
                        let stdout = StandardStream::stdout(color);
                        let mut out = stdout.lock();
                        output::info(&mut out, &text)?;
                    }
                    Err(diagnostics) => diagnostics.emit(color)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: discard multi-line buffer or hint exit
                if !buffer.is_empty() {
                    buffer.clear();
                    println!();
                } else {
                    println!("\n(To exit, press Ctrl-D or enter an empty line)");
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D: exit
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "readline failed");
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }

    Ok(())
}

/// Parse one REPL input and render it back as normalized source.
///
/// A bare expression such as `1 + 2` is not a valid program (it lacks the
/// `;`), so it is retried as an expression. When both fail, the program
/// diagnostics are reported.
fn evaluate(input: &str) -> Result<String, Diagnostics> {
    match parse(INPUT_NAME, input) {
        Ok(program) => Ok(unparse(&program)),
        Err(program_errors) => match parse_expression(INPUT_NAME, input) {
            Ok(expression) => {
                tracing::debug!("input parsed as a bare expression");
                Ok(format!("{expression}\n"))
            }
            Err(_) => Err(program_errors),
        },
    }
}

/// Count open delimiters, skipping those inside strings and comments.
/// Returns true if there are unclosed delimiters.
fn is_incomplete(code: &str) -> bool {
    let mut depth = 0i32;
    let mut chars = code.chars().peekable();
    let mut in_string = false;
    let mut in_line_comment = false;

    while let Some(c) = chars.next() {
        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            continue;
        }
        if in_string {
            if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '/' if chars.peek() == Some(&'/') => {
                chars.next();
                in_line_comment = true;
            }
            '{' | '(' => depth += 1,
            '}' | ')' => depth -= 1,
            _ => {}
        }
    }

    depth > 0 || in_string
}
