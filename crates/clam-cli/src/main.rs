//! Clam command-line front end
//!
//! Runs the scanner and parser over files or interactive input and reports
//! tokens, syntax trees and diagnostics. With no subcommand it starts the
//! REPL.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "CLAM_LOG";

#[derive(Parser)]
#[command(name = "clam")]
#[command(about = "Clam language front end", long_about = None)]
#[command(version)]
struct Cli {
    /// When to use colors
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive REPL
    Repl,

    /// Parse a file and print its syntax tree
    Parse {
        /// Input file
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = EmitFormat::Pretty)]
        emit: EmitFormat,
    },

    /// Print the token stream of a file
    Tokens {
        /// Input file
        file: PathBuf,
        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report syntax errors without printing anything else
    Check {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Diagnostic format
        #[arg(long, value_enum, default_value_t = DiagnosticFormat::Caret)]
        format: DiagnosticFormat,
    },
}

/// The `--color` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    /// Color when writing to a terminal
    Auto,
    Always,
    Never,
}

/// How `clam parse` prints the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitFormat {
    /// Re-parseable source text
    Pretty,
    /// JSON serialization of the tree
    Json,
    /// Rust debug representation
    Debug,
}

/// How `clam check` prints diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiagnosticFormat {
    /// Source excerpt with carets
    Caret,
    /// codespan-reporting layout
    Rich,
    /// One JSON array per file
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color = output::resolve_color_choice(cli.color);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::execute(color),
        Commands::Parse { file, emit } => commands::parse::execute(&file, emit, color),
        Commands::Tokens { file, json } => commands::tokens::execute(&file, json, color),
        Commands::Check { files, format } => {
            let clean = commands::check::execute(&files, format, color)?;
            if !clean {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "clam=warn,clam_parser=warn",
        1 => "clam=debug,clam_parser=debug",
        _ => "clam=trace,clam_parser=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_directive_defaults() {
        assert_eq!(directive_for_verbosity(0), "clam=warn,clam_parser=warn");
        assert_eq!(directive_for_verbosity(1), "clam=debug,clam_parser=debug");
        assert_eq!(directive_for_verbosity(5), "clam=trace,clam_parser=trace");
    }

    #[test]
    fn test_no_subcommand_defaults_to_repl() {
        let cli = Cli::try_parse_from(["clam"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_subcommand_arguments() {
        let cli = Cli::try_parse_from(["clam", "--color", "never", "parse", "a.lox", "--emit", "json"])
            .unwrap();
        assert_eq!(cli.color, ColorWhen::Never);
        match cli.command {
            Some(Commands::Parse { file, emit }) => {
                assert_eq!(file, PathBuf::from("a.lox"));
                assert_eq!(emit, EmitFormat::Json);
            }
            _ => panic!("Expected parse subcommand"),
        }
    }

    #[test]
    fn test_color_defaults_to_auto() {
        let cli = Cli::try_parse_from(["clam", "check", "a.lox"]).unwrap();
        assert_eq!(cli.color, ColorWhen::Auto);
    }

    #[test]
    fn test_unknown_color_rejected() {
        assert!(Cli::try_parse_from(["clam", "--color", "sometimes", "check", "a.lox"]).is_err());
    }

    #[test]
    fn test_check_requires_files() {
        assert!(Cli::try_parse_from(["clam", "check"]).is_err());
    }
}
