//! CLI module for the Latte front end
//!
//! This module provides the command-line interface around the lexer and the parser.
//!
//! ## Commands
//!
//! - `lex <file>` - Print the layered node tree
//! - `parse <file>` - Print the AST, or re-rendered source with `--render`
//! - `check <file>` - Report every syntax error and exit non-zero when there are any
//! - `vocab` - Print the keyword, modifier, operator and symbol registries
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use latte_syntax::lexer::ScannerConfig;

use crate::pipeline::{FrontendError, Options};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<FrontendError> for CliError {
    fn from(error: FrontendError) -> Self {
        CliError::failure(error.to_string())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Latte language front end
#[derive(Parser, Debug)]
#[command(name = "latte")]
#[command(version = VERSION)]
#[command(about = "Lexer and parser for the Latte programming language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log recoveries and pipeline steps (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Scanner and error-policy flags shared by the file commands.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Spaces per indentation level
    #[arg(long, value_name = "N", default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    pub indent: u16,

    /// Added to every reported line number
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub line_base: usize,

    /// Added to every reported column number
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub column_base: usize,

    /// Stop at the first error instead of recovering
    #[arg(long)]
    pub fast_fail: bool,
}

impl ScanArgs {
    pub fn options(&self) -> Options {
        Options {
            scanner: ScannerConfig {
                indentation: usize::from(self.indent),
                line_base: self.line_base,
                column_base: self.column_base,
            },
            fast_fail: self.fast_fail,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the layered node tree of a file
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the syntax tree of a file
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print re-rendered source instead of the tree
        #[arg(long)]
        render: bool,
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Report every syntax error in a file
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the language vocabulary
    Vocab,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Install the log subscriber; `RUST_LOG` wins over the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .try_init();
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lex { file, scan } => commands::lex_file(&file, &scan.options()),
        Command::Parse { file, render, scan } => commands::parse_file(&file, &scan.options(), render),
        Command::Check { file, scan } => commands::check_file(&file, &scan.options()),
        Command::Vocab => commands::print_vocab(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_lex() {
        let cli = Cli::try_parse_from(["latte", "lex", "main.lt"]).unwrap();
        assert!(matches!(cli.command, Command::Lex { .. }));
    }

    #[test]
    fn test_cli_parse_render_flag() {
        let cli = Cli::try_parse_from(["latte", "parse", "main.lt", "--render"]).unwrap();
        if let Command::Parse { render, .. } = cli.command {
            assert!(render);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_cli_scan_flags() {
        let cli = Cli::try_parse_from([
            "latte",
            "check",
            "main.lt",
            "--indent",
            "2",
            "--line-base",
            "10",
            "--column-base",
            "1",
            "--fast-fail",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        if let Command::Check { scan, .. } = cli.command {
            let options = scan.options();
            assert_eq!(options.scanner.indentation, 2);
            assert_eq!(options.scanner.line_base, 10);
            assert_eq!(options.scanner.column_base, 1);
            assert!(options.fast_fail);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_defaults_match_scanner_defaults() {
        let cli = Cli::try_parse_from(["latte", "check", "main.lt"]).unwrap();
        if let Command::Check { scan, .. } = cli.command {
            let options = scan.options();
            assert_eq!(options.scanner, ScannerConfig::default());
            assert!(!options.fast_fail);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_rejects_zero_indent() {
        assert!(Cli::try_parse_from(["latte", "lex", "main.lt", "--indent", "0"]).is_err());
    }

    #[test]
    fn test_cli_parse_vocab() {
        let cli = Cli::try_parse_from(["latte", "vocab"]).unwrap();
        assert!(matches!(cli.command, Command::Vocab));
    }
}
