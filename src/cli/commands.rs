//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Write as _;
use std::path::Path;

use latte_core::lang::{keywords, literals, modifiers, operators, symbols};
use latte_syntax::printer;

use super::{CliError, CliResult, ExitCode};
use crate::pipeline::{self, Analysis, Options};

/// Prefix every rendered error with the file path, one block per error.
fn format_errors(file_path: &Path, analysis: &Analysis) -> String {
    let mut msg = String::new();
    for rendered in analysis.rendered_errors() {
        let _ = writeln!(msg, "{}:{}", file_path.display(), rendered);
    }
    let count = analysis.errors().len();
    let _ = write!(msg, "{} syntax error{}", count, if count == 1 { "" } else { "s" });
    msg
}

fn fail_on_errors(file_path: &Path, analysis: &Analysis) -> CliResult<ExitCode> {
    if analysis.has_errors() {
        return Err(CliError::failure(format_errors(file_path, analysis)));
    }
    Ok(ExitCode::SUCCESS)
}

/// Lex and display the node tree.
pub fn lex_file(file_path: &Path, options: &Options) -> CliResult<ExitCode> {
    let source = pipeline::read_source(file_path)?;
    let analysis = pipeline::scan(&source, options)?;
    print!("{}", analysis.tree.dump());
    fail_on_errors(file_path, &analysis)
}

/// Parse and display the AST, or the re-rendered source when `render` is set.
pub fn parse_file(file_path: &Path, options: &Options, render: bool) -> CliResult<ExitCode> {
    let source = pipeline::read_source(file_path)?;
    let analysis = pipeline::analyze(&source, options)?;
    if render {
        print!(
            "{}",
            printer::render_with_indent(&analysis.statements, options.scanner.indentation)
        );
    } else {
        println!("{:#?}", analysis.statements);
    }
    fail_on_errors(file_path, &analysis)
}

/// Lex and parse a file, reporting every error.
pub fn check_file(file_path: &Path, options: &Options) -> CliResult<ExitCode> {
    let source = pipeline::read_source(file_path)?;
    let analysis = pipeline::analyze(&source, options)?;
    fail_on_errors(file_path, &analysis)?;
    println!("{}", check_summary(file_path, &analysis));
    Ok(ExitCode::SUCCESS)
}

fn check_summary(file_path: &Path, analysis: &Analysis) -> String {
    let mode = if analysis.is_fast_fail() { "fast-fail" } else { "tolerant" };
    format!(
        "✓ {}: {} statement(s), no syntax errors ({mode})",
        file_path.display(),
        analysis.statements.len()
    )
}

/// Print the vocabulary registries.
pub fn print_vocab() -> CliResult<ExitCode> {
    print!("{}", vocab_listing());
    Ok(ExitCode::SUCCESS)
}

fn vocab_listing() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "keywords:");
    for info in keywords::KEYWORDS {
        let _ = writeln!(out, "  {:<12} {:?}", info.canonical, info.category);
    }

    let _ = writeln!(out, "bools:");
    for info in literals::BOOLS {
        let _ = writeln!(out, "  {:<12} {}", info.canonical, info.value);
    }

    let _ = writeln!(out, "modifiers:");
    for info in modifiers::MODIFIERS {
        let _ = writeln!(out, "  {:<12} {:?}", info.canonical, info.category);
    }

    let _ = writeln!(out, "binary operators (tightest first):");
    for (rank, spellings) in operators::binary_ranks() {
        if !spellings.is_empty() {
            let _ = writeln!(out, "  {:>2}  {}", rank, spellings.join(" "));
        }
    }

    let _ = writeln!(out, "unary operators:");
    for info in operators::OPERATORS.iter().filter(|o| o.rank.is_none()) {
        let _ = writeln!(out, "  {:<12} {:?}", info.spelling, info.fixity);
    }

    let _ = writeln!(out, "symbols:");
    for info in symbols::SYMBOLS {
        let _ = writeln!(out, "  {:<12} {:?}", info.canonical, info.category);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_listing_has_every_section() {
        let listing = vocab_listing();
        for header in ["keywords:", "bools:", "modifiers:", "binary operators", "unary operators:", "symbols:"] {
            assert!(listing.contains(header), "missing {header}");
        }
        assert!(listing.contains("  elseif"));
        assert!(listing.contains("  abstract"));
    }

    #[test]
    fn test_format_errors_prefixes_path_and_counts() {
        let analysis = pipeline::analyze("x = * 2\n", &Options::default()).unwrap();
        let msg = format_errors(Path::new("demo.lt"), &analysis);
        assert!(msg.starts_with("demo.lt:1:5: "), "{msg}");
        assert!(msg.ends_with("1 syntax error"), "{msg}");
    }

    #[test]
    fn test_clean_source_passes() {
        let analysis = pipeline::analyze("a = 1\n", &Options::default()).unwrap();
        assert_eq!(fail_on_errors(Path::new("ok.lt"), &analysis).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_check_summary_names_the_error_mode() {
        let options = Options {
            fast_fail: true,
            ..Options::default()
        };
        let analysis = pipeline::analyze("a = 1\nb = 2\n", &options).unwrap();
        assert_eq!(
            check_summary(Path::new("ok.lt"), &analysis),
            "✓ ok.lt: 2 statement(s), no syntax errors (fast-fail)"
        );
    }

    #[test]
    fn test_missing_file_is_a_failure() {
        let err = check_file(Path::new("missing/file.lt"), &Options::default()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("missing/file.lt"));
    }
}
