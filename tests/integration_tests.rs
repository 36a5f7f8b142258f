//! Integration tests for the Latte front end

use std::path::Path;

use latte::ast::Stmt;
use latte::lexer::ScannerConfig;
use latte::pipeline::{self, FrontendError, Options};
use latte::printer;

fn analyze_file(path: &Path) -> pipeline::Analysis {
    let source = pipeline::read_source(path).unwrap();
    pipeline::analyze(&source, &Options::default()).unwrap()
}

/// Test that all valid fixtures parse without errors and survive a render round trip
#[test]
fn test_valid_fixtures() {
    insta::glob!("fixtures/valid/*.lt", |path| {
        let analysis = analyze_file(path);
        assert!(
            !analysis.has_errors(),
            "Expected {} to parse cleanly, got errors: {:?}",
            path.display(),
            analysis.rendered_errors()
        );
        assert!(!analysis.statements.is_empty());

        let rendered = printer::render(&analysis.statements);
        let reparsed = pipeline::analyze(&rendered, &Options::default()).unwrap();
        assert!(!reparsed.has_errors(), "rendered source:\n{rendered}");
        assert_eq!(analysis.statements, reparsed.statements, "rendered source:\n{rendered}");
    });
}

/// Test that invalid fixtures produce errors
#[test]
fn test_invalid_fixtures() {
    insta::glob!("fixtures/invalid/*.lt", |path| {
        let analysis = analyze_file(path);
        assert!(
            analysis.has_errors(),
            "Expected {} to produce syntax errors",
            path.display()
        );
    });
}

/// Test that invalid fixtures stop at the first error in fast-fail mode
#[test]
fn test_invalid_fixtures_fast_fail() {
    let options = Options {
        fast_fail: true,
        ..Options::default()
    };
    insta::glob!("fixtures/invalid/*.lt", |path| {
        let source = pipeline::read_source(path).unwrap();
        assert!(matches!(
            pipeline::analyze(&source, &options),
            Err(FrontendError::Aborted { .. })
        ));
    });
}

#[test]
fn test_shapes_fixture_structure() {
    let analysis = analyze_file(Path::new("tests/fixtures/valid/shapes.lt"));
    let kinds: Vec<&str> = analysis
        .statements
        .iter()
        .map(|s| match &s.node {
            Stmt::Package(_) => "package",
            Stmt::Import(_) => "import",
            Stmt::Class(_) => "class",
            Stmt::Interface(_) => "interface",
            Stmt::Method(_) => "method",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["package", "import", "class", "class", "interface", "method"]
    );
}

#[test]
fn test_error_recovery_keeps_later_statements() {
    let analysis = analyze_file(Path::new("tests/fixtures/invalid/missing_operand.lt"));
    assert_eq!(analysis.errors().len(), 1);
    assert_eq!(analysis.statements.len(), 1);
}

#[test]
fn test_line_and_column_bases_shift_reports() {
    let options = Options {
        scanner: ScannerConfig {
            line_base: 10,
            column_base: 2,
            ..ScannerConfig::default()
        },
        fast_fail: false,
    };
    let analysis = pipeline::analyze("x = * 2\n", &options).unwrap();
    let error = &analysis.errors()[0];
    assert_eq!(error.span.line, 11);
    assert_eq!(error.span.column, 7);
    // Carets stay under the offending token.
    assert!(analysis.rendered_errors()[0].contains("\nx = * 2\n    ^"));
}

#[test]
fn test_two_space_indentation() {
    let options = Options {
        scanner: ScannerConfig {
            indentation: 2,
            ..ScannerConfig::default()
        },
        fast_fail: false,
    };
    let source = "if a\n  b\nelse\n  c\n";
    let analysis = pipeline::analyze(source, &options).unwrap();
    assert!(!analysis.has_errors(), "{:?}", analysis.rendered_errors());
    assert_eq!(printer::render_with_indent(&analysis.statements, 2), source);
}

#[test]
fn test_scan_dump_shows_layers() {
    let analysis = pipeline::scan("f(a)\n", &Options::default()).unwrap();
    let dump = analysis.tree.dump();
    assert!(dump.contains("\"f\""), "{dump}");
    assert!(dump.contains("\"a\""), "{dump}");
}
