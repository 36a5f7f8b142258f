//! Front-end pipeline shared by the CLI and the integration tests.
//!
//! Reads a source file, runs the lexer and the parser with one [`ErrorManager`], and keeps the
//! manager around so every recorded error can be rendered with its source line.

use std::fs;
use std::path::{Path, PathBuf};

use latte_syntax::ast::Statement;
use latte_syntax::diagnostics::{CompileError, ErrorManager};
use latte_syntax::lexer::{self, NodeTree, ScannerConfig};
use latte_syntax::parser;

/// Maximum source file size (100 MB).
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Errors that stop the pipeline before it produced a result.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FrontendError {
    #[error("cannot read '{path}': {source}")]
    #[diagnostic(code(latte::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source file '{path}' is too large ({size} bytes, max {max} bytes)")]
    #[diagnostic(code(latte::too_large))]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    /// Fast-fail mode stopped at the first error; `rendered` carries the caret snippet.
    #[error("{rendered}")]
    #[diagnostic(code(latte::aborted))]
    Aborted {
        rendered: String,
        #[source]
        error: CompileError,
    },
}

pub type FrontendResult<T> = Result<T, FrontendError>;

/// Scanner and error-policy settings for one run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub scanner: ScannerConfig,
    pub fast_fail: bool,
}

impl Options {
    fn error_manager(&self) -> ErrorManager {
        ErrorManager::new(self.fast_fail)
    }
}

/// Read a source file, rejecting files over [`MAX_SOURCE_SIZE`].
pub fn read_source(path: &Path) -> FrontendResult<String> {
    let io = |source| FrontendError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io)?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(FrontendError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }
    fs::read_to_string(path).map_err(io)
}

/// Result of scanning (and optionally parsing) one source text.
pub struct Analysis {
    pub tree: NodeTree,
    /// Empty when only the lexer ran.
    pub statements: Vec<Statement>,
    err: ErrorManager,
}

impl Analysis {
    /// Errors recorded in tolerant mode, in report order.
    pub fn errors(&self) -> &[CompileError] {
        self.err.errors()
    }

    pub fn has_errors(&self) -> bool {
        self.err.has_errors()
    }

    /// Whether this run stopped at the first error.
    pub fn is_fast_fail(&self) -> bool {
        self.err.is_fast_fail()
    }

    /// Every recorded error with its source line and caret.
    pub fn rendered_errors(&self) -> Vec<String> {
        self.errors().iter().map(|e| self.err.render(e)).collect()
    }
}

/// Run the lexer only.
#[tracing::instrument(skip_all, fields(bytes = source.len()))]
pub fn scan(source: &str, options: &Options) -> FrontendResult<Analysis> {
    let mut err = options.error_manager();
    tracing::debug!(fast_fail = err.is_fast_fail(), "scanning");
    let tree = match lexer::lex(source, &options.scanner, &mut err) {
        Ok(tree) => tree,
        Err(error) => return Err(aborted(&err, error)),
    };
    Ok(Analysis {
        tree,
        statements: Vec::new(),
        err,
    })
}

/// Run the lexer and the parser.
#[tracing::instrument(skip_all, fields(bytes = source.len()))]
pub fn analyze(source: &str, options: &Options) -> FrontendResult<Analysis> {
    let mut analysis = scan(source, options)?;
    match parser::parse(&analysis.tree, &mut analysis.err) {
        Ok(statements) => analysis.statements = statements,
        Err(error) => return Err(aborted(&analysis.err, error)),
    }
    tracing::debug!(
        statements = analysis.statements.len(),
        errors = analysis.errors().len(),
        "analyzed"
    );
    Ok(analysis)
}

fn aborted(err: &ErrorManager, error: CompileError) -> FrontendError {
    FrontendError::Aborted {
        rendered: err.render(&error),
        error,
    }
}
