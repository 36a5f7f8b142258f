//! Diagnostics and error reporting for Latte.
//!
//! Both the lexer and the parser report through an [`ErrorManager`]. The manager owns the
//! fast-fail policy: in fast-fail mode every report is returned as `Err` and propagates with `?`,
//! aborting the file; in tolerant mode the error is recorded, the caller applies its local recovery,
//! and scanning continues so one pass surfaces every independent error.
//!
//! ## Notes
//! - Messages are built by the [`errors`] catalog so wording stays consistent between lexer and parser.
//! - The manager keeps the source lines it has seen, which is what [`ErrorManager::render`] uses to
//!   draw the caret snippet.

use std::collections::BTreeMap;
use std::fmt;

use crate::ast::Span;

/// A compile-time error with location information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl miette::Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("latte::{}", self.kind.code())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.hints.is_empty() {
            None
        } else {
            Some(Box::new(self.hints.join("\n")))
        }
    }
}

/// Typed error events the front end can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    UnknownToken,
    UnexpectedToken,
    Indentation,
    UnexpectedEnd,
    UnexpectedNewLayer,
    DuplicateVariableName,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::UnknownToken => "unknown_token",
            ErrorKind::UnexpectedToken => "unexpected_token",
            ErrorKind::Indentation => "indentation",
            ErrorKind::UnexpectedEnd => "unexpected_end",
            ErrorKind::UnexpectedNewLayer => "unexpected_new_layer",
            ErrorKind::DuplicateVariableName => "duplicate_variable_name",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::UnknownToken => write!(f, "unknown token"),
            ErrorKind::UnexpectedToken => write!(f, "unexpected token"),
            ErrorKind::Indentation => write!(f, "illegal indentation"),
            ErrorKind::UnexpectedEnd => write!(f, "unexpected end"),
            ErrorKind::UnexpectedNewLayer => write!(f, "unexpected new layer"),
            ErrorKind::DuplicateVariableName => write!(f, "duplicate variable name"),
        }
    }
}

struct LineRecord {
    column_base: usize,
    text: String,
}

/// Error sink shared by the lexer and the parser of one file.
///
/// ## Notes
/// - Every typed report returns `Result<(), CompileError>`: `Err` in fast-fail mode, `Ok` after
///   recording in tolerant mode. Callers write `err.unexpected_end(span)?;` and then recover.
/// - `debug`/`info`/`warn`/`error` are independent output channels backed by `tracing` with the
///   `latte::errors` target.
pub struct ErrorManager {
    fast_fail: bool,
    errors: Vec<CompileError>,
    lines: BTreeMap<usize, LineRecord>,
}

impl ErrorManager {
    pub fn new(fast_fail: bool) -> Self {
        Self {
            fast_fail,
            errors: Vec::new(),
            lines: BTreeMap::new(),
        }
    }

    /// Abort on the first error.
    pub fn fast_fail() -> Self {
        Self::new(true)
    }

    /// Record errors and keep going.
    pub fn tolerant() -> Self {
        Self::new(false)
    }

    pub fn is_fast_fail(&self) -> bool {
        self.fast_fail
    }

    pub fn errors(&self) -> &[CompileError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<CompileError> {
        self.errors
    }

    /// Remember a source line so errors on it can be rendered with a caret.
    pub fn record_line(&mut self, line: usize, column_base: usize, text: &str) {
        self.lines.insert(
            line,
            LineRecord {
                column_base,
                text: text.to_string(),
            },
        );
    }

    // ========================================================================
    // Output channels
    // ========================================================================

    pub fn debug(&self, message: impl fmt::Display) {
        tracing::debug!(target: "latte::errors", "{message}");
    }

    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!(target: "latte::errors", "{message}");
    }

    pub fn warn(&self, message: impl fmt::Display) {
        tracing::warn!(target: "latte::errors", "{message}");
    }

    pub fn error(&self, message: impl fmt::Display) {
        tracing::error!(target: "latte::errors", "{message}");
    }

    // ========================================================================
    // Typed reports
    // ========================================================================

    /// Raise `error` (fast-fail) or record it (tolerant).
    pub fn report(&mut self, error: CompileError) -> Result<(), CompileError> {
        if self.fast_fail {
            return Err(error);
        }
        self.error(format_args!("{} at {}: {}", error.kind, error.span, error.message));
        self.errors.push(error);
        Ok(())
    }

    pub fn syntax(&mut self, message: impl Into<String>, span: Span) -> Result<(), CompileError> {
        self.report(errors::syntax(message, span))
    }

    pub fn unknown_token(&mut self, token: &str, span: Span) -> Result<(), CompileError> {
        self.report(errors::unknown_token(token, span))
    }

    pub fn unexpected_token(&mut self, expected: &str, got: &str, span: Span) -> Result<(), CompileError> {
        self.report(errors::expecting(expected, got, span))
    }

    pub fn unexpected(&mut self, token: &str, span: Span) -> Result<(), CompileError> {
        self.report(errors::unexpected_token(token, span))
    }

    pub fn illegal_indentation(&mut self, width: usize, span: Span) -> Result<(), CompileError> {
        self.report(errors::illegal_indentation(width, span))
    }

    pub fn unexpected_end(&mut self, span: Span) -> Result<(), CompileError> {
        self.report(errors::unexpected_end(span))
    }

    pub fn unexpected_new_layer(&mut self, span: Span) -> Result<(), CompileError> {
        self.report(errors::unexpected_new_layer(span))
    }

    pub fn duplicate_variable_name(&mut self, name: &str, span: Span) -> Result<(), CompileError> {
        self.report(errors::duplicate_name(name, span))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render an error as `line:col: kind: message`, followed by the source line and a caret.
    pub fn render(&self, error: &CompileError) -> String {
        let mut out = format!("{}: {}: {}", error.span, error.kind, error.message);
        if let Some(record) = self.lines.get(&error.span.line) {
            let offset = error.span.column.saturating_sub(record.column_base + 1);
            let width = error.span.length.max(1);
            out.push('\n');
            out.push_str(&record.text);
            out.push('\n');
            out.push_str(&" ".repeat(offset));
            out.push_str(&"^".repeat(width));
        }
        for note in &error.notes {
            out.push_str(&format!("\n  = note: {note}"));
        }
        for hint in &error.hints {
            out.push_str(&format!("\n  = hint: {hint}"));
        }
        out
    }
}

impl Default for ErrorManager {
    fn default() -> Self {
        Self::tolerant()
    }
}

/// Catalog of front-end error constructors.
pub mod errors {
    use super::{CompileError, ErrorKind};
    use crate::ast::Span;

    pub fn syntax(message: impl Into<String>, span: Span) -> CompileError {
        CompileError::syntax(message, span)
    }

    pub fn unknown_token(token: &str, span: Span) -> CompileError {
        CompileError::new(ErrorKind::UnknownToken, format!("unknown token {token}"), span)
    }

    pub fn expecting(expected: &str, got: &str, span: Span) -> CompileError {
        CompileError::new(
            ErrorKind::UnexpectedToken,
            format!("expecting {expected}, but got {got}"),
            span,
        )
    }

    pub fn unexpected_token(token: &str, span: Span) -> CompileError {
        CompileError::new(ErrorKind::UnexpectedToken, format!("unexpected token {token}"), span)
    }

    pub fn illegal_indentation(width: usize, span: Span) -> CompileError {
        CompileError::new(
            ErrorKind::Indentation,
            format!("the indentation should be {width} spaces"),
            span,
        )
    }

    pub fn unexpected_end(span: Span) -> CompileError {
        CompileError::new(ErrorKind::UnexpectedEnd, "unexpected end", span)
    }

    pub fn unexpected_new_layer(span: Span) -> CompileError {
        CompileError::new(ErrorKind::UnexpectedNewLayer, "unexpected new layer", span)
    }

    pub fn duplicate_name(name: &str, span: Span) -> CompileError {
        CompileError::new(ErrorKind::DuplicateVariableName, format!("duplicate name {name}"), span)
            .with_hint(format!("`{name}` is already bound in this or an enclosing scope"))
    }

    pub fn unterminated_string(span: Span) -> CompileError {
        syntax("end of string not found", span).with_hint("the literal is closed at the end of the line")
    }

    pub fn unclosed_bracket(bracket: &str, span: Span) -> CompileError {
        syntax(format!("{bracket} is never closed"), span)
    }

    pub fn unclosed_block_comment(span: Span) -> CompileError {
        syntax("block comment is never closed", span)
    }

    pub fn misplaced_modifiers(span: Span) -> CompileError {
        syntax("modifiers are not in the right position", span)
    }

    pub fn misplaced_annotations(span: Span) -> CompileError {
        syntax("annotations are not presented at correct position", span)
    }
}
