//! Layering lexer for the Latte language.
//!
//! Reads the source line by line and builds a [`NodeTree`] whose nesting follows indentation:
//! - Tokens are cut at the leftmost symbol of the symbol table (longest symbol on ties).
//! - Every line ends with a WEAK ending; `,` produces a STRONG ending.
//! - A line indented one step deeper opens a layer; a shallower line closes layers.
//! - Brackets and lambda arrows open layers mid-line; closing brackets close them again.
//!
//! ## Module Structure
//!
//! - `tokens` - Token kinds and the classifier
//! - `tree` - Node arena (elements, endings, layers)
//! - `indent` - Layer tracking for indentation and brackets
//! - `strings` - Quoted literal scanning
//! - `macros` - `define` / `undef` directives
//! - `final_check` - Post-pass cleanup over the finished tree

mod final_check;
mod indent;
mod macros;
mod strings;
pub mod tokens;
pub mod tree;

pub use tokens::{Element, TokenKind};
pub use tree::{Ending, Layer, NodeId, NodeKind, NodeTree};

use crate::ast::Span;
use crate::diagnostics::{CompileError, ErrorManager, errors};
use latte_core::lang::symbols::{self, BLOCK_COMMENT_END, SymbolCategory, SymbolId};
use macros::{Directive, Macros};

/// Scanner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Spaces per indentation level (at least 1).
    pub indentation: usize,
    /// Added to every line number; the first line is `line_base + 1`.
    pub line_base: usize,
    /// Added to every column; the first column is `column_base + 1`.
    pub column_base: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            indentation: 4,
            line_base: 0,
            column_base: 0,
        }
    }
}

/// An open bracket and the layer it opened.
#[derive(Debug, Clone, Copy)]
struct BracketEntry {
    symbol: SymbolId,
    layer: NodeId,
    span: Span,
}

/// Lexer state for one file.
pub struct Lexer<'a> {
    source: &'a str,
    config: ScannerConfig,
    err: &'a mut ErrorManager,
    tree: NodeTree,
    /// Open layers; the root is always at the bottom.
    layers: Vec<NodeId>,
    brackets: Vec<BracketEntry>,
    macros: Macros,
    /// Node the next token is linked after; `None` right after a layer opens.
    previous: Option<NodeId>,
    root_indent: Option<usize>,
    /// Start of an unterminated `/*` comment.
    block_comment: Option<Span>,
    line: usize,
    /// Macros expanded on the current line.
    fired: Vec<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: &ScannerConfig, err: &'a mut ErrorManager) -> Self {
        let tree = NodeTree::new();
        let root = tree.root();
        Self {
            source,
            config: ScannerConfig {
                indentation: config.indentation.max(1),
                ..*config
            },
            err,
            tree,
            layers: vec![root],
            brackets: Vec::new(),
            macros: Macros::default(),
            previous: None,
            root_indent: None,
            block_comment: None,
            line: config.line_base,
            fired: Vec::new(),
        }
    }

    /// Scan the whole source into a node tree.
    ///
    /// ## Errors
    /// Returns the first lexical error in fast-fail mode. In tolerant mode errors are recorded in
    /// the [`ErrorManager`] and the recovered tree is returned.
    pub fn tokenize(mut self) -> Result<NodeTree, CompileError> {
        let source = self.source;
        for (idx, raw) in source.lines().enumerate() {
            self.line = self.config.line_base + idx + 1;
            self.err.record_line(self.line, self.config.column_base, raw);
            self.scan_line(raw)?;
        }
        self.finish()?;
        final_check::run(&mut self.tree);
        Ok(self.tree)
    }

    // ========================================================================
    // Lines
    // ========================================================================

    fn scan_line(&mut self, raw: &str) -> Result<(), CompileError> {
        self.fired.clear();
        let mut text = raw;
        let mut offset = 0;

        if self.block_comment.is_some() {
            match raw.find(BLOCK_COMMENT_END) {
                None => return Ok(()),
                Some(end) => {
                    self.block_comment = None;
                    offset = end + BLOCK_COMMENT_END.len();
                    text = &raw[offset..];
                }
            }
        } else if let Some(directive) = macros::parse_directive(raw) {
            return self.apply_directive(directive);
        }

        let expanded;
        if !self.macros.is_empty() {
            let code_end = text.find(';').unwrap_or(text.len());
            if let Some((code, fired)) = self.macros.expand(&text[..code_end]) {
                self.err
                    .debug(format_args!("line {}: expanded {}", self.line, fired.join(", ")));
                expanded = format!("{code}{}", &text[code_end..]);
                self.fired = fired;
                text = &expanded;
            }
        }

        let content = text.trim_start_matches(' ');
        let spaces = text.len() - content.len();
        let content = self.skip_leading_comments(content, offset + spaces);
        if content.trim().is_empty() || content.starts_with(';') {
            return Ok(());
        }
        let content_offset = offset + text.len() - content.len();

        self.apply_indentation(spaces, offset)?;
        self.scan_tokens(content, content_offset)?;

        if self.previous.is_some_and(|p| self.tree.is_element(p)) {
            let end = self.span_at(offset + text.len(), 0);
            self.record(NodeKind::Ending(Ending::Weak), end);
        }
        Ok(())
    }

    /// Drop `/* ... */` comments that open the line, so they never affect layering.
    fn skip_leading_comments<'t>(&mut self, mut content: &'t str, at: usize) -> &'t str {
        let start = symbols::as_str(SymbolId::BlockCommentStart);
        while let Some(rest) = content.strip_prefix(start) {
            match rest.find(BLOCK_COMMENT_END) {
                Some(end) => content = rest[end + BLOCK_COMMENT_END.len()..].trim_start_matches(' '),
                None => {
                    self.block_comment = Some(self.span_at(at, start.len()));
                    return "";
                }
            }
        }
        content
    }

    fn apply_directive(&mut self, directive: Result<Directive, String>) -> Result<(), CompileError> {
        let span = self.span_at(0, 0);
        match directive {
            Err(message) => {
                self.lexical(errors::syntax(message, span))?;
                self.err.debug("ignore the directive");
            }
            Ok(Directive::Define { target, replacement }) => {
                self.err
                    .debug(format_args!("define {target:?} as {replacement:?}"));
                self.macros.define(target, replacement);
            }
            Ok(Directive::Undef { target }) => {
                if !self.macros.undef(&target) {
                    self.lexical(errors::syntax(format!("\"{target}\" is not defined"), span))?;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CompileError> {
        if let Some(span) = self.block_comment.take() {
            self.lexical(errors::unclosed_block_comment(span))?;
        }
        for entry in std::mem::take(&mut self.brackets) {
            self.lexical(errors::unclosed_bracket(symbols::as_str(entry.symbol), entry.span))?;
        }
        Ok(())
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// Cut `text` (which starts at byte `offset` of the line) into nodes.
    fn scan_tokens(&mut self, text: &str, offset: usize) -> Result<(), CompileError> {
        let mut rest = text;
        let mut at = offset;

        while !rest.is_empty() {
            if self.block_comment.is_some() {
                let Some(end) = rest.find(BLOCK_COMMENT_END) else {
                    return Ok(());
                };
                self.block_comment = None;
                let skip = end + BLOCK_COMMENT_END.len();
                rest = &rest[skip..];
                at += skip;
                continue;
            }

            let Some((idx, sym)) = leftmost_symbol(rest) else {
                self.record_word(rest, at)?;
                break;
            };
            if idx > 0 {
                self.record_word(&rest[..idx], at)?;
            }

            let sym_at = at + idx;
            let span = self.span_at(sym_at, sym.canonical.len());
            let mut consumed = idx + sym.canonical.len();

            match sym.category {
                SymbolCategory::Whitespace => {}
                SymbolCategory::Split => {
                    self.record_symbol(sym.id, span);
                }
                SymbolCategory::Layer => {
                    self.record_symbol(sym.id, span);
                    self.open_layer(span.after());
                }
                SymbolCategory::Quote => {
                    consumed = idx + self.scan_quoted(&rest[idx..], sym_at)?;
                }
                SymbolCategory::Separator => {
                    if self.previous.is_some_and(|p| self.tree.is_element(p)) {
                        self.record(NodeKind::Ending(Ending::Strong), span);
                    }
                }
                SymbolCategory::Comment => return Ok(()),
                SymbolCategory::BlockComment => {
                    self.block_comment = Some(span);
                }
                SymbolCategory::Open => {
                    self.record_symbol(sym.id, span);
                    let layer = self.open_layer(span.after());
                    self.brackets.push(BracketEntry {
                        symbol: sym.id,
                        layer,
                        span,
                    });
                }
                SymbolCategory::Close => self.close_bracket(sym.id, span)?,
            }

            rest = &rest[consumed..];
            at += consumed;
        }
        Ok(())
    }

    /// Scan a quoted literal at the start of `text`; returns the number of bytes consumed.
    fn scan_quoted(&mut self, text: &str, at: usize) -> Result<usize, CompileError> {
        let Some(quote) = text.chars().next() else {
            return Ok(0);
        };
        match strings::closing_quote(text, quote) {
            Some(end) => {
                let literal = &text[..end + quote.len_utf8()];
                self.record_word(literal, at)?;
                Ok(literal.len())
            }
            None => {
                self.lexical(errors::unterminated_string(self.span_at(at, text.len())))?;
                self.err.debug("treat the end of line as the closing quote");
                let literal = format!("{text}{quote}");
                self.record_word(&literal, at)?;
                Ok(text.len())
            }
        }
    }

    fn record_word(&mut self, text: &str, at: usize) -> Result<(), CompileError> {
        let span = self.span_at(at, text.len());
        match tokens::classify(text) {
            Some(kind) => {
                self.record(NodeKind::Element(Element::new(text, kind)), span);
            }
            None => {
                self.lexical(errors::unknown_token(text, span))?;
                self.err.debug(format_args!("ignore the token {text}"));
            }
        }
        Ok(())
    }

    fn record_symbol(&mut self, id: SymbolId, span: Span) -> NodeId {
        let element = Element::new(symbols::as_str(id), TokenKind::Symbol(id));
        self.record(NodeKind::Element(element), span)
    }

    /// Link a new node after the previous one (or as first child of the innermost layer).
    fn record(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = match self.previous {
            Some(prev) => {
                let parent = self.tree.parent(prev).unwrap_or(self.tree.root());
                let id = self.tree.alloc(kind, span, parent);
                self.tree.insert_after(prev, id);
                id
            }
            None => {
                let layer = self.top_layer();
                let id = self.tree.alloc(kind, span, layer);
                self.tree.push_front(layer, id);
                id
            }
        };
        self.previous = Some(id);
        id
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn span_at(&self, offset: usize, length: usize) -> Span {
        Span::new(self.line, self.config.column_base + offset + 1, length)
    }

    fn top_layer(&self) -> NodeId {
        self.layers.last().copied().unwrap_or(self.tree.root())
    }

    /// Report a lexical error, noting macro expansion on the line.
    fn lexical(&mut self, error: CompileError) -> Result<(), CompileError> {
        let error = if self.fired.is_empty() {
            error
        } else {
            error.with_note(format!("macros expanded on this line: {}", self.fired.join(", ")))
        };
        self.err.report(error)
    }
}

/// Leftmost symbol in `text`, longest on ties.
fn leftmost_symbol(text: &str) -> Option<(usize, &'static symbols::SymbolInfo)> {
    text.char_indices()
        .find_map(|(idx, _)| symbols::longest_prefix(&text[idx..]).map(|sym| (idx, sym)))
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source, config, err).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str, config: &ScannerConfig, err: &mut ErrorManager) -> Result<NodeTree, CompileError> {
    Lexer::new(source, config, err).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    fn scan(source: &str) -> (NodeTree, Vec<CompileError>) {
        let mut err = ErrorManager::tolerant();
        let tree = lex(source, &ScannerConfig::default(), &mut err).unwrap();
        (tree, err.into_errors())
    }

    fn compact(source: &str) -> String {
        let (tree, errors) = scan(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tree.to_string()
    }

    #[test]
    fn test_indentation_opens_and_closes_layers() {
        assert_eq!(compact("if a > b\n    c\nelse\n    d\n"), "if a > b [c] <w> else [d]");
    }

    #[test]
    fn test_tree_dump_positions() {
        let (tree, _) = scan("if a > b\n    c\nelse\n    d\n");
        insta::assert_snapshot!(tree.dump().trim_end(), @r#"
        Layer 0
          Keyword "if" @1:1
          Name "a" @1:4
          Symbol ">" @1:6
          Name "b" @1:8
          Layer 4
            Name "c" @2:5
          Weak
          Keyword "else" @3:1
          Layer 4
            Name "d" @4:5
        "#);
    }

    #[test]
    fn test_brackets_open_layers() {
        assert_eq!(compact("f(a, b)"), "f ( [a <s> b] <w> )");
        assert_eq!(compact("f()"), "f ( )");
        assert_eq!(compact("[1, [2]]"), "[ [1 <s> [ [2] <w> ]] <w> ]");
    }

    #[test]
    fn test_multiline_brackets() {
        assert_eq!(compact("f(\n    a\n    b\n)"), "f ( [a <w> b] <w> )");
    }

    #[test]
    fn test_lambda_arrow_opens_layer() {
        assert_eq!(compact("(x, y) => x + y"), "( [x <s> y] <w> ) => [x + y]");
        assert_eq!(compact("f = (x) ->\n    x\n"), "f = ( [x] <w> ) -> [x]");
    }

    #[test]
    fn test_maximal_munch() {
        assert_eq!(compact("a>>>=b"), "a >>> = b");
        assert_eq!(compact("a !== b ::: c"), "a !== b ::: c");
        assert_eq!(compact("a..."), "a ...");
    }

    #[test]
    fn test_float_reassembly() {
        assert_eq!(compact("x = 1.5 + a.b"), "x = 1.5 + a . b");
        assert_eq!(compact("1.2.3"), "1.2 . 3");
    }

    #[test]
    fn test_strings_and_comments() {
        assert_eq!(compact(r#"s = "a, b ; c" ; note"#), r#"s = "a, b ; c""#);
        assert_eq!(compact("c = 'x'"), "c = 'x'");
        assert_eq!(compact("a /* skip */ b"), "a b");
        assert_eq!(compact("a\n/* one\ntwo */\nb"), "a <w> b");
        assert_eq!(compact("; only a comment\nx"), "x");
    }

    #[test]
    fn test_backtick_names_are_unquoted() {
        let (tree, errors) = scan("`val` = 1");
        assert!(errors.is_empty());
        assert_eq!(tree.to_string(), "val = 1");
        let first = tree.first_child(tree.root()).unwrap();
        assert!(tree.element(first).unwrap().is_valid_name());
    }

    #[test]
    fn test_root_indent_is_relative() {
        assert_eq!(compact("  a\n  b\n      c"), "a <w> b [c]");
    }

    #[test]
    fn test_define_and_undef() {
        assert_eq!(
            compact("define \"ONE\" as \"1\"\nx = ONE ; ONE stays\nundef \"ONE\"\ny = ONE"),
            "x = 1 <w> y = ONE"
        );
    }

    #[test]
    fn test_unterminated_string_is_closed_at_line_end() {
        let (tree, errors) = scan("s = \"abc");
        assert_eq!(tree.to_string(), "s = \"abc\"");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "end of string not found");
        assert_eq!(errors[0].span.column, 5);
    }

    #[test]
    fn test_illegal_indentation_rounds_up() {
        let (tree, errors) = scan("a\n   b");
        assert_eq!(tree.to_string(), "a [b]");
        assert_eq!(errors[0].kind, ErrorKind::Indentation);
        assert_eq!(errors[0].message, "the indentation should be 4 spaces");
    }

    #[test]
    fn test_too_deep_opens_one_layer() {
        let (tree, errors) = scan("a\n        b\nc");
        assert_eq!(tree.to_string(), "a [b] <w> c");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Indentation);
    }

    #[test]
    fn test_mismatched_bracket_is_assumed_closed() {
        let (tree, errors) = scan("f(a]");
        assert_eq!(tree.to_string(), "f ( [a] <w> )");
        assert_eq!(errors[0].message, "expecting ), but got ]");
    }

    #[test]
    fn test_stray_tokens_move_into_bracket_layer() {
        let (tree, errors) = scan("foo(a\nb)");
        assert_eq!(tree.to_string(), "foo ( [a <w> b] <w> )");
        assert_eq!(errors[0].message, "indentation of b should be 4");
    }

    #[test]
    fn test_unknown_token_is_dropped() {
        let (tree, errors) = scan("a = 1x + 2");
        assert_eq!(tree.to_string(), "a = + 2");
        assert_eq!(errors[0].kind, ErrorKind::UnknownToken);
        assert_eq!(errors[0].message, "unknown token 1x");
    }

    #[test]
    fn test_unclosed_bracket_is_reported() {
        let (_, errors) = scan("f(a");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "( is never closed");
    }

    #[test]
    fn test_fast_fail_stops_at_first_error() {
        let mut err = ErrorManager::fast_fail();
        let e = lex("a = 1x\nb = 2y", &ScannerConfig::default(), &mut err).unwrap_err();
        assert_eq!(e.message, "unknown token 1x");
    }

    #[test]
    fn test_line_and_column_bases() {
        let mut err = ErrorManager::tolerant();
        let config = ScannerConfig {
            indentation: 2,
            line_base: 10,
            column_base: 100,
        };
        let tree = lex("a\n  b", &config, &mut err).unwrap();
        assert_eq!(tree.to_string(), "a [b]");
        let layer = tree.children(tree.root()).find(|n| tree.is_layer(*n)).unwrap();
        let b = tree.first_child(layer).unwrap();
        assert_eq!(tree.span(b), Span::new(12, 103, 1));
    }
}
