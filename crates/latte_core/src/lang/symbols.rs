//! Lexical symbol table.
//!
//! Every spelling that splits a source line into tokens: operators, delimiters, layer openers,
//! quotes, the statement separator and comment introducers. The lexer scans for the leftmost symbol
//! on a line and, when several start at the same column, takes the longest one.
//!
//! ## Notes
//! - This module is vocabulary only (spellings + categories). Scanning lives in `latte_syntax::lexer`.
//! - The block comment terminator is not a symbol: outside a comment, `*/` splits as `*` and `/`.
//!
//! ## Examples
//! ```rust
//! use latte_core::lang::symbols::{self, SymbolCategory, SymbolId};
//!
//! assert_eq!(symbols::longest_prefix(">>>= 1").map(|s| s.id), Some(SymbolId::UShr));
//! assert_eq!(symbols::category(SymbolId::FatArrow), SymbolCategory::Layer);
//! assert_eq!(symbols::closer(SymbolId::LParen), Some(SymbolId::RParen));
//! ```

use super::registry::{Since, Stability};

/// Broad lexical role of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    /// Consumed between tokens, never recorded.
    Whitespace,
    /// Operators and punctuation recorded as their own token.
    Split,
    /// Recorded, then opens a new layer (lambda arrows).
    Layer,
    /// Starts a quoted literal.
    Quote,
    /// Statement separator; becomes a STRONG ending.
    Separator,
    /// Drops the rest of the line.
    Comment,
    /// Starts a comment that runs until [`BLOCK_COMMENT_END`].
    BlockComment,
    /// Opening bracket; opens a layer.
    Open,
    /// Closing bracket; closes the layer of its opener.
    Close,
}

/// Stable identifier for every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolId {
    Space,

    // Access / paths
    Dot,
    DotDot,
    DotColon,
    Ellipsis,
    Colon,
    ColonColon,
    ColonColonColon,
    ColonEq,
    At,
    Hash,

    // Assignment
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,

    // Arithmetic / bit logic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Shl,
    Shr,
    UShr,
    Amp,
    Caret,
    CaretCaret,
    Pipe,
    Tilde,
    Bang,

    // Comparison / boolean logic
    AmpAmp,
    PipePipe,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    EqColonEq,
    BangColonEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Layer openers
    FatArrow,
    Arrow,

    // Quotes
    DoubleQuote,
    SingleQuote,
    Backtick,

    // Structure
    Comma,
    Semicolon,
    BlockCommentStart,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a symbol.
#[derive(Debug, Clone, Copy)]
pub struct SymbolInfo {
    pub id: SymbolId,
    pub canonical: &'static str,
    pub category: SymbolCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Terminator of a `/*` block comment.
pub const BLOCK_COMMENT_END: &str = "*/";

/// Escape character inside quoted literals.
pub const ESCAPE: char = '\\';

/// Registry of all symbols, in [`SymbolId`] order.
pub const SYMBOLS: &[SymbolInfo] = &[
    info(SymbolId::Space, " ", SymbolCategory::Whitespace),
    split(SymbolId::Dot, "."),
    split(SymbolId::DotDot, ".."),
    split(SymbolId::DotColon, ".:"),
    split(SymbolId::Ellipsis, "..."),
    split(SymbolId::Colon, ":"),
    split(SymbolId::ColonColon, "::"),
    split(SymbolId::ColonColonColon, ":::"),
    split(SymbolId::ColonEq, ":="),
    split(SymbolId::At, "@"),
    split(SymbolId::Hash, "#"),
    split(SymbolId::Assign, "="),
    split(SymbolId::PlusAssign, "+="),
    split(SymbolId::MinusAssign, "-="),
    split(SymbolId::StarAssign, "*="),
    split(SymbolId::SlashAssign, "/="),
    split(SymbolId::PercentAssign, "%="),
    split(SymbolId::Plus, "+"),
    split(SymbolId::Minus, "-"),
    split(SymbolId::Star, "*"),
    split(SymbolId::Slash, "/"),
    split(SymbolId::Percent, "%"),
    split(SymbolId::PlusPlus, "++"),
    split(SymbolId::MinusMinus, "--"),
    split(SymbolId::Shl, "<<"),
    split(SymbolId::Shr, ">>"),
    split(SymbolId::UShr, ">>>"),
    split(SymbolId::Amp, "&"),
    split(SymbolId::Caret, "^"),
    split(SymbolId::CaretCaret, "^^"),
    split(SymbolId::Pipe, "|"),
    split(SymbolId::Tilde, "~"),
    split(SymbolId::Bang, "!"),
    split(SymbolId::AmpAmp, "&&"),
    split(SymbolId::PipePipe, "||"),
    split(SymbolId::EqEq, "=="),
    split(SymbolId::NotEq, "!="),
    split(SymbolId::EqEqEq, "==="),
    split(SymbolId::NotEqEq, "!=="),
    split(SymbolId::EqColonEq, "=:="),
    split(SymbolId::BangColonEq, "!:="),
    split(SymbolId::Lt, "<"),
    split(SymbolId::Gt, ">"),
    split(SymbolId::LtEq, "<="),
    split(SymbolId::GtEq, ">="),
    info(SymbolId::FatArrow, "=>", SymbolCategory::Layer),
    info(SymbolId::Arrow, "->", SymbolCategory::Layer),
    info(SymbolId::DoubleQuote, "\"", SymbolCategory::Quote),
    info(SymbolId::SingleQuote, "'", SymbolCategory::Quote),
    info(SymbolId::Backtick, "`", SymbolCategory::Quote),
    info(SymbolId::Comma, ",", SymbolCategory::Separator),
    info(SymbolId::Semicolon, ";", SymbolCategory::Comment),
    info(SymbolId::BlockCommentStart, "/*", SymbolCategory::BlockComment),
    info(SymbolId::LParen, "(", SymbolCategory::Open),
    info(SymbolId::RParen, ")", SymbolCategory::Close),
    info(SymbolId::LBracket, "[", SymbolCategory::Open),
    info(SymbolId::RBracket, "]", SymbolCategory::Close),
    info(SymbolId::LBrace, "{", SymbolCategory::Open),
    info(SymbolId::RBrace, "}", SymbolCategory::Close),
];

/// Return the spelling of a symbol.
pub fn as_str(id: SymbolId) -> &'static str {
    info_for(id).canonical
}

/// Return the category of a symbol.
pub fn category(id: SymbolId) -> SymbolCategory {
    info_for(id).category
}

/// Return the full metadata entry for a symbol.
pub fn info_for(id: SymbolId) -> &'static SymbolInfo {
    &SYMBOLS[id as usize]
}

/// Resolve an exact spelling to its symbol identifier.
pub fn from_str(s: &str) -> Option<SymbolId> {
    SYMBOLS.iter().find(|sym| sym.canonical == s).map(|sym| sym.id)
}

/// Return the longest symbol that `text` starts with.
pub fn longest_prefix(text: &str) -> Option<&'static SymbolInfo> {
    SYMBOLS
        .iter()
        .filter(|sym| text.starts_with(sym.canonical))
        .max_by_key(|sym| sym.canonical.len())
}

/// Return the closing bracket for an opening bracket.
pub fn closer(open: SymbolId) -> Option<SymbolId> {
    match open {
        SymbolId::LParen => Some(SymbolId::RParen),
        SymbolId::LBracket => Some(SymbolId::RBracket),
        SymbolId::LBrace => Some(SymbolId::RBrace),
        _ => None,
    }
}

const fn info(id: SymbolId, canonical: &'static str, category: SymbolCategory) -> SymbolInfo {
    SymbolInfo {
        id,
        canonical,
        category,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

const fn split(id: SymbolId, canonical: &'static str) -> SymbolInfo {
    info(id, canonical, SymbolCategory::Split)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_id() {
        for (idx, s) in SYMBOLS.iter().enumerate() {
            assert_eq!(s.id as usize, idx, "`{}` is out of order", s.canonical);
        }
    }

    #[test]
    fn longest_prefix_prefers_maximal_munch() {
        let id = |s: &str| longest_prefix(s).map(|sym| sym.id);
        assert_eq!(id("..."), Some(SymbolId::Ellipsis));
        assert_eq!(id("::x"), Some(SymbolId::ColonColon));
        assert_eq!(id("!==a"), Some(SymbolId::NotEqEq));
        assert_eq!(id("/* c */"), Some(SymbolId::BlockCommentStart));
        assert_eq!(id("=> x"), Some(SymbolId::FatArrow));
        assert_eq!(id("abc"), None);
    }

    #[test]
    fn every_opener_has_a_closer() {
        for s in SYMBOLS.iter().filter(|s| s.category == SymbolCategory::Open) {
            let close = closer(s.id).unwrap();
            assert_eq!(category(close), SymbolCategory::Close);
        }
    }
}
