//! Token kinds and the token classifier.
//!
//! The scanner cuts a line at symbols; every piece of text between symbols (and every quoted
//! literal) is classified exactly once here into a closed [`TokenKind`]. The parser dispatches on
//! the kind and never re-inspects spellings for vocabulary.

use latte_core::lang::keywords::{self, KeywordId};
use latte_core::lang::literals;
use latte_core::lang::modifiers::{self, ModifierId};
use latte_core::lang::operators::{self, OperatorId};
use latte_core::lang::symbols::{self, SymbolId};

/// Classified token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `true`, `false`, `yes`, `no`
    Bool,
    Number,
    /// `"..."` or `'...'`, quotes included in the text.
    Str,
    Modifier(ModifierId),
    Keyword(KeywordId),
    Symbol(SymbolId),
    /// Valid identifier (a backtick-quoted keyword included).
    Name,
}

impl TokenKind {
    pub fn is_keyword(self, id: KeywordId) -> bool {
        self == TokenKind::Keyword(id)
    }

    pub fn is_symbol(self, id: SymbolId) -> bool {
        self == TokenKind::Symbol(id)
    }

    /// Short description for diagnostics and tree dumps.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Bool => "Bool",
            TokenKind::Number => "Number",
            TokenKind::Str => "Str",
            TokenKind::Modifier(_) => "Modifier",
            TokenKind::Keyword(_) => "Keyword",
            TokenKind::Symbol(_) => "Symbol",
            TokenKind::Name => "Name",
        }
    }
}

/// A classified token leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub kind: TokenKind,
}

impl Element {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_valid_name(&self) -> bool {
        self.kind == TokenKind::Name
    }

    pub fn is_keyword(&self, id: KeywordId) -> bool {
        self.kind.is_keyword(id)
    }

    pub fn is_symbol(&self, id: SymbolId) -> bool {
        self.kind.is_symbol(id)
    }

    /// Operator spelled by this token, when it is a symbol or keyword with operator meaning.
    pub fn operator(&self) -> Option<OperatorId> {
        match self.kind {
            TokenKind::Symbol(_) | TokenKind::Keyword(_) => operators::from_str(&self.text),
            _ => None,
        }
    }
}

/// Classify a piece of source text.
///
/// ## Returns
/// - `None` when the text is not a bool, modifier, number, string, keyword, symbol or valid name.
///
/// ## Notes
/// - Order matters: `true` is a bool before it could be a name, `val` a modifier, `if` a keyword.
pub fn classify(text: &str) -> Option<TokenKind> {
    if is_bool(text) {
        return Some(TokenKind::Bool);
    }
    if let Some(id) = modifiers::from_str(text) {
        return Some(TokenKind::Modifier(id));
    }
    if is_number(text) {
        return Some(TokenKind::Number);
    }
    if is_string(text) {
        return Some(TokenKind::Str);
    }
    if let Some(id) = keywords::from_str(text) {
        return Some(TokenKind::Keyword(id));
    }
    if let Some(id) = symbols::from_str(text) {
        return Some(TokenKind::Symbol(id));
    }
    if is_valid_name(text) {
        return Some(TokenKind::Name);
    }
    None
}

pub fn is_bool(text: &str) -> bool {
    literals::from_str(text).is_some()
}

/// Parse a bool literal spelling; anything that is not a true spelling is `false`.
pub fn bool_value(text: &str) -> bool {
    literals::from_str(text).is_some_and(literals::value)
}

/// Digits with an optional fraction, an optional exponent and an optional `f`/`d` suffix.
pub fn is_number(text: &str) -> bool {
    let body = text.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(text);
    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (body, None),
    };
    let (int, frac) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(int) && frac.is_none_or(digits) && exponent.is_none_or(digits)
}

/// `"..."` or `'...'` with at least the two quotes.
pub fn is_string(text: &str) -> bool {
    text.len() > 1
        && ((text.starts_with('"') && text.ends_with('"')) || (text.starts_with('\'') && text.ends_with('\'')))
}

/// Identifier grammar shared with the target runtime: `[A-Za-z$_][A-Za-z0-9$_]*`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '$' || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '$' || c == '_')
}

/// A non-keyword identifier, or any identifier quoted with backticks.
pub fn is_valid_name(text: &str) -> bool {
    if let Some(inner) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        return is_identifier(inner);
    }
    is_identifier(text) && !keywords::is_keyword(text)
}

/// Strip backtick quoting from a valid name.
pub fn unquote_name(text: &str) -> &str {
    text.strip_prefix('`').and_then(|t| t.strip_suffix('`')).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_order() {
        assert_eq!(classify("yes"), Some(TokenKind::Bool));
        assert_eq!(classify("val"), Some(TokenKind::Modifier(ModifierId::Val)));
        assert_eq!(classify("12"), Some(TokenKind::Number));
        assert_eq!(classify("\"a b\""), Some(TokenKind::Str));
        assert_eq!(classify("'c'"), Some(TokenKind::Str));
        assert_eq!(classify("elseif"), Some(TokenKind::Keyword(KeywordId::Elseif)));
        assert_eq!(classify("::"), Some(TokenKind::Symbol(SymbolId::ColonColon)));
        assert_eq!(classify("$value_1"), Some(TokenKind::Name));
        assert_eq!(classify("`if`"), Some(TokenKind::Name));
        assert_eq!(classify("1abc"), None);
        assert_eq!(classify("`1`"), None);
    }

    #[test]
    fn bool_spellings_follow_the_registry() {
        for b in literals::BOOLS {
            assert_eq!(classify(b.canonical), Some(TokenKind::Bool));
            assert_eq!(bool_value(b.canonical), b.value);
        }
        assert!(!is_bool("True"));
        assert!(!bool_value("maybe"));
    }

    #[test]
    fn numbers() {
        for ok in ["0", "123", "1.5", "2e10", "3f", "4D", "1.5e3"] {
            assert!(is_number(ok), "{ok}");
        }
        for bad in ["", "1.", ".5", "e5", "1e", "0x10", "1_000"] {
            assert!(!is_number(bad), "{bad}");
        }
    }

    #[test]
    fn backticks_are_stripped() {
        assert_eq!(unquote_name("`val`"), "val");
        assert_eq!(unquote_name("plain"), "plain");
    }
}
