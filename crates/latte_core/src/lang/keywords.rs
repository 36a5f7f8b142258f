//! Define the reserved keyword vocabulary for the Latte language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records spellings, categories,
//! provenance and examples.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Declaration modifiers (`val`, `public`, `synchronized`, ...) are not keywords; they live in
//!   [`crate::lang::modifiers`].
//! - Some keywords are also word operators (`is`, `not`, `in`, `and`, `or`). For their priority use
//!   [`crate::lang::operators`].
//! - A keyword can still be used as an identifier when wrapped in backticks (`` `in` ``).
//!
//! ## Examples
//! ```rust
//! use latte_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("for"), Some(KeywordId::For));
//! assert_eq!(keywords::category(KeywordId::For), KeywordCategory::ControlFlow);
//! assert!(keywords::from_str("For").is_none());
//! ```

use super::registry::{Example, Since, Stability};

/// Stable identifier for every reserved keyword.
///
/// ## Notes
/// - Variant order matches [`KEYWORDS`]; `id as usize` indexes the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Elseif,
    Else,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,
    Pass,
    Try,
    Catch,
    Finally,
    Throw,
    Static,

    // Definitions
    Class,
    Interface,

    // Modules
    Package,
    Import,

    // Expressions
    Type,
    As,
    New,
    Require,
    Null,
    Undefined,

    // Word operators
    In,
    Is,
    Not,
    And,
    Or,

    // Reserved for future syntax
    Fun,
    Object,
    Match,
    Case,
}

/// Broad grouping for keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Definition,
    Module,
    Expression,
    Literal,
    Operator,
    Reserved,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Registry of all keywords, in [`KeywordId`] order.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, Since(0, 1)).with_examples(&[Example {
        code: "if a > b\n    a\nelseif a < b\n    b\nelse\n    0",
        note: Some("Branch bodies are indented layers."),
    }]),
    info(KeywordId::Elseif, "elseif", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, Since(0, 1)).with_examples(&[Example {
        code: "for i in list\n    println(i)",
        note: None,
    }]),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, Since(0, 1)).with_examples(&[Example {
        code: "do\n    i += 1\nwhile i < 10",
        note: Some("The body runs before the first check."),
    }]),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Pass, "pass", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Try, "try", KeywordCategory::ControlFlow, Since(0, 1)).with_examples(&[Example {
        code: "try\n    risky()\ncatch e : IOException\n    log(e)\nfinally\n    close()",
        note: None,
    }]),
    info(KeywordId::Catch, "catch", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Finally, "finally", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Throw, "throw", KeywordCategory::ControlFlow, Since(0, 1)),
    info(KeywordId::Static, "static", KeywordCategory::ControlFlow, Since(0, 1)),
    // Definitions
    info(KeywordId::Class, "class", KeywordCategory::Definition, Since(0, 1)).with_examples(&[Example {
        code: "class User(id, name) : Base(id), Named\n    age = 0",
        note: Some("Constructor parameters follow the name."),
    }]),
    info(KeywordId::Interface, "interface", KeywordCategory::Definition, Since(0, 1)),
    // Modules
    info(KeywordId::Package, "package", KeywordCategory::Module, Since(0, 1)).with_examples(&[Example {
        code: "package lt::lang",
        note: None,
    }]),
    info(KeywordId::Import, "import", KeywordCategory::Module, Since(0, 1)).with_examples(&[Example {
        code: "import java::util::_, lt::lang::List",
        note: Some("`_` imports everything from a package or every static member of a class."),
    }]),
    // Expressions
    info(KeywordId::Type, "type", KeywordCategory::Expression, Since(0, 1)),
    info(KeywordId::As, "as", KeywordCategory::Expression, Since(0, 1)),
    info(KeywordId::New, "new", KeywordCategory::Expression, Since(0, 1)),
    info(KeywordId::Require, "require", KeywordCategory::Expression, Since(0, 1)),
    info(KeywordId::Null, "null", KeywordCategory::Literal, Since(0, 1)),
    info(KeywordId::Undefined, "undefined", KeywordCategory::Literal, Since(0, 1)),
    // Word operators
    info(KeywordId::In, "in", KeywordCategory::Operator, Since(0, 1)),
    info(KeywordId::Is, "is", KeywordCategory::Operator, Since(0, 1)),
    info(KeywordId::Not, "not", KeywordCategory::Operator, Since(0, 1)),
    info(KeywordId::And, "and", KeywordCategory::Operator, Since(0, 1)),
    info(KeywordId::Or, "or", KeywordCategory::Operator, Since(0, 1)),
    // Reserved
    reserved(KeywordId::Fun, "fun"),
    reserved(KeywordId::Object, "object"),
    reserved(KeywordId::Match, "match"),
    reserved(KeywordId::Case, "case"),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the full metadata entry for a keyword.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    &KEYWORDS[id as usize]
}

/// Resolve a spelling to its keyword identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` if `s` is a reserved keyword spelling.
pub fn is_keyword(s: &str) -> bool {
    from_str(s).is_some()
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory, since: Since) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        since,
        stability: Stability::Stable,
        examples: &[],
    }
}

const fn reserved(id: KeywordId, canonical: &'static str) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category: KeywordCategory::Reserved,
        since: Since(0, 1),
        stability: Stability::Reserved,
        examples: &[],
    }
}

impl KeywordInfo {
    const fn with_examples(mut self, examples: &'static [Example]) -> Self {
        self.examples = examples;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_id() {
        for (idx, k) in KEYWORDS.iter().enumerate() {
            assert_eq!(k.id as usize, idx, "`{}` is out of order", k.canonical);
        }
    }

    #[test]
    fn spellings_are_unique() {
        for (i, a) in KEYWORDS.iter().enumerate() {
            for b in &KEYWORDS[i + 1..] {
                assert_ne!(a.canonical, b.canonical);
            }
        }
    }

    #[test]
    fn word_operators_are_keywords() {
        for word in ["in", "is", "not", "and", "or"] {
            assert_eq!(category(from_str(word).unwrap()), KeywordCategory::Operator);
        }
    }
}
