//! Latte language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, bool literal
//! spellings, declaration modifiers, operators and the lexical symbol table.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `SymbolId`) and look up spellings and
//! metadata via registry tables instead of comparing strings at every call site.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - A spelling may live in more than one registry. `+` is both a symbol (it splits tokens) and an
//!   operator (it has a priority); `in` is both a keyword and an operator.
//!
//! ## Examples
//! ```rust
//! use latte_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("elseif"), Some(KeywordId::Elseif));
//! assert_eq!(keywords::as_str(KeywordId::Elseif), "elseif");
//! ```

pub mod keywords;
pub mod literals;
pub mod modifiers;
pub mod operators;
pub mod registry;
pub mod symbols;
