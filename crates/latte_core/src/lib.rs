//! Provide the canonical, pure vocabulary of the Latte language.
//!
//! This crate holds the fixed lexical grammar shared by the lexer, the parser and tooling: reserved
//! keywords, declaration modifiers, operators (with their priority ordering) and the split/delimiter
//! symbol table.
//!
//! ## Notes
//!
//! - No IO, no global state, no syntax-tree types. Everything lives in `const` tables.
//! - Syntax rules are enforced by `latte_syntax`; this crate only answers "what is this spelling".

pub mod lang;
