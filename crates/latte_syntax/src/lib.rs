//! Syntax front end for the Latte language: layering lexer, precedence parser, AST, diagnostics.
//!
//! The lexer turns source text into a [`lexer::NodeTree`] whose layers mirror indentation and
//! brackets; the parser turns that tree into a list of [`ast::Statement`]s.
//!
//! ## Notes
//! - This crate is syntax-only: no name resolution, type checking or code generation.
//! - Vocabulary identity (keywords, modifiers, operators, symbols) comes from `latte_core::lang`.
//!
//! ## Examples
//! ```rust
//! use latte_syntax::diagnostics::ErrorManager;
//! use latte_syntax::lexer::{self, ScannerConfig};
//! use latte_syntax::parser;
//!
//! let mut err = ErrorManager::tolerant();
//! let tree = lexer::lex("a = 1 + 2\n", &ScannerConfig::default(), &mut err).unwrap();
//! let statements = parser::parse(&tree, &mut err).unwrap();
//! assert_eq!(statements.len(), 1);
//! assert!(!err.has_errors());
//! ```
//!
//! ## See also
//! - [`printer::render`] to turn statements back into source text.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod printer;
