//! Parser for the Latte programming language
//!
//! Walks the layered node tree produced by [`crate::lexer`] and builds the AST. One [`Parser`]
//! handles one layer; nested layers are handed to child parsers.
//!
//! ## Examples
//!
//! ```rust
//! use latte_syntax::diagnostics::ErrorManager;
//! use latte_syntax::lexer::{self, ScannerConfig};
//! use latte_syntax::parser;
//!
//! let mut err = ErrorManager::tolerant();
//! let tree = lexer::lex("add(a, b)\n    return a + b\n", &ScannerConfig::default(), &mut err).unwrap();
//! let statements = parser::parse(&tree, &mut err).unwrap();
//! assert_eq!(statements.len(), 1);
//! assert!(!err.has_errors());
//! ```

use std::collections::HashSet;

use crate::ast::*;
use crate::diagnostics::{CompileError, ErrorManager, errors};
use crate::lexer::tokens::{self, Element, TokenKind};
use crate::lexer::tree::{Ending, NodeId, NodeTree};
use latte_core::lang::keywords::{self, KeywordId};
use latte_core::lang::modifiers::{self, ModifierId};
use latte_core::lang::operators::{self, Fixity, OperatorId};
use latte_core::lang::symbols::{self, SymbolId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
