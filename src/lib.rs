#![forbid(unsafe_code)]
//! Latte Programming Language Front End
//!
//! Latte is an indentation-structured, statically-typed language. This crate wires its front end
//! together: the layering lexer and the precedence parser from `latte_syntax`, the vocabulary from
//! `latte_core`, a file pipeline, and the `latte` command-line tool.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod pipeline;

pub use latte_core::lang;
pub use latte_syntax::ast;
pub use latte_syntax::diagnostics;
pub use latte_syntax::lexer;
pub use latte_syntax::parser;
pub use latte_syntax::printer;

pub use pipeline::{Analysis, FrontendError, FrontendResult, Options, analyze, read_source, scan};
