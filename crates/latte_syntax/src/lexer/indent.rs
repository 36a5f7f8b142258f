//! Layer tracking for the lexer.
//!
//! Indentation and brackets both map onto the same layer stack: a line one step deeper than the
//! innermost layer opens a new layer, a shallower line closes layers until the indentation
//! matches, and a closing bracket closes everything opened since its opener.

use super::Lexer;
use super::tree::{Layer, NodeId, NodeKind};
use crate::ast::Span;
use crate::diagnostics::{CompileError, errors};
use latte_core::lang::symbols::{self, SymbolId};

impl<'a> Lexer<'a> {
    /// Reconcile the layer stack with a line indented by `spaces`.
    pub(super) fn apply_indentation(&mut self, spaces: usize, offset: usize) -> Result<(), CompileError> {
        let width = self.config.indentation;
        let span = self.span_at(offset + spaces, 1);
        let root = *self.root_indent.get_or_insert(spaces);

        let mut indent = match spaces.checked_sub(root) {
            Some(indent) => indent,
            None => {
                self.lexical(errors::illegal_indentation(width, span))?;
                self.err.debug("treat the line as top level");
                0
            }
        };
        if indent % width != 0 {
            self.lexical(errors::illegal_indentation(width, span))?;
            indent = indent.div_ceil(width) * width;
            self.err.debug(format_args!("round the indentation up to {indent}"));
        }

        let current = self.tree.indent(self.top_layer());
        if current > indent {
            self.close_layers_to(indent + width, span)?;
        } else if current + width == indent {
            self.open_layer(span);
        } else if current < indent {
            self.lexical(errors::illegal_indentation(width, span))?;
            self.err.debug("open a single layer");
            self.open_layer(span);
        }
        Ok(())
    }

    /// Pop layers until the one with indent `target` was closed; it becomes the previous node.
    fn close_layers_to(&mut self, target: usize, span: Span) -> Result<(), CompileError> {
        let mut nearest = None;
        while self.layers.len() > 1 {
            let top = self.top_layer();
            let indent = self.tree.indent(top);
            if indent < target {
                break;
            }
            self.layers.pop();
            nearest = Some(top);
            if indent == target {
                self.previous = Some(top);
                return Ok(());
            }
        }

        self.lexical(errors::illegal_indentation(self.config.indentation, span))?;
        if let Some(layer) = nearest {
            self.err.debug("continue after the nearest closed layer");
            self.previous = Some(layer);
        }
        Ok(())
    }

    /// Open a layer one step deeper than the innermost one, after the previous node.
    pub(super) fn open_layer(&mut self, span: Span) -> NodeId {
        let indent = self.tree.indent(self.top_layer()) + self.config.indentation;
        let id = self.record(
            NodeKind::Layer(Layer {
                indent,
                first_child: None,
            }),
            span,
        );
        self.layers.push(id);
        self.previous = None;
        id
    }

    /// Close the innermost open bracket with `closer`.
    pub(super) fn close_bracket(&mut self, closer: SymbolId, span: Span) -> Result<(), CompileError> {
        let Some(entry) = self.brackets.pop() else {
            self.lexical(errors::unexpected_token(symbols::as_str(closer), span))?;
            self.err.debug("ignore the closing bracket");
            return Ok(());
        };

        let expected = symbols::closer(entry.symbol).unwrap_or(closer);
        if expected != closer {
            self.lexical(errors::expecting(
                symbols::as_str(expected),
                symbols::as_str(closer),
                span,
            ))?;
            self.err.debug(format_args!(
                "assume {} closes the {} at {}",
                symbols::as_str(closer),
                symbols::as_str(entry.symbol),
                entry.span
            ));
        }

        let layer = entry.layer;
        let layer_indent = self.tree.indent(layer);

        if let Some(stray) = self.tree.next(layer) {
            let text = self.describe(stray);
            let stray_span = self.tree.span(stray);
            self.lexical(errors::syntax(
                format!("indentation of {text} should be {layer_indent}"),
                stray_span,
            ))?;
            self.err.debug("move the following nodes into the bracket");
            self.tree.adopt_following(layer);
        }

        match self.layers.iter().rposition(|l| *l == layer) {
            Some(pos) => self.layers.truncate(pos),
            None => {
                while self.layers.len() > 1 && self.tree.indent(self.top_layer()) >= layer_indent {
                    self.layers.pop();
                }
                let parent_indent = self.tree.indent(self.top_layer());
                if parent_indent + self.config.indentation != layer_indent {
                    self.lexical(errors::illegal_indentation(self.config.indentation, span))?;
                    self.err.debug(format_args!(
                        "continue in the layer opened by {}",
                        symbols::as_str(entry.symbol)
                    ));
                }
            }
        }

        self.previous = Some(layer);
        self.record_symbol(expected, span);
        Ok(())
    }

    fn describe(&self, id: NodeId) -> String {
        match self.tree.element(id) {
            Some(e) => e.text.clone(),
            None if self.tree.is_layer(id) => "layer".to_string(),
            None => "ending".to_string(),
        }
    }
}
