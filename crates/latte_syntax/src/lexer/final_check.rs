//! Post-pass over a freshly scanned tree.
//!
//! Applied recursively to every layer:
//! 1. drop endings that are not directly followed by an element;
//! 2. strip backtick quoting from names;
//! 3. merge `int . int` into one float literal;
//! 4. unlink layers without children, and put a WEAK ending between every other layer and the
//!    node that follows it.

use super::tokens::TokenKind;
use super::tree::{Ending, NodeId, NodeKind, NodeTree};
use crate::ast::Span;
use latte_core::lang::symbols::SymbolId;

pub(crate) fn run(tree: &mut NodeTree) {
    let root = tree.root();
    check_layer(tree, root);
}

fn check_layer(tree: &mut NodeTree, layer: NodeId) {
    let mut cursor = tree.first_child(layer);
    while let Some(id) = cursor {
        let next = tree.next(id);
        if tree.is_layer(id) {
            check_layer(tree, id);
        } else if tree.ending(id).is_some() {
            if !next.is_some_and(|n| tree.is_element(n)) {
                tree.unlink(id);
            }
        } else {
            unquote(tree, id);
            if merge_float(tree, id) {
                cursor = tree.next(id);
                continue;
            }
        }
        cursor = next;
    }

    let layers: Vec<NodeId> = tree.children(layer).filter(|c| tree.is_layer(*c)).collect();
    for child in layers {
        if tree.first_child(child).is_none() {
            tree.unlink(child);
            continue;
        }
        let Some(next) = tree.next(child) else {
            continue;
        };
        if tree.ending(next).is_none() {
            let span = Span::point(tree.span(next).line, tree.span(next).column);
            let weak = tree.alloc(NodeKind::Ending(Ending::Weak), span, layer);
            tree.insert_after(child, weak);
        }
    }
}

fn unquote(tree: &mut NodeTree, id: NodeId) {
    if let Some(e) = tree.element_mut(id) {
        if e.kind == TokenKind::Name && e.text.starts_with('`') {
            e.text = super::tokens::unquote_name(&e.text).to_string();
        }
    }
}

fn plain_int(tree: &NodeTree, id: NodeId) -> bool {
    tree.element(id)
        .is_some_and(|e| e.kind == TokenKind::Number && !e.text.contains('.'))
}

/// Merge `id . next` into `id` when both sides are numbers without a dot.
fn merge_float(tree: &mut NodeTree, id: NodeId) -> bool {
    let Some(dot) = tree.next(id) else {
        return false;
    };
    let Some(frac) = tree.next(dot) else {
        return false;
    };
    let is_dot = tree.element(dot).is_some_and(|e| e.is_symbol(SymbolId::Dot));
    if !(plain_int(tree, id) && is_dot && plain_int(tree, frac)) {
        return false;
    }

    let fraction = tree.element(frac).map(|e| e.text.clone()).unwrap_or_default();
    let span = tree.span(id);
    let mut length = 0;
    if let Some(e) = tree.element_mut(id) {
        e.text = format!("{}.{}", e.text, fraction);
        length = e.text.len();
    }
    tree.set_span(id, Span::new(span.line, span.column, length));
    tree.unlink(dot);
    tree.unlink(frac);
    true
}
