//! The layered node tree produced by the lexer.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Every node knows its parent
//! layer and its previous/next sibling; a [`Layer`] additionally knows its first child. Relinking
//! (bracket recovery, the final check) only rewrites indices, so no node is ever shared between
//! layers.
//!
//! ## Notes
//! - The root is a layer with indent `0`.
//! - `Display` renders a compact one-line form used by tests: layers as `[...]`, weak endings as
//!   `<w>` and strong endings as `<s>`.

use std::fmt;

use super::tokens::Element;
use crate::ast::Span;

/// Index of a node in its [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Strength of a statement boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ending {
    /// End of line; skipped when an expression needs to continue.
    Weak,
    /// `,`; never skipped silently.
    Strong,
}

/// Entry into one deeper indentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub indent: usize,
    pub first_child: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Ending(Ending),
    Layer(Layer),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
}

/// Arena of nodes rooted at a layer of indent `0`.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    pub(crate) fn new() -> Self {
        let root = Node {
            kind: NodeKind::Layer(Layer {
                indent: 0,
                first_child: None,
            }),
            span: Span::default(),
            parent: None,
            prev: None,
            next: None,
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_child(self.root()).is_none()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id) {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn layer(&self, id: NodeId) -> Option<&Layer> {
        match self.kind(id) {
            NodeKind::Layer(l) => Some(l),
            _ => None,
        }
    }

    pub fn ending(&self, id: NodeId) -> Option<Ending> {
        match self.kind(id) {
            NodeKind::Ending(e) => Some(*e),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element(_))
    }

    pub fn is_layer(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Layer(_))
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.layer(id).and_then(|l| l.first_child)
    }

    pub fn indent(&self, id: NodeId) -> usize {
        self.layer(id).map_or(0, |l| l.indent)
    }

    /// Next sibling that is not an ending.
    pub fn next_skipping_endings(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.next(id);
        while let Some(n) = cursor {
            if self.ending(n).is_none() {
                return Some(n);
            }
            cursor = self.next(n);
        }
        None
    }

    /// Iterate over the children of a layer.
    pub fn children(&self, layer: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            cursor: self.first_child(layer),
        }
    }

    pub fn last_child(&self, layer: NodeId) -> Option<NodeId> {
        self.children(layer).last()
    }

    // ========================================================================
    // Mutation (lexer only)
    // ========================================================================

    /// Allocate a detached node under `parent`.
    pub(crate) fn alloc(&mut self, kind: NodeKind, span: Span, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            span,
            parent: Some(parent),
            prev: None,
            next: None,
        });
        id
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id).kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn set_span(&mut self, id: NodeId, span: Span) {
        self.node_mut(id).span = span;
    }

    fn set_first_child(&mut self, layer: NodeId, child: Option<NodeId>) {
        if let NodeKind::Layer(l) = &mut self.node_mut(layer).kind {
            l.first_child = child;
        }
    }

    /// Link a detached node right after `at`, in `at`'s layer.
    pub(crate) fn insert_after(&mut self, at: NodeId, id: NodeId) {
        let next = self.next(at);
        let parent = self.parent(at);
        {
            let node = self.node_mut(id);
            node.prev = Some(at);
            node.next = next;
            node.parent = parent;
        }
        self.node_mut(at).next = Some(id);
        if let Some(n) = next {
            self.node_mut(n).prev = Some(id);
        }
    }

    /// Link a detached node as the first child of `layer`.
    pub(crate) fn push_front(&mut self, layer: NodeId, id: NodeId) {
        let first = self.first_child(layer);
        {
            let node = self.node_mut(id);
            node.prev = None;
            node.next = first;
            node.parent = Some(layer);
        }
        if let Some(f) = first {
            self.node_mut(f).prev = Some(id);
        }
        self.set_first_child(layer, Some(id));
    }

    /// Remove a node from its sibling list. The node stays allocated but unreachable.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        let (prev, next, parent) = {
            let n = self.node(id);
            (n.prev, n.next, n.parent)
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => {
                if let Some(layer) = parent {
                    self.set_first_child(layer, next);
                }
            }
        }
        if let Some(n) = next {
            self.node_mut(n).prev = prev;
        }
        let node = self.node_mut(id);
        node.prev = None;
        node.next = None;
    }

    /// Move every sibling following `layer` to the end of `layer`'s children.
    pub(crate) fn adopt_following(&mut self, layer: NodeId) {
        let Some(first) = self.next(layer) else {
            return;
        };
        self.node_mut(layer).next = None;
        self.node_mut(first).prev = None;

        let mut cursor = Some(first);
        while let Some(n) = cursor {
            self.node_mut(n).parent = Some(layer);
            cursor = self.next(n);
        }

        match self.last_child(layer) {
            Some(last) => {
                self.node_mut(last).next = Some(first);
                self.node_mut(first).prev = Some(last);
            }
            None => self.set_first_child(layer, Some(first)),
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Multi-line dump of the tree with kinds and positions.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root(), 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let pad = "  ".repeat(depth);
        let span = self.span(id);
        match self.kind(id) {
            NodeKind::Element(e) => {
                out.push_str(&format!("{pad}{} {:?} @{span}\n", e.kind.describe(), e.text));
            }
            NodeKind::Ending(Ending::Weak) => out.push_str(&format!("{pad}Weak\n")),
            NodeKind::Ending(Ending::Strong) => out.push_str(&format!("{pad}Strong\n")),
            NodeKind::Layer(l) => {
                out.push_str(&format!("{pad}Layer {}\n", l.indent));
                for child in self.children(id) {
                    self.dump_node(child, depth + 1, out);
                }
            }
        }
    }

    fn fmt_layer(&self, layer: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for child in self.children(layer) {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            match self.kind(child) {
                NodeKind::Element(e) => write!(f, "{}", e.text)?,
                NodeKind::Ending(Ending::Weak) => write!(f, "<w>")?,
                NodeKind::Ending(Ending::Strong) => write!(f, "<s>")?,
                NodeKind::Layer(_) => {
                    write!(f, "[")?;
                    self.fmt_layer(child, f)?;
                    write!(f, "]")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for NodeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_layer(self.root(), f)
    }
}

/// Iterator over a sibling list.
pub struct Siblings<'a> {
    tree: &'a NodeTree,
    cursor: Option<NodeId>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cursor?;
        self.cursor = self.tree.next(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokens::TokenKind;

    fn name(tree: &mut NodeTree, parent: NodeId, text: &str) -> NodeId {
        tree.alloc(NodeKind::Element(Element::new(text, TokenKind::Name)), Span::default(), parent)
    }

    #[test]
    fn unlink_first_child_moves_layer_head() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let a = name(&mut tree, root, "a");
        let b = name(&mut tree, root, "b");
        tree.push_front(root, a);
        tree.insert_after(a, b);
        assert_eq!(tree.to_string(), "a b");
        tree.unlink(a);
        assert_eq!(tree.to_string(), "b");
        assert_eq!(tree.prev(b), None);
    }

    #[test]
    fn adopt_following_appends_to_children() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let layer = tree.alloc(
            NodeKind::Layer(Layer {
                indent: 4,
                first_child: None,
            }),
            Span::default(),
            root,
        );
        tree.push_front(root, layer);
        let inner = name(&mut tree, layer, "a");
        tree.push_front(layer, inner);
        let stray = name(&mut tree, root, "b");
        tree.insert_after(layer, stray);
        assert_eq!(tree.to_string(), "[a] b");

        tree.adopt_following(layer);
        assert_eq!(tree.to_string(), "[a b]");
        assert_eq!(tree.parent(stray), Some(layer));
    }
}
