// Look-ahead predicates and small AST helpers.
//
// The predicates only read the node tree; they never move a parser cursor.

/// Shape of a method definition, decided by looking past the parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MethodShape {
    /// `name(params)` followed by a block.
    Normal,
    /// `name(params) = ...`, or a bare header carrying modifiers or annotations.
    Empty,
    /// `name(params) = expr`
    OneStatement,
    /// `name(params) : T ...`
    Typed,
}

fn is_symbol_node(tree: &NodeTree, id: NodeId, symbol: SymbolId) -> bool {
    tree.element(id).is_some_and(|e| e.is_symbol(symbol))
}

/// The node after a `(` that closes it: the `)` itself, or the `)` following one layer.
fn closing_paren(tree: &NodeTree, open: NodeId) -> Option<NodeId> {
    let mut close = tree.next_skipping_endings(open)?;
    if tree.is_layer(close) {
        close = tree.next_skipping_endings(close)?;
    }
    is_symbol_node(tree, close, SymbolId::RParen).then_some(close)
}

/// Decide whether the name at `name` starts a method definition.
///
/// `pending` tells whether modifiers or annotations wait for a definition; a bare `name()` is
/// only a method declaration then.
fn method_shape(tree: &NodeTree, name: NodeId, pending: bool) -> Option<MethodShape> {
    let open = tree
        .next_skipping_endings(name)
        .filter(|n| is_symbol_node(tree, *n, SymbolId::LParen))?;
    let close = closing_paren(tree, open)?;

    let Some(after) = tree.next(close).filter(|n| tree.ending(*n).is_none()) else {
        return pending.then_some(MethodShape::Empty);
    };
    if tree.is_layer(after) {
        return Some(MethodShape::Normal);
    }
    if is_symbol_node(tree, after, SymbolId::Colon) {
        return Some(MethodShape::Typed);
    }
    if is_symbol_node(tree, after, SymbolId::Assign) {
        return match tree.next_skipping_endings(after) {
            Some(n) if is_symbol_node(tree, n, SymbolId::Ellipsis) => Some(MethodShape::Empty),
            Some(n) if tree.is_element(n) => Some(MethodShape::OneStatement),
            _ => None,
        };
    }
    None
}

/// `x => ...`, `x -> ...`, `(params) => ...` or `(params) -> ...` starting at `id`.
fn is_lambda(tree: &NodeTree, id: NodeId) -> bool {
    let is_arrow = |n: NodeId| is_symbol_node(tree, n, SymbolId::FatArrow) || is_symbol_node(tree, n, SymbolId::Arrow);
    let Some(e) = tree.element(id) else {
        return false;
    };
    if e.is_valid_name() {
        return tree.next_skipping_endings(id).is_some_and(is_arrow);
    }
    if !e.is_symbol(SymbolId::LParen) {
        return false;
    }
    closing_paren(tree, id)
        .and_then(|close| tree.next_skipping_endings(close))
        .is_some_and(is_arrow)
}

/// `name :: name` starting at `id`.
fn is_package(tree: &NodeTree, id: NodeId) -> bool {
    let is_name = |n: NodeId| tree.element(n).is_some_and(Element::is_valid_name);
    if !is_name(id) {
        return false;
    }
    tree.next(id)
        .filter(|n| is_symbol_node(tree, *n, SymbolId::ColonColon))
        .and_then(|n| tree.next(n))
        .is_some_and(is_name)
}

/// `synchronized` used as a statement (`synchronized(lock)`) rather than as a modifier.
fn is_sync(tree: &NodeTree, id: NodeId) -> bool {
    tree.next_skipping_endings(id)
        .is_some_and(|n| is_symbol_node(tree, n, SymbolId::LParen))
}

/// Keywords that open a statement of their own.
fn starts_statement(keyword: KeywordId) -> bool {
    matches!(
        keyword,
        KeywordId::If
            | KeywordId::For
            | KeywordId::While
            | KeywordId::Do
            | KeywordId::Static
            | KeywordId::Try
            | KeywordId::Catch
            | KeywordId::Finally
            | KeywordId::Throw
            | KeywordId::Return
            | KeywordId::Pass
            | KeywordId::Break
            | KeywordId::Continue
            | KeywordId::Package
            | KeywordId::Import
    )
}

fn param_names(params: &[Spanned<VariableDef>]) -> Vec<Ident> {
    params.iter().map(|p| p.node.name.clone()).collect()
}

/// Wrap an expression body as `return expr`.
fn returning(value: Expression) -> Statement {
    let span = value.span;
    Spanned::new(Stmt::Return(Some(value)), span)
}

/// A lambda body that is a single expression returns it.
fn single_expression_body(mut body: Vec<Statement>) -> Vec<Statement> {
    if body.len() != 1 {
        return body;
    }
    match body.pop() {
        Some(Spanned {
            node: Stmt::Expr(e), ..
        }) => vec![returning(e)],
        Some(other) => vec![other],
        None => body,
    }
}

/// `name = value` argument, either a fresh definition or an assignment to a bare name.
fn is_named_arg(arg: &Expression) -> bool {
    match &arg.node {
        Expr::VariableDef(def) => def.init.is_some() && def.ty.is_none() && def.modifiers.is_empty() && def.annos.is_empty(),
        Expr::Assignment {
            target,
            op: OperatorId::Assign,
            ..
        } => matches!(&target.node, Expr::Access(access) if access.is_bare()),
        _ => false,
    }
}

/// Split a named argument into its name and value; other arguments come back unchanged.
fn split_named_arg(arg: Expression) -> Result<(Ident, Expression), Expression> {
    if !is_named_arg(&arg) {
        return Err(arg);
    }
    let span = arg.span;
    match arg.node {
        Expr::VariableDef(VariableDef {
            name, init: Some(init), ..
        }) => Ok((name, *init)),
        Expr::Assignment { target, op, value } => {
            let target = *target;
            match target.node {
                Expr::Access(access) => Ok((access.name, *value)),
                node => Err(Spanned::new(
                    Expr::Assignment {
                        target: Box::new(Spanned::new(node, target.span)),
                        op,
                        value,
                    },
                    span,
                )),
            }
        }
        node => Err(Spanned::new(node, span)),
    }
}

/// Literal values allowed as annotation arguments.
fn is_constant(e: &Expression) -> bool {
    match &e.node {
        Expr::Number(_) | Expr::Bool(_) | Expr::Str(_) | Expr::Null | Expr::Access(_) | Expr::PackageRef(_) => true,
        Expr::Array(items) => items.iter().all(is_constant),
        Expr::UnaryPrefix {
            op: OperatorId::Plus | OperatorId::Minus,
            operand,
        } => matches!(operand.node, Expr::Number(_)),
        _ => false,
    }
}
