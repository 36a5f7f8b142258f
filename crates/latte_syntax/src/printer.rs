//! Source printer for Latte syntax trees.
//!
//! Walks a statement list and emits indentation-structured source that parses back to the same
//! tree (spans aside).
//!
//! ## Notes
//! - Annotations and modifiers are printed on the line of the definition they belong to.
//! - Operator-like invocations (`a op b`) come out in call form (`a.op(b)`), which parses to the
//!   same invocation.
//! - Parentheses are only added where the parser would otherwise group differently.
//! - A lambda whose body needs its own block has to end its line; the printer emits it as written.

use std::borrow::Cow;

use crate::ast::*;
use crate::lexer::tokens::{self, TokenKind};
use latte_core::lang::modifiers::{self, ModifierId};
use latte_core::lang::operators::{self, Fixity, OperatorId};

/// Indentation width used by [`render`].
pub const DEFAULT_INDENT: usize = 4;

/// Render statements as source text indented by [`DEFAULT_INDENT`] spaces per layer.
pub fn render(statements: &[Statement]) -> String {
    render_with_indent(statements, DEFAULT_INDENT)
}

/// Render statements as source text indented by `width` spaces per layer.
pub fn render_with_indent(statements: &[Statement], width: usize) -> String {
    let mut printer = Printer::new(0, width);
    printer.statements(statements);
    printer.out
}

/// Output buffer with the current layer depth.
struct Printer {
    out: String,
    level: usize,
    width: usize,
}

impl Printer {
    fn new(level: usize, width: usize) -> Self {
        Self {
            out: String::new(),
            level,
            width,
        }
    }

    fn indentation(&self) -> String {
        " ".repeat(self.level * self.width)
    }

    fn line(&mut self, text: &str) {
        let indent = self.indentation();
        self.out.push_str(&indent);
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn block(&mut self, body: &[Statement]) {
        self.level += 1;
        self.statements(body);
        self.level -= 1;
    }

    /// `body` rendered one layer deeper, without the final line break.
    fn nested(&self, body: &[Statement]) -> String {
        let mut child = Printer::new(self.level + 1, self.width);
        child.statements(body);
        let len = child.out.trim_end_matches('\n').len();
        child.out.truncate(len);
        child.out
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.statement(statement);
        }
    }

    fn statement(&mut self, statement: &Statement) {
        match &statement.node {
            Stmt::Class(class) => self.class(class),
            Stmt::Interface(interface) => self.interface(interface),
            Stmt::Method(method) => self.method(method),
            Stmt::If(branches) => self.if_chain(branches),
            Stmt::For(for_loop) => {
                let header = format!(
                    "for {} in {}",
                    quote_name(&for_loop.var),
                    self.expr(&for_loop.iterable, true)
                );
                self.line(&header);
                self.block(&for_loop.body);
            }
            Stmt::While(w) if w.do_while => {
                self.line("do");
                if w.body.is_empty() {
                    self.block(&[Spanned::synthetic(Stmt::Pass)]);
                } else {
                    self.block(&w.body);
                }
                let footer = format!("while {}", self.expr(&w.condition, true));
                self.line(&footer);
            }
            Stmt::While(w) => {
                let header = format!("while {}", self.expr(&w.condition, true));
                self.line(&header);
                self.block(&w.body);
            }
            Stmt::Try(t) => self.try_statement(t),
            Stmt::Synchronized(sync) => {
                let header = format!("synchronized({})", self.items(&sync.locks));
                self.line(&header);
                self.block(&sync.body);
            }
            Stmt::Static(body) => {
                self.line("static");
                self.block(body);
            }
            _ => {
                if let Some(text) = self.inline_statement(statement, true) {
                    self.line(&text);
                }
            }
        }
    }

    /// Statements that fit on one line; `None` for statements that open a block.
    fn inline_statement(&self, statement: &Statement, tail: bool) -> Option<String> {
        let text = match &statement.node {
            Stmt::Expr(e) => self.expr(e, tail),
            Stmt::Package(package) => format!("package {package}"),
            Stmt::Import(imports) => {
                let list: Vec<String> = imports.iter().map(|i| self.import(&i.node)).collect();
                format!("import {}", list.join(", "))
            }
            Stmt::Throw(e) => format!("throw {}", self.expr(e, tail)),
            Stmt::Return(Some(e)) => format!("return {}", self.expr(e, tail)),
            Stmt::Return(None) => "return".to_string(),
            Stmt::Pass => "pass".to_string(),
            Stmt::Break => "break".to_string(),
            Stmt::Continue => "continue".to_string(),
            _ => return None,
        };
        Some(text)
    }

    fn import(&self, import: &Import) -> String {
        match (&import.package, &import.access) {
            (Some(package), _) => format!("{package}::_"),
            (None, Some(access)) if import.import_all => format!("{}._", self.access(access)),
            (None, Some(access)) => self.access(access),
            (None, None) => "_".to_string(),
        }
    }

    fn if_chain(&mut self, branches: &[Spanned<IfBranch>]) {
        for (i, branch) in branches.iter().enumerate() {
            let header = match &branch.node.condition {
                None => "else".to_string(),
                Some(condition) if i == 0 => format!("if {}", self.expr(condition, true)),
                Some(condition) => format!("elseif {}", self.expr(condition, true)),
            };
            self.line(&header);
            self.block(&branch.node.body);
        }
    }

    fn try_statement(&mut self, t: &TryStmt) {
        self.line("try");
        self.block(&t.body);
        for catch in &t.catches {
            let catch = &catch.node;
            let mut header = "catch".to_string();
            if let Some(var) = &catch.var {
                header.push(' ');
                header.push_str(&quote_name(var));
            }
            if !catch.types.is_empty() {
                let types: Vec<String> = catch.types.iter().map(|ty| self.access(ty)).collect();
                header.push_str(" : ");
                header.push_str(&types.join(", "));
            }
            self.line(&header);
            self.block(&catch.body);
        }
        if !t.finally.is_empty() {
            self.line("finally");
            self.block(&t.finally);
        }
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    fn class(&mut self, class: &ClassDef) {
        let mut header = self.prefix(&class.annos, &class.modifiers);
        header.push_str("class ");
        header.push_str(&quote_name(&class.name));
        if !class.params.is_empty() {
            header.push_str(&self.params(&class.params));
        }

        let mut supers: Vec<String> = Vec::new();
        if let Some(invocation) = &class.super_invocation {
            supers.push(self.invocation(invocation));
        }
        supers.extend(class.super_types.iter().map(|ty| self.access(ty)));
        if !supers.is_empty() {
            header.push_str(" : ");
            header.push_str(&supers.join(", "));
        }

        self.line(&header);
        self.block(&class.body);
    }

    fn interface(&mut self, interface: &InterfaceDef) {
        let mut header = self.prefix(&interface.annos, &interface.modifiers);
        header.push_str("interface ");
        header.push_str(&quote_name(&interface.name));
        if !interface.super_types.is_empty() {
            let supers: Vec<String> = interface.super_types.iter().map(|ty| self.access(ty)).collect();
            header.push_str(" : ");
            header.push_str(&supers.join(", "));
        }
        self.line(&header);
        self.block(&interface.body);
    }

    fn method(&mut self, method: &MethodDef) {
        let mut header = self.prefix(&method.annos, &method.modifiers);
        header.push_str(&quote_name(&method.name));
        header.push_str(&self.params(&method.params));
        if let Some(ty) = &method.return_type {
            header.push_str(" : ");
            header.push_str(&self.access(ty));
        }

        match (method.return_type.is_some(), method.body.as_slice()) {
            (false, []) => header.push_str(" = ..."),
            (true, []) => {}
            (
                _,
                [
                    Spanned {
                        node: Stmt::Return(Some(value)),
                        ..
                    },
                ],
            ) => {
                header.push_str(" = ");
                header.push_str(&self.expr(value, true));
            }
            (_, body) => {
                self.line(&header);
                self.block(body);
                return;
            }
        }
        self.line(&header);
    }

    fn params(&self, params: &[Spanned<VariableDef>]) -> String {
        let last = params.len().saturating_sub(1);
        let list: Vec<String> = params
            .iter()
            .enumerate()
            .map(|(i, p)| self.variable_def(&p.node, i == last))
            .collect();
        format!("({})", list.join(", "))
    }

    /// Annotations and modifiers in front of a definition, each followed by a space.
    fn prefix(&self, annos: &[Spanned<Anno>], mods: &[Spanned<ModifierId>]) -> String {
        let mut out = String::new();
        for anno in annos {
            out.push_str(&self.anno(&anno.node));
            out.push(' ');
        }
        for modifier in mods {
            out.push_str(modifiers::as_str(modifier.node));
            out.push(' ');
        }
        out
    }

    fn anno(&self, anno: &Anno) -> String {
        let name = self.access(&anno.name);
        if anno.args.is_empty() {
            return format!("@{name}");
        }
        let last = anno.args.len() - 1;
        let args: Vec<String> = anno
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| format!("{} = {}", quote_name(&arg.name), self.expr(&arg.value, i == last)))
            .collect();
        format!("@{name}({})", args.join(", "))
    }

    fn variable_def(&self, def: &VariableDef, tail: bool) -> String {
        let mut out = self.prefix(&def.annos, &def.modifiers);
        out.push_str(&quote_name(&def.name));
        if let Some(ty) = &def.ty {
            out.push_str(" : ");
            out.push_str(&self.access(ty));
        }
        if let Some(init) = &def.init {
            out.push_str(" = ");
            out.push_str(&self.expr(init, tail));
        }
        out
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Render an expression; `tail` tells whether nothing follows it before the end of the line
    /// or the closing bracket.
    fn expr(&self, e: &Expression, tail: bool) -> String {
        match &e.node {
            Expr::Number(n) => n.clone(),
            Expr::Bool(b) => b.to_string(),
            Expr::Str(s) => s.clone(),
            Expr::Null => "null".to_string(),
            Expr::Undefined => "undefined".to_string(),
            Expr::Access(access) => self.access(access),
            Expr::PackageRef(package) => package.clone(),
            Expr::Invocation(invocation) => self.invocation(invocation),
            Expr::Index { target, args } => format!("{}[{}]", self.target(target), self.items(args)),
            Expr::Assignment { target, op, value } => format!(
                "{} {} {}",
                self.expr(target, false),
                operators::as_str(*op),
                self.expr(value, tail)
            ),
            Expr::Binary { op, left, right } => self.binary(*op, left, right),
            Expr::UnaryPrefix { op, operand } => {
                let inner = if is_primary(operand) {
                    self.expr(operand, false)
                } else {
                    self.paren(operand)
                };
                format!("{}{inner}", operators::as_str(*op))
            }
            Expr::UnaryPostfix { op, operand } => format!("{}{}", self.target(operand), operators::as_str(*op)),
            Expr::Array(items) => format!("[{}]", self.items(items)),
            Expr::Map(entries) => {
                let last = entries.len().saturating_sub(1);
                let list: Vec<String> = entries
                    .iter()
                    .enumerate()
                    .map(|(i, (k, v))| format!("{}: {}", self.expr(k, false), self.expr(v, i == last)))
                    .collect();
                format!("{{{}}}", list.join(", "))
            }
            Expr::Lambda { params, body } => self.lambda(params, body, tail),
            Expr::Procedure(body) => self.procedure(body),
            Expr::TypeOf(ty) => format!("type {}", self.access(ty)),
            Expr::As { expr, ty } => format!("{} as {}", self.target(expr), self.access(ty)),
            Expr::VariableDef(def) => self.variable_def(def, tail),
            Expr::New(invocation) => format!("new {}", self.invocation(invocation)),
            Expr::Require(required) => format!("require {}", self.expr(required, tail)),
        }
    }

    fn paren(&self, e: &Expression) -> String {
        format!("({})", self.expr(e, true))
    }

    /// An expression followed by `.`, `[`, `(` or a postfix operator.
    fn target(&self, e: &Expression) -> String {
        if is_primary(e) && !matches!(e.node, Expr::Number(_)) {
            self.expr(e, false)
        } else {
            self.paren(e)
        }
    }

    /// Comma-separated expressions inside brackets.
    fn items(&self, items: &[Expression]) -> String {
        let last = items.len().saturating_sub(1);
        let list: Vec<String> = items.iter().enumerate().map(|(i, e)| self.expr(e, i == last)).collect();
        list.join(", ")
    }

    fn access(&self, access: &Access) -> String {
        let Some(target) = &access.target else {
            return quote_name(&access.name).into_owned();
        };
        if access.name == "[]" {
            return format!("[]{}", self.expr(target, false));
        }
        match &target.node {
            Expr::PackageRef(package) => format!("{package}::{}", quote_name(&access.name)),
            _ => format!("{}.{}", self.target(target), quote_name(&access.name)),
        }
    }

    fn invocation(&self, invocation: &Invocation) -> String {
        let callee = match invocation.access() {
            Some(access) => self.access(access),
            None => self.target(&invocation.callee),
        };
        format!("{callee}({})", self.items(&invocation.args))
    }

    fn binary(&self, op: OperatorId, left: &Expression, right: &Expression) -> String {
        let rank = operators::rank_or_lowest(Some(op));
        let left = match &left.node {
            Expr::Binary { op: inner, .. } if operators::rank_or_lowest(Some(*inner)) > rank => self.paren(left),
            _ if binds_as_operand(left) => self.expr(left, false),
            _ => self.paren(left),
        };
        let right = match &right.node {
            Expr::Binary { op: inner, .. } if operators::rank_or_lowest(Some(*inner)) >= rank => self.paren(right),
            _ if binds_as_operand(right) => self.expr(right, false),
            _ => self.paren(right),
        };
        format!("{left} {} {right}", operators::as_str(op))
    }

    fn lambda(&self, params: &[Spanned<VariableDef>], body: &[Statement], tail: bool) -> String {
        let head = format!("{} =>", self.params(params));
        let text = match body {
            [
                Spanned {
                    node: Stmt::Return(Some(value)),
                    ..
                },
            ] => format!("{head} {}", self.expr(value, true)),
            _ => match self.inline_statements(body) {
                Some(inline) => format!("{head} {inline}"),
                None => return format!("{head}\n{}", self.nested(body)),
            },
        };
        if tail { text } else { format!("({text})") }
    }

    fn procedure(&self, body: &[Statement]) -> String {
        match self.inline_statements(body) {
            Some(inline) => format!("({inline})"),
            None => format!("(\n{}\n{})", self.nested(body), self.indentation()),
        }
    }

    /// Comma-separated statements when every one of them fits on a line.
    fn inline_statements(&self, body: &[Statement]) -> Option<String> {
        if body.is_empty() {
            return None;
        }
        let last = body.len() - 1;
        let list = body
            .iter()
            .enumerate()
            .map(|(i, s)| self.inline_statement(s, i == last))
            .collect::<Option<Vec<String>>>()?;
        Some(list.join(", "))
    }
}

/// Expressions that never need parentheses in operand position.
fn is_primary(e: &Expression) -> bool {
    matches!(
        e.node,
        Expr::Number(_)
            | Expr::Bool(_)
            | Expr::Str(_)
            | Expr::Null
            | Expr::Undefined
            | Expr::Access(_)
            | Expr::PackageRef(_)
            | Expr::Invocation(_)
            | Expr::Index { .. }
            | Expr::Array(_)
            | Expr::Map(_)
            | Expr::Procedure(_)
            | Expr::UnaryPostfix { .. }
    )
}

/// Operands a binary operator can take without parentheses.
///
/// Only prefix operators allowed after an operand (`!`, `~`) stay bare; `-a` on either side of
/// a binary operator is parenthesized.
fn binds_as_operand(e: &Expression) -> bool {
    match &e.node {
        Expr::As { .. } => true,
        Expr::UnaryPrefix { op, .. } => operators::has_fixity(*op, Fixity::Prefix),
        _ => is_primary(e),
    }
}

/// Names that would lex as something else are written with backticks.
fn quote_name(name: &str) -> Cow<'_, str> {
    if tokens::is_identifier(name) && !matches!(tokens::classify(name), Some(TokenKind::Name)) {
        Cow::Owned(format!("`{name}`"))
    } else {
        Cow::Borrowed(name)
    }
}
