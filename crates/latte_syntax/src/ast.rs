//! Abstract Syntax Tree definitions for Latte.
//!
//! The parser produces one [`Statement`] list per layer. Statements and expressions are plain
//! owned enums: every child is embedded by value (or boxed), so the tree has no sharing and no
//! cycles.
//!
//! ## Notes
//! - Every node is wrapped in [`Spanned`], which records the line/column it came from.
//! - [`Spanned`] equality ignores the span, so two trees parsed from differently formatted sources
//!   compare equal when their structure matches.
//! - Type references reuse [`Access`]: `a::b::C` is `Access(PackageRef("a::b"), "C")` and each `[]`
//!   prefix wraps the element type as `Access(element, "[]")`.

use latte_core::lang::modifiers::ModifierId;
use latte_core::lang::operators::OperatorId;

/// Source position of a token or node.
///
/// `line` and `column` are 1-based after the scanner's configured bases are applied. A default
/// (all-zero) span marks synthetic nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl Span {
    pub fn new(line: usize, column: usize, length: usize) -> Self {
        Self { line, column, length }
    }

    /// Zero-length span at `line:column`.
    pub fn point(line: usize, column: usize) -> Self {
        Self::new(line, column, 0)
    }

    /// Zero-length span right after this one.
    pub fn after(self) -> Span {
        Span::point(self.line, self.column + self.length)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A node with source location.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    /// Wrap a node built by hand (tests, desugaring) with a synthetic span.
    pub fn synthetic(node: T) -> Self {
        Self::new(node, Span::default())
    }
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

pub type Ident = String;
pub type Statement = Spanned<Stmt>;
pub type Expression = Spanned<Expr>;

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression in statement position (including variable definitions).
    Expr(Expression),
    /// `package a::b::c`
    Package(String),
    /// `import a::b::_, a::b::C, C.Inner._`
    Import(Vec<Spanned<Import>>),
    Class(ClassDef),
    Interface(InterfaceDef),
    Method(MethodDef),
    /// `if` / `elseif` / `else` chain; the `else` branch has no condition.
    If(Vec<Spanned<IfBranch>>),
    For(ForLoop),
    /// `while cond` or `do ... while cond`.
    While(WhileLoop),
    Try(TryStmt),
    Throw(Expression),
    Synchronized(SyncBlock),
    /// `static` scope.
    Static(Vec<Statement>),
    Return(Option<Expression>),
    /// `pass` or `...`
    Pass,
    Break,
    Continue,
}

/// One import entry.
///
/// - `import a::b::_` → `package = Some("a::b")`, `import_all = true`
/// - `import a::b::C` → `access = Some(a::b::C)`
/// - `import a::b::C._` → `access = Some(a::b::C)`, `import_all = true` (static members)
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub package: Option<String>,
    pub access: Option<Access>,
    pub import_all: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: Ident,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub annos: Vec<Spanned<Anno>>,
    pub params: Vec<Spanned<VariableDef>>,
    /// The super class when it is written as a constructor call (`: Base(a)`).
    pub super_invocation: Option<Invocation>,
    /// Other super types, in source order.
    pub super_types: Vec<Access>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDef {
    pub name: Ident,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub annos: Vec<Spanned<Anno>>,
    pub super_types: Vec<Access>,
    pub body: Vec<Statement>,
}

/// A method definition.
///
/// An empty `body` is both `m() = ...` and a typed declaration without body (`m() : T`).
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: Ident,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub annos: Vec<Spanned<Anno>>,
    pub params: Vec<Spanned<VariableDef>>,
    pub return_type: Option<Access>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfBranch {
    pub condition: Option<Expression>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub var: Ident,
    pub iterable: Expression,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub do_while: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub body: Vec<Statement>,
    pub catches: Vec<Spanned<Catch>>,
    pub finally: Vec<Statement>,
}

/// `catch [var] [: T1, T2]` with an optional handler block.
#[derive(Debug, Clone, PartialEq)]
pub struct Catch {
    pub var: Option<Ident>,
    pub types: Vec<Access>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncBlock {
    pub locks: Vec<Expression>,
    pub body: Vec<Statement>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, kept as written (`1`, `1.5`, `2e3`).
    Number(String),
    Bool(bool),
    /// String literal including its quotes.
    Str(String),
    Null,
    Undefined,

    /// `name` or `target.name`
    Access(Access),
    /// `a::b::c` in expression position.
    PackageRef(String),
    Invocation(Invocation),
    /// `target[args]`
    Index {
        target: Box<Expression>,
        args: Vec<Expression>,
    },
    /// `target op value` for an existing binding.
    Assignment {
        target: Box<Expression>,
        op: OperatorId,
        value: Box<Expression>,
    },
    Binary {
        op: OperatorId,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryPrefix {
        op: OperatorId,
        operand: Box<Expression>,
    },
    UnaryPostfix {
        op: OperatorId,
        operand: Box<Expression>,
    },

    Array(Vec<Expression>),
    /// `{k: v, ...}` in encounter order.
    Map(Vec<(Expression, Expression)>),
    Lambda {
        params: Vec<Spanned<VariableDef>>,
        body: Vec<Statement>,
    },
    /// A parenthesized block evaluated for its `return` value.
    Procedure(Vec<Statement>),
    /// `type T`
    TypeOf(Access),
    /// `expr as T`
    As {
        expr: Box<Expression>,
        ty: Access,
    },
    VariableDef(VariableDef),
    /// `new T(args)`
    New(Invocation),
    /// `require expr`
    Require(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Access {
    pub target: Option<Box<Expression>>,
    pub name: Ident,
}

impl Access {
    /// Bare name access.
    pub fn name(name: impl Into<Ident>) -> Self {
        Self {
            target: None,
            name: name.into(),
        }
    }

    /// Member access on `target`.
    pub fn member(target: Expression, name: impl Into<Ident>) -> Self {
        Self {
            target: Some(Box::new(target)),
            name: name.into(),
        }
    }

    /// Return `true` for a bare name (no target).
    pub fn is_bare(&self) -> bool {
        self.target.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The invoked expression; an [`Access`] for every named call.
    pub callee: Box<Expression>,
    pub args: Vec<Expression>,
    /// Set when arguments are written `name = value`.
    pub invoke_with_names: bool,
}

impl Invocation {
    pub fn new(callee: Expression, args: Vec<Expression>) -> Self {
        Self {
            callee: Box::new(callee),
            args,
            invoke_with_names: false,
        }
    }

    /// The callee as an access path, when it is one.
    pub fn access(&self) -> Option<&Access> {
        match &self.callee.node {
            Expr::Access(access) => Some(access),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: Ident,
    pub ty: Option<Access>,
    pub init: Option<Box<Expression>>,
    pub modifiers: Vec<Spanned<ModifierId>>,
    pub annos: Vec<Spanned<Anno>>,
}

impl VariableDef {
    /// An untyped, uninitialized definition without modifiers.
    pub fn bare(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            init: None,
            modifiers: Vec::new(),
            annos: Vec::new(),
        }
    }
}

/// `@Name(arg = value, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Anno {
    pub name: Access,
    pub args: Vec<AnnoArg>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnoArg {
    pub name: Ident,
    pub value: Expression,
}

impl Expr {
    /// Short human-readable name of the variant, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Expr::Number(_) => "number literal",
            Expr::Bool(_) => "bool literal",
            Expr::Str(_) => "string literal",
            Expr::Null => "null",
            Expr::Undefined => "undefined",
            Expr::Access(_) => "access",
            Expr::PackageRef(_) => "package reference",
            Expr::Invocation(_) => "invocation",
            Expr::Index { .. } => "index access",
            Expr::Assignment { .. } => "assignment",
            Expr::Binary { .. } => "binary operation",
            Expr::UnaryPrefix { .. } | Expr::UnaryPostfix { .. } => "unary operation",
            Expr::Array(_) => "array literal",
            Expr::Map(_) => "map literal",
            Expr::Lambda { .. } => "lambda",
            Expr::Procedure(_) => "procedure",
            Expr::TypeOf(_) => "type-of",
            Expr::As { .. } => "type cast",
            Expr::VariableDef(_) => "variable definition",
            Expr::New(_) => "construction",
            Expr::Require(_) => "require",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_equality_ignores_position() {
        let a = Spanned::new(Expr::Number("1".into()), Span::new(1, 1, 1));
        let b = Spanned::new(Expr::Number("1".into()), Span::new(9, 4, 1));
        assert_eq!(a, b);
        assert_ne!(a, Spanned::synthetic(Expr::Number("2".into())));
    }

    #[test]
    fn span_after_points_past_the_token() {
        assert_eq!(Span::new(3, 5, 2).after(), Span::point(3, 7));
    }
}
