/// Parser core types and the per-layer control loop.
///
/// This chunk defines the [`Parser`] type, its mode flags, and the two loops a parser can run:
/// the statement loop and the map-entry loop used inside `{...}`.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Why the current statement was abandoned.
///
/// `Recorded` means the error already went through the [`ErrorManager`] (tolerant mode) and the
/// statement loop should resynchronize at the next ending. `Error` is a fast-fail error that has
/// to leave [`parse`] unchanged.
#[derive(Debug)]
enum ParseFail {
    Recorded,
    Error(CompileError),
}

impl From<CompileError> for ParseFail {
    fn from(error: CompileError) -> Self {
        ParseFail::Error(error)
    }
}

type PResult<T> = Result<T, ParseFail>;

/// Whether the expression loop keeps going after a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Independent mode flags of one parser.
#[derive(Debug, Clone, Copy, Default)]
struct ParseMode {
    /// Set while the clauses of a `try` statement are parsed.
    parsing_try: bool,
    /// The layer holds `key: value` entries.
    parsing_map: bool,
    /// A layer may end the current expression (conditions, class headers).
    expecting_layer: bool,
    /// An operator-like invocation argument is being parsed.
    operator_like_invocation: bool,
}

/// Parser state for one layer.
///
/// ## Notes
/// - `binary_ops` holds `None` for identifier operators (`a op b`), which rank below every
///   registered operator.
/// - `used_names` is copied into child parsers together with binder names; definitions made in a
///   child never leak back.
pub struct Parser<'a> {
    tree: &'a NodeTree,
    err: &'a mut ErrorManager,
    current: Option<NodeId>,
    /// Where an unexpected end is reported once the cursor ran off the layer.
    end: Span,
    parsed_exps: Vec<Expression>,
    binary_ops: Vec<Option<OperatorId>>,
    unary_ops: Vec<OperatorId>,
    used_names: HashSet<Ident>,
    modifiers: Vec<Spanned<ModifierId>>,
    annos: Vec<Spanned<Anno>>,
    mode: ParseMode,
}

impl<'a> Parser<'a> {
    /// Create a parser positioned on the first child of `layer`.
    pub fn new(tree: &'a NodeTree, err: &'a mut ErrorManager, layer: NodeId) -> Self {
        let end = tree
            .last_child(layer)
            .map_or_else(|| tree.span(layer), |last| tree.span(last).after());
        Self {
            tree,
            err,
            current: tree.first_child(layer),
            end,
            parsed_exps: Vec::new(),
            binary_ops: Vec::new(),
            unary_ops: Vec::new(),
            used_names: HashSet::new(),
            modifiers: Vec::new(),
            annos: Vec::new(),
            mode: ParseMode::default(),
        }
    }

    /// Parse every statement of the layer.
    ///
    /// ## Errors
    /// Returns the first error in fast-fail mode. In tolerant mode errors are recorded in the
    /// [`ErrorManager`], the offending statement is dropped, and parsing resumes after the next
    /// ending.
    pub fn run(mut self) -> Result<Vec<Statement>, CompileError> {
        if self.mode.parsing_map {
            return self.run_map();
        }

        let mut statements = Vec::new();
        loop {
            let statement = match self.parse_statement() {
                Ok(statement) => statement,
                Err(ParseFail::Error(e)) => return Err(e),
                Err(ParseFail::Recorded) => {
                    self.err.debug("skip to the end of the statement");
                    self.reset_stacks();
                    self.skip_to_ending();
                    continue;
                }
            };
            if self.current.is_none() && statement.is_none() {
                break;
            }

            if let Some(first) = self.parsed_exps.first() {
                let leftover: Vec<&str> = self.parsed_exps.iter().map(|e| e.node.describe()).collect();
                self.err.syntax(
                    format!("got tokens which are no where to place: {}", leftover.join(", ")),
                    first.span,
                )?;
                self.err.debug("drop the leftover operands");
            }
            self.reset_stacks();

            if let Some(statement) = statement {
                statements.push(statement);
            }
            self.advance();
        }

        self.require_no_pending()?;
        Ok(statements)
    }

    /// Map-mode loop: the statements are alternating key and value expressions.
    fn run_map(mut self) -> Result<Vec<Statement>, CompileError> {
        let mut entries = Vec::new();
        while self.current.is_some() {
            match self.parse_map_entry() {
                Ok(Some((key, value))) => {
                    let (key_span, value_span) = (key.span, value.span);
                    entries.push(Spanned::new(Stmt::Expr(key), key_span));
                    entries.push(Spanned::new(Stmt::Expr(value), value_span));
                }
                Ok(None) => {}
                Err(ParseFail::Error(e)) => return Err(e),
                Err(ParseFail::Recorded) => {
                    self.err.debug("drop the map entry");
                    self.skip_to_ending();
                }
            }
            self.reset_stacks();
            self.advance();
        }
        Ok(entries)
    }

    fn parse_map_entry(&mut self) -> PResult<Option<(Expression, Expression)>> {
        let Some(id) = self.current else {
            return Ok(None);
        };
        if !self.tree.is_element(id) {
            return Ok(None);
        }

        let start = self.tree.span(id);
        self.parse_expression()?;
        let Some(key) = self.parsed_exps.pop() else {
            return self.fail(errors::syntax("key is not set", start));
        };

        let Some(colon) = self.current.filter(|c| self.is_symbol_at(*c, SymbolId::Colon)) else {
            let got = self.describe_current();
            let span = self.current_span();
            return self.fail(errors::expecting(":", &got, span));
        };
        let value_missing = match self.tree.next(colon) {
            None => true,
            Some(n) => self.tree.ending(n).is_some(),
        };
        if value_missing {
            return self.fail(errors::syntax("value is not set", self.tree.span(colon)));
        }

        self.next_required()?;
        self.parse_expression()?;
        let Some(value) = self.parsed_exps.pop() else {
            return self.fail(errors::syntax("value is not set", self.tree.span(colon)));
        };
        if let Some(id) = self.current.filter(|c| self.tree.is_element(*c)) {
            let got = self.describe(id);
            return self.fail(errors::expecting(",", &got, self.tree.span(id)));
        }
        Ok(Some((key, value)))
    }

    fn reset_stacks(&mut self) {
        self.parsed_exps.clear();
        self.binary_ops.clear();
        self.unary_ops.clear();
    }
}
