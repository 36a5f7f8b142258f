/// Expression parsing.
///
/// One loop over the cursor drives two stacks: operands (`parsed_exps`) and pending binary
/// operators (`binary_ops`). A handler pushes at most one operand and then either lets the loop
/// continue or stops it so that an enclosing handler can combine what was parsed.
///
/// ## Notes
/// - A binary operator stops the loop when the operator on top of the stack binds at least as
///   tight, which makes equal ranks left-associative.
/// - While a prefix operator waits for its operand every binary operator stops the loop, so
///   `-a + b` is `(-a) + b`.
/// - Identifier operators (`a op b`) rank below every registered operator and take their
///   operand with the flag `operator_like_invocation` set, so `a op b op c` nests to the right
///   only through commas.
impl<'a> Parser<'a> {
    // ========================================================================
    // Loop
    // ========================================================================

    /// Run the expression loop from the cursor until a handler stops it or the cursor leaves
    /// the expression.
    ///
    /// ## Errors
    /// - Unexpected new layer when a layer shows up where none is expected.
    fn parse_expression(&mut self) -> PResult<()> {
        while let Some(id) = self.current {
            let Some(element) = self.element_at(id) else {
                if self.tree.is_layer(id) && !self.mode.expecting_layer {
                    return self.fail(errors::unexpected_new_layer(self.tree.span(id)));
                }
                return Ok(());
            };
            if self.expression_step(id, element)? == Flow::Stop {
                return Ok(());
            }
        }
        Ok(())
    }

    fn expression_step(&mut self, id: NodeId, element: &'a Element) -> PResult<Flow> {
        let span = self.tree.span(id);
        if element.kind != TokenKind::Name {
            self.require_no_pending()?;
        }

        let operator = element.operator();
        if self.parsed_exps.is_empty() {
            if let Some(op) = operator.filter(|op| operators::has_fixity(*op, Fixity::PrefixAtStart)) {
                return self.parse_prefix(op, span);
            }
        }
        if let Some(op) = operator.filter(|op| operators::has_fixity(*op, Fixity::Infix)) {
            return self.parse_binary(op, span);
        }

        match element.kind {
            TokenKind::Number => self.push_literal(Expr::Number(element.text.clone()), span),
            TokenKind::Bool => self.push_literal(Expr::Bool(tokens::bool_value(&element.text)), span),
            TokenKind::Str => self.push_literal(Expr::Str(element.text.clone()), span),
            TokenKind::Keyword(keyword) => self.keyword_expression(keyword, element, span),
            TokenKind::Symbol(symbol) => self.symbol_expression(id, symbol, operator, element, span),
            TokenKind::Name => self.name_expression(id, element, span),
            TokenKind::Modifier(_) => self.skip_unexpected(element, span),
        }
    }

    fn push_literal(&mut self, expr: Expr, span: Span) -> PResult<Flow> {
        self.parsed_exps.push(Spanned::new(expr, span));
        self.advance();
        Ok(Flow::Continue)
    }

    fn skip_unexpected(&mut self, element: &Element, span: Span) -> PResult<Flow> {
        self.err.unexpected(&element.text, span)?;
        self.err.debug("skip the token");
        self.advance();
        Ok(Flow::Stop)
    }

    /// Pop the operand an operator applies to, or abandon the statement.
    fn take_operand(&mut self, element: &Element, span: Span) -> PResult<Expression> {
        match self.parsed_exps.pop() {
            Some(e) => Ok(e),
            None => self.fail(errors::unexpected_token(&element.text, span)),
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn parse_binary(&mut self, op: OperatorId, span: Span) -> PResult<Flow> {
        if self.parsed_exps.is_empty() {
            return self.fail(errors::unexpected_token(operators::as_str(op), span));
        }
        if !self.unary_ops.is_empty() {
            return Ok(Flow::Stop);
        }
        if let Some(&top) = self.binary_ops.last() {
            if operators::rank_or_lowest(top) <= operators::rank_or_lowest(Some(op)) {
                self.binary_ops.pop();
                return Ok(Flow::Stop);
            }
        }

        let Some(left) = self.parsed_exps.pop() else {
            return Ok(Flow::Stop);
        };
        self.binary_ops.push(Some(op));
        let right = self.next_exp(false)?;
        self.parsed_exps.push(Spanned::new(
            Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ));
        Ok(Flow::Continue)
    }

    fn parse_prefix(&mut self, op: OperatorId, span: Span) -> PResult<Flow> {
        self.unary_ops.push(op);
        let operand = self.next_exp(false);
        self.unary_ops.pop();
        let operand = operand?;
        self.parsed_exps.push(Spanned::new(
            Expr::UnaryPrefix {
                op,
                operand: Box::new(operand),
            },
            span,
        ));
        Ok(Flow::Continue)
    }

    fn parse_postfix(&mut self, op: OperatorId, element: &Element, span: Span) -> PResult<Flow> {
        let operand = self.take_operand(element, span)?;
        let operand_span = operand.span;
        self.parsed_exps.push(Spanned::new(
            Expr::UnaryPostfix {
                op,
                operand: Box::new(operand),
            },
            operand_span,
        ));
        self.advance();
        Ok(Flow::Continue)
    }

    /// `target op value`; a bare unbound name with `=` defines a new variable.
    fn parse_assign(&mut self, op: OperatorId, element: &Element, span: Span) -> PResult<Flow> {
        let target = self.take_operand(element, span)?;
        let target_span = target.span;

        let assigned = match target.node {
            Expr::Access(access)
                if op == OperatorId::Assign && access.is_bare() && !self.used_names.contains(&access.name) =>
            {
                self.used_names.insert(access.name.clone());
                let mut def = VariableDef::bare(access.name);
                def.init = Some(Box::new(self.next_exp(false)?));
                Expr::VariableDef(def)
            }
            node @ (Expr::Access(_) | Expr::Index { .. }) => {
                let value = self.next_exp(false)?;
                Expr::Assignment {
                    target: Box::new(Spanned::new(node, target_span)),
                    op,
                    value: Box::new(value),
                }
            }
            Expr::VariableDef(mut def) if op == OperatorId::Assign => {
                def.init = Some(Box::new(self.next_exp(false)?));
                Expr::VariableDef(def)
            }
            other => return self.fail(errors::expecting("assignable variable", other.describe(), target_span)),
        };
        self.parsed_exps.push(Spanned::new(assigned, target_span));
        Ok(Flow::Continue)
    }

    // ========================================================================
    // Keywords
    // ========================================================================

    fn keyword_expression(&mut self, keyword: KeywordId, element: &Element, span: Span) -> PResult<Flow> {
        match keyword {
            KeywordId::Null => self.push_literal(Expr::Null, span),
            KeywordId::Undefined => self.push_literal(Expr::Undefined, span),
            KeywordId::Type => {
                self.next_required()?;
                let ty = self.parse_type()?;
                self.parsed_exps.push(Spanned::new(Expr::TypeOf(ty), span));
                Ok(Flow::Continue)
            }
            KeywordId::As => {
                let Some(expr) = self.parsed_exps.pop() else {
                    return self.fail(errors::expecting("expression", &element.text, span));
                };
                let expr_span = expr.span;
                self.next_required()?;
                let ty = self.parse_type()?;
                self.parsed_exps.push(Spanned::new(
                    Expr::As {
                        expr: Box::new(expr),
                        ty,
                    },
                    expr_span,
                ));
                Ok(Flow::Continue)
            }
            KeywordId::Require => {
                let required = self.next_exp(false)?;
                self.parsed_exps.push(Spanned::new(Expr::Require(Box::new(required)), span));
                Ok(Flow::Continue)
            }
            KeywordId::New => self.parse_new(span),
            _ => self.skip_unexpected(element, span),
        }
    }

    /// `new T(args)` or `new T`.
    fn parse_new(&mut self, span: Span) -> PResult<Flow> {
        let target = self.next_exp(false)?;
        let invocation = match target.node {
            Expr::Invocation(invocation) => {
                if invocation.invoke_with_names {
                    self.err.syntax("constructing an object does not support named arguments", target.span)?;
                }
                invocation
            }
            Expr::Access(access) => Invocation::new(Spanned::new(Expr::Access(access), target.span), Vec::new()),
            other => return self.fail(errors::expecting("class to construct", other.describe(), target.span)),
        };
        self.parsed_exps.push(Spanned::new(Expr::New(invocation), span));
        Ok(Flow::Continue)
    }

    // ========================================================================
    // Symbols
    // ========================================================================

    fn symbol_expression(
        &mut self,
        id: NodeId,
        symbol: SymbolId,
        operator: Option<OperatorId>,
        element: &Element,
        span: Span,
    ) -> PResult<Flow> {
        if let Some(op) = operator {
            if operators::has_fixity(op, Fixity::Prefix) {
                return self.parse_prefix(op, span);
            }
            if operators::has_fixity(op, Fixity::Postfix) {
                return self.parse_postfix(op, element, span);
            }
            if operators::has_fixity(op, Fixity::Assign) {
                return self.parse_assign(op, element, span);
            }
        }

        match symbol {
            SymbolId::Dot => self.parse_access(element, span),
            SymbolId::Colon if self.mode.parsing_map => Ok(Flow::Stop),
            SymbolId::Colon => self.parse_type_spec(element, span),
            SymbolId::LBracket => self.parse_bracket(span),
            SymbolId::LBrace => self.parse_map(span),
            SymbolId::LParen if is_lambda(self.tree, id) => self.parse_lambda(span),
            SymbolId::LParen => self.parse_paren(span),
            _ => self.skip_unexpected(element, span),
        }
    }

    /// `target.name`
    fn parse_access(&mut self, element: &Element, span: Span) -> PResult<Flow> {
        let target = self.take_operand(element, span)?;
        self.next_required()?;
        let Some(name) = self.current_element().filter(|e| e.is_valid_name()) else {
            return self.expect_failed("valid name");
        };
        let name_span = self.current_span();
        self.parsed_exps
            .push(Spanned::new(Expr::Access(Access::member(target, name.text.clone())), name_span));
        self.advance();
        Ok(Flow::Continue)
    }

    /// `name : T` defines a typed variable.
    fn parse_type_spec(&mut self, element: &Element, span: Span) -> PResult<Flow> {
        let target = self.take_operand(element, span)?;
        let target_span = target.span;
        let mut def = match target.node {
            Expr::Access(access) if access.is_bare() => {
                self.bind_name(&access.name, target_span)?;
                VariableDef::bare(access.name)
            }
            Expr::VariableDef(def) => def,
            other => return self.fail(errors::expecting("variable definition", other.describe(), target_span)),
        };
        self.next_required()?;
        def.ty = Some(self.parse_type()?);
        self.parsed_exps.push(Spanned::new(Expr::VariableDef(def), target_span));
        Ok(Flow::Continue)
    }

    /// `[a, b]` as an array literal, or `target[i]` as an index access.
    fn parse_bracket(&mut self, span: Span) -> PResult<Flow> {
        let target = self.parsed_exps.pop();
        self.next_required()?;
        let items = match self.current_layer() {
            Some(layer) => {
                let items = self.expression_list(layer)?;
                self.next_required()?;
                items
            }
            None => Vec::new(),
        };
        self.expect_symbol(SymbolId::RBracket)?;

        let expr = match target {
            Some(target) => {
                let target_span = target.span;
                Spanned::new(
                    Expr::Index {
                        target: Box::new(target),
                        args: items,
                    },
                    target_span,
                )
            }
            None => Spanned::new(Expr::Array(items), span),
        };
        self.parsed_exps.push(expr);
        self.advance();
        Ok(Flow::Continue)
    }

    /// `{k: v, ...}`
    fn parse_map(&mut self, span: Span) -> PResult<Flow> {
        self.next_required()?;
        let mut entries = Vec::new();
        if let Some(layer) = self.current_layer() {
            let statements = self.sub_parse(layer, true, &[], true)?;
            let mut items = statements.into_iter().filter_map(|s| match s.node {
                Stmt::Expr(e) => Some(e),
                _ => None,
            });
            while let (Some(key), Some(value)) = (items.next(), items.next()) {
                entries.push((key, value));
            }
            self.next_required()?;
        }
        self.expect_symbol(SymbolId::RBrace)?;
        self.parsed_exps.push(Spanned::new(Expr::Map(entries), span));
        self.advance();
        Ok(Flow::Continue)
    }

    /// `f(args)`, `(expr)` or a procedure `(stmts)`.
    fn parse_paren(&mut self, span: Span) -> PResult<Flow> {
        self.next_required()?;
        let Some(layer) = self.current_layer() else {
            self.expect_symbol(SymbolId::RParen)?;
            match self.parsed_exps.pop() {
                Some(callee) => {
                    let callee_span = callee.span;
                    self.parsed_exps
                        .push(Spanned::new(Expr::Invocation(Invocation::new(callee, Vec::new())), callee_span));
                }
                None => {
                    self.err.syntax("it should be the method to invoke", span)?;
                    self.err.debug("ignore the empty parentheses");
                }
            }
            self.advance();
            return Ok(Flow::Continue);
        };

        let mut statements = self.block(layer, &[])?;
        self.next_required()?;
        self.expect_symbol(SymbolId::RParen)?;

        let expr = match self.parsed_exps.pop() {
            Some(callee) => {
                let callee_span = callee.span;
                let mut args = Vec::with_capacity(statements.len());
                for statement in statements {
                    match statement.node {
                        Stmt::Expr(e) => args.push(e),
                        _ => self.err.unexpected_token("argument", "statement", statement.span)?,
                    }
                }
                let invoke_with_names = !args.is_empty() && args.iter().all(is_named_arg);
                Spanned::new(
                    Expr::Invocation(Invocation {
                        callee: Box::new(callee),
                        args,
                        invoke_with_names,
                    }),
                    callee_span,
                )
            }
            None => {
                let single = if statements.len() == 1 { statements.pop() } else { None };
                match single {
                    Some(Spanned {
                        node: Stmt::Expr(e), ..
                    }) => e,
                    Some(other) => Spanned::new(Expr::Procedure(vec![other]), span),
                    None => Spanned::new(Expr::Procedure(statements), span),
                }
            }
        };
        self.parsed_exps.push(expr);
        self.advance();
        Ok(Flow::Continue)
    }

    /// `(params) => body`, `(params) -> body` or `name => body`; the body is a layer.
    fn parse_lambda(&mut self, span: Span) -> PResult<Flow> {
        let mut params = Vec::new();
        if self.at_symbol(SymbolId::LParen) {
            self.next_required()?;
            if let Some(layer) = self.current_layer() {
                let statements = self.fresh_block(layer)?;
                params = self.to_parameters(statements)?;
                self.next_required()?;
            }
            self.expect_symbol(SymbolId::RParen)?;
        } else if let Some(e) = self.current_element() {
            params.push(Spanned::new(VariableDef::bare(e.text.clone()), span));
        }

        self.next_required()?;
        self.next_required()?;
        let Some(layer) = self.current_layer() else {
            return self.expect_failed("new layer");
        };
        let names = param_names(&params);
        let body = single_expression_body(self.block(layer, &names)?);

        self.parsed_exps.push(Spanned::new(Expr::Lambda { params, body }, span));
        self.advance();
        Ok(Flow::Continue)
    }

    // ========================================================================
    // Names
    // ========================================================================

    fn name_expression(&mut self, id: NodeId, element: &Element, span: Span) -> PResult<Flow> {
        if is_lambda(self.tree, id) {
            self.require_no_pending()?;
            return self.parse_lambda(span);
        }
        if is_package(self.tree, id) {
            self.require_no_pending()?;
            let access = self.parse_package()?;
            self.parsed_exps.push(Spanned::new(Expr::Access(access), span));
            return Ok(Flow::Continue);
        }
        if self.parsed_exps.is_empty() {
            return self.parse_var(element, span);
        }
        self.parse_operator_like_invocation(id, element, span)
    }

    /// A name at the start of an expression: a definition when modifiers or annotations are
    /// pending, an access otherwise.
    fn parse_var(&mut self, element: &Element, span: Span) -> PResult<Flow> {
        let name = element.text.clone();
        let expr = if self.has_pending() {
            self.bind_name(&name, span)?;
            let mut def = VariableDef::bare(name);
            def.modifiers = std::mem::take(&mut self.modifiers);
            def.annos = std::mem::take(&mut self.annos);
            Expr::VariableDef(def)
        } else {
            Expr::Access(Access::name(name))
        };
        self.push_literal(expr, span)
    }

    /// `a op b, c` is `a.op(b, c)`; `a op` alone is `a.op()`.
    fn parse_operator_like_invocation(&mut self, id: NodeId, element: &Element, span: Span) -> PResult<Flow> {
        if self.mode.operator_like_invocation {
            return Ok(Flow::Stop);
        }
        let has_operand = self.tree.next(id).is_some_and(|next| {
            self.tree.is_element(next) && !(self.mode.parsing_map && self.is_symbol_at(next, SymbolId::Colon))
        });
        if has_operand {
            if let Some(&top) = self.binary_ops.last() {
                if operators::rank_or_lowest(top) <= operators::rank_or_lowest(None) {
                    self.binary_ops.pop();
                    return Ok(Flow::Stop);
                }
            }
        } else if self.binary_ops.pop().is_some() {
            return Ok(Flow::Stop);
        }

        let target = self.take_operand(element, span)?;
        let callee = Spanned::new(Expr::Access(Access::member(target, element.text.clone())), span);
        let mut args = Vec::new();
        self.advance();
        if has_operand {
            self.binary_ops.push(None);
            args.push(self.get_exp(false)?);
            while self.current_ending() == Some(Ending::Strong) {
                let saved_ops = std::mem::take(&mut self.binary_ops);
                let saved_mode = self.mode.operator_like_invocation;
                self.mode.operator_like_invocation = true;
                let arg = self.next_required().and_then(|()| self.get_exp(false));
                self.mode.operator_like_invocation = saved_mode;
                self.binary_ops = saved_ops;
                args.push(arg?);
            }
        }
        self.parsed_exps
            .push(Spanned::new(Expr::Invocation(Invocation::new(callee, args)), span));
        Ok(Flow::Continue)
    }
}
