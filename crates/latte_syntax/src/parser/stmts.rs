/// Statement parsing.
///
/// This chunk dispatches on the leading token of a statement and implements the control-flow,
/// module and scope statements. Definitions (classes, interfaces, methods, annotations) are in
/// `decl.rs`.
///
/// ## Notes
/// - Every statement routine leaves the cursor on the last node it consumed; the statement loop
///   advances past it.
impl<'a> Parser<'a> {
    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Parse one statement at the cursor.
    ///
    /// ## Returns
    /// - `None` when the tokens only accumulated modifiers or annotations, or the layer ran out.
    fn parse_statement(&mut self) -> PResult<Option<Statement>> {
        let (id, element) = loop {
            let Some(id) = self.current else {
                return Ok(None);
            };
            if let Some(element) = self.element_at(id) {
                break (id, element);
            }
            if self.tree.is_layer(id) {
                self.err.unexpected_new_layer(self.tree.span(id))?;
                self.err.debug("skip the layer");
            }
            self.advance();
        };
        let span = self.tree.span(id);

        let stmt = match element.kind {
            TokenKind::Modifier(ModifierId::Synchronized) if is_sync(self.tree, id) => {
                self.require_no_pending()?;
                self.parse_sync()?
            }
            TokenKind::Modifier(modifier) => {
                self.parse_modifier(modifier, span)?;
                return Ok(None);
            }
            TokenKind::Symbol(SymbolId::At) => {
                self.parse_annotation()?;
                return Ok(None);
            }
            TokenKind::Symbol(SymbolId::Ellipsis) => {
                self.require_no_pending()?;
                Stmt::Pass
            }
            TokenKind::Keyword(KeywordId::Class) => Stmt::Class(self.parse_class()?),
            TokenKind::Keyword(KeywordId::Interface) => Stmt::Interface(self.parse_interface()?),
            TokenKind::Keyword(keyword) if starts_statement(keyword) => {
                self.require_no_pending()?;
                match self.parse_keyword_statement(keyword)? {
                    Some(stmt) => stmt,
                    None => return Ok(None),
                }
            }
            TokenKind::Name => match method_shape(self.tree, id, self.has_pending()) {
                Some(shape) => Stmt::Method(self.parse_method(shape)?),
                None => return self.parse_expression_statement(),
            },
            _ => return self.parse_expression_statement(),
        };
        Ok(Some(Spanned::new(stmt, span)))
    }

    fn parse_keyword_statement(&mut self, keyword: KeywordId) -> PResult<Option<Stmt>> {
        let stmt = match keyword {
            KeywordId::If => self.parse_if()?,
            KeywordId::For => self.parse_for()?,
            KeywordId::While => self.parse_while()?,
            KeywordId::Do => self.parse_do_while()?,
            KeywordId::Static => self.parse_static()?,
            KeywordId::Try => self.parse_try()?,
            KeywordId::Catch => {
                self.parse_catch_clause()?;
                return Ok(None);
            }
            KeywordId::Finally => {
                self.parse_finally()?;
                return Ok(None);
            }
            KeywordId::Throw => Stmt::Throw(self.next_exp(false)?),
            KeywordId::Return => self.parse_return()?,
            KeywordId::Pass => Stmt::Pass,
            KeywordId::Break => Stmt::Break,
            KeywordId::Continue => Stmt::Continue,
            KeywordId::Package => self.parse_package_declaration()?,
            KeywordId::Import => self.parse_import()?,
            _ => return Ok(None),
        };
        Ok(Some(stmt))
    }

    /// An expression in statement position; it has to end at the statement boundary.
    fn parse_expression_statement(&mut self) -> PResult<Option<Statement>> {
        loop {
            let before = (self.current, self.parsed_exps.len(), self.binary_ops.len());
            self.parse_expression()?;
            let Some(id) = self.current.filter(|id| self.tree.is_element(*id)) else {
                break;
            };
            if (self.current, self.parsed_exps.len(), self.binary_ops.len()) == before {
                let got = self.describe(id);
                return self.fail(errors::unexpected_token(&got, self.tree.span(id)));
            }
        }
        Ok(self.parsed_exps.pop().map(|e| {
            let span = e.span;
            Spanned::new(Stmt::Expr(e), span)
        }))
    }

    /// Step onto the next sibling when it is a layer.
    fn enter_next_layer(&mut self) -> Option<NodeId> {
        let next = self
            .current
            .and_then(|id| self.tree.next(id))
            .filter(|n| self.tree.is_layer(*n))?;
        self.current = Some(next);
        Some(next)
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `if cond` / `elseif cond` / `else`, each with an optional block.
    fn parse_if(&mut self) -> PResult<Stmt> {
        let mut branches = Vec::new();
        let mut reached_else = false;

        while let Some(mut id) = self.current {
            if self.tree.ending(id).is_some() {
                match self.tree.next(id) {
                    Some(next)
                        if self.is_keyword_at(next, KeywordId::Elseif) || self.is_keyword_at(next, KeywordId::Else) =>
                    {
                        self.current = Some(next);
                        id = next;
                    }
                    _ => break,
                }
            }
            let keyword = match self.element_at(id).map(|e| e.kind) {
                Some(TokenKind::Keyword(k @ (KeywordId::If | KeywordId::Elseif | KeywordId::Else))) => k,
                _ => break,
            };
            let span = self.tree.span(id);

            if reached_else {
                self.err.syntax(
                    format!(
                        "if-else statement had already reached 'else' but got {} instead",
                        keywords::as_str(keyword)
                    ),
                    span,
                )?;
                self.err.debug("skip the branch");
                self.advance();
                self.skip_to_ending();
                continue;
            }

            let condition = if keyword == KeywordId::Else {
                self.advance();
                None
            } else {
                Some(self.next_exp(true)?)
            };
            let body = match self.current_layer() {
                Some(layer) => {
                    let body = self.block(layer, &[])?;
                    self.advance();
                    body
                }
                None => Vec::new(),
            };

            reached_else |= keyword == KeywordId::Else;
            branches.push(Spanned::new(IfBranch { condition, body }, span));
            self.binary_ops.clear();
        }

        if let Some(id) = self.current {
            self.current = self.tree.prev(id);
        }
        Ok(Stmt::If(branches))
    }

    /// `for x in expr` with an optional block binding `x`.
    fn parse_for(&mut self) -> PResult<Stmt> {
        self.next_required()?;
        let span = self.current_span();
        let var = match self.current_element() {
            Some(e) if e.is_valid_name() => e.text.clone(),
            Some(e) => {
                self.err.unexpected_token("valid name", &e.text, span)?;
                self.err.debug("assume the variable is named i");
                "i".to_string()
            }
            None => return self.expect_failed("valid name"),
        };
        self.check_unbound(&var, span)?;

        self.next_required()?;
        self.expect_keyword(KeywordId::In)?;
        let iterable = self.next_exp(true)?;
        let body = match self.current_layer() {
            Some(layer) => self.block(layer, std::slice::from_ref(&var))?,
            None => Vec::new(),
        };
        Ok(Stmt::For(ForLoop { var, iterable, body }))
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        let condition = self.next_exp(true)?;
        let body = match self.current_layer() {
            Some(layer) => self.block(layer, &[])?,
            None => {
                let got = self.describe_current();
                self.err.unexpected_token("while body", &got, self.current_span())?;
                self.err.debug("assume an empty body");
                self.skip_to_ending();
                Vec::new()
            }
        };
        Ok(Stmt::While(WhileLoop {
            condition,
            body,
            do_while: false,
        }))
    }

    fn parse_do_while(&mut self) -> PResult<Stmt> {
        self.next_required()?;
        let Some(layer) = self.current_layer() else {
            return self.expect_failed("do body");
        };
        let body = self.block(layer, &[])?;
        self.next_required()?;
        self.expect_keyword(KeywordId::While)?;
        let condition = self.next_exp(false)?;
        Ok(Stmt::While(WhileLoop {
            condition,
            body,
            do_while: true,
        }))
    }

    fn parse_return(&mut self) -> PResult<Stmt> {
        let has_value = self
            .current
            .and_then(|id| self.tree.next(id))
            .is_some_and(|n| self.tree.is_element(n));
        if has_value {
            return Ok(Stmt::Return(Some(self.next_exp(false)?)));
        }
        Ok(Stmt::Return(None))
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    /// `static` followed by a block, a single statement, or nothing.
    fn parse_static(&mut self) -> PResult<Stmt> {
        if let Some(layer) = self.enter_next_layer() {
            return Ok(Stmt::Static(self.fresh_block(layer)?));
        }
        let span = self.current_span();
        let followed = self
            .current
            .and_then(|id| self.tree.next(id))
            .is_some_and(|n| self.tree.is_element(n));
        if !followed {
            return Ok(Stmt::Static(Vec::new()));
        }

        self.advance();
        loop {
            if let Some(statement) = self.parse_statement()? {
                return Ok(Stmt::Static(vec![statement]));
            }
            self.advance();
            if !self.current.is_some_and(|id| self.tree.is_element(id)) {
                return self.fail(errors::expecting("a valid statement", "static", span));
            }
        }
    }

    /// `synchronized(lock, ...)` with an optional block.
    fn parse_sync(&mut self) -> PResult<Stmt> {
        self.next_required()?;
        self.expect_symbol(SymbolId::LParen)?;
        self.next_required()?;
        let locks = match self.current_layer() {
            Some(layer) => {
                let locks = self.expression_list(layer)?;
                self.next_required()?;
                locks
            }
            None => Vec::new(),
        };
        self.expect_symbol(SymbolId::RParen)?;
        let body = match self.enter_next_layer() {
            Some(layer) => self.block(layer, &[])?,
            None => Vec::new(),
        };
        Ok(Stmt::Synchronized(SyncBlock { locks, body }))
    }

    // ========================================================================
    // try / catch / finally
    // ========================================================================

    fn parse_try(&mut self) -> PResult<Stmt> {
        let span = self.current_span();
        let layer = self.enter_next_layer();
        let body = match layer {
            Some(layer) => self.block(layer, &[])?,
            None => Vec::new(),
        };

        let saved = self.mode.parsing_try;
        self.mode.parsing_try = true;
        let clauses = self.parse_try_clauses();
        self.mode.parsing_try = saved;
        let (catches, finally) = clauses?;

        if layer.is_none() && catches.is_empty() {
            return self.fail(errors::syntax("invalid try statement without statements", span));
        }
        if catches.is_empty() && finally.is_none() {
            self.err.syntax("invalid try statement without catch or finally", span)?;
        }
        Ok(Stmt::Try(TryStmt {
            body,
            catches,
            finally: finally.unwrap_or_default(),
        }))
    }

    fn parse_try_clauses(&mut self) -> PResult<(Vec<Spanned<Catch>>, Option<Vec<Statement>>)> {
        let mut catches = Vec::new();
        while let Some(clause) = self.peek_clause() {
            self.current = Some(clause);
            if self.is_keyword_at(clause, KeywordId::Finally) {
                return Ok((catches, Some(self.parse_finally()?)));
            }
            catches.push(self.parse_catch_clause()?);
        }
        Ok((catches, None))
    }

    /// The `catch` or `finally` keyword continuing the statement, at most one line end away.
    fn peek_clause(&self) -> Option<NodeId> {
        let mut next = self.tree.next(self.current?)?;
        if self.tree.ending(next) == Some(Ending::Weak) {
            next = self.tree.next(next)?;
        }
        let is_clause = self.is_keyword_at(next, KeywordId::Catch) || self.is_keyword_at(next, KeywordId::Finally);
        is_clause.then_some(next)
    }

    /// `catch [var] [: T1, T2]` with an optional handler block binding `var`.
    fn parse_catch_clause(&mut self) -> PResult<Spanned<Catch>> {
        let span = self.current_span();
        if !self.mode.parsing_try {
            return self.fail(errors::syntax("catch without a preceding try", span));
        }

        self.advance();
        let mut var = None;
        if let Some(e) = self.current_element().filter(|e| e.is_valid_name()) {
            self.check_unbound(&e.text, self.current_span())?;
            var = Some(e.text.clone());
            self.advance();
        }

        let mut types = Vec::new();
        if self.at_symbol(SymbolId::Colon) {
            loop {
                self.next_required()?;
                types.push(self.parse_type()?);
                if self.current_ending() != Some(Ending::Strong) {
                    break;
                }
            }
        }

        let body = match self.current_layer() {
            Some(layer) => self.block(layer, var.as_slice())?,
            None => {
                if let Some(id) = self.current.filter(|id| self.tree.is_element(*id)) {
                    let got = self.describe(id);
                    return self.fail(errors::expecting("catch block", &got, self.tree.span(id)));
                }
                Vec::new()
            }
        };
        Ok(Spanned::new(Catch { var, types, body }, span))
    }

    fn parse_finally(&mut self) -> PResult<Vec<Statement>> {
        let span = self.current_span();
        if !self.mode.parsing_try {
            return self.fail(errors::syntax("finally without a preceding try", span));
        }
        match self.enter_next_layer() {
            Some(layer) => self.block(layer, &[]),
            None => {
                let got = match self.current.and_then(|id| self.tree.next(id)) {
                    Some(next) => self.describe(next),
                    None => "end of input".to_string(),
                };
                self.err.unexpected_token("finally block", &got, span)?;
                self.err.debug("assume an empty finally block");
                Ok(Vec::new())
            }
        }
    }

    // ========================================================================
    // Modules
    // ========================================================================

    /// `package a::b::c`
    fn parse_package_declaration(&mut self) -> PResult<Stmt> {
        self.next_required()?;
        let mut segments = Vec::new();
        let mut expect_name = true;
        let mut last = self.current_span();

        while let Some(id) = self.current {
            let Some(e) = self.element_at(id) else {
                break;
            };
            last = self.tree.span(id);
            if expect_name {
                if e.is_valid_name() {
                    segments.push(e.text.clone());
                } else {
                    self.err.unexpected_token("valid name", &e.text, last)?;
                    self.err.debug("skip the token");
                }
            } else if !e.is_symbol(SymbolId::ColonColon) {
                self.err.unexpected_token("::", &e.text, last)?;
                self.err.debug("assume ::");
            }
            expect_name = !expect_name;
            self.advance();
        }

        if expect_name {
            self.err.syntax("package name should end with a valid name", last)?;
        }
        if let Some(id) = self.current {
            self.current = self.tree.prev(id);
        }
        Ok(Stmt::Package(segments.join("::")))
    }

    /// `import a, b` on one line, or one import per line in a block.
    fn parse_import(&mut self) -> PResult<Stmt> {
        let mut imports = Vec::new();
        if let Some(layer) = self.enter_next_layer() {
            for e in self.expression_list(layer)? {
                if let Some(import) = self.to_import(e)? {
                    imports.push(import);
                }
            }
            return Ok(Stmt::Import(imports));
        }

        loop {
            let e = self.next_exp(false)?;
            if let Some(import) = self.to_import(e)? {
                imports.push(import);
            }
            if self.current_ending() != Some(Ending::Strong) {
                break;
            }
        }
        Ok(Stmt::Import(imports))
    }

    fn to_import(&mut self, e: Expression) -> Result<Option<Spanned<Import>>, CompileError> {
        let span = e.span;
        let Expr::Access(access) = e.node else {
            self.err.unexpected_token("import statement", e.node.describe(), span)?;
            return Ok(None);
        };

        let import = if access.name == "_" {
            match access.target.map(|t| t.node) {
                Some(Expr::PackageRef(package)) => Import {
                    package: Some(package),
                    access: None,
                    import_all: true,
                },
                Some(Expr::Access(target)) => Import {
                    package: None,
                    access: Some(target),
                    import_all: true,
                },
                _ => {
                    self.err.unexpected_token("import statement", "_", span)?;
                    return Ok(None);
                }
            }
        } else {
            Import {
                package: None,
                access: Some(access),
                import_all: false,
            }
        };
        Ok(Some(Spanned::new(import, span)))
    }

    /// Accumulate a modifier for the next definition.
    fn parse_modifier(&mut self, modifier: ModifierId, span: Span) -> PResult<()> {
        let existing: Vec<ModifierId> = self.modifiers.iter().map(|m| m.node).collect();
        if modifiers::compatible(&existing, modifier) {
            self.modifiers.push(Spanned::new(modifier, span));
        } else {
            self.err.syntax(
                format!("invalid modifier combination: {}", modifiers::as_str(modifier)),
                span,
            )?;
            self.err.debug("drop the modifier");
        }
        Ok(())
    }

    fn has_pending(&self) -> bool {
        !self.modifiers.is_empty() || !self.annos.is_empty()
    }

    /// Report `name` when it is already bound, without binding it here.
    fn check_unbound(&mut self, name: &str, span: Span) -> Result<(), CompileError> {
        if self.used_names.contains(name) {
            self.err.duplicate_variable_name(name, span)?;
        }
        Ok(())
    }
}
