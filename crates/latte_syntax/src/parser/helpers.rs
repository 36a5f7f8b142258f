/// Cursor movement and shared parsing helpers.
///
/// ## Notes
/// - `advance` is the "may end here" move: it never fails and stops on endings.
/// - `next_required` is the "a continuation must follow" move: it skips WEAK endings and reports
///   an unexpected end at a STRONG ending or at the end of the layer.
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    /// Move to the next sibling, whatever it is.
    fn advance(&mut self) {
        if let Some(id) = self.current {
            self.current = self.tree.next(id);
        }
    }

    /// Move to the next node that continues the current construct.
    ///
    /// ## Errors
    /// - Unexpected end (recorded) when the construct stops at a STRONG ending; the ending is
    ///   skipped and parsing goes on.
    /// - Unexpected end, abandoning the statement, when nothing follows.
    fn next_required(&mut self) -> PResult<()> {
        let Some(id) = self.current else {
            self.err.unexpected_end(self.end)?;
            return Err(ParseFail::Recorded);
        };
        let after = self.tree.span(id).after();
        match self.tree.next(id) {
            None => {
                self.err.unexpected_end(after)?;
                Err(ParseFail::Recorded)
            }
            Some(next) if self.tree.ending(next) == Some(Ending::Strong) => {
                self.err.unexpected_end(after)?;
                self.err.debug("skip the separator");
                match self.tree.next(next) {
                    None => Err(ParseFail::Recorded),
                    Some(following) => {
                        self.current = Some(following);
                        Ok(())
                    }
                }
            }
            Some(next) => {
                self.current = Some(next);
                if self.tree.ending(next) == Some(Ending::Weak) {
                    return self.next_required();
                }
                Ok(())
            }
        }
    }

    /// Move forward until the cursor sits on an ending or ran off the layer.
    fn skip_to_ending(&mut self) {
        while let Some(id) = self.current {
            if self.tree.ending(id).is_some() {
                return;
            }
            self.current = self.tree.next(id);
        }
    }

    /// Report `error` and abandon the current statement.
    fn fail<T>(&mut self, error: CompileError) -> PResult<T> {
        self.err.report(error)?;
        Err(ParseFail::Recorded)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    fn element_at(&self, id: NodeId) -> Option<&'a Element> {
        let tree: &'a NodeTree = self.tree;
        tree.element(id)
    }

    fn current_element(&self) -> Option<&'a Element> {
        self.current.and_then(|id| self.element_at(id))
    }

    fn current_layer(&self) -> Option<NodeId> {
        self.current.filter(|id| self.tree.is_layer(*id))
    }

    fn current_ending(&self) -> Option<Ending> {
        self.current.and_then(|id| self.tree.ending(id))
    }

    fn current_span(&self) -> Span {
        self.current.map_or(self.end, |id| self.tree.span(id))
    }

    fn is_symbol_at(&self, id: NodeId, symbol: SymbolId) -> bool {
        self.element_at(id).is_some_and(|e| e.is_symbol(symbol))
    }

    fn is_keyword_at(&self, id: NodeId, keyword: KeywordId) -> bool {
        self.element_at(id).is_some_and(|e| e.is_keyword(keyword))
    }

    fn at_symbol(&self, symbol: SymbolId) -> bool {
        self.current.is_some_and(|id| self.is_symbol_at(id, symbol))
    }

    /// Text used for a node in diagnostics.
    fn describe(&self, id: NodeId) -> String {
        match self.tree.ending(id) {
            Some(Ending::Weak) => "end of line".to_string(),
            Some(Ending::Strong) => ",".to_string(),
            None => match self.element_at(id) {
                Some(e) => e.text.clone(),
                None => "new layer".to_string(),
            },
        }
    }

    fn describe_current(&self) -> String {
        match self.current {
            Some(id) => self.describe(id),
            None => "end of input".to_string(),
        }
    }

    // ========================================================================
    // Expectations
    // ========================================================================

    /// Require the cursor to sit on `symbol`; anything else abandons the statement.
    fn expect_symbol(&mut self, symbol: SymbolId) -> PResult<()> {
        if self.at_symbol(symbol) {
            return Ok(());
        }
        let expected = symbols::as_str(symbol);
        self.expect_failed(expected)
    }

    fn expect_keyword(&mut self, keyword: KeywordId) -> PResult<()> {
        if self.current.is_some_and(|id| self.is_keyword_at(id, keyword)) {
            return Ok(());
        }
        self.expect_failed(keywords::as_str(keyword))
    }

    fn expect_failed<T>(&mut self, expected: &str) -> PResult<T> {
        match self.current {
            None => {
                self.err.unexpected_end(self.end)?;
                Err(ParseFail::Recorded)
            }
            Some(id) => {
                let got = self.describe(id);
                self.fail(errors::expecting(expected, &got, self.tree.span(id)))
            }
        }
    }

    /// Check that no modifiers or annotations wait for a definition; report and drop them.
    fn require_no_pending(&mut self) -> Result<(), CompileError> {
        if let Some(first) = self.annos.first().map(|a| a.span) {
            self.err.report(errors::misplaced_annotations(first))?;
            self.err.debug("clear the annotation set");
            self.annos.clear();
        }
        if let Some(first) = self.modifiers.first().map(|m| m.span) {
            self.err.report(errors::misplaced_modifiers(first))?;
            self.err.debug("clear the modifier set");
            self.modifiers.clear();
        }
        Ok(())
    }

    /// Bind `name` in this scope, reporting a duplicate.
    fn bind_name(&mut self, name: &str, span: Span) -> Result<(), CompileError> {
        if !self.used_names.insert(name.to_string()) {
            self.err.duplicate_variable_name(name, span)?;
        }
        Ok(())
    }

    // ========================================================================
    // Sub-expressions and child layers
    // ========================================================================

    /// Step to the next node and parse one expression there.
    fn next_exp(&mut self, expecting_layer: bool) -> PResult<Expression> {
        self.next_required()?;
        self.get_exp(expecting_layer)
    }

    /// Parse one expression starting at the cursor.
    fn get_exp(&mut self, expecting_layer: bool) -> PResult<Expression> {
        let saved = self.mode.expecting_layer;
        if expecting_layer {
            self.mode.expecting_layer = true;
        }
        let result = self.parse_expression();
        self.mode.expecting_layer = saved;
        result?;

        match self.parsed_exps.pop() {
            Some(e) => Ok(e),
            None => {
                let got = self.describe_current();
                let span = self.current_span();
                self.fail(errors::expecting("expression", &got, span))
            }
        }
    }

    /// Parse a layer with a child parser.
    ///
    /// ## Parameters
    /// - `inherit`: copy this scope's used names (and `binders`) into the child; parameter lists
    ///   and `static` scopes start from an empty scope.
    /// - `parsing_map`: run the child in map mode.
    fn sub_parse(
        &mut self,
        layer: NodeId,
        inherit: bool,
        binders: &[Ident],
        parsing_map: bool,
    ) -> PResult<Vec<Statement>> {
        let mut child = Parser::new(self.tree, &mut *self.err, layer);
        if inherit {
            child.used_names.extend(self.used_names.iter().cloned());
            child.used_names.extend(binders.iter().cloned());
        }
        child.mode.parsing_map = parsing_map;
        Ok(child.run()?)
    }

    /// Parse a nested block in the current scope, with extra bound names.
    fn block(&mut self, layer: NodeId, binders: &[Ident]) -> PResult<Vec<Statement>> {
        self.sub_parse(layer, true, binders, false)
    }

    /// Parse a layer in a fresh scope (parameter lists, `static`).
    fn fresh_block(&mut self, layer: NodeId) -> PResult<Vec<Statement>> {
        self.sub_parse(layer, false, &[], false)
    }

    /// Parse a layer of expressions (arguments, array items, locks).
    fn expression_list(&mut self, layer: NodeId) -> PResult<Vec<Expression>> {
        let statements = self.block(layer, &[])?;
        let mut list = Vec::with_capacity(statements.len());
        for statement in statements {
            match statement.node {
                Stmt::Expr(e) => list.push(e),
                _ => {
                    self.err.unexpected_token("expression", "statement", statement.span)?;
                    self.err.debug("drop the statement");
                }
            }
        }
        Ok(list)
    }
}
