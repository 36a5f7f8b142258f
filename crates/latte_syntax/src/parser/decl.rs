/// Declaration parsing.
///
/// This chunk implements classes, interfaces, methods, parameter lists and annotations. Pending
/// modifiers and annotations are consumed by whichever definition comes next.
impl<'a> Parser<'a> {
    // ========================================================================
    // Classes and interfaces
    // ========================================================================

    /// `class Name [(params)] [: Super(args), Iface, ...]` with an optional body.
    fn parse_class(&mut self) -> PResult<ClassDef> {
        let modifiers = std::mem::take(&mut self.modifiers);
        let annos = std::mem::take(&mut self.annos);
        let name = self.definition_name()?;
        self.advance();

        let mut params = Vec::new();
        if self.at_symbol(SymbolId::LParen) {
            params = self.parse_params()?;
            self.advance();
        }

        let mut super_invocation = None;
        let mut super_types = Vec::new();
        if self.at_symbol(SymbolId::Colon) {
            for super_type in self.super_list()? {
                let span = super_type.span;
                match super_type.node {
                    Expr::Invocation(invocation) if invocation.access().is_some() => {
                        if super_invocation.is_some() {
                            self.err.syntax("Multiple Inheritance is not allowed", span)?;
                        } else {
                            super_invocation = Some(invocation);
                        }
                    }
                    Expr::Access(access) => super_types.push(access),
                    other => self.err.unexpected_token("super class or interface", other.describe(), span)?,
                }
            }
        } else {
            self.reject_trailing_element(":")?;
        }

        let names = param_names(&params);
        let body = match self.current_layer() {
            Some(layer) => self.block(layer, &names)?,
            None => Vec::new(),
        };
        Ok(ClassDef {
            name,
            modifiers,
            annos,
            params,
            super_invocation,
            super_types,
            body,
        })
    }

    /// `interface Name [: Super, ...]` with an optional body.
    fn parse_interface(&mut self) -> PResult<InterfaceDef> {
        let modifiers = std::mem::take(&mut self.modifiers);
        let annos = std::mem::take(&mut self.annos);
        let name = self.definition_name()?;
        self.advance();

        let mut super_types = Vec::new();
        if self.at_symbol(SymbolId::Colon) {
            for super_type in self.super_list()? {
                match super_type.node {
                    Expr::Access(access) => super_types.push(access),
                    other => self.err.unexpected_token("super interface", other.describe(), super_type.span)?,
                }
            }
        } else {
            self.reject_trailing_element(":")?;
        }

        let body = match self.current_layer() {
            Some(layer) => self.block(layer, &[])?,
            None => Vec::new(),
        };
        Ok(InterfaceDef {
            name,
            modifiers,
            annos,
            super_types,
            body,
        })
    }

    /// Comma-separated super types after `:`; the cursor ends before the body.
    fn super_list(&mut self) -> PResult<Vec<Expression>> {
        let mut supers = Vec::new();
        loop {
            self.next_required()?;
            supers.push(self.get_exp(true)?);
            if self.current_ending() != Some(Ending::Strong) {
                return Ok(supers);
            }
        }
    }

    fn definition_name(&mut self) -> PResult<Ident> {
        self.next_required()?;
        match self.current_element() {
            Some(e) if e.is_valid_name() => Ok(e.text.clone()),
            Some(e) => {
                self.err.unexpected_token("valid name", &e.text, self.current_span())?;
                self.err.debug("use the token as the name");
                Ok(e.text.clone())
            }
            None => self.expect_failed("valid name"),
        }
    }

    /// An element right after a definition header that nothing accepted.
    fn reject_trailing_element(&mut self, expected: &str) -> PResult<()> {
        if let Some(id) = self.current.filter(|id| self.tree.is_element(*id)) {
            let got = self.describe(id);
            return self.fail(errors::expecting(expected, &got, self.tree.span(id)));
        }
        Ok(())
    }

    // ========================================================================
    // Methods
    // ========================================================================

    /// Parse a method whose shape was decided by [`method_shape`]; the cursor is on the name.
    fn parse_method(&mut self, shape: MethodShape) -> PResult<MethodDef> {
        let name = self.current_element().map(|e| e.text.clone()).unwrap_or_default();
        let modifiers = std::mem::take(&mut self.modifiers);
        let annos = std::mem::take(&mut self.annos);

        self.next_required()?;
        let params = self.parse_params()?;
        let names = param_names(&params);

        let mut return_type = None;
        let body = match shape {
            MethodShape::Normal => {
                self.next_required()?;
                match self.current_layer() {
                    Some(layer) => self.block(layer, &names)?,
                    None => return self.expect_failed("method body"),
                }
            }
            MethodShape::Empty => {
                let assigned = self
                    .current
                    .and_then(|id| self.tree.next(id))
                    .is_some_and(|n| self.is_symbol_at(n, SymbolId::Assign));
                if assigned {
                    self.next_required()?;
                    self.next_required()?;
                }
                Vec::new()
            }
            MethodShape::OneStatement => {
                self.next_required()?;
                vec![returning(self.next_exp(false)?)]
            }
            MethodShape::Typed => {
                self.next_required()?;
                self.next_required()?;
                return_type = Some(self.parse_type()?);
                self.typed_method_body(&names)?
            }
        };

        Ok(MethodDef {
            name,
            modifiers,
            annos,
            params,
            return_type,
            body,
        })
    }

    /// What follows `name(params) : T`: `= ...`, `= expr`, a block, or nothing.
    fn typed_method_body(&mut self, names: &[Ident]) -> PResult<Vec<Statement>> {
        if self.at_symbol(SymbolId::Assign) {
            let after = self.current.and_then(|id| self.tree.next(id));
            if after.is_some_and(|n| self.is_symbol_at(n, SymbolId::Ellipsis)) {
                self.current = after;
                return Ok(Vec::new());
            }
            return Ok(vec![returning(self.next_exp(false)?)]);
        }
        if let Some(layer) = self.current_layer() {
            return self.block(layer, names);
        }
        self.reject_trailing_element("method body")?;
        Ok(Vec::new())
    }

    /// `(p1, p2 = v)` at the cursor; leaves the cursor on `)`.
    fn parse_params(&mut self) -> PResult<Vec<Spanned<VariableDef>>> {
        self.expect_symbol(SymbolId::LParen)?;
        self.next_required()?;
        let mut params = Vec::new();
        if let Some(layer) = self.current_layer() {
            let statements = self.fresh_block(layer)?;
            params = self.to_parameters(statements)?;
            self.next_required()?;
        }
        self.expect_symbol(SymbolId::RParen)?;
        Ok(params)
    }

    /// Turn the statements of a parameter layer into definitions.
    ///
    /// Once a parameter has a default value, every later one needs one too.
    fn to_parameters(&mut self, statements: Vec<Statement>) -> Result<Vec<Spanned<VariableDef>>, CompileError> {
        let mut params = Vec::with_capacity(statements.len());
        let mut seen_init = false;
        for statement in statements {
            let span = statement.span;
            let def = match statement.node {
                Stmt::Expr(Spanned {
                    node: Expr::Access(access),
                    ..
                }) if access.is_bare() => VariableDef::bare(access.name),
                Stmt::Expr(Spanned {
                    node: Expr::VariableDef(def),
                    ..
                }) => def,
                Stmt::Expr(e) => {
                    self.err.syntax(format!("parameter cannot be {}", e.node.describe()), span)?;
                    continue;
                }
                _ => {
                    self.err.syntax("parameter cannot be a statement", span)?;
                    continue;
                }
            };
            if def.init.is_some() {
                seen_init = true;
            } else if seen_init {
                self.err.unexpected_token("parameter with init value", &def.name, span)?;
            }
            params.push(Spanned::new(def, span));
        }
        Ok(params)
    }

    // ========================================================================
    // Annotations
    // ========================================================================

    /// `@Name` or `@Name(args)`; the annotation waits for the next definition.
    fn parse_annotation(&mut self) -> PResult<()> {
        let span = self.current_span();
        self.next_required()?;
        let name = self.parse_type()?;

        let args = if self.at_symbol(SymbolId::LParen) {
            self.next_required()?;
            let args = match self.current_layer() {
                Some(layer) => {
                    let args = self.expression_list(layer)?;
                    self.next_required()?;
                    args
                }
                None => Vec::new(),
            };
            self.expect_symbol(SymbolId::RParen)?;
            self.annotation_args(args)?
        } else {
            if let Some(id) = self.current {
                self.current = self.tree.prev(id);
            }
            Vec::new()
        };
        self.annos.push(Spanned::new(Anno { name, args }, span));
        Ok(())
    }

    fn annotation_args(&mut self, args: Vec<Expression>) -> Result<Vec<AnnoArg>, CompileError> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            let arg = match split_named_arg(arg) {
                Ok((name, value)) => AnnoArg { name, value },
                Err(value) => AnnoArg {
                    name: "value".to_string(),
                    value,
                },
            };
            if !is_constant(&arg.value) {
                self.err.syntax("annotation value must be a constant", arg.value.span)?;
            }
            out.push(arg);
        }
        Ok(out)
    }
}
