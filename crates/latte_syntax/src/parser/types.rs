/// Type references and package paths.
impl<'a> Parser<'a> {
    /// Parse a type at the cursor: any number of `[]`, then a name or package path, then
    /// `.Inner` members.
    ///
    /// Leaves the cursor on the node after the type.
    fn parse_type(&mut self) -> PResult<Access> {
        let mut depth = 0;
        while self.at_symbol(SymbolId::LBracket) {
            self.next_required()?;
            self.expect_symbol(SymbolId::RBracket)?;
            self.next_required()?;
            depth += 1;
        }

        let Some(id) = self.current else {
            return self.expect_failed("type");
        };
        let mut ty = if is_package(self.tree, id) {
            self.parse_package()?
        } else {
            match self.element_at(id) {
                Some(e) if e.is_valid_name() => {
                    self.advance();
                    Access::name(e.text.clone())
                }
                _ => {
                    let got = self.describe(id);
                    self.err.unexpected_token("type", &got, self.tree.span(id))?;
                    self.err.debug("assume Object");
                    self.advance();
                    Access::name("Object")
                }
            }
        };

        while self.at_symbol(SymbolId::Dot) {
            self.next_required()?;
            let Some(e) = self.current_element().filter(|e| e.is_valid_name()) else {
                return self.expect_failed("valid name");
            };
            let span = self.current_span();
            ty = Access::member(Spanned::new(Expr::Access(ty), span), e.text.clone());
            self.advance();
        }

        for _ in 0..depth {
            ty = Access::member(Spanned::synthetic(Expr::Access(ty)), "[]");
        }
        Ok(ty)
    }

    /// `a::b::C` at the cursor, as an access of `C` on the package `a::b`.
    ///
    /// Leaves the cursor on the node after the path.
    fn parse_package(&mut self) -> PResult<Access> {
        let start = self.current_span();
        let mut last = start;
        let mut segments = Vec::new();
        let mut expect_name = true;

        while let Some(id) = self.current {
            let Some(e) = self.element_at(id) else {
                break;
            };
            if expect_name {
                if !e.is_valid_name() {
                    break;
                }
                segments.push(e.text.clone());
            } else if !e.is_symbol(SymbolId::ColonColon) {
                break;
            }
            last = self.tree.span(id);
            expect_name = !expect_name;
            self.advance();
        }

        if expect_name {
            self.err.syntax("package name should end with a valid name", last)?;
        }
        let Some(name) = segments.pop() else {
            return self.expect_failed("valid name");
        };
        let package = Spanned::new(Expr::PackageRef(segments.join("::")), start);
        Ok(Access::member(package, name))
    }
}
