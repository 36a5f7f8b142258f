#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover the statement and expression forms one by one, operator precedence, and the
/// tolerant-mode recovery (one error per broken statement, parsing resumes afterwards).
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::lexer::{self, ScannerConfig};

    fn parse_str(source: &str) -> (Vec<Statement>, Vec<CompileError>) {
        let mut err = ErrorManager::tolerant();
        let tree = lexer::lex(source, &ScannerConfig::default(), &mut err).unwrap();
        let statements = parse(&tree, &mut err).unwrap();
        (statements, err.into_errors())
    }

    fn parse_ok(source: &str) -> Vec<Statement> {
        let (statements, errors) = parse_str(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        statements
    }

    /// The single expression statement of `source`.
    fn expr(source: &str) -> Expression {
        let mut statements = parse_ok(source);
        assert_eq!(statements.len(), 1, "expected one statement in {source:?}");
        match statements.remove(0).node {
            Stmt::Expr(e) => e,
            other => panic!("Expected expression statement, got {other:?}"),
        }
    }

    /// The init value of the single definition in `source`.
    fn init_of(source: &str) -> Expression {
        match expr(source).node {
            Expr::VariableDef(VariableDef { init: Some(init), .. }) => *init,
            other => panic!("Expected initialized definition, got {other:?}"),
        }
    }

    fn name(n: &str) -> Expression {
        Spanned::synthetic(Expr::Access(Access::name(n)))
    }

    fn member(target: Expression, n: &str) -> Expression {
        Spanned::synthetic(Expr::Access(Access::member(target, n)))
    }

    fn num(n: &str) -> Expression {
        Spanned::synthetic(Expr::Number(n.to_string()))
    }

    fn binary(op: OperatorId, left: Expression, right: Expression) -> Expression {
        Spanned::synthetic(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn call(callee: Expression, args: Vec<Expression>) -> Expression {
        Spanned::synthetic(Expr::Invocation(Invocation::new(callee, args)))
    }

    fn ret(e: Expression) -> Statement {
        Spanned::synthetic(Stmt::Return(Some(e)))
    }

    fn expr_stmt(e: Expression) -> Statement {
        Spanned::synthetic(Stmt::Expr(e))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_precedence() {
        assert_eq!(
            expr("1 + 2 * 3"),
            binary(OperatorId::Plus, num("1"), binary(OperatorId::Star, num("2"), num("3")))
        );
        assert_eq!(
            expr("a * b + c * d"),
            binary(
                OperatorId::Plus,
                binary(OperatorId::Star, name("a"), name("b")),
                binary(OperatorId::Star, name("c"), name("d"))
            )
        );
    }

    #[test]
    fn test_equal_ranks_are_left_associative() {
        assert_eq!(
            expr("a - b - c"),
            binary(OperatorId::Minus, binary(OperatorId::Minus, name("a"), name("b")), name("c"))
        );
    }

    #[test]
    fn test_comparison_binds_looser_than_arithmetic() {
        assert_eq!(
            expr("a + b > c and d"),
            binary(
                OperatorId::And,
                binary(OperatorId::Gt, binary(OperatorId::Plus, name("a"), name("b")), name("c")),
                name("d")
            )
        );
    }

    #[test]
    fn test_definition_then_assignment() {
        let statements = parse_ok("x = 1 + 2 * 3\nx = 2\n");
        assert_eq!(statements.len(), 2);
        match &statements[0].node {
            Stmt::Expr(Spanned {
                node: Expr::VariableDef(def),
                ..
            }) => {
                assert_eq!(def.name, "x");
                assert!(def.modifiers.is_empty());
                assert_eq!(
                    def.init.as_deref(),
                    Some(&binary(OperatorId::Plus, num("1"), binary(OperatorId::Star, num("2"), num("3"))))
                );
            }
            other => panic!("Expected definition, got {other:?}"),
        }
        match &statements[1].node {
            Stmt::Expr(Spanned {
                node: Expr::Assignment { target, op, value },
                ..
            }) => {
                assert_eq!(**target, name("x"));
                assert_eq!(*op, OperatorId::Assign);
                assert_eq!(**value, num("2"));
            }
            other => panic!("Expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn test_modifiers_make_a_definition() {
        match expr("val x : int = 1").node {
            Expr::VariableDef(def) => {
                assert_eq!(def.name, "x");
                assert_eq!(def.ty, Some(Access::name("int")));
                assert_eq!(def.init.as_deref(), Some(&num("1")));
                assert_eq!(def.modifiers.len(), 1);
                assert_eq!(def.modifiers[0].node, ModifierId::Val);
            }
            other => panic!("Expected definition, got {other:?}"),
        }
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(
            init_of("x = -a + b"),
            binary(
                OperatorId::Plus,
                Spanned::synthetic(Expr::UnaryPrefix {
                    op: OperatorId::Minus,
                    operand: Box::new(name("a")),
                }),
                name("b")
            )
        );
        assert_eq!(
            expr("i++"),
            Spanned::synthetic(Expr::UnaryPostfix {
                op: OperatorId::PlusPlus,
                operand: Box::new(name("i")),
            })
        );
        assert_eq!(
            expr("!done"),
            Spanned::synthetic(Expr::UnaryPrefix {
                op: OperatorId::Bang,
                operand: Box::new(name("done")),
            })
        );
    }

    #[test]
    fn test_invocation_and_access() {
        assert_eq!(expr("a.b.c"), member(member(name("a"), "b"), "c"));
        assert_eq!(expr("f()"), call(name("f"), vec![]));
        assert_eq!(
            expr("obj.run(1, x)"),
            call(member(name("obj"), "run"), vec![num("1"), name("x")])
        );
    }

    #[test]
    fn test_named_arguments() {
        match expr("f(a = 1, b = 2)").node {
            Expr::Invocation(invocation) => {
                assert!(invocation.invoke_with_names);
                assert_eq!(invocation.args.len(), 2);
            }
            other => panic!("Expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_operator_like_invocation() {
        assert_eq!(
            expr("db select a, b, c"),
            call(member(name("db"), "select"), vec![name("a"), name("b"), name("c")])
        );
        assert_eq!(
            expr("a + b op c"),
            call(member(binary(OperatorId::Plus, name("a"), name("b")), "op"), vec![name("c")])
        );
        assert_eq!(expr("list isEmpty"), call(member(name("list"), "isEmpty"), vec![]));
    }

    #[test]
    fn test_lambda() {
        match init_of("f = (x, y) => x + y").node {
            Expr::Lambda { params, body } => {
                let names: Vec<&str> = params.iter().map(|p| p.node.name.as_str()).collect();
                assert_eq!(names, vec!["x", "y"]);
                assert_eq!(body, vec![ret(binary(OperatorId::Plus, name("x"), name("y")))]);
            }
            other => panic!("Expected lambda, got {other:?}"),
        }
        match init_of("g = x -> x * 2").node {
            Expr::Lambda { params, body } => {
                assert_eq!(params.len(), 1);
                assert_eq!(body, vec![ret(binary(OperatorId::Star, name("x"), num("2")))]);
            }
            other => panic!("Expected lambda, got {other:?}"),
        }
    }

    #[test]
    fn test_array_index_and_map() {
        let statements = parse_ok("arr = [1, 2]\narr[0] = 5\nm = {\"a\": 1, \"b\": 2}\n");
        assert_eq!(statements.len(), 3);
        match &statements[1].node {
            Stmt::Expr(Spanned {
                node: Expr::Assignment { target, .. },
                ..
            }) => assert!(matches!(target.node, Expr::Index { .. })),
            other => panic!("Expected index assignment, got {other:?}"),
        }
        match &statements[2].node {
            Stmt::Expr(Spanned {
                node: Expr::VariableDef(def),
                ..
            }) => match def.init.as_deref().map(|e| &e.node) {
                Some(Expr::Map(entries)) => {
                    assert_eq!(entries.len(), 2);
                    assert_eq!(entries[0].0.node, Expr::Str("\"a\"".to_string()));
                    assert_eq!(entries[1].1, num("2"));
                }
                other => panic!("Expected map, got {other:?}"),
            },
            other => panic!("Expected definition, got {other:?}"),
        }
    }

    #[test]
    fn test_grouping_and_procedure() {
        assert_eq!(
            init_of("x = (1 + 2) * 3"),
            binary(OperatorId::Star, binary(OperatorId::Plus, num("1"), num("2")), num("3"))
        );
        match init_of("y = (return 1)").node {
            Expr::Procedure(body) => assert_eq!(body, vec![ret(num("1"))]),
            other => panic!("Expected procedure, got {other:?}"),
        }
    }

    #[test]
    fn test_type_as_new_require() {
        assert!(matches!(init_of("t = type String").node, Expr::TypeOf(_)));
        match init_of("s = o as java::lang::String").node {
            Expr::As { expr, ty } => {
                assert_eq!(*expr, name("o"));
                assert_eq!(ty.name, "String");
                assert_eq!(
                    ty.target.map(|t| t.node),
                    Some(Expr::PackageRef("java::lang".to_string()))
                );
            }
            other => panic!("Expected cast, got {other:?}"),
        }
        match init_of("p = new Point(1, 2)").node {
            Expr::New(invocation) => {
                assert_eq!(invocation.access().map(|a| a.name.as_str()), Some("Point"));
                assert_eq!(invocation.args.len(), 2);
            }
            other => panic!("Expected construction, got {other:?}"),
        }
        assert!(matches!(expr("require \"lib\"").node, Expr::Require(_)));
    }

    #[test]
    fn test_array_type() {
        match expr("val names : [][]String").node {
            Expr::VariableDef(def) => {
                let ty = def.ty.unwrap();
                assert_eq!(ty.name, "[]");
                match ty.target.map(|t| t.node) {
                    Some(Expr::Access(inner)) => assert_eq!(inner.name, "[]"),
                    other => panic!("Expected array element type, got {other:?}"),
                }
            }
            other => panic!("Expected definition, got {other:?}"),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_if_chain() {
        let statements = parse_ok("if a > b\n    c\nelseif a < b\n    d\nelse\n    e\nf\n");
        assert_eq!(statements.len(), 2);
        match &statements[0].node {
            Stmt::If(branches) => {
                assert_eq!(branches.len(), 3);
                assert_eq!(
                    branches[0].node.condition,
                    Some(binary(OperatorId::Gt, name("a"), name("b")))
                );
                assert_eq!(branches[1].node.body, vec![expr_stmt(name("d"))]);
                assert!(branches[2].node.condition.is_none());
            }
            other => panic!("Expected if, got {other:?}"),
        }
        assert_eq!(statements[1], expr_stmt(name("f")));
    }

    #[test]
    fn test_if_after_else_is_reported() {
        let (statements, errors) = parse_str("if a\n    b\nelse\n    c\nelse\n    d\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "if-else statement had already reached 'else' but got else instead"
        );
        match &statements[0].node {
            Stmt::If(branches) => assert_eq!(branches.len(), 2),
            other => panic!("Expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_loops() {
        let statements = parse_ok("for item in items\n    print(item)\nwhile i < 10\n    i++\ndo\n    i--\nwhile i > 0\n");
        assert_eq!(statements.len(), 3);
        match &statements[0].node {
            Stmt::For(f) => {
                assert_eq!(f.var, "item");
                assert_eq!(f.iterable, name("items"));
                assert_eq!(f.body, vec![expr_stmt(call(name("print"), vec![name("item")]))]);
            }
            other => panic!("Expected for, got {other:?}"),
        }
        assert!(matches!(&statements[1].node, Stmt::While(w) if !w.do_while));
        match &statements[2].node {
            Stmt::While(w) => {
                assert!(w.do_while);
                assert_eq!(w.condition, binary(OperatorId::Gt, name("i"), num("0")));
                assert_eq!(w.body.len(), 1);
            }
            other => panic!("Expected do-while, got {other:?}"),
        }
    }

    #[test]
    fn test_try_catch_finally() {
        let source = "try\n    risky()\ncatch e : IOException, Error\n    handle(e)\nfinally\n    cleanup()\n";
        let statements = parse_ok(source);
        assert_eq!(statements.len(), 1);
        match &statements[0].node {
            Stmt::Try(t) => {
                assert_eq!(t.body, vec![expr_stmt(call(name("risky"), vec![]))]);
                assert_eq!(t.catches.len(), 1);
                let catch = &t.catches[0].node;
                assert_eq!(catch.var.as_deref(), Some("e"));
                assert_eq!(catch.types, vec![Access::name("IOException"), Access::name("Error")]);
                assert_eq!(t.finally, vec![expr_stmt(call(name("cleanup"), vec![]))]);
            }
            other => panic!("Expected try, got {other:?}"),
        }
    }

    #[test]
    fn test_try_without_handlers_is_reported() {
        let (_, errors) = parse_str("try\n    risky()\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "invalid try statement without catch or finally");
    }

    #[test]
    fn test_catch_without_try() {
        let (_, errors) = parse_str("catch e\n    x\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "catch without a preceding try");
    }

    #[test]
    fn test_static_synchronized_and_flow_statements() {
        let statements = parse_ok("static\n    count = 0\nsynchronized(lock)\n    work()\nreturn\nthrow err\nbreak\ncontinue\npass\n...\n");
        assert_eq!(statements.len(), 8);
        assert!(matches!(&statements[0].node, Stmt::Static(body) if body.len() == 1));
        match &statements[1].node {
            Stmt::Synchronized(sync) => {
                assert_eq!(sync.locks, vec![name("lock")]);
                assert_eq!(sync.body.len(), 1);
            }
            other => panic!("Expected synchronized, got {other:?}"),
        }
        assert_eq!(statements[2].node, Stmt::Return(None));
        assert_eq!(statements[3].node, Stmt::Throw(name("err")));
        assert_eq!(statements[4].node, Stmt::Break);
        assert_eq!(statements[5].node, Stmt::Continue);
        assert_eq!(statements[6].node, Stmt::Pass);
        assert_eq!(statements[7].node, Stmt::Pass);
    }

    #[test]
    fn test_package_and_imports() {
        let statements = parse_ok("package com::example\nimport java::util::_, java::io::File, Outer.Inner._\n");
        assert_eq!(statements[0].node, Stmt::Package("com::example".to_string()));
        match &statements[1].node {
            Stmt::Import(imports) => {
                assert_eq!(imports.len(), 3);
                assert_eq!(imports[0].node.package.as_deref(), Some("java::util"));
                assert!(imports[0].node.import_all);
                assert_eq!(imports[1].node.access.as_ref().map(|a| a.name.as_str()), Some("File"));
                assert!(!imports[1].node.import_all);
                assert_eq!(imports[2].node.access.as_ref().map(|a| a.name.as_str()), Some("Inner"));
                assert!(imports[2].node.import_all);
            }
            other => panic!("Expected import, got {other:?}"),
        }
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    #[test]
    fn test_method_shapes() {
        let source = "add(a, b)\n    return a + b\nsub(a, b) = a - b\ntoString() = ...\nsize() : int = 0\n";
        let statements = parse_ok(source);
        let methods: Vec<&MethodDef> = statements
            .iter()
            .map(|s| match &s.node {
                Stmt::Method(m) => m,
                other => panic!("Expected method, got {other:?}"),
            })
            .collect();
        assert_eq!(methods.len(), 4);

        assert_eq!(methods[0].name, "add");
        assert_eq!(methods[0].params.len(), 2);
        assert_eq!(methods[0].body, vec![ret(binary(OperatorId::Plus, name("a"), name("b")))]);

        assert_eq!(methods[1].body, vec![ret(binary(OperatorId::Minus, name("a"), name("b")))]);

        assert!(methods[2].params.is_empty());
        assert!(methods[2].body.is_empty());

        assert_eq!(methods[3].return_type, Some(Access::name("int")));
        assert_eq!(methods[3].body, vec![ret(num("0"))]);
    }

    #[test]
    fn test_parameter_defaults_must_trail() {
        let (_, errors) = parse_str("f(a = 1, b)\n    pass\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "expecting parameter with init value, but got b");
    }

    #[test]
    fn test_class() {
        let source = "abstract class Point(x, y) : Base(x), Printable\n    norm() = x * x + y * y\n";
        let statements = parse_ok(source);
        match &statements[0].node {
            Stmt::Class(class) => {
                assert_eq!(class.name, "Point");
                assert_eq!(class.modifiers[0].node, ModifierId::Abstract);
                assert_eq!(class.params.len(), 2);
                let base = class.super_invocation.as_ref().unwrap();
                assert_eq!(base.access().map(|a| a.name.as_str()), Some("Base"));
                assert_eq!(base.args, vec![name("x")]);
                assert_eq!(class.super_types, vec![Access::name("Printable")]);
                assert!(matches!(&class.body[0].node, Stmt::Method(m) if m.name == "norm"));
            }
            other => panic!("Expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_inheritance_is_reported() {
        let (_, errors) = parse_str("class A : B(), C()\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Multiple Inheritance is not allowed");
    }

    #[test]
    fn test_interface() {
        let statements = parse_ok("interface Shape : Named\n    area() : double\n");
        match &statements[0].node {
            Stmt::Interface(interface) => {
                assert_eq!(interface.name, "Shape");
                assert_eq!(interface.super_types, vec![Access::name("Named")]);
                match &interface.body[0].node {
                    Stmt::Method(m) => {
                        assert_eq!(m.return_type, Some(Access::name("double")));
                        assert!(m.body.is_empty());
                    }
                    other => panic!("Expected method, got {other:?}"),
                }
            }
            other => panic!("Expected interface, got {other:?}"),
        }
    }

    #[test]
    fn test_annotations_attach_to_next_definition() {
        let statements = parse_ok("@Deprecated\n@Range(min = 1, max = 10)\nval n = 5\n");
        assert_eq!(statements.len(), 1);
        match &statements[0].node {
            Stmt::Expr(Spanned {
                node: Expr::VariableDef(def),
                ..
            }) => {
                assert_eq!(def.annos.len(), 2);
                assert_eq!(def.annos[0].node.name, Access::name("Deprecated"));
                let args: Vec<&str> = def.annos[1].node.args.iter().map(|a| a.name.as_str()).collect();
                assert_eq!(args, vec!["min", "max"]);
                assert_eq!(def.annos[1].node.args[1].value, num("10"));
            }
            other => panic!("Expected definition, got {other:?}"),
        }
    }

    #[test]
    fn test_annotation_on_method_header_line() {
        let statements = parse_ok("@Override toString() = \"p\"\n");
        match &statements[0].node {
            Stmt::Method(m) => {
                assert_eq!(m.annos.len(), 1);
                assert_eq!(m.name, "toString");
            }
            other => panic!("Expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_abstract_method_declaration() {
        let statements = parse_ok("abstract area()\n");
        match &statements[0].node {
            Stmt::Method(m) => {
                assert_eq!(m.name, "area");
                assert!(m.body.is_empty());
            }
            other => panic!("Expected method, got {other:?}"),
        }
    }

    // ========================================================================
    // Errors and recovery
    // ========================================================================

    #[test]
    fn test_unexpected_end_position() {
        let (statements, errors) = parse_str("a = 1 +");
        assert!(statements.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::UnexpectedEnd);
        assert_eq!((errors[0].span.line, errors[0].span.column), (1, 8));
    }

    #[test]
    fn test_leftover_operands() {
        let (statements, errors) = parse_str("1 2");
        assert_eq!(statements.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "got tokens which are no where to place: number literal");
    }

    #[test]
    fn test_unexpected_new_layer() {
        let (statements, errors) = parse_str("a\n    b\nc\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::UnexpectedNewLayer);
        assert_eq!(statements, vec![expr_stmt(name("c"))]);
    }

    #[test]
    fn test_recovery_continues_with_next_statement() {
        let (statements, errors) = parse_str("x = * 2\ny = 3\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(statements.len(), 1);
        match &statements[0].node {
            Stmt::Expr(Spanned {
                node: Expr::VariableDef(def),
                ..
            }) => assert_eq!(def.name, "y"),
            other => panic!("Expected definition, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_definition() {
        let (statements, errors) = parse_str("val x = 1\nval x = 2\n");
        assert_eq!(statements.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::DuplicateVariableName);
    }

    #[test]
    fn test_for_binder_already_bound_is_duplicate() {
        let (statements, errors) = parse_str("x = 1\nfor x in l\n    x\n");
        assert_eq!(statements.len(), 2);
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].kind, ErrorKind::DuplicateVariableName);
        assert_eq!((errors[0].span.line, errors[0].span.column), (2, 5));
    }

    #[test]
    fn test_catch_binder_already_bound_is_duplicate() {
        let (statements, errors) = parse_str("e = 1\ntry\n    a\ncatch e\n    b\n");
        assert_eq!(statements.len(), 2);
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].kind, ErrorKind::DuplicateVariableName);
        assert_eq!((errors[0].span.line, errors[0].span.column), (4, 7));
    }

    /// Map entries of `m = {...}` together with the reported errors.
    fn map_entries(source: &str) -> (Vec<(Expression, Expression)>, Vec<CompileError>) {
        let (mut statements, errors) = parse_str(source);
        assert_eq!(statements.len(), 1, "{errors:?}");
        match statements.remove(0).node {
            Stmt::Expr(Spanned {
                node: Expr::VariableDef(VariableDef { init: Some(init), .. }),
                ..
            }) => match init.node {
                Expr::Map(entries) => (entries, errors),
                other => panic!("Expected map literal, got {other:?}"),
            },
            other => panic!("Expected initialized definition, got {other:?}"),
        }
    }

    #[test]
    fn test_map_entry_without_key() {
        let (entries, errors) = map_entries("m = {a: 1, : 2}\n");
        assert!(
            errors.iter().any(|e| e.message == "key is not set"),
            "{errors:?}"
        );
        assert_eq!(entries, vec![(name("a"), num("1"))]);
    }

    #[test]
    fn test_map_entry_without_value() {
        let (entries, errors) = map_entries("m = {a: , b: 2}\n");
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].message, "value is not set");
        assert_eq!((errors[0].span.line, errors[0].span.column), (1, 7));
        // The broken entry is dropped; the next one still parses.
        assert_eq!(entries, vec![(name("b"), num("2"))]);
    }

    #[test]
    fn test_operator_before_comma_recovers() {
        let (statements, errors) = parse_str("a = 1 +, b = 2\n");
        assert!(!errors.is_empty());
        assert_eq!(errors[0].kind, ErrorKind::UnexpectedEnd);
        assert_eq!((errors[0].span.line, errors[0].span.column), (1, 8));
        let rendered = crate::printer::render(&statements);
        assert!(rendered.contains("b = 2"), "{rendered}");
    }

    #[test]
    fn test_nested_scope_sees_outer_names() {
        let statements = parse_ok("x = 1\nif c\n    x = 2\n");
        match &statements[1].node {
            Stmt::If(branches) => {
                assert!(matches!(
                    &branches[0].node.body[0].node,
                    Stmt::Expr(Spanned {
                        node: Expr::Assignment { .. },
                        ..
                    })
                ));
            }
            other => panic!("Expected if, got {other:?}"),
        }
    }

    #[test]
    fn test_misplaced_modifiers() {
        let (statements, errors) = parse_str("public\nreturn 1\n");
        assert_eq!(statements.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "modifiers are not in the right position");
    }

    #[test]
    fn test_invalid_modifier_combination() {
        let (_, errors) = parse_str("val var x = 1\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "invalid modifier combination: var");
    }

    #[test]
    fn test_fast_fail_returns_first_error() {
        let mut err = ErrorManager::fast_fail();
        let tree = lexer::lex("a = 1 +", &ScannerConfig::default(), &mut err).unwrap();
        let error = parse(&tree, &mut err).unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnexpectedEnd);
        assert_eq!((error.span.line, error.span.column), (1, 8));
        assert!(!err.has_errors());
    }
}
