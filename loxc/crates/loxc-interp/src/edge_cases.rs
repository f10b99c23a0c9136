//! Edge case tests for loxc-interp, anchored on spec.md §8's literal
//! end-to-end scenarios plus the boundary cases around them.

#[cfg(test)]
mod tests {
    use loxc_par::parse;
    use loxc_sem::resolve;
    use loxc_util::Handler;

    use crate::error::RuntimeError;
    use crate::sink::SharedBuffer;
    use crate::Interpreter;

    fn run(source: &str) -> (String, Result<(), RuntimeError>) {
        let mut handler = Handler::new();
        let program = parse(source, &mut handler);
        assert!(!handler.has_errors(), "unexpected parse errors for: {source}");
        let resolutions = resolve(&program, &handler);
        assert!(!handler.has_errors(), "unexpected resolve errors for: {source}");

        let out = SharedBuffer::new();
        let mut interp = Interpreter::with_writer(Box::new(out.clone()), true);
        let result = interp.exec_program(&program, &resolutions);
        (out.as_string(), result)
    }

    fn run_ok(source: &str) -> String {
        let (out, result) = run(source);
        result.unwrap_or_else(|e| panic!("unexpected runtime error for {source:?}: {e}"));
        out
    }

    // ==================== spec.md §8 scenario 1 ====================

    #[test]
    fn scenario_arithmetic_precedence() {
        assert_eq!(run_ok("print 1 + 2 * 3;"), "7\n");
    }

    // ==================== spec.md §8 scenario 2 ====================

    #[test]
    fn scenario_string_concatenation() {
        assert_eq!(run_ok(r#"var a = "hi"; var b = "!"; print a + b;"#), "hi!\n");
    }

    // ==================== spec.md §8 scenario 3 ====================

    #[test]
    fn scenario_closure_captures_by_reference() {
        let src = "fun make() { var n = 0; fun inc() { n = n + 1; return n; } return inc; } \
                   var c = make(); print c(); print c(); print c();";
        assert_eq!(run_ok(src), "1\n2\n3\n");
    }

    #[test]
    fn independent_closures_do_not_share_state() {
        let src = "fun make() { var n = 0; fun inc() { n = n + 1; return n; } return inc; } \
                   var a = make(); var b = make(); print a(); print b(); print a();";
        assert_eq!(run_ok(src), "1\n1\n2\n");
    }

    // ==================== spec.md §8 scenario 4 ====================

    #[test]
    fn scenario_inheritance_and_super() {
        let src = "class A { greet() { return \"A\"; } } \
                   class B < A { greet() { return super.greet() + \"B\"; } } \
                   print B().greet();";
        assert_eq!(run_ok(src), "AB\n");
    }

    // ==================== spec.md §8 scenario 5 ====================

    #[test]
    fn scenario_for_loop_continue() {
        let src = "for (var i = 0; i < 3; i = i + 1) { if (i == 1) continue; print i; }";
        assert_eq!(run_ok(src), "0\n2\n");
    }

    // ==================== spec.md §8 scenario 6 ====================

    #[test]
    fn scenario_uninitialized_global_is_a_runtime_error() {
        let (out, result) = run("var x; print x;");
        assert_eq!(out, "");
        match result {
            Err(RuntimeError::Uninitialized { name, .. }) => assert_eq!(name, "x"),
            other => panic!("expected Uninitialized, got {other:?}"),
        }
    }

    #[test]
    fn uninitialized_local_is_a_runtime_error() {
        let (_out, result) = run("{ var x; print x; }");
        assert!(matches!(result, Err(RuntimeError::Uninitialized { .. })));
    }

    // ==================== arity ====================

    #[test]
    fn arity_mismatch_is_a_runtime_error() {
        let (_out, result) = run("fun f(a, b) { return a + b; } f(1);");
        assert!(matches!(result, Err(RuntimeError::ArityMismatch { expected: 2, got: 1, .. })));
    }

    #[test]
    fn class_with_no_init_rejects_arguments() {
        let (_out, result) = run("class A {} A(1);");
        assert!(matches!(result, Err(RuntimeError::ArityMismatch { expected: 0, got: 1, .. })));
    }

    // ==================== arithmetic ====================

    #[test]
    fn divide_by_zero_is_a_runtime_error() {
        let (_out, result) = run("print 1 / 0;");
        assert!(matches!(result, Err(RuntimeError::DivideByZero { .. })));
    }

    #[test]
    fn string_number_repetition() {
        assert_eq!(run_ok(r#"print "ab" * 3;"#), "ababab\n");
        assert_eq!(run_ok(r#"print 2 * "x";"#), "xx\n");
    }

    #[test]
    fn modulo_follows_dividend_sign() {
        assert_eq!(run_ok("print -5 % 3;"), "-2\n");
    }

    // ==================== equality ====================

    #[test]
    fn numbers_and_strings_compare_structurally() {
        assert_eq!(run_ok("print 1 == 1.0;"), "true\n");
        assert_eq!(run_ok(r#"print "a" == "a";"#), "true\n");
    }

    #[test]
    fn instances_compare_by_identity() {
        let src = "class A {} var a = A(); var b = A(); print a == b; print a == a;";
        assert_eq!(run_ok(src), "false\ntrue\n");
    }

    // ==================== short-circuit ====================

    #[test]
    fn and_or_short_circuit_and_return_the_determining_operand() {
        assert_eq!(run_ok(r#"print false and 1; print nil or "x"; print 2 and 3;"#), "false\nx\n3\n");
    }

    // ==================== classes ====================

    #[test]
    fn getter_is_invoked_without_parens() {
        let src = "class Circle { init(r) { this.r = r; } get area() { return this.r * this.r; } } \
                   print Circle(2).area;";
        assert_eq!(run_ok(src), "4\n");
    }

    #[test]
    fn setter_is_invoked_on_assignment() {
        let src = "class Box { set value(v) { this.stored = v * 2; } } \
                   var b = Box(); b.value = 5; print b.stored;";
        assert_eq!(run_ok(src), "10\n");
    }

    #[test]
    fn static_method_is_called_on_the_class_without_an_instance() {
        let src = "class Math { static square(n) { return n * n; } } print Math.square(4);";
        assert_eq!(run_ok(src), "16\n");
    }

    #[test]
    fn init_always_returns_the_instance() {
        let src = "class A { init() { return; } } var a = A(); print a.init();";
        assert_eq!(run_ok(src), "<A instance>\n");
    }

    #[test]
    fn accessing_an_undefined_property_is_a_runtime_error() {
        let (_out, result) = run("class A {} print A().missing;");
        assert!(matches!(result, Err(RuntimeError::UndefinedProperty { .. })));
    }

    #[test]
    fn superclass_must_be_a_class() {
        let (_out, result) = run("var NotAClass = 1; class A < NotAClass {}");
        assert!(matches!(result, Err(RuntimeError::SuperclassNotClass { .. })));
    }

    // ==================== builtins ====================

    #[test]
    fn clock_is_callable_with_no_arguments() {
        let (_out, result) = run("clock();");
        assert!(result.is_ok());
    }

    #[test]
    fn str_builtin_converts_values_to_strings() {
        assert_eq!(run_ok("print str(1) + str(nil);"), "1nil\n");
    }

    #[test]
    fn type_builtin_reports_runtime_type_names() {
        assert_eq!(run_ok(r#"print type(1); print type("s"); print type(nil);"#), "number\nstring\nnil\n");
    }

    // ==================== REPL-style persistence ====================

    #[test]
    fn globals_persist_across_separate_program_executions() {
        let mut handler = Handler::new();
        let out = SharedBuffer::new();
        let mut interp = Interpreter::with_writer(Box::new(out.clone()), true);

        let p1 = parse("var x = 1;", &mut handler);
        let r1 = resolve(&p1, &handler);
        interp.exec_program(&p1, &r1).unwrap();

        let p2 = parse("print x + 1;", &mut handler);
        let r2 = resolve(&p2, &handler);
        interp.exec_program(&p2, &r2).unwrap();

        assert_eq!(out.as_string(), "2\n");
    }

    #[test]
    fn repl_mode_prints_expression_statement_results() {
        let mut handler = Handler::new();
        let out = SharedBuffer::new();
        let mut interp = Interpreter::with_writer(Box::new(out.clone()), true);
        interp.repl = true;

        let program = parse("1 + 1;", &mut handler);
        let resolutions = resolve(&program, &handler);
        interp.exec_program(&program, &resolutions).unwrap();

        assert_eq!(out.as_string(), "2\n");
    }

    #[test]
    fn comma_expression_evaluates_both_sides_yields_the_right() {
        assert_eq!(run_ok("print (1, 2);"), "2\n");
    }

    #[test]
    fn comma_expression_evaluates_left_side_for_its_effects() {
        let src = "var a = 0; var b = (a = a + 1, a = a + 1); print a; print b;";
        assert_eq!(run_ok(src), "2\n2\n");
    }

    // ==================== arity mismatch span ====================

    #[test]
    fn extra_argument_arity_mismatch_spans_only_the_surplus_arguments() {
        let src = "fun f(a) { return a; } f(1, 2, 3);";
        let (_out, result) = run(src);
        let err = result.expect_err("expected an arity mismatch");
        let span = err.span();
        // The span should cover `2, 3`, not the whole `f(1, 2, 3)` call.
        let call_start = src.find("f(1").unwrap();
        let surplus_start = src.find("2, 3").unwrap();
        assert!(span.start > call_start, "span should not start at the callee");
        assert_eq!(span.start, surplus_start);
    }

    #[test]
    fn missing_argument_arity_mismatch_spans_the_call_parens() {
        let src = "fun f(a, b) { return a + b; } f(1);";
        let (_out, result) = run(src);
        let err = result.expect_err("expected an arity mismatch");
        let span = err.span();
        let callee_start = src.rfind("f(1)").unwrap();
        let rparen = src.rfind(')').unwrap();
        // No argument expression exists to blame, so the span should land
        // on the closing paren, not the callee name.
        assert!(span.start > callee_start);
        assert_eq!(span.end, rparen + 1);
    }
}
