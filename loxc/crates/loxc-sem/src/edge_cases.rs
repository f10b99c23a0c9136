//! Edge case tests for loxc-sem

#[cfg(test)]
mod tests {
    use crate::resolve;
    use loxc_par::parse;
    use loxc_util::Handler;

    fn resolve_source(source: &str) -> Handler {
        let mut handler = Handler::new();
        let program = parse(source, &mut handler);
        let _ = resolve(&program, &handler);
        handler
    }

    // ==================== SCOPE DISTANCE ====================

    #[test]
    fn test_edge_global_reference_has_no_error() {
        let handler = resolve_source("print x;");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_local_shadowing_resolves_to_innermost() {
        let handler = resolve_source("{ var x = 1; { var x = 2; print x; } }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_block_scopes_pop_cleanly() {
        let handler = resolve_source("{ var x = 1; print x; } { var x = 2; print x; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_for_loop_variable_scoped_to_loop() {
        let handler = resolve_source("for (var i = 0; i < 10; i = i + 1) print i;");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_function_recurses_by_name() {
        let handler = resolve_source("fun fact(n) { if (n <= 1) return 1; return n * fact(n - 1); }");
        assert!(!handler.has_errors());
    }

    // ==================== REDECLARATION ====================

    #[test]
    fn test_err_duplicate_local_declaration() {
        let handler = resolve_source("{ var x = 1; var x = 2; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_duplicate_global_declaration_is_fine() {
        let handler = resolve_source("var x = 1; var x = 2;");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_shadowing_in_nested_scope_is_fine() {
        let handler = resolve_source("var x = 1; { var x = 2; }");
        assert!(!handler.has_errors());
    }

    // ==================== SELF-REFERENTIAL INITIALIZER ====================

    #[test]
    fn test_err_local_self_referential_initializer() {
        let handler = resolve_source("{ var x = x; }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_global_self_referential_initializer_is_not_flagged() {
        // Globals aren't modeled as scope-stack bindings, so this check
        // (which only tracks local declared/defined state) doesn't apply.
        let handler = resolve_source("var x = x;");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_shadowing_outer_in_initializer_is_fine() {
        let handler = resolve_source("var x = 1; { var x = x + 1; print x; }");
        assert!(!handler.has_errors());
    }

    // ==================== THIS / SUPER ====================

    #[test]
    fn test_err_this_outside_method() {
        let handler = resolve_source("print this;");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_this_inside_method_is_fine() {
        let handler = resolve_source("class C { m() { return this; } }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_err_super_outside_subclass() {
        let handler = resolve_source("class C { m() { return super.m(); } }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_super_inside_subclass_method_is_fine() {
        let handler = resolve_source("class A { m() { } } class B < A { m() { return super.m(); } }");
        assert!(!handler.has_errors());
    }

    // ==================== RETURN ====================

    #[test]
    fn test_err_return_outside_function() {
        let handler = resolve_source("return 1;");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_return_inside_function_is_fine() {
        let handler = resolve_source("fun f() { return 1; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_err_return_value_in_init() {
        let handler = resolve_source("class C { init() { return 1; } }");
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_bare_return_in_init_is_fine() {
        let handler = resolve_source("class C { init() { return; } }");
        assert!(!handler.has_errors());
    }

    // ==================== BREAK / CONTINUE ====================

    #[test]
    fn test_edge_break_inside_loop_is_fine() {
        let handler = resolve_source("while (true) { break; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_err_break_inside_function_inside_loop() {
        let handler = resolve_source("while (true) { fun f() { break; } }");
        assert!(handler.has_errors());
    }

    // ==================== UNUSED VARIABLE HINT ====================

    #[test]
    fn test_edge_unused_local_is_warned() {
        let handler = resolve_source("fun f() { var x = 1; }");
        assert!(handler.warning_count() >= 1);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_used_local_is_not_warned() {
        let handler = resolve_source("fun f() { var x = 1; print x; }");
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn test_edge_unused_underscore_parameter_is_not_warned() {
        let handler = resolve_source("fun f(_) { }");
        assert_eq!(handler.warning_count(), 0);
    }

    #[test]
    fn test_edge_unused_global_is_not_warned() {
        let handler = resolve_source("var x = 1;");
        assert_eq!(handler.warning_count(), 0);
    }

    // ==================== SLOT / DISTANCE TABLE ====================

    #[test]
    fn test_edge_resolutions_cover_every_reference() {
        let mut handler = Handler::new();
        let program = loxc_par::parse("var x = 1; { var y = 2; print x; print y; }", &mut handler);
        let resolutions = resolve(&program, &handler);
        // `x` (global) and `y` (local) both get an entry.
        assert_eq!(resolutions.len(), 2);
    }
}
