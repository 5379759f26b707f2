//! End-to-end parser/builder integration tests using insta snapshots.
//!
//! Each test runs the full pipeline (scan, parse, lower) over a small
//! program and snapshots either the CST shape or the lowered AST dump,
//! to check grammar coverage, precedence, and error recovery together
//! rather than unit-by-unit.

use insta::assert_snapshot;
use mesh_parser::serialize::{dump_ast, tree::render_tree};
use mesh_parser::{parse, parse_and_build, BuildConfig, ParseMode, RecoveryConfig};

fn cst_tree(source: &str) -> String {
    let parsed = parse(source, ParseMode::CstOnly, RecoveryConfig::default());
    let tree = render_tree(&parsed.syntax(), false);
    if parsed.diagnostics().is_empty() {
        tree
    } else {
        let diags: Vec<String> = parsed
            .diagnostics()
            .iter()
            .map(|d| format!("  - {}", d.message))
            .collect();
        format!("{tree}\ndiagnostics:\n{}", diags.join("\n"))
    }
}

fn ast_dump(source: &str) -> String {
    let (_, ast, diagnostics) =
        parse_and_build(source, ParseMode::CstThenAst, RecoveryConfig::default(), BuildConfig::default());
    let dump = dump_ast(&ast);
    if diagnostics.is_empty() {
        dump
    } else {
        let diags: Vec<String> = diagnostics.iter().map(|d| format!("  - {}", d.message)).collect();
        format!("{dump}\ndiagnostics:\n{}", diags.join("\n"))
    }
}

// ── Declarations ─────────────────────────────────────────────────────

#[test]
fn var_decl_with_type_and_initializer() {
    assert_snapshot!(ast_dump("var x: int = 42;"));
}

#[test]
fn var_decl_infers_type_from_absence() {
    assert_snapshot!(ast_dump("var x = true;"));
}

#[test]
fn fn_decl_with_params_and_return_type() {
    assert_snapshot!(ast_dump("fn add(a: int, b: int) -> int { return a + b; }"));
}

#[test]
fn fn_decl_with_throws_clause() {
    assert_snapshot!(ast_dump("fn read() -> str throws IoError { return \"x\"; }"));
}

#[test]
fn class_decl_with_superclasses_and_fields() {
    assert_snapshot!(ast_dump(
        "class Dog: Animal, Named { pub name: str; fn bark() { print(\"woof\"); } }"
    ));
}

#[test]
fn trait_decl_with_signatures_only() {
    assert_snapshot!(ast_dump("trait Shape { fn area() -> float; }"));
}

#[test]
fn interface_decl_with_signatures_only() {
    assert_snapshot!(ast_dump("interface Drawable { fn draw(); }"));
}

#[test]
fn module_decl_nests_items() {
    assert_snapshot!(ast_dump("module geo { var pi: float = 3.14; }"));
}

#[test]
fn type_decl_aliases_a_complex_type() {
    assert_snapshot!(ast_dump("type Handler = (int) -> bool;"));
}

#[test]
fn enum_decl_with_payload_variants() {
    assert_snapshot!(ast_dump("enum Shape { Circle(float), Square(float, float), Empty }"));
}

#[test]
fn nil_is_a_valid_type_annotation() {
    assert_snapshot!(ast_dump("var x: nil = nil;"));
}

#[test]
fn option_and_result_builtin_types_resolve_without_warning() {
    assert_snapshot!(ast_dump("fn f() -> result { return 1; } fn g() -> option { return 1; }"));
}

#[test]
fn import_decl_with_selective_items_and_alias() {
    assert_snapshot!(ast_dump("import { Parser as P, Lexer } std.frontend;"));
}

// ── Control flow ─────────────────────────────────────────────────────

#[test]
fn if_elif_else_chain() {
    assert_snapshot!(ast_dump(
        "if (x > 0) { print(1); } elif (x < 0) { print(-1); } else { print(0); }"
    ));
}

#[test]
fn while_loop() {
    assert_snapshot!(ast_dump("while (x < 10) { x = x + 1; }"));
}

#[test]
fn c_style_for_loop() {
    assert_snapshot!(ast_dump("for (var i = 0; i < 10; i = i + 1) { print(i); }"));
}

#[test]
fn iter_for_each_loop() {
    assert_snapshot!(ast_dump("iter (x in items) { print(x); }"));
}

#[test]
fn match_with_guard_and_wildcard() {
    assert_snapshot!(ast_dump(
        "match (n) { 0 -> print(\"zero\"); x where x > 0 -> print(\"pos\"); _ -> print(\"neg\"); }"
    ));
}

#[test]
fn attempt_with_handle_and_else() {
    assert_snapshot!(ast_dump(
        "attempt { risky(); } handle (e: IoError) { log(e); } else { print(\"ok\"); }"
    ));
}

#[test]
fn parallel_concurrent_and_unsafe_blocks() {
    assert_snapshot!(ast_dump("parallel { work(); } concurrent { work(); } unsafe { raw(); }"));
}

#[test]
fn contract_and_comptime_statements() {
    assert_snapshot!(ast_dump("contract(x > 0); comptime { precompute(); }"));
}

// ── Expressions ───────────────────────────────────────────────────────

#[test]
fn binary_precedence_mul_over_add() {
    assert_snapshot!(ast_dump("var r = 1 + 2 * 3;"));
}

#[test]
fn call_field_and_index_chain() {
    assert_snapshot!(ast_dump("var r = obj.items[0].name();"));
}

#[test]
fn lambda_expression() {
    assert_snapshot!(ast_dump("var f = fn (x: int) -> int { return x * x; };"));
}

#[test]
fn string_interpolation_expression() {
    assert_snapshot!(ast_dump("print(\"hello {name}, you are {age}\");"));
}

#[test]
fn list_dict_and_range_literals() {
    assert_snapshot!(ast_dump("var l = [1, 2, 3]; var d = {\"a\": 1}; var r = 0..10;"));
}

// ── Error recovery ────────────────────────────────────────────────────

#[test]
fn missing_semicolon_recovers_with_diagnostic() {
    assert_snapshot!(cst_tree("var x = 1\nvar y = 2;"));
}

#[test]
fn unclosed_function_body_becomes_incomplete_node() {
    // The function's own closing `}` is never found because the if-block
    // eats the source's only remaining `}`.
    let source = "fn f() { if (x > 0 { print(x); }";
    let parsed = parse(source, ParseMode::CstOnly, RecoveryConfig::default());
    assert_eq!(parsed.syntax().kind(), mesh_parser::SyntaxKind::PROGRAM);
    assert!(parsed
        .diagnostics()
        .iter()
        .any(|d| d.caused_by.as_deref() == Some("unclosed `{` on line 1")));
    assert_snapshot!(cst_tree(source));
}

#[test]
fn random_bytes_never_panic_and_always_produce_a_program() {
    for input in ["}}}{{{", "\u{0}\u{1}", "var ===", "\"unterminated"] {
        let parsed = parse(input, ParseMode::CstOnly, RecoveryConfig::default());
        assert_eq!(parsed.syntax().kind(), mesh_parser::SyntaxKind::PROGRAM);
    }
}

#[test]
fn malformed_module_body_terminates_instead_of_hanging() {
    for input in ["module m { ) }", "module m { : }"] {
        let parsed = parse(input, ParseMode::CstOnly, RecoveryConfig::default());
        assert_eq!(parsed.syntax().kind(), mesh_parser::SyntaxKind::PROGRAM);
        assert!(!parsed.diagnostics().is_empty());
    }
}

#[test]
fn malformed_trait_and_interface_body_terminates_instead_of_hanging() {
    for input in ["trait T { var x: int; }", "interface D { var x: int; }"] {
        let parsed = parse(input, ParseMode::CstOnly, RecoveryConfig::default());
        assert_eq!(parsed.syntax().kind(), mesh_parser::SyntaxKind::PROGRAM);
        assert!(!parsed.diagnostics().is_empty());
    }
}

#[test]
fn malformed_class_body_terminates_instead_of_hanging() {
    let parsed = parse("class C { if (x) {} }", ParseMode::CstOnly, RecoveryConfig::default());
    assert_eq!(parsed.syntax().kind(), mesh_parser::SyntaxKind::PROGRAM);
    assert!(!parsed.diagnostics().is_empty());
}
