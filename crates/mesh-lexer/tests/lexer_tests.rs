use insta::assert_yaml_snapshot;
use mesh_lexer::Lexer;
use serde::Serialize;

/// A human-readable representation of a token for snapshot testing.
#[derive(Serialize)]
struct TokenSnapshot {
    kind: String,
    text: String,
    span: (u32, u32),
}

/// Tokenize source and return a list of snapshot-friendly token representations.
fn tokenize_snapshot(source: &str) -> Vec<TokenSnapshot> {
    Lexer::tokenize(source)
        .into_iter()
        .map(|tok| {
            let text = if tok.span.start < tok.span.end {
                source[tok.span.start as usize..tok.span.end as usize].to_string()
            } else {
                String::new()
            };
            TokenSnapshot {
                kind: format!("{:?}", tok.kind),
                text,
                span: (tok.span.start, tok.span.end),
            }
        })
        .collect()
}

#[test]
fn test_keywords() {
    let source = "var fn class trait interface module type enum import \
                   if elif else while for iter match attempt handle \
                   parallel concurrent unsafe contract comptime print return \
                   break continue this super and or";
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_type_keywords() {
    let source = "int i8 i16 i32 i64 uint u8 u16 u32 u64 float f32 f64 \
                   str bool list dict array option result any";
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_operators() {
    let source = "+ += - -= * *= ** / /= % %= ! != = == > >= < <= & | ^ ~ \
                   -> .. ... ?. ?: @";
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_numbers() {
    let source = "42 3.14 0xFF 0b1010 0o17 1_000_000 1.0e10 2e-3";
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_identifiers() {
    let source = "x _private camelCase snake_case CONST_NAME x1 _";
    assert_yaml_snapshot!(tokenize_snapshot(source));
}

#[test]
fn test_simple_string() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""hello world""#));
}

#[test]
fn test_string_escapes() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""line\nbreak\ttab\"quote\\slash""#));
}

#[test]
fn test_line_comment() {
    assert_yaml_snapshot!(tokenize_snapshot("// this is a comment"));
}

#[test]
fn test_block_comment() {
    assert_yaml_snapshot!(tokenize_snapshot("/* a block comment */"));
}

#[test]
fn test_mixed_expression() {
    assert_yaml_snapshot!(tokenize_snapshot("var result = add(1, 2) * subtract(3, 4);"));
}

#[test]
fn test_spans_accurate() {
    assert_yaml_snapshot!(tokenize_snapshot("var x = 42;"));
}

#[test]
fn test_string_interpolation() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""hello {name}, you are {age} years old""#));
}

#[test]
fn test_adjacent_interpolations() {
    // Adjacent interpolations should not produce an empty StringContent between them.
    assert_yaml_snapshot!(tokenize_snapshot(r#""{a}{b}""#));
}

#[test]
fn test_interpolation_with_nested_braces() {
    // A dict literal inside an interpolation should not close it early.
    assert_yaml_snapshot!(tokenize_snapshot(r#""{ {"a": 1}["a"] }""#));
}

#[test]
fn test_nested_block_comment() {
    assert_yaml_snapshot!(tokenize_snapshot("/* outer /* inner */ still outer */"));
}

#[test]
fn test_empty_input() {
    assert_yaml_snapshot!(tokenize_snapshot(""));
}

#[test]
fn test_whitespace_only() {
    assert_yaml_snapshot!(tokenize_snapshot("   \t  "));
}

#[test]
fn test_span_accuracy_interpolation() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""hello {name}""#));
}

#[test]
fn test_unterminated_block_comment() {
    assert_yaml_snapshot!(tokenize_snapshot("/* no close"));
}

#[test]
fn test_unterminated_string() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""no close"#));
}

#[test]
fn test_empty_string() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""""#));
}

#[test]
fn test_interpolation_with_expression() {
    assert_yaml_snapshot!(tokenize_snapshot(r#""result: {a + b * 2}""#));
}

#[test]
fn test_crlf_newlines() {
    assert_yaml_snapshot!(tokenize_snapshot("var x = 1;\r\nvar y = 2;"));
}

#[test]
fn test_consecutive_newlines() {
    assert_yaml_snapshot!(tokenize_snapshot("var x = 1;\n\n\nvar y = 2;"));
}

#[test]
fn test_invalid_character_recovery() {
    // `` ` `` is not a valid token start; the scanner should emit an Error
    // token and keep going rather than stopping at the first bad byte.
    assert_yaml_snapshot!(tokenize_snapshot("var x = `5; var y = 6;"));
}
