//! Compact/Debug CST rendering (spec §6): a single-line S-expression-like
//! form for quick eyeballing, plus a diagnostic variant that additionally
//! flags error-recovery spans inline.

use crate::cst::{SyntaxElement, SyntaxNode};

/// `(KIND (CHILD_KIND "token text" ...) ...)` on one line.
pub fn render_compact(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_compact(node, false, &mut out);
    out
}

/// Same shape as [`render_compact`], but error-recovery nodes are
/// prefixed with `!` so a reviewer can spot them without re-parsing.
pub fn render_debug(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_compact(node, true, &mut out);
    out
}

fn write_compact(node: &SyntaxNode, flag_errors: bool, out: &mut String) {
    out.push('(');
    if flag_errors && node.kind().is_error_recovery() {
        out.push('!');
    }
    out.push_str(&format!("{:?}", node.kind()));
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(n) => {
                out.push(' ');
                write_compact(&n, flag_errors, out);
            }
            SyntaxElement::Token(t) => {
                if t.kind().is_trivia() {
                    continue;
                }
                out.push(' ');
                out.push_str(&format!("{:?}:{:?}", t.kind(), t.text()));
            }
        }
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseMode};

    #[test]
    fn renders_a_single_line() {
        let p = parse("var x = 1;", ParseMode::CstOnly, Default::default());
        let rendered = render_compact(&p.syntax());
        assert!(!rendered.contains('\n'));
        assert!(rendered.starts_with("(PROGRAM"));
    }

    #[test]
    fn debug_variant_flags_error_recovery_nodes() {
        let p = parse("var x = ", ParseMode::CstOnly, Default::default());
        let rendered = render_debug(&p.syntax());
        assert!(rendered.contains('!') || p.ok());
    }
}
