//! Indented ASCII tree rendering (spec §6): one node or token per line,
//! token values shown inline.

use crate::cst::{SyntaxElement, SyntaxNode};
use crate::syntax_kind::SyntaxKind;

/// Render `node` as an indented tree, one line per node/token.
/// `include_trivia` controls whether whitespace/comment tokens are shown.
pub fn render_tree(node: &SyntaxNode, include_trivia: bool) -> String {
    let mut out = String::new();
    write_node(node, 0, include_trivia, &mut out);
    out
}

fn write_node(node: &SyntaxNode, depth: usize, include_trivia: bool, out: &mut String) {
    push_indent(out, depth);
    let range = node.text_range();
    out.push_str(&format!(
        "{:?}@{}..{}\n",
        node.kind(),
        u32::from(range.start()),
        u32::from(range.end())
    ));
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(n) => write_node(&n, depth + 1, include_trivia, out),
            SyntaxElement::Token(t) => {
                if !include_trivia && t.kind().is_trivia() {
                    continue;
                }
                push_indent(out, depth + 1);
                let range = t.text_range();
                out.push_str(&format!(
                    "{:?}@{}..{} {:?}\n",
                    t.kind(),
                    u32::from(range.start()),
                    u32::from(range.end()),
                    t.text()
                ));
            }
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Whether `kind` denotes one of spec §3's three error-recovery node
/// kinds; exposed so tree consumers can flag invalid spans without
/// re-deriving the check.
pub fn is_error_kind(kind: SyntaxKind) -> bool {
    kind.is_error_recovery()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseMode};

    #[test]
    fn renders_nested_structure_with_increasing_indent() {
        let p = parse("var x = 1;", ParseMode::CstOnly, Default::default());
        let rendered = render_tree(&p.syntax(), true);
        assert!(rendered.starts_with("PROGRAM@"));
        assert!(rendered.contains("VAR_DECL@"));
        assert!(rendered.contains("\"x\""));
    }

    #[test]
    fn excludes_trivia_when_requested() {
        let p = parse("var x = 1; // c\n", ParseMode::CstOnly, Default::default());
        let rendered = render_tree(&p.syntax(), false);
        assert!(!rendered.contains("COMMENT_LINE"));
    }
}
