//! XML CST rendering (spec §6): analogous to the JSON renderer, one
//! element per node, tokens as leaf elements carrying their text.

use crate::cst::{SyntaxElement, SyntaxNode};

/// Render `node` as an XML document fragment (no `<?xml?>` prolog —
/// callers embedding this elsewhere can add their own).
pub fn render_xml(node: &SyntaxNode, include_trivia: bool) -> String {
    let mut out = String::new();
    write_element(node, include_trivia, &mut out);
    out
}

fn write_element(node: &SyntaxNode, include_trivia: bool, out: &mut String) {
    let range = node.text_range();
    let tag = format!("{:?}", node.kind());
    out.push_str(&format!(
        "<{tag} start=\"{}\" end=\"{}\" valid=\"{}\">",
        u32::from(range.start()),
        u32::from(range.end()),
        !node.kind().is_error_recovery()
    ));
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(n) => write_element(&n, include_trivia, out),
            SyntaxElement::Token(t) => {
                if !include_trivia && t.kind().is_trivia() {
                    continue;
                }
                let range = t.text_range();
                out.push_str(&format!(
                    "<token kind=\"{:?}\" start=\"{}\" end=\"{}\">{}</token>",
                    t.kind(),
                    u32::from(range.start()),
                    u32::from(range.end()),
                    escape(t.text())
                ));
            }
        }
    }
    out.push_str(&format!("</{tag}>"));
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseMode};

    #[test]
    fn renders_well_formed_xml_fragment() {
        let p = parse("var x = 1;", ParseMode::CstOnly, Default::default());
        let xml = render_xml(&p.syntax(), false);
        assert!(xml.starts_with("<PROGRAM"));
        assert!(xml.ends_with("</PROGRAM>"));
        assert!(xml.contains("<VAR_DECL"));
    }

    #[test]
    fn escapes_angle_brackets_in_token_text() {
        let p = parse("var x = 1 < 2;", ParseMode::CstOnly, Default::default());
        let xml = render_xml(&p.syntax(), true);
        assert!(!xml.contains("<1 < 2>"));
    }
}
