//! JSON CST rendering (spec §6): `{ kind, startPos, endPos, isValid,
//! elements: [...] }`, recursively; trivia inclusion controlled by a flag.

use serde_json::{json, Value};

use crate::cst::{SyntaxElement, SyntaxNode};

/// Render `node` as a `serde_json::Value` tree. Serialize this with
/// `serde_json::to_string`/`to_string_pretty` at the call site.
pub fn render_json(node: &SyntaxNode, include_trivia: bool) -> Value {
    node_to_value(node, include_trivia)
}

fn node_to_value(node: &SyntaxNode, include_trivia: bool) -> Value {
    let range = node.text_range();
    let elements: Vec<Value> = node
        .children_with_tokens()
        .filter_map(|el| match el {
            SyntaxElement::Node(n) => Some(node_to_value(&n, include_trivia)),
            SyntaxElement::Token(t) => {
                if !include_trivia && t.kind().is_trivia() {
                    return None;
                }
                let range = t.text_range();
                Some(json!({
                    "type": "token",
                    "kind": format!("{:?}", t.kind()),
                    "startPos": u32::from(range.start()),
                    "endPos": u32::from(range.end()),
                    "text": t.text(),
                }))
            }
        })
        .collect();
    json!({
        "type": "node",
        "kind": format!("{:?}", node.kind()),
        "startPos": u32::from(range.start()),
        "endPos": u32::from(range.end()),
        "isValid": !node.kind().is_error_recovery(),
        "elements": elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseMode};

    #[test]
    fn renders_program_root_with_expected_shape() {
        let p = parse("var x = 1;", ParseMode::CstOnly, Default::default());
        let value = render_json(&p.syntax(), false);
        assert_eq!(value["kind"], "PROGRAM");
        assert_eq!(value["isValid"], true);
        assert!(value["elements"].as_array().unwrap().iter().any(|e| e["kind"] == "VAR_DECL"));
    }

    #[test]
    fn marks_error_recovery_nodes_as_invalid() {
        let p = parse("var x = ", ParseMode::CstOnly, Default::default());
        let value = render_json(&p.syntax(), false);
        let has_invalid = value["elements"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["isValid"] == false);
        assert!(has_invalid || !p.ok());
    }
}
