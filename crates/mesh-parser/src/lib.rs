//! A trivia-preserving parser front end: scans source into a lossless
//! rowan-based concrete syntax tree, then lowers that CST into an owned,
//! arena-allocated abstract syntax tree with early/deferred/partial type
//! resolution. Aggressive error recovery keeps every stage total — a
//! tree (however partial) and a diagnostic list come back for any input,
//! including malformed or random-byte source.
//!
//! # Pipeline
//!
//! ```text
//! source ─▶ mesh_lexer::scan_all ─▶ parser::parse ─▶ builder::build
//!              (tokens)              (CST, Parse)      (Ast, diagnostics)
//! ```
//!
//! [`ParseMode`] threads through the scanner and parser: `CstOnly` and
//! `CstThenAst` keep trivia in the tree (Invariant C1, round-trip);
//! `DirectAst` drops it up front so the grammar runs once but no
//! intermediate CST is kept. `parse_and_build` runs the whole pipeline;
//! `parser::parse` alone is enough for CST-only consumers (formatters,
//! IDE tooling) that never need the AST.

pub mod ast;
pub mod builder;
pub mod cst;
pub mod cst_ext;
pub mod diagnostics;
pub(crate) mod parser;
pub mod recovery;
pub mod serialize;
pub mod syntax_kind;

pub use ast::{Ast, Node, NodeId};
pub use builder::BuildConfig;
pub use cst::{MeshLanguage, SyntaxElement, SyntaxNode, SyntaxToken};
pub use cst_ext::CstNodeExt;
pub use parser::{parse, Parse, ParseMode};
pub use recovery::RecoveryConfig;
pub use syntax_kind::SyntaxKind;

use mesh_common::diagnostic::Diagnostic;

/// Runs the full pipeline: scan, parse into a CST, lower into an AST.
/// Returns the CST `Parse` (diagnostics from scanning and parsing) plus
/// the lowered `Ast` and the builder's own diagnostics, concatenated in
/// pipeline order.
pub fn parse_and_build(
    source: &str,
    mode: ParseMode,
    recovery: RecoveryConfig,
    build_config: BuildConfig,
) -> (Parse, Ast, Vec<Diagnostic>) {
    let parsed = parser::parse(source, mode, recovery);
    let (ast, mut build_diagnostics) = builder::build(&parsed.syntax(), source, build_config);
    let mut diagnostics = parsed.diagnostics().to_vec();
    diagnostics.append(&mut build_diagnostics);
    (parsed, ast, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_build_runs_the_whole_pipeline() {
        let (parse, ast, diagnostics) =
            parse_and_build("var x: int = 1;", ParseMode::CstThenAst, RecoveryConfig::default(), BuildConfig::default());
        assert!(parse.ok());
        assert!(diagnostics.is_empty());
        assert_eq!(ast.program_items().len(), 1);
    }

    #[test]
    fn parse_and_build_never_panics_on_malformed_input() {
        let inputs = ["fn f() { if (x > 0 { print(x); }", "var x =", "}}}{{{"];
        for input in inputs {
            let (parse, _ast, _diags) =
                parse_and_build(input, ParseMode::CstThenAst, RecoveryConfig::default(), BuildConfig::default());
            assert_eq!(parse.syntax().kind(), SyntaxKind::PROGRAM);
        }
    }
}
