//! Parser/builder diagnostics: the suggestion table and `ariadne`-backed
//! snippet rendering.
//!
//! Grounded in the reference workspace's `mesh-typeck::diagnostics` shape
//! (`error_code`/`origin_span`/`fix_suggestion`/`render_diagnostic`, a
//! colorless `ariadne::Config`, stable `E####`/`W####` codes), generalized
//! here from type errors to the four-level error taxonomy in spec §7
//! (lexical, syntactic, transformation, type-resolution).

use ariadne::{Label, Report, ReportKind, Source};

use mesh_common::diagnostic::{Diagnostic, Severity};

use crate::syntax_kind::SyntaxKind;

/// Look up a human suggestion for a `(expected, actual)` token-kind pair
/// encountered during a failed parse. Returns `None` for pairs with no
/// canned hint; callers fall back to a generic "expected X, found Y"
/// message in that case.
pub fn suggest(expected: SyntaxKind, actual: SyntaxKind) -> Option<&'static str> {
    use SyntaxKind::*;
    match (expected, actual) {
        (SEMICOLON, _) => Some("did you mean to insert a semicolon?"),
        (R_BRACE, EOF) => Some("insert `}` to close the block"),
        (R_PAREN, EOF) => Some("insert `)` to close the group"),
        (R_BRACKET, EOF) => Some("insert `]` to close the list"),
        (R_BRACE, _) => Some("insert `}` to close the preceding block"),
        (R_PAREN, _) => Some("insert `)` to close the preceding group"),
        (R_BRACKET, _) => Some("insert `]` to close the preceding list"),
        (COLON, _) => Some("did you mean to insert a colon before the type?"),
        (ARROW, _) => Some("did you mean `->` before the return type?"),
        (IDENT, _) if actual.is_error_recovery() => Some("expected an identifier here"),
        (L_BRACE, _) => Some("expected a block starting with `{`"),
        _ => None,
    }
}

/// Reconstruct a short `±n`-token source snippet around `span`, used to
/// populate `Diagnostic.source_context` without consulting the original
/// source again at render time.
pub fn context_snippet(source: &str, start: u32, end: u32, radius_bytes: u32) -> String {
    let lo = start.saturating_sub(radius_bytes) as usize;
    let hi = (end + radius_bytes).min(source.len() as u32) as usize;
    let lo = source
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= lo)
        .last()
        .unwrap_or(0);
    let hi = source
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| i >= hi)
        .unwrap_or(source.len());
    source[lo..hi].to_string()
}

/// Render a single diagnostic as a colorless `ariadne` report against
/// `source`, for terminal/CI output that highlights the offending span.
pub fn render_diagnostic(diag: &Diagnostic, file: &str, source: &str, offset: u32) -> String {
    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    };
    let start = offset as usize;
    let end = (offset as usize + 1).min(source.len().max(1));

    let mut builder = Report::build(kind, (file, start..end))
        .with_message(diag.message.clone())
        .with_config(ariadne::Config::default().with_color(false));

    let mut label = Label::new((file, start..end)).with_message(diag.message.clone());
    if let Some(hint) = &diag.hint {
        label = label.with_message(hint.clone());
    }
    builder = builder.with_label(label);

    if let Some(note) = &diag.suggestion {
        builder = builder.with_note(note.clone());
    }
    if let Some(caused_by) = &diag.caused_by {
        builder = builder.with_help(caused_by.clone());
    }

    let mut out = Vec::new();
    let report = builder.finish();
    let _ = report.write((file, Source::from(source)), &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_returns_hint_for_known_pairs() {
        assert!(suggest(SyntaxKind::SEMICOLON, SyntaxKind::NEWLINE).is_some());
        assert!(suggest(SyntaxKind::R_PAREN, SyntaxKind::EOF).is_some());
    }

    #[test]
    fn suggest_returns_none_for_unknown_pairs() {
        assert!(suggest(SyntaxKind::PLUS, SyntaxKind::STAR).is_none());
    }

    #[test]
    fn context_snippet_is_bounded_by_radius() {
        let source = "0123456789abcdefghij";
        let snippet = context_snippet(source, 10, 11, 2);
        assert_eq!(snippet, "89abc");
    }

    #[test]
    fn render_diagnostic_produces_nonempty_report() {
        let d = Diagnostic::error("E0002", 1, 5, "unexpected token");
        let rendered = render_diagnostic(&d, "main.lang", "var x = ;", 8);
        assert!(rendered.contains("unexpected token"));
    }
}
