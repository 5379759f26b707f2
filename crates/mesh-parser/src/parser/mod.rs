//! Event-based recursive-descent parser (spec §4.3).
//!
//! # Architecture
//!
//! Uses matklad's event-based technique (as in rust-analyzer): parse
//! functions call `open()` to start a node, `advance()` to consume tokens,
//! and `close()` to finish a node with its actual kind. Events are
//! collected into a flat `Vec<Event>` and later converted into a rowan
//! green tree by `build_tree()`. `open_before()` wraps a previously
//! completed node (e.g. turning a bare name into a call expression) via
//! the "forward parent" technique, without invalidating earlier indices.
//!
//! Trivia (whitespace/newlines/comments) is always skipped by lookahead
//! (`current`/`nth`) and always re-emitted by `advance()` so every token
//! ends up in the tree — Invariant P2. There is no newline significance
//! in this grammar; `;` terminates simple statements and declarations,
//! `{ }` delimit blocks.
//!
//! # Dual-mode grammar, one parser
//!
//! A single grammar threads a [`ParseMode`]: in [`ParseMode::CstOnly`] and
//! [`ParseMode::CstThenAst`] trivia tokens stay in the token stream and
//! the CST is built losslessly; in [`ParseMode::DirectAst`] the scanner is
//! configured to drop trivia up front (see `parse`) and an AST is built
//! directly via `mesh-parser`'s [`crate::builder`] without an intermediate
//! CST walk — the same grammar productions run in both cases, since they
//! only ever see significant tokens.

pub(crate) mod controls;
pub(crate) mod expressions;
pub(crate) mod items;
pub(crate) mod patterns;
pub(crate) mod types;

use mesh_common::diagnostic::{Diagnostic, Severity};
use mesh_common::span::{LineIndex, Span};
use mesh_common::token::{Token, TokenKind};
use mesh_lexer::{scan_all, CSTConfig};

use crate::diagnostics::{context_snippet, suggest};
use crate::recovery::{BlockContextStack, RecoveryConfig};
use crate::syntax_kind::SyntaxKind;

/// Which tree(s) a parse should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Build an AST directly; the scanner drops trivia, no CST is built.
    DirectAst,
    /// Build a CST, then lower it to an AST.
    CstThenAst,
    /// Build a CST only (formatters, IDE tooling).
    CstOnly,
}

#[derive(Debug)]
enum Event {
    /// Start a new CST node. `kind` starts as `TOMBSTONE` and is patched
    /// by `close()`. `forward_parent` implements `open_before()`.
    Open {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },
    Close,
    Advance,
}

/// An opaque marker for a started-but-not-yet-closed CST node: the index
/// into the event list of its `Open` event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkOpened {
    index: usize,
}

/// An opaque marker for a completed node, usable with `open_before()`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkClosed {
    index: usize,
}

/// The parser. Consumes a token stream and source text, producing events
/// later converted into a rowan green tree, plus a diagnostic list.
pub(crate) struct Parser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    source: &'src str,
    line_index: LineIndex,
    paren_depth: u32,
    bracket_depth: u32,
    brace_depth: u32,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) recovery: RecoveryConfig,
    pub(crate) blocks: BlockContextStack,
    /// Set by `controls::block` when its closing `}` had to be recovered
    /// rather than found; read (and left as-is) by whichever production
    /// called it to decide whether it finished as `INCOMPLETE_NODE`
    /// (spec §4.3 point 4).
    pub(crate) last_block_incomplete: bool,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(tokens: Vec<Token>, source: &'src str, recovery: RecoveryConfig) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            source,
            line_index: LineIndex::new(source),
            paren_depth: 0,
            bracket_depth: 0,
            brace_depth: 0,
            diagnostics: Vec::new(),
            recovery,
            blocks: BlockContextStack::default(),
            last_block_incomplete: false,
        }
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        let mut pos = self.pos;
        let mut remaining = n;
        while pos < self.tokens.len() {
            let kind = self.tokens[pos].kind;
            if kind.is_trivia() {
                pos += 1;
                continue;
            }
            if remaining == 0 {
                return SyntaxKind::from(kind);
            }
            remaining -= 1;
            pos += 1;
        }
        SyntaxKind::EOF
    }

    pub(crate) fn current_text(&self) -> &str {
        let pos = self.skip_to_significant(self.pos);
        self.tokens
            .get(pos)
            .map(|t| &self.source[t.span.start as usize..t.span.end as usize])
            .unwrap_or("")
    }

    pub(crate) fn current_span(&self) -> Span {
        let pos = self.skip_to_significant(self.pos);
        self.tokens.get(pos).map(|t| t.span).unwrap_or_else(|| {
            let end = self.source.len() as u32;
            Span::new(end, end)
        })
    }

    pub(crate) fn current_line_col(&self) -> (u32, u32) {
        self.line_index.line_col(self.current_span().start)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// Current nesting depth across all delimiter kinds, used to check
    /// whether a sync token is at the same depth as a failing
    /// production's entry point.
    pub(crate) fn depth(&self) -> u32 {
        self.paren_depth + self.bracket_depth + self.brace_depth
    }

    // ── Node management ──────────────────────────────────────────────

    pub(crate) fn open(&mut self) -> MarkOpened {
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        mark
    }

    pub(crate) fn open_before(&mut self, completed: MarkClosed) -> MarkOpened {
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        if let Event::Open { forward_parent, .. } = &mut self.events[completed.index] {
            *forward_parent = Some(mark.index);
        }
        mark
    }

    pub(crate) fn close(&mut self, m: MarkOpened, kind: SyntaxKind) -> MarkClosed {
        if let Event::Open { kind: slot, .. } = &mut self.events[m.index] {
            *slot = kind;
        }
        self.events.push(Event::Close);
        MarkClosed { index: m.index }
    }

    /// Abandon a node that turned out not to be needed: patch it (and its
    /// matching Close) to TOMBSTONE so `build_tree` silently elides both.
    pub(crate) fn abandon(&mut self, m: MarkOpened) {
        if let Event::Open { kind, .. } = &mut self.events[m.index] {
            *kind = SyntaxKind::TOMBSTONE;
        }
    }

    // ── Token consumption ──────────────────────────────────────────────

    pub(crate) fn advance(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
        if self.pos < self.tokens.len() {
            self.update_delimiter_depth(self.tokens[self.pos].kind);
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    /// `expect`, but without recording an error if the token isn't there:
    /// the standard "if present, consume" pattern used for optional
    /// grammar elements.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if `kind` matches; otherwise run the
    /// recovery procedure from spec §4.3 steps 1-2 (diagnose, try-insert)
    /// and report whether the token was actually present.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.diagnose_expected(kind);
        if self.recovery.insert_missing_tokens && is_punctuation(kind) {
            let m = self.open();
            self.close(m, SyntaxKind::MISSING_NODE);
        }
        false
    }

    // ── Diagnostics (spec §4.3 step 1) ─────────────────────────────────

    /// Emit a diagnostic with expected/actual kinds, a reconstructed
    /// source snippet, and a suggestion drawn from the `(expected,
    /// actual)` table, honoring `max_errors`.
    pub(crate) fn diagnose_expected(&mut self, expected: SyntaxKind) {
        let actual = self.current();
        let message = format!("expected {expected:?}, found {actual:?}");
        self.push_diagnostic(&message, suggest(expected, actual));
    }

    pub(crate) fn error(&mut self, message: &str) {
        self.push_diagnostic(message, None);
    }

    fn push_diagnostic(&mut self, message: &str, suggestion: Option<&'static str>) {
        if self.diagnostics.len() > self.recovery.max_errors {
            return;
        }
        if self.diagnostics.len() == self.recovery.max_errors {
            self.diagnostics.push(Diagnostic::error(
                "E9999",
                0,
                0,
                "too many parse errors, stopping",
            ));
            return;
        }
        let (line, col) = self.current_line_col();
        let span = self.current_span();
        let snippet = context_snippet(self.source, span.start, span.end, 20);
        let mut diag = Diagnostic::error("E0100", line, col, message).with_source_context(snippet);
        if let Some(s) = suggestion {
            diag = diag.with_suggestion(s);
        }
        if let Some(caused_by) = self.blocks.caused_by_message() {
            diag = diag.with_caused_by(caused_by);
        }
        self.diagnostics.push(diag);
    }

    pub(crate) fn has_too_many_errors(&self) -> bool {
        self.diagnostics.len() > self.recovery.max_errors
    }

    // ── Synchronization (spec §4.3 step 3) ──────────────────────────────

    /// Skip tokens forward until a sync token is found at `entry_depth`
    /// (or shallower), wrapping the skipped span in an `ERROR_NODE`.
    /// Returns the marker of the error node (always produced, even if
    /// zero tokens were skipped, to keep call sites uniform).
    pub(crate) fn synchronize(&mut self, entry_depth: u32, message: &str) -> MarkClosed {
        let m = self.open();
        self.error(message);
        while !self.is_at_end() {
            if self.recovery.is_sync_token(self.current()) && self.depth() <= entry_depth {
                break;
            }
            self.advance();
        }
        self.close(m, SyntaxKind::ERROR_NODE)
    }

    // ── Newline/trivia helpers ──────────────────────────────────────────

    fn skip_to_significant(&self, mut pos: usize) -> usize {
        while pos < self.tokens.len() && self.tokens[pos].kind.is_trivia() {
            pos += 1;
        }
        pos
    }

    fn update_delimiter_depth(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::LParen => self.paren_depth += 1,
            TokenKind::RParen => self.paren_depth = self.paren_depth.saturating_sub(1),
            TokenKind::LBracket => self.bracket_depth += 1,
            TokenKind::RBracket => self.bracket_depth = self.bracket_depth.saturating_sub(1),
            TokenKind::LBrace => self.brace_depth += 1,
            TokenKind::RBrace => self.brace_depth = self.brace_depth.saturating_sub(1),
            _ => {}
        }
    }

    // ── Tree building ────────────────────────────────────────────────

    pub(crate) fn build_tree(mut self) -> (rowan::GreenNode, Vec<Diagnostic>) {
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut token_pos: usize = 0;
        let mut forward_parents: Vec<(usize, SyntaxKind)> = Vec::new();

        let mut i = 0;
        while i < self.events.len() {
            match self.events[i] {
                Event::Open { kind, forward_parent } => {
                    if forward_parent.is_some() {
                        forward_parents.clear();
                        let mut current = i;
                        loop {
                            let (fk, fp) = match self.events[current] {
                                Event::Open { kind, forward_parent } => (kind, forward_parent),
                                _ => unreachable!(),
                            };
                            forward_parents.push((current, fk));
                            match fp {
                                Some(next) => current = next,
                                None => break,
                            }
                        }
                        for &(idx, _) in forward_parents.iter().skip(1) {
                            if let Event::Open { kind, forward_parent } = &mut self.events[idx] {
                                *kind = SyntaxKind::TOMBSTONE;
                                *forward_parent = None;
                            }
                        }
                        if let Event::Open { forward_parent, .. } = &mut self.events[i] {
                            *forward_parent = None;
                        }
                        for &(_, fk) in forward_parents.iter().rev() {
                            if fk != SyntaxKind::TOMBSTONE {
                                builder.start_node(rowan::SyntaxKind(fk as u16));
                            }
                        }
                    } else if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(rowan::SyntaxKind(kind as u16));
                    }
                }
                Event::Close => builder.finish_node(),
                Event::Advance => {
                    if token_pos < self.tokens.len() {
                        let token = &self.tokens[token_pos];
                        let syntax_kind = SyntaxKind::from(token.kind);
                        let text = &self.source[token.span.start as usize..token.span.end as usize];
                        builder.token(rowan::SyntaxKind(syntax_kind as u16), text);
                        token_pos += 1;
                    }
                }
            }
            i += 1;
        }

        (builder.finish(), self.diagnostics)
    }
}

fn is_punctuation(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        SEMICOLON | R_BRACE | R_PAREN | R_BRACKET | COLON | COMMA | ARROW
    )
}

// ── Top-level parsing ────────────────────────────────────────────────

/// Parse a complete program: `program := statement*` (spec grammar).
pub(crate) fn parse_program(p: &mut Parser) {
    let root = p.open();
    while !p.is_at_end() {
        if p.has_too_many_errors() {
            break;
        }
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.is_at_end() {
            break;
        }
        items::statement(p);
    }
    while !p.is_at_end() {
        p.advance();
    }
    p.advance(); // Eof
    p.close(root, SyntaxKind::PROGRAM);
}

/// Result of a parse: the green tree (lossless unless `DirectAst`
/// dropped trivia up front) plus the diagnostics accumulated along the
/// way.
pub struct Parse {
    pub(crate) green: rowan::GreenNode,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) mode: ParseMode,
}

impl Parse {
    pub fn syntax(&self) -> crate::cst::SyntaxNode {
        crate::cst::SyntaxNode::new_root(self.green.clone())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn ok(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }
}

/// Parse `source` in the requested mode, returning a lossless (or
/// trivia-dropped, for `DirectAst`) CST plus diagnostics. Invariant P1:
/// always returns a tree, even for malformed or random-byte input.
pub fn parse(source: &str, mode: ParseMode, recovery: RecoveryConfig) -> Parse {
    let config = match mode {
        ParseMode::DirectAst => CSTConfig {
            preserve_whitespace: false,
            preserve_comments: false,
            emit_error_tokens: true,
            attach_trivia: false,
            detailed_expression_nodes: false,
        },
        ParseMode::CstThenAst | ParseMode::CstOnly => CSTConfig::default(),
    };
    let (tokens, lex_diagnostics) = scan_all(source, config);
    let mut p = Parser::new(tokens, source, recovery);
    parse_program(&mut p);
    let (green, mut diagnostics) = p.build_tree();
    let mut all = lex_diagnostics;
    all.append(&mut diagnostics);
    Parse {
        green,
        diagnostics: all,
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst_ext::CstNodeExt;

    #[test]
    fn empty_input_produces_program_with_no_diagnostics() {
        let parse = parse("", ParseMode::CstOnly, RecoveryConfig::default());
        assert!(parse.ok());
        assert_eq!(parse.syntax().kind(), SyntaxKind::PROGRAM);
        assert_eq!(parse.syntax().children().count(), 0);
    }

    #[test]
    fn trivia_only_input_has_no_statements_but_round_trips() {
        let source = "// just a comment\n  \n";
        let parse = parse(source, ParseMode::CstOnly, RecoveryConfig::default());
        assert!(parse.ok());
        assert_eq!(parse.syntax().reconstruct_source(), source);
    }

    #[test]
    fn robustness_on_random_bytes_never_panics() {
        let inputs = ["\u{0}\u{1}\u{2}", "}}}{{{", "+++---***", "\"unterminated"];
        for input in inputs {
            let parse = parse(input, ParseMode::CstOnly, RecoveryConfig::default());
            assert_eq!(parse.syntax().kind(), SyntaxKind::PROGRAM);
        }
    }

    #[test]
    fn direct_ast_mode_drops_trivia_from_the_tree() {
        let source = "var x = 1; // trailing\n";
        let parse = parse(source, ParseMode::DirectAst, RecoveryConfig::default());
        assert!(!parse
            .syntax()
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .any(|t| t.kind() == SyntaxKind::COMMENT_LINE));
    }
}
