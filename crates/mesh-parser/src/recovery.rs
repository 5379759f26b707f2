//! Parser error-recovery configuration (spec §4.3).
//!
//! Grounded in `original_source/src/frontend/scanner.hh`'s `CSTConfig`
//! struct-of-bools style, generalized to the parser's five-step recovery
//! procedure: diagnose, try-insert, synchronize, build-partial, continue.

use crate::syntax_kind::SyntaxKind;

/// Tunables for the parser's error-recovery behavior.
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Hard ceiling on the number of diagnostics a single parse may emit.
    /// Once reached, further errors are dropped and parsing winds down
    /// gracefully rather than aborting outright.
    pub max_errors: usize,
    /// Token kinds the parser resynchronizes on after an unrecoverable
    /// production failure: skip forward until one of these is found at
    /// the same brace/paren depth as the failing production's entry point.
    pub sync_tokens: Vec<SyntaxKind>,
    /// When the expected token is punctuation, synthesize a zero-width
    /// `MISSING` token/node at the current position and continue as if
    /// it had been present.
    pub insert_missing_tokens: bool,
    /// When insertion isn't applicable, skip invalid tokens forward to a
    /// synchronization point, wrapping them in an `ERROR` node.
    pub skip_invalid_tokens: bool,
    /// Finalize a partially-built production as an `INCOMPLETE` node with
    /// its missing sub-elements enumerated, rather than discarding it.
    pub create_partial_nodes: bool,
    /// Whether the enclosing production resumes after a recovered error
    /// (the default) or bails out to its own caller.
    pub continue_on_error: bool,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_errors: 200,
            sync_tokens: vec![
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_BRACE,
                SyntaxKind::NEWLINE,
                SyntaxKind::FN_KW,
                SyntaxKind::CLASS_KW,
                SyntaxKind::VAR_KW,
                SyntaxKind::IF_KW,
                SyntaxKind::FOR_KW,
                SyntaxKind::ITER_KW,
                SyntaxKind::WHILE_KW,
                SyntaxKind::MATCH_KW,
                SyntaxKind::RETURN_KW,
                SyntaxKind::BREAK_KW,
                SyntaxKind::CONTINUE_KW,
                SyntaxKind::EOF,
            ],
            insert_missing_tokens: true,
            skip_invalid_tokens: true,
            create_partial_nodes: true,
            continue_on_error: true,
        }
    }
}

impl RecoveryConfig {
    pub fn is_sync_token(&self, kind: SyntaxKind) -> bool {
        self.sync_tokens.contains(&kind)
    }
}

/// A stack of `(block_kind, opening_token_span)` entries, pushed on `{`,
/// function heads, class heads, etc. On a mismatched-close diagnostic the
/// topmost frame supplies a "caused by: unclosed <kind> on line N"
/// annotation.
#[derive(Debug, Default)]
pub struct BlockContextStack {
    frames: Vec<BlockFrame>,
}

#[derive(Debug, Clone)]
pub struct BlockFrame {
    pub kind: &'static str,
    pub line: u32,
}

impl BlockContextStack {
    pub fn push(&mut self, kind: &'static str, line: u32) {
        self.frames.push(BlockFrame { kind, line });
    }

    pub fn pop(&mut self) -> Option<BlockFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&BlockFrame> {
        self.frames.last()
    }

    /// Render the "caused by" annotation for the topmost open frame, if any.
    pub fn caused_by_message(&self) -> Option<String> {
        self.top()
            .map(|f| format!("unclosed `{}` on line {}", f.kind, f.line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_recovery_config_includes_core_sync_tokens() {
        let cfg = RecoveryConfig::default();
        assert!(cfg.is_sync_token(SyntaxKind::SEMICOLON));
        assert!(cfg.is_sync_token(SyntaxKind::R_BRACE));
        assert!(cfg.is_sync_token(SyntaxKind::FN_KW));
        assert!(!cfg.is_sync_token(SyntaxKind::PLUS));
    }

    #[test]
    fn block_context_stack_reports_caused_by() {
        let mut stack = BlockContextStack::default();
        assert!(stack.caused_by_message().is_none());
        stack.push("{", 1);
        assert_eq!(
            stack.caused_by_message(),
            Some("unclosed `{` on line 1".to_string())
        );
        stack.pop();
        assert!(stack.caused_by_message().is_none());
    }
}
