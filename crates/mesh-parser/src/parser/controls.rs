//! Control-flow statement grammar.
//!
//! ```text
//! block     := "{" statement* "}"
//! if_stmt   := "if" "(" expr ")" block elif_clause* else_clause?
//! elif_clause := "elif" "(" expr ")" block
//! else_clause := "else" block
//! while_stmt  := "while" "(" expr ")" block
//! for_stmt    := "for" "(" simple? ";" expr? ";" simple? ")" block   // C-style
//! iter_stmt   := "iter" "(" IDENT "in" expr ")" block                // for-each
//! match_stmt  := "match" "(" expr ")" "{" match_arm+ "}"
//! match_arm   := pattern ("where" expr)? "->" (block | expr ";")
//! attempt_stmt := "attempt" block handle_clause* else_clause?
//! handle_clause := "handle" "(" IDENT (":" type)? ")" block
//! parallel_stmt := "parallel" block
//! concurrent_stmt := "concurrent" block
//! unsafe_stmt := "unsafe" block
//! contract_stmt := "contract" "(" expr ")" ";"
//! comptime_stmt := "comptime" block
//! ```
use super::{MarkClosed, Parser};
use crate::syntax_kind::SyntaxKind;

pub(crate) fn block(p: &mut Parser) -> MarkClosed {
    let (line, _) = p.current_line_col();
    p.blocks.push("block", line);
    let m = p.open();
    p.expect(SyntaxKind::L_BRACE);
    while !p.at(SyntaxKind::R_BRACE) && !p.is_at_end() {
        if p.has_too_many_errors() {
            break;
        }
        while p.eat(SyntaxKind::SEMICOLON) {}
        if p.at(SyntaxKind::R_BRACE) || p.is_at_end() {
            break;
        }
        super::items::statement(p);
    }
    let closed = p.eat(SyntaxKind::R_BRACE);
    p.last_block_incomplete = !closed;
    if !closed {
        p.diagnose_expected(SyntaxKind::R_BRACE);
        if p.recovery.insert_missing_tokens {
            let mm = p.open();
            p.close(mm, SyntaxKind::MISSING_NODE);
        }
    }
    p.blocks.pop();
    p.close(m, SyntaxKind::BLOCK)
}

pub(crate) fn if_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // if
    p.expect(SyntaxKind::L_PAREN);
    super::expressions::expr(p);
    p.expect(SyntaxKind::R_PAREN);
    block(p);
    let mut incomplete = p.last_block_incomplete;
    while p.at(SyntaxKind::ELIF_KW) {
        let elif = p.open();
        p.advance();
        p.expect(SyntaxKind::L_PAREN);
        super::expressions::expr(p);
        p.expect(SyntaxKind::R_PAREN);
        block(p);
        incomplete |= p.last_block_incomplete;
        p.close(elif, SyntaxKind::ELIF_CLAUSE);
    }
    if p.at(SyntaxKind::ELSE_KW) {
        let else_ = p.open();
        p.advance();
        block(p);
        incomplete |= p.last_block_incomplete;
        p.close(else_, SyntaxKind::ELSE_CLAUSE);
    }
    p.close(m, finish_kind(p, incomplete, SyntaxKind::IF_STMT))
}

pub(crate) fn while_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // while
    p.expect(SyntaxKind::L_PAREN);
    super::expressions::expr(p);
    p.expect(SyntaxKind::R_PAREN);
    block(p);
    p.close(m, finish_kind(p, p.last_block_incomplete, SyntaxKind::WHILE_STMT))
}

/// C-style three-clause loop, distinct from the for-each `iter_stmt`.
pub(crate) fn for_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // for
    p.expect(SyntaxKind::L_PAREN);
    if !p.at(SyntaxKind::SEMICOLON) {
        super::expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::SEMICOLON) {
        super::expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::R_PAREN) {
        super::expressions::expr(p);
    }
    p.expect(SyntaxKind::R_PAREN);
    block(p);
    p.close(m, finish_kind(p, p.last_block_incomplete, SyntaxKind::FOR_STMT))
}

pub(crate) fn iter_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // iter
    p.expect(SyntaxKind::L_PAREN);
    p.expect(SyntaxKind::IDENT);
    p.expect(SyntaxKind::IN_KW);
    super::expressions::expr(p);
    p.expect(SyntaxKind::R_PAREN);
    block(p);
    p.close(m, finish_kind(p, p.last_block_incomplete, SyntaxKind::ITER_STMT))
}

/// `kind` unless `incomplete` and `create_partial_nodes` ask for the
/// enclosing production to be finalized as `INCOMPLETE_NODE` instead
/// (spec §4.3 point 4): a block body it contains never found its `}`.
fn finish_kind(p: &Parser, incomplete: bool, kind: SyntaxKind) -> SyntaxKind {
    if incomplete && p.recovery.create_partial_nodes {
        SyntaxKind::INCOMPLETE_NODE
    } else {
        kind
    }
}

pub(crate) fn match_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // match
    p.expect(SyntaxKind::L_PAREN);
    super::expressions::expr(p);
    p.expect(SyntaxKind::R_PAREN);
    p.expect(SyntaxKind::L_BRACE);
    while !p.at(SyntaxKind::R_BRACE) && !p.is_at_end() {
        if p.has_too_many_errors() {
            break;
        }
        match_arm(p);
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(m, SyntaxKind::MATCH_STMT)
}

fn match_arm(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    super::patterns::pattern(p);
    if p.eat(SyntaxKind::WHERE_KW) {
        super::expressions::expr(p);
    }
    p.expect(SyntaxKind::ARROW);
    if p.at(SyntaxKind::L_BRACE) {
        block(p);
    } else {
        super::expressions::expr(p);
        p.expect(SyntaxKind::SEMICOLON);
    }
    p.eat(SyntaxKind::COMMA);
    // Not wrapped in INCOMPLETE_NODE on a missing `}` like the other
    // block-bodied productions: `lower_match` finds arms by
    // `find_children(MATCH_ARM)`, and an INCOMPLETE_NODE kind would drop
    // the arm from the match silently instead of surfacing it as an error.
    p.close(m, SyntaxKind::MATCH_ARM)
}

pub(crate) fn attempt_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // attempt
    block(p);
    let mut incomplete = p.last_block_incomplete;
    while p.at(SyntaxKind::HANDLE_KW) {
        let handle = p.open();
        p.advance();
        p.expect(SyntaxKind::L_PAREN);
        p.expect(SyntaxKind::IDENT);
        if p.eat(SyntaxKind::COLON) {
            super::types::type_annotation(p);
        }
        p.expect(SyntaxKind::R_PAREN);
        block(p);
        incomplete |= p.last_block_incomplete;
        p.close(handle, SyntaxKind::HANDLE_CLAUSE);
    }
    if p.at(SyntaxKind::ELSE_KW) {
        let else_ = p.open();
        p.advance();
        block(p);
        incomplete |= p.last_block_incomplete;
        p.close(else_, SyntaxKind::ELSE_CLAUSE);
    }
    p.close(m, finish_kind(p, incomplete, SyntaxKind::ATTEMPT_STMT))
}

pub(crate) fn parallel_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // parallel
    block(p);
    p.close(m, finish_kind(p, p.last_block_incomplete, SyntaxKind::PARALLEL_STMT))
}

pub(crate) fn concurrent_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // concurrent
    block(p);
    p.close(m, finish_kind(p, p.last_block_incomplete, SyntaxKind::CONCURRENT_STMT))
}

pub(crate) fn unsafe_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // unsafe
    block(p);
    p.close(m, finish_kind(p, p.last_block_incomplete, SyntaxKind::UNSAFE_STMT))
}

/// A runtime-checked assertion: `contract(condition);`.
pub(crate) fn contract_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // contract
    p.expect(SyntaxKind::L_PAREN);
    super::expressions::expr(p);
    p.expect(SyntaxKind::R_PAREN);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::CONTRACT_STMT)
}

pub(crate) fn comptime_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // comptime
    block(p);
    p.close(m, finish_kind(p, p.last_block_incomplete, SyntaxKind::COMPTIME_STMT))
}
