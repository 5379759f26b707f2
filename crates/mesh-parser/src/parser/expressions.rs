//! Expression grammar (spec §4.3), precedence low → high:
//! assignment, logical_or, logical_and, equality, comparison, term,
//! factor, power (right-associative), unary, range, call, primary.
//!
//! Implemented as one recursive-descent function per precedence level
//! (rather than a binding-power table) so each function maps 1:1 onto the
//! grammar's named levels in spec §4.3.

use super::{MarkClosed, Parser};
use crate::syntax_kind::SyntaxKind;

pub(crate) fn expr(p: &mut Parser) -> MarkClosed {
    assignment(p)
}

fn assignment(p: &mut Parser) -> MarkClosed {
    let lhs = logical_or(p);
    if is_assign_op(p.current()) {
        let m = p.open_before(lhs);
        p.advance();
        assignment(p); // right-associative
        return p.close(m, SyntaxKind::ASSIGN_EXPR);
    }
    lhs
}

fn is_assign_op(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(kind, EQ | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | PERCENT_EQ)
}

macro_rules! left_assoc_level {
    ($name:ident, $next:ident, [$($op:pat),+]) => {
        fn $name(p: &mut Parser) -> MarkClosed {
            let mut lhs = $next(p);
            while matches!(p.current(), $($op)|+) {
                let m = p.open_before(lhs);
                p.advance();
                $next(p);
                lhs = p.close(m, SyntaxKind::BINARY_EXPR);
            }
            lhs
        }
    };
}

left_assoc_level!(logical_or, logical_and, [SyntaxKind::OR_KW]);
left_assoc_level!(logical_and, equality, [SyntaxKind::AND_KW]);
left_assoc_level!(equality, comparison, [SyntaxKind::EQ_EQ, SyntaxKind::BANG_EQ]);
left_assoc_level!(
    comparison,
    term,
    [SyntaxKind::LT, SyntaxKind::GT, SyntaxKind::LT_EQ, SyntaxKind::GT_EQ]
);
left_assoc_level!(term, factor, [SyntaxKind::PLUS, SyntaxKind::MINUS]);
left_assoc_level!(
    factor,
    power,
    [SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT]
);

/// `**` is right-associative: `d ** e` on the right recurses back into
/// `power` itself rather than calling `unary` again.
fn power(p: &mut Parser) -> MarkClosed {
    let lhs = unary(p);
    if p.at(SyntaxKind::POWER) {
        let m = p.open_before(lhs);
        p.advance();
        power(p);
        return p.close(m, SyntaxKind::BINARY_EXPR);
    }
    lhs
}

fn unary(p: &mut Parser) -> MarkClosed {
    match p.current() {
        SyntaxKind::MINUS | SyntaxKind::BANG | SyntaxKind::TILDE => {
            let m = p.open();
            p.advance();
            unary(p);
            p.close(m, SyntaxKind::UNARY_EXPR)
        }
        _ => range(p),
    }
}

/// `a..b`: the `..`/`...` tokens are only ever consumed here, never as a
/// primary prefix (spec §4.3's range-vs-method-chain ambiguity note).
fn range(p: &mut Parser) -> MarkClosed {
    let lhs = call(p);
    if matches!(p.current(), SyntaxKind::RANGE | SyntaxKind::ELLIPSIS) {
        let m = p.open_before(lhs);
        p.advance();
        call(p);
        return p.close(m, SyntaxKind::RANGE_EXPR);
    }
    lhs
}

fn call(p: &mut Parser) -> MarkClosed {
    let mut lhs = primary(p);
    loop {
        match p.current() {
            SyntaxKind::L_PAREN => {
                let m = p.open_before(lhs);
                arg_list(p);
                lhs = p.close(m, SyntaxKind::CALL_EXPR);
            }
            SyntaxKind::DOT | SyntaxKind::SAFE => {
                let m = p.open_before(lhs);
                p.advance();
                p.expect(SyntaxKind::IDENT);
                lhs = p.close(m, SyntaxKind::FIELD_EXPR);
            }
            SyntaxKind::L_BRACKET => {
                let m = p.open_before(lhs);
                p.advance();
                expr(p);
                p.expect(SyntaxKind::R_BRACKET);
                lhs = p.close(m, SyntaxKind::INDEX_EXPR);
            }
            _ => break,
        }
    }
    lhs
}

fn primary(p: &mut Parser) -> MarkClosed {
    match p.current() {
        SyntaxKind::INT_LITERAL | SyntaxKind::FLOAT_LITERAL | SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW | SyntaxKind::NIL_KW => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::LITERAL_EXPR)
        }
        SyntaxKind::STRING_START => string_expr(p),
        SyntaxKind::THIS_KW => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::THIS_EXPR)
        }
        SyntaxKind::SUPER_KW => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::SUPER_EXPR)
        }
        SyntaxKind::IDENT => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::NAME_EXPR)
        }
        SyntaxKind::L_PAREN => {
            let m = p.open();
            p.advance();
            expr(p);
            p.expect(SyntaxKind::R_PAREN);
            p.close(m, SyntaxKind::PAREN_EXPR)
        }
        SyntaxKind::L_BRACKET => list_expr(p),
        SyntaxKind::L_BRACE => dict_expr(p),
        SyntaxKind::FN_KW => lambda_expr(p),
        _ => {
            let m = p.open();
            p.error("expected an expression");
            p.close(m, SyntaxKind::MISSING_NODE)
        }
    }
}

fn list_expr(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // [
    if !p.at(SyntaxKind::R_BRACKET) {
        expr(p);
        while p.eat(SyntaxKind::COMMA) {
            if p.at(SyntaxKind::R_BRACKET) {
                break;
            }
            expr(p);
        }
    }
    p.expect(SyntaxKind::R_BRACKET);
    p.close(m, SyntaxKind::LIST_EXPR)
}

fn dict_expr(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // {
    if !p.at(SyntaxKind::R_BRACE) {
        dict_entry(p);
        while p.eat(SyntaxKind::COMMA) {
            if p.at(SyntaxKind::R_BRACE) {
                break;
            }
            dict_entry(p);
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(m, SyntaxKind::DICT_EXPR)
}

fn dict_entry(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    expr(p);
    p.expect(SyntaxKind::COLON);
    expr(p);
    p.close(m, SyntaxKind::DICT_ENTRY)
}

fn lambda_expr(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // fn
    super::items::param_list(p);
    if p.eat(SyntaxKind::ARROW) {
        super::types::type_annotation(p);
    }
    super::controls::block(p);
    p.close(m, SyntaxKind::LAMBDA_EXPR)
}

/// `"..." { expr } "..."` → `STRING_EXPR` containing `STRING_CONTENT`
/// tokens interleaved with `INTERPOLATION_SEGMENT` children, each
/// wrapping one interpolated expression.
fn string_expr(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::STRING_START);
    loop {
        match p.current() {
            SyntaxKind::STRING_CONTENT => p.advance(),
            SyntaxKind::INTERPOLATION_START => {
                let seg = p.open();
                p.advance();
                expr(p);
                p.expect(SyntaxKind::INTERPOLATION_END);
                p.close(seg, SyntaxKind::INTERPOLATION_SEGMENT);
            }
            SyntaxKind::STRING_END => {
                p.advance();
                break;
            }
            _ => break,
        }
    }
    p.close(m, SyntaxKind::STRING_EXPR)
}

/// Parses (but does not itself classify positional-vs-named) a literal;
/// shared with `patterns::pattern`'s literal-pattern arm.
pub(crate) fn literal(p: &mut Parser) {
    match p.current() {
        SyntaxKind::INT_LITERAL | SyntaxKind::FLOAT_LITERAL | SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW | SyntaxKind::NIL_KW => {
            p.advance();
        }
        SyntaxKind::STRING_START => {
            string_expr(p);
        }
        _ => p.error("expected a literal"),
    }
}

/// `"(" args ")"`, `args := (arg ("," arg)*)?`, `arg := (IDENT "=")? expr`.
/// The positional-vs-named split is a builder concern (spec §4.4's
/// `CALL_EXPR` lowering rule); the CST just groups them uniformly.
pub(crate) fn arg_list(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::L_PAREN);
    if !p.at(SyntaxKind::R_PAREN) {
        arg(p);
        while p.eat(SyntaxKind::COMMA) {
            if p.at(SyntaxKind::R_PAREN) {
                break;
            }
            arg(p);
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.close(m, SyntaxKind::ARG_LIST)
}

fn arg(p: &mut Parser) -> MarkClosed {
    if p.current() == SyntaxKind::IDENT && p.nth(1) == SyntaxKind::EQ {
        let m = p.open();
        p.advance(); // name
        p.advance(); // =
        expr(p);
        p.close(m, SyntaxKind::NAMED_ARG)
    } else {
        let e = expr(p);
        let m = p.open_before(e);
        p.close(m, SyntaxKind::ARG)
    }
}

/// `expr ";"` wrapped as an `EXPR_STMT`, the final alternative of
/// `simple` in spec §4.3's grammar.
pub(crate) fn expr_stmt(p: &mut Parser) -> MarkClosed {
    let e = expr(p);
    let m = p.open_before(e);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::EXPR_STMT)
}
