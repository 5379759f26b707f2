//! Type-annotation grammar (spec §3's `TypeAnnotation` tagged tree, parsed
//! at the CST level here; lowered into the actual tagged tree by
//! `builder`/`ast::ty`).
//!
//! ```text
//! type           := union_type
//! union_type     := postfix_type ("|" postfix_type)*
//! postfix_type   := primary_type "?"?
//! primary_type   := primitive_type_kw | IDENT
//!                 | "[" type "]"                      // list
//!                 | "{" type ":" type "}"              // dict
//!                 | "array" "[" type "]"
//!                 | "(" (type ("," type)*)? ")" "->" type   // function
//! fallible_type  := type "throws" type
//! refined_type   := type "where" "(" expr ")"
//! ```
use super::{MarkClosed, Parser};
use crate::syntax_kind::SyntaxKind;

pub(crate) fn type_annotation(p: &mut Parser) -> MarkClosed {
    let lhs = fallible_type(p);
    if p.at(SyntaxKind::WHERE_KW) {
        let m = p.open_before(lhs);
        p.advance(); // where
        p.expect(SyntaxKind::L_PAREN);
        super::expressions::expr(p);
        p.expect(SyntaxKind::R_PAREN);
        return p.close(m, SyntaxKind::REFINED_TYPE);
    }
    lhs
}

fn fallible_type(p: &mut Parser) -> MarkClosed {
    let lhs = union_type(p);
    if p.at(SyntaxKind::THROWS_KW) {
        let m = p.open_before(lhs);
        p.advance();
        union_type(p);
        return p.close(m, SyntaxKind::FALLIBLE_TYPE);
    }
    lhs
}

fn union_type(p: &mut Parser) -> MarkClosed {
    let mut lhs = postfix_type(p);
    if p.at(SyntaxKind::PIPE) {
        let m = p.open_before(lhs);
        while p.eat(SyntaxKind::PIPE) {
            postfix_type(p);
        }
        lhs = p.close(m, SyntaxKind::UNION_TYPE);
    }
    lhs
}

fn postfix_type(p: &mut Parser) -> MarkClosed {
    let lhs = primary_type(p);
    if p.at(SyntaxKind::QUESTION) {
        let m = p.open_before(lhs);
        p.advance();
        return p.close(m, SyntaxKind::OPTIONAL_TYPE);
    }
    lhs
}

fn primary_type(p: &mut Parser) -> MarkClosed {
    match p.current() {
        SyntaxKind::L_BRACKET => {
            let m = p.open();
            p.advance();
            type_annotation(p);
            p.expect(SyntaxKind::R_BRACKET);
            p.close(m, SyntaxKind::LIST_TYPE)
        }
        SyntaxKind::L_BRACE => {
            let m = p.open();
            p.advance();
            type_annotation(p);
            p.expect(SyntaxKind::COLON);
            type_annotation(p);
            p.expect(SyntaxKind::R_BRACE);
            p.close(m, SyntaxKind::DICT_TYPE)
        }
        SyntaxKind::ARRAY_TYPE_KW => {
            let m = p.open();
            p.advance();
            if p.eat(SyntaxKind::L_BRACKET) {
                type_annotation(p);
                p.expect(SyntaxKind::R_BRACKET);
            }
            p.close(m, SyntaxKind::ARRAY_TYPE)
        }
        SyntaxKind::L_PAREN => {
            let m = p.open();
            p.advance();
            if !p.at(SyntaxKind::R_PAREN) {
                type_annotation(p);
                while p.eat(SyntaxKind::COMMA) {
                    type_annotation(p);
                }
            }
            p.expect(SyntaxKind::R_PAREN);
            p.expect(SyntaxKind::ARROW);
            type_annotation(p);
            p.close(m, SyntaxKind::FUNCTION_TYPE)
        }
        kind if is_primitive_type_kw(kind) => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::TYPE_REF)
        }
        SyntaxKind::IDENT => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::TYPE_REF)
        }
        _ => {
            let m = p.open();
            p.error("expected a type");
            p.close(m, SyntaxKind::MISSING_NODE)
        }
    }
}

fn is_primitive_type_kw(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        INT_TYPE_KW
            | I8_TYPE_KW
            | I16_TYPE_KW
            | I32_TYPE_KW
            | I64_TYPE_KW
            | UINT_TYPE_KW
            | U8_TYPE_KW
            | U16_TYPE_KW
            | U32_TYPE_KW
            | U64_TYPE_KW
            | FLOAT_TYPE_KW
            | F32_TYPE_KW
            | F64_TYPE_KW
            | STR_TYPE_KW
            | BOOL_TYPE_KW
            | LIST_TYPE_KW
            | DICT_TYPE_KW
            | ENUM_TYPE_KW
            | SUM_TYPE_KW
            | UNION_TYPE_KW
            | OPTION_TYPE_KW
            | RESULT_TYPE_KW
            | ANY_TYPE_KW
            | NIL_KW
            | CHANNEL_TYPE_KW
            | ATOMIC_TYPE_KW
    )
}

/// Whether the current token can start a type (used by callers
/// disambiguating an optional `: type` annotation from what follows).
pub(crate) fn starts_type(p: &Parser) -> bool {
    matches!(
        p.current(),
        SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::IDENT | SyntaxKind::ARRAY_TYPE_KW
    ) || is_primitive_type_kw(p.current())
}
