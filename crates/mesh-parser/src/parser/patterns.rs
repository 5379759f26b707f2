//! Match-arm pattern grammar.
//!
//! ```text
//! pattern := "_"                          // wildcard
//!          | literal                      // literal_pattern
//!          | IDENT "(" pattern ("," pattern)* ")"   // constructor_pattern
//!          | "[" pattern ("," pattern)* "]"          // list_pattern
//!          | IDENT                         // binding_pattern
//! ```
use super::{MarkClosed, Parser};
use crate::syntax_kind::SyntaxKind;

pub(crate) fn pattern(p: &mut Parser) -> MarkClosed {
    match p.current() {
        SyntaxKind::UNDERSCORE => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::WILDCARD_PAT)
        }
        SyntaxKind::INT_LITERAL
        | SyntaxKind::FLOAT_LITERAL
        | SyntaxKind::STRING_START
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NIL_KW => {
            let m = p.open();
            super::expressions::literal(p);
            p.close(m, SyntaxKind::LITERAL_PAT)
        }
        SyntaxKind::MINUS => {
            let m = p.open();
            p.advance();
            super::expressions::literal(p);
            p.close(m, SyntaxKind::LITERAL_PAT)
        }
        SyntaxKind::L_BRACKET => {
            let m = p.open();
            p.advance();
            if !p.at(SyntaxKind::R_BRACKET) {
                pattern(p);
                while p.eat(SyntaxKind::COMMA) {
                    if p.at(SyntaxKind::R_BRACKET) {
                        break;
                    }
                    pattern(p);
                }
            }
            p.expect(SyntaxKind::R_BRACKET);
            p.close(m, SyntaxKind::LIST_PAT)
        }
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::L_PAREN => {
            let m = p.open();
            p.advance(); // name
            p.advance(); // (
            if !p.at(SyntaxKind::R_PAREN) {
                pattern(p);
                while p.eat(SyntaxKind::COMMA) {
                    if p.at(SyntaxKind::R_PAREN) {
                        break;
                    }
                    pattern(p);
                }
            }
            p.expect(SyntaxKind::R_PAREN);
            p.close(m, SyntaxKind::CONSTRUCTOR_PAT)
        }
        SyntaxKind::IDENT => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::BINDING_PAT)
        }
        _ => {
            let m = p.open();
            p.error("expected a pattern");
            p.close(m, SyntaxKind::MISSING_NODE)
        }
    }
}
