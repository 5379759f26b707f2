//! Declaration grammar and the top-level statement dispatch.
//!
//! ```text
//! statement   := decl | control | simple
//! decl        := var_decl | fn_decl | class_decl | trait_decl
//!              | interface_decl | module_decl | type_decl | enum_decl
//!              | import_decl
//! var_decl    := "pub"? "var" IDENT (":" type)? ("=" expr)? ";"
//! fn_decl     := "pub"? "fn" IDENT param_list ("->" type)? ("throws" type)?
//!                (block | ";")              // ";" for trait/interface signatures
//! class_decl  := "pub"? "class" IDENT (":" IDENT ("," IDENT)*)? class_body
//! trait_decl  := "pub"? "trait" IDENT "{" fn_decl* "}"
//! interface_decl := "pub"? "interface" IDENT "{" fn_decl* "}"
//! module_decl := "pub"? "module" IDENT "{" statement* "}"
//! type_decl   := "pub"? "type" IDENT "=" type ";"
//! enum_decl   := "pub"? "enum" IDENT "{" enum_variant ("," enum_variant)* ","? "}"
//! enum_variant:= IDENT ("(" type ("," type)* ")")?
//! import_decl := "import" ("{" import_item ("," import_item)* "}")? dotted_path ";"
//! import_item := IDENT ("as" IDENT)?
//! ```
use super::{MarkClosed, Parser};
use crate::syntax_kind::SyntaxKind;

/// Dispatches on the current (skipping a leading `pub`) keyword to the
/// right declaration, control, or simple-statement production.
pub(crate) fn statement(p: &mut Parser) -> MarkClosed {
    let lookahead = if p.at(SyntaxKind::PUB_KW) { p.nth(1) } else { p.current() };
    match lookahead {
        SyntaxKind::VAR_KW => var_decl(p),
        SyntaxKind::FN_KW if is_named_fn(p) => fn_decl(p),
        SyntaxKind::CLASS_KW => class_decl(p),
        SyntaxKind::TRAIT_KW => trait_decl(p),
        SyntaxKind::INTERFACE_KW => interface_decl(p),
        SyntaxKind::MODULE_KW => module_decl(p),
        SyntaxKind::TYPE_KW => type_decl(p),
        SyntaxKind::ENUM_KW => enum_decl(p),
        SyntaxKind::IMPORT_KW => import_decl(p),
        SyntaxKind::IF_KW => super::controls::if_stmt(p),
        SyntaxKind::WHILE_KW => super::controls::while_stmt(p),
        SyntaxKind::FOR_KW => super::controls::for_stmt(p),
        SyntaxKind::ITER_KW => super::controls::iter_stmt(p),
        SyntaxKind::MATCH_KW => super::controls::match_stmt(p),
        SyntaxKind::ATTEMPT_KW => super::controls::attempt_stmt(p),
        SyntaxKind::PARALLEL_KW => super::controls::parallel_stmt(p),
        SyntaxKind::CONCURRENT_KW => super::controls::concurrent_stmt(p),
        SyntaxKind::UNSAFE_KW => super::controls::unsafe_stmt(p),
        SyntaxKind::CONTRACT_KW => super::controls::contract_stmt(p),
        SyntaxKind::COMPTIME_KW => super::controls::comptime_stmt(p),
        SyntaxKind::L_BRACE => super::controls::block(p),
        SyntaxKind::RETURN_KW => return_stmt(p),
        SyntaxKind::BREAK_KW => break_stmt(p),
        SyntaxKind::CONTINUE_KW => continue_stmt(p),
        SyntaxKind::PRINT_KW => print_stmt(p),
        _ => super::expressions::expr_stmt(p),
    }
}

/// `fn` only starts a declaration when immediately followed by a name;
/// bare `fn (...) { ... }` is a lambda expression handled by
/// `expressions::lambda_expr` instead.
fn is_named_fn(p: &Parser) -> bool {
    if p.at(SyntaxKind::PUB_KW) {
        p.nth(2) == SyntaxKind::IDENT
    } else {
        p.nth(1) == SyntaxKind::IDENT
    }
}

fn var_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::VAR_KW);
    p.expect(SyntaxKind::IDENT);
    if p.eat(SyntaxKind::COLON) {
        super::types::type_annotation(p);
    }
    if p.eat(SyntaxKind::EQ) {
        super::expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::VAR_DECL)
}

fn fn_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::FN_KW);
    p.expect(SyntaxKind::IDENT);
    param_list(p);
    if p.eat(SyntaxKind::ARROW) {
        super::types::type_annotation(p);
    }
    if p.eat(SyntaxKind::THROWS_KW) {
        super::types::type_annotation(p);
    }
    let mut incomplete = false;
    if p.at(SyntaxKind::L_BRACE) {
        super::controls::block(p);
        incomplete = p.last_block_incomplete;
    } else {
        p.expect(SyntaxKind::SEMICOLON);
    }
    // A function whose body never found its closing `}` is finalized as
    // INCOMPLETE_NODE rather than FN_DECL, enumerating what's missing in
    // the CST shape itself rather than just the diagnostic list.
    let kind = if incomplete && p.recovery.create_partial_nodes {
        SyntaxKind::INCOMPLETE_NODE
    } else {
        SyntaxKind::FN_DECL
    };
    p.close(m, kind)
}

/// `"(" (param ("," param)*)? ")"`. Shared by `fn_decl` and lambda
/// expressions.
pub(crate) fn param_list(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::L_PAREN);
    if !p.at(SyntaxKind::R_PAREN) {
        param(p);
        while p.eat(SyntaxKind::COMMA) {
            if p.at(SyntaxKind::R_PAREN) {
                break;
            }
            param(p);
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.close(m, SyntaxKind::PARAM_LIST)
}

fn param(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::IDENT);
    if p.eat(SyntaxKind::COLON) {
        super::types::type_annotation(p);
    }
    if p.eat(SyntaxKind::EQ) {
        let dv = p.open();
        super::expressions::expr(p);
        p.close(dv, SyntaxKind::DEFAULT_VALUE);
    }
    p.close(m, SyntaxKind::PARAM)
}

fn class_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::CLASS_KW);
    p.expect(SyntaxKind::IDENT);
    if p.at(SyntaxKind::COLON) {
        let sc = p.open();
        p.advance(); // :
        p.expect(SyntaxKind::IDENT);
        while p.eat(SyntaxKind::COMMA) {
            p.expect(SyntaxKind::IDENT);
        }
        p.close(sc, SyntaxKind::SUPERCLASS_CLAUSE);
    }
    class_body(p);
    p.close(m, SyntaxKind::CLASS_DECL)
}

fn class_body(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::L_BRACE);
    while !p.at(SyntaxKind::R_BRACE) && !p.is_at_end() {
        if p.has_too_many_errors() {
            break;
        }
        let lookahead = if p.at(SyntaxKind::PUB_KW) { p.nth(1) } else { p.current() };
        match lookahead {
            SyntaxKind::FN_KW => {
                fn_decl(p);
            }
            SyntaxKind::IDENT => {
                field_decl(p);
            }
            _ => {
                p.synchronize(p.depth(), "expected a field or method in class body");
            }
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(m, SyntaxKind::CLASS_BODY)
}

fn field_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::IDENT);
    p.expect(SyntaxKind::COLON);
    super::types::type_annotation(p);
    if p.eat(SyntaxKind::EQ) {
        super::expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::FIELD_DECL)
}

fn trait_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::TRAIT_KW);
    p.expect(SyntaxKind::IDENT);
    let body = p.open();
    p.expect(SyntaxKind::L_BRACE);
    while !p.at(SyntaxKind::R_BRACE) && !p.is_at_end() {
        if p.has_too_many_errors() {
            break;
        }
        if is_named_fn(p) {
            fn_decl(p);
        } else {
            p.synchronize(p.depth(), "expected a method signature in trait body");
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(body, SyntaxKind::TRAIT_BODY);
    p.close(m, SyntaxKind::TRAIT_DECL)
}

fn interface_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::INTERFACE_KW);
    p.expect(SyntaxKind::IDENT);
    let body = p.open();
    p.expect(SyntaxKind::L_BRACE);
    while !p.at(SyntaxKind::R_BRACE) && !p.is_at_end() {
        if p.has_too_many_errors() {
            break;
        }
        if is_named_fn(p) {
            fn_decl(p);
        } else {
            p.synchronize(p.depth(), "expected a method signature in interface body");
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(body, SyntaxKind::INTERFACE_BODY);
    p.close(m, SyntaxKind::INTERFACE_DECL)
}

fn module_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::MODULE_KW);
    p.expect(SyntaxKind::IDENT);
    let body = p.open();
    p.expect(SyntaxKind::L_BRACE);
    while !p.at(SyntaxKind::R_BRACE) && !p.is_at_end() {
        if p.has_too_many_errors() {
            break;
        }
        statement(p);
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(body, SyntaxKind::MODULE_BODY);
    p.close(m, SyntaxKind::MODULE_DECL)
}

fn type_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::TYPE_KW);
    p.expect(SyntaxKind::IDENT);
    p.expect(SyntaxKind::EQ);
    super::types::type_annotation(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::TYPE_DECL)
}

fn enum_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.eat(SyntaxKind::PUB_KW);
    p.expect(SyntaxKind::ENUM_KW);
    p.expect(SyntaxKind::IDENT);
    let list = p.open();
    p.expect(SyntaxKind::L_BRACE);
    if !p.at(SyntaxKind::R_BRACE) {
        enum_variant(p);
        while p.eat(SyntaxKind::COMMA) {
            if p.at(SyntaxKind::R_BRACE) {
                break;
            }
            enum_variant(p);
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(list, SyntaxKind::ENUM_VARIANT_LIST);
    p.close(m, SyntaxKind::ENUM_DECL)
}

fn enum_variant(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::IDENT);
    if p.eat(SyntaxKind::L_PAREN) {
        super::types::type_annotation(p);
        while p.eat(SyntaxKind::COMMA) {
            super::types::type_annotation(p);
        }
        p.expect(SyntaxKind::R_PAREN);
    }
    p.close(m, SyntaxKind::ENUM_VARIANT)
}

fn import_decl(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::IMPORT_KW);
    if p.at(SyntaxKind::L_BRACE) {
        let list = p.open();
        p.advance(); // {
        import_item(p);
        while p.eat(SyntaxKind::COMMA) {
            if p.at(SyntaxKind::R_BRACE) {
                break;
            }
            import_item(p);
        }
        p.expect(SyntaxKind::R_BRACE);
        p.close(list, SyntaxKind::IMPORT_ITEM_LIST);
    }
    dotted_path(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::IMPORT_DECL)
}

fn import_item(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.expect(SyntaxKind::IDENT);
    if p.eat(SyntaxKind::AS_KW) {
        p.expect(SyntaxKind::IDENT);
    }
    p.close(m, SyntaxKind::IMPORT_ITEM)
}

fn dotted_path(p: &mut Parser) {
    p.expect(SyntaxKind::IDENT);
    while p.eat(SyntaxKind::DOT) {
        p.expect(SyntaxKind::IDENT);
    }
}

fn return_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // return
    if !p.at(SyntaxKind::SEMICOLON) {
        super::expressions::expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::RETURN_STMT)
}

fn break_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance();
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::BREAK_STMT)
}

fn continue_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance();
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::CONTINUE_STMT)
}

fn print_stmt(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    p.advance(); // print
    super::expressions::arg_list(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::PRINT_STMT)
}
