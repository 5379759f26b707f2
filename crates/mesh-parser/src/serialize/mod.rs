//! CST/AST rendering formats (spec §6): four CST tree renderers for
//! tooling (`tree`, `json`, `xml`, `compact`), plus an AST indented-dump
//! printer. None of this is a wire protocol — everything here is a
//! human- or tool-facing rendering of an already-built tree, produced
//! on demand and never persisted by the core.

pub mod compact;
pub mod json;
pub mod tree;
pub mod xml;

use crate::ast::{Ast, Node, NodeId};

/// Produces an indented textual dump of an AST, rooted at `ast.root`.
/// Not a persistent format — re-running this on the same `Ast` is
/// required to produce byte-identical output (spec §8's idempotence
/// law), but the format itself is not meant to be parsed back.
pub fn dump_ast(ast: &Ast) -> String {
    let mut out = String::new();
    match ast.root {
        Some(root) => dump_node(ast, root, 0, &mut out),
        None => out.push_str("<empty>\n"),
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn dump_node(ast: &Ast, id: NodeId, depth: usize, out: &mut String) {
    indent(out, depth);
    match ast.get(id) {
        Node::Program(items) => {
            out.push_str("Program\n");
            for item in items {
                dump_node(ast, *item, depth + 1, out);
            }
        }
        Node::Item(item) => dump_item(ast, item, depth, out),
        Node::Stmt(stmt) => dump_stmt(ast, stmt, depth, out),
        Node::Expr(expr) => dump_expr(ast, expr, depth, out),
        Node::Pat(pat) => dump_pat(ast, pat, depth, out),
        Node::Error(message) => out.push_str(&format!("Error({message:?})\n")),
    }
}

fn dump_item(ast: &Ast, item: &crate::ast::item::Item, depth: usize, out: &mut String) {
    use crate::ast::item::Item;
    match item {
        Item::Var { name, ty, value, is_pub } => {
            out.push_str(&format!("Var(name={name:?}, ty={ty:?}, pub={is_pub})\n"));
            if let Some(v) = value {
                dump_node(ast, *v, depth + 1, out);
            }
        }
        Item::Fn { name, params, return_type, throws, body, is_pub } => {
            out.push_str(&format!(
                "Fn(name={name:?}, params={}, ret={return_type:?}, throws={throws:?}, pub={is_pub})\n",
                params.len()
            ));
            if let Some(b) = body {
                dump_node(ast, *b, depth + 1, out);
            }
        }
        Item::Class { name, superclasses, fields, methods, is_pub } => {
            out.push_str(&format!(
                "Class(name={name:?}, supers={superclasses:?}, fields={}, pub={is_pub})\n",
                fields.len()
            ));
            for m in methods {
                dump_node(ast, *m, depth + 1, out);
            }
        }
        Item::Trait { name, methods, is_pub } => {
            out.push_str(&format!("Trait(name={name:?}, pub={is_pub})\n"));
            for m in methods {
                dump_node(ast, *m, depth + 1, out);
            }
        }
        Item::Interface { name, methods, is_pub } => {
            out.push_str(&format!("Interface(name={name:?}, pub={is_pub})\n"));
            for m in methods {
                dump_node(ast, *m, depth + 1, out);
            }
        }
        Item::Module { name, items, is_pub } => {
            out.push_str(&format!("Module(name={name:?}, pub={is_pub})\n"));
            for i in items {
                dump_node(ast, *i, depth + 1, out);
            }
        }
        Item::Type { name, aliased, is_pub } => {
            out.push_str(&format!("Type(name={name:?}, aliased={aliased:?}, pub={is_pub})\n"));
        }
        Item::Enum { name, variants, is_pub } => {
            out.push_str(&format!("Enum(name={name:?}, variants={}, pub={is_pub})\n", variants.len()));
        }
        Item::Import { items, path } => {
            out.push_str(&format!("Import(items={}, path={})\n", items.len(), path.join(".")));
        }
    }
}

fn dump_stmt(ast: &Ast, stmt: &crate::ast::item::Stmt, depth: usize, out: &mut String) {
    use crate::ast::item::Stmt;
    match stmt {
        Stmt::Block(items) => {
            out.push_str("Block\n");
            for i in items {
                dump_node(ast, *i, depth + 1, out);
            }
        }
        Stmt::If { condition, then_branch, elifs, else_branch } => {
            out.push_str("If\n");
            dump_node(ast, *condition, depth + 1, out);
            dump_node(ast, *then_branch, depth + 1, out);
            for (c, b) in elifs {
                dump_node(ast, *c, depth + 1, out);
                dump_node(ast, *b, depth + 1, out);
            }
            if let Some(e) = else_branch {
                dump_node(ast, *e, depth + 1, out);
            }
        }
        Stmt::While { condition, body } => {
            out.push_str("While\n");
            dump_node(ast, *condition, depth + 1, out);
            dump_node(ast, *body, depth + 1, out);
        }
        Stmt::For { init, condition, step, body } => {
            out.push_str("For\n");
            for c in [init, condition, step].into_iter().flatten() {
                dump_node(ast, *c, depth + 1, out);
            }
            dump_node(ast, *body, depth + 1, out);
        }
        Stmt::Iter { binding, iterable, body } => {
            out.push_str(&format!("Iter(binding={binding:?})\n"));
            dump_node(ast, *iterable, depth + 1, out);
            dump_node(ast, *body, depth + 1, out);
        }
        Stmt::Match { subject, arms } => {
            out.push_str("Match\n");
            dump_node(ast, *subject, depth + 1, out);
            for arm in arms {
                dump_node(ast, arm.pattern, depth + 1, out);
                if let Some(g) = arm.guard {
                    dump_node(ast, g, depth + 1, out);
                }
                dump_node(ast, arm.body, depth + 1, out);
            }
        }
        Stmt::Attempt { body, handlers, else_branch } => {
            out.push_str("Attempt\n");
            dump_node(ast, *body, depth + 1, out);
            for h in handlers {
                dump_node(ast, h.body, depth + 1, out);
            }
            if let Some(e) = else_branch {
                dump_node(ast, *e, depth + 1, out);
            }
        }
        Stmt::Parallel(b) => {
            out.push_str("Parallel\n");
            dump_node(ast, *b, depth + 1, out);
        }
        Stmt::Concurrent(b) => {
            out.push_str("Concurrent\n");
            dump_node(ast, *b, depth + 1, out);
        }
        Stmt::Unsafe(b) => {
            out.push_str("Unsafe\n");
            dump_node(ast, *b, depth + 1, out);
        }
        Stmt::Contract(c) => {
            out.push_str("Contract\n");
            dump_node(ast, *c, depth + 1, out);
        }
        Stmt::Comptime(b) => {
            out.push_str("Comptime\n");
            dump_node(ast, *b, depth + 1, out);
        }
        Stmt::Return(value) => {
            out.push_str("Return\n");
            if let Some(v) = value {
                dump_node(ast, *v, depth + 1, out);
            }
        }
        Stmt::Break => out.push_str("Break\n"),
        Stmt::Continue => out.push_str("Continue\n"),
        Stmt::Print(args) => {
            out.push_str(&format!("Print(args={})\n", args.len()));
            for a in args {
                dump_node(ast, a.value, depth + 1, out);
            }
        }
        Stmt::Expr(e) => {
            out.push_str("ExprStmt\n");
            dump_node(ast, *e, depth + 1, out);
        }
    }
}

fn dump_expr(ast: &Ast, expr: &crate::ast::expr::Expr, depth: usize, out: &mut String) {
    use crate::ast::expr::Expr;
    match expr {
        Expr::Literal(v) => out.push_str(&format!("Literal({v:?})\n")),
        Expr::StringLiteral(parts) => out.push_str(&format!("StringLiteral(parts={})\n", parts.len())),
        Expr::Name(n) => out.push_str(&format!("Name({n:?})\n")),
        Expr::This => out.push_str("This\n"),
        Expr::Super => out.push_str("Super\n"),
        Expr::Assign { op, target, value } => {
            out.push_str(&format!("Assign({op:?})\n"));
            dump_node(ast, *target, depth + 1, out);
            dump_node(ast, *value, depth + 1, out);
        }
        Expr::Binary { op, lhs, rhs } => {
            out.push_str(&format!("Binary({op:?})\n"));
            dump_node(ast, *lhs, depth + 1, out);
            dump_node(ast, *rhs, depth + 1, out);
        }
        Expr::Unary { op, operand } => {
            out.push_str(&format!("Unary({op:?})\n"));
            dump_node(ast, *operand, depth + 1, out);
        }
        Expr::Call { callee, args } => {
            out.push_str(&format!("Call(args={})\n", args.len()));
            dump_node(ast, *callee, depth + 1, out);
            for a in args {
                dump_node(ast, a.value, depth + 1, out);
            }
        }
        Expr::Field { base, name } => {
            out.push_str(&format!("Field({name:?})\n"));
            dump_node(ast, *base, depth + 1, out);
        }
        Expr::Index { base, index } => {
            out.push_str("Index\n");
            dump_node(ast, *base, depth + 1, out);
            dump_node(ast, *index, depth + 1, out);
        }
        Expr::List(items) => {
            out.push_str(&format!("List(len={})\n", items.len()));
            for i in items {
                dump_node(ast, *i, depth + 1, out);
            }
        }
        Expr::Dict(entries) => {
            out.push_str(&format!("Dict(len={})\n", entries.len()));
            for (k, v) in entries {
                dump_node(ast, *k, depth + 1, out);
                dump_node(ast, *v, depth + 1, out);
            }
        }
        Expr::Range { start, end } => {
            out.push_str("Range\n");
            dump_node(ast, *start, depth + 1, out);
            dump_node(ast, *end, depth + 1, out);
        }
        Expr::Lambda { params, return_type, body } => {
            out.push_str(&format!("Lambda(params={}, ret={return_type:?})\n", params.len()));
            dump_node(ast, *body, depth + 1, out);
        }
    }
}

fn dump_pat(_ast: &Ast, pat: &crate::ast::pat::Pat, _depth: usize, out: &mut String) {
    use crate::ast::pat::Pat;
    match pat {
        Pat::Wildcard => out.push_str("Wildcard\n"),
        Pat::Binding(name) => out.push_str(&format!("Binding({name:?})\n")),
        Pat::Literal(_) => out.push_str("LiteralPat\n"),
        Pat::List(items) => out.push_str(&format!("ListPat(len={})\n", items.len())),
        Pat::Constructor { name, fields } => {
            out.push_str(&format!("ConstructorPat({name:?}, fields={})\n", fields.len()));
        }
    }
}
