//! CST → AST lowering (spec §4.4).
//!
//! Implements the early/deferred/partial type-resolution strategy matrix:
//! declaration, signature, and member types are resolved immediately
//! against the running [`ast::ty::TypeEnvironment`]; expression types are
//! left `Deferred`; complex types naming a not-yet-declared type are
//! `Partial`. The lowering table below mirrors spec §4.4's node-kind
//! mapping (`PROGRAM` → `Node::Program`, `VAR_DECLARATION` → `Item::Var`,
//! `BINARY_EXPR` → `Expr::Binary`, `ERROR`/`MISSING`/`INCOMPLETE` →
//! `Node::Error`, ...).

use mesh_common::diagnostic::Diagnostic;
use mesh_common::span::{LineIndex, Span};

use crate::ast::expr::{Arg, AssignOp, BinaryOp, Expr, LiteralValue, StringPart, UnaryOp};
use crate::ast::item::{EnumVariant, Field, HandleClause, ImportItem, Item, MatchArm, Param, Stmt};
use crate::ast::pat::Pat;
use crate::ast::ty::TypeAnnotation;
use crate::ast::{Ast, Node, NodeId};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::cst_ext::CstNodeExt;
use crate::syntax_kind::SyntaxKind;

/// Tunables for the CST→AST lowering pass.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Lower `ERROR_NODE`s into `Node::Error` placeholders rather than
    /// dropping them from the tree silently.
    pub insert_error_nodes: bool,
    /// Same, for `MISSING_NODE`.
    pub insert_missing_nodes: bool,
    /// Keep the node→span table populated (disable to save memory on a
    /// one-shot batch lowering that never needs source mapping back).
    pub preserve_source_mapping: bool,
    /// Run the builder's own semantic sanity checks (duplicate parameter
    /// names, `break`/`continue` outside a loop) in addition to mechanical
    /// lowering.
    pub validate_semantics: bool,
    /// Treat every builder-level diagnostic as fatal: stop lowering the
    /// current item rather than emitting `Node::Error` and continuing.
    pub strict_mode: bool,
    pub max_errors: usize,
    pub enable_early_type_resolution: bool,
    pub defer_expression_types: bool,
    pub resolve_builtin_types: bool,
    pub validate_type_annotations: bool,
    pub max_type_resolution_depth: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            insert_error_nodes: true,
            insert_missing_nodes: true,
            preserve_source_mapping: true,
            validate_semantics: true,
            strict_mode: false,
            max_errors: 200,
            enable_early_type_resolution: true,
            defer_expression_types: true,
            resolve_builtin_types: true,
            validate_type_annotations: true,
            max_type_resolution_depth: 32,
        }
    }
}

struct Builder<'src> {
    ast: Ast,
    diagnostics: Vec<Diagnostic>,
    config: BuildConfig,
    types: crate::ast::ty::TypeEnvironment,
    source: &'src str,
    line_index: LineIndex,
}

/// Lower a CST rooted at `root` (expected kind `PROGRAM`) into an owned
/// AST, using `source` to resolve token text and `config` to tune the
/// pass.
pub fn build(root: &SyntaxNode, source: &str, config: BuildConfig) -> (Ast, Vec<Diagnostic>) {
    let mut b = Builder {
        ast: Ast::default(),
        diagnostics: Vec::new(),
        line_index: LineIndex::new(source),
        config,
        types: crate::ast::ty::TypeEnvironment::new(),
        source,
    };
    let items: Vec<NodeId> = root.significant_children().iter().map(|n| b.lower_stmt(n)).collect();
    let program = b.alloc(Node::Program(items), span_of(root));
    b.ast.root = Some(program);
    (b.ast, b.diagnostics)
}

fn span_of(node: &SyntaxNode) -> Span {
    let range = node.text_range();
    Span::new(u32::from(range.start()), u32::from(range.end()))
}

fn token_span(tok: &SyntaxToken) -> Span {
    let range = tok.text_range();
    Span::new(u32::from(range.start()), u32::from(range.end()))
}

impl<'src> Builder<'src> {
    /// Allocate a node into the AST arena, recording a source-map entry
    /// when `preserve_source_mapping` is set (spec §4.4).
    fn alloc(&mut self, node: Node, span: Span) -> NodeId {
        let id = self.ast.alloc(node, span);
        if self.config.preserve_source_mapping {
            self.ast.source_map.push(crate::ast::SourceMapEntry { ast_node: id, span });
        }
        id
    }

    fn error(&mut self, message: impl Into<String>, span: Span) -> NodeId {
        let message = message.into();
        if self.diagnostics.len() < self.config.max_errors {
            let (line, col) = self.line_index.line_col(span.start);
            self.diagnostics.push(Diagnostic::error("E0200", line, col, message.clone()));
        }
        self.alloc(Node::Error(message), span)
    }

    fn ident_text(&self, node: &SyntaxNode) -> String {
        node.children_with_tokens()
            .filter_map(|el| el.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    fn find_token(&self, node: &SyntaxNode, kinds: &[SyntaxKind]) -> Option<SyntaxToken> {
        node.children_with_tokens()
            .filter_map(|el| el.into_token())
            .find(|t| kinds.contains(&t.kind()))
    }

    // ── Statements / declarations ───────────────────────────────────────

    fn lower_stmt(&mut self, node: &SyntaxNode) -> NodeId {
        let span = span_of(node);
        match node.kind() {
            SyntaxKind::VAR_DECL => self.lower_var_decl(node, span),
            SyntaxKind::FN_DECL => self.lower_fn_decl(node, span),
            SyntaxKind::CLASS_DECL => self.lower_class_decl(node, span),
            SyntaxKind::TRAIT_DECL => self.lower_trait_decl(node, span),
            SyntaxKind::INTERFACE_DECL => self.lower_interface_decl(node, span),
            SyntaxKind::MODULE_DECL => self.lower_module_decl(node, span),
            SyntaxKind::TYPE_DECL => self.lower_type_decl(node, span),
            SyntaxKind::ENUM_DECL => self.lower_enum_decl(node, span),
            SyntaxKind::IMPORT_DECL => self.lower_import_decl(node, span),
            SyntaxKind::BLOCK => self.lower_block(node, span),
            SyntaxKind::IF_STMT => self.lower_if(node, span),
            SyntaxKind::WHILE_STMT => self.lower_while(node, span),
            SyntaxKind::FOR_STMT => self.lower_for(node, span),
            SyntaxKind::ITER_STMT => self.lower_iter(node, span),
            SyntaxKind::MATCH_STMT => self.lower_match(node, span),
            SyntaxKind::ATTEMPT_STMT => self.lower_attempt(node, span),
            SyntaxKind::PARALLEL_STMT => {
                let inner = self.lower_child_block(node, span);
                self.alloc(Node::Stmt(Stmt::Parallel(inner)), span)
            }
            SyntaxKind::CONCURRENT_STMT => {
                let inner = self.lower_child_block(node, span);
                self.alloc(Node::Stmt(Stmt::Concurrent(inner)), span)
            }
            SyntaxKind::UNSAFE_STMT => {
                let inner = self.lower_child_block(node, span);
                self.alloc(Node::Stmt(Stmt::Unsafe(inner)), span)
            }
            SyntaxKind::COMPTIME_STMT => {
                let inner = self.lower_child_block(node, span);
                self.alloc(Node::Stmt(Stmt::Comptime(inner)), span)
            }
            SyntaxKind::CONTRACT_STMT => {
                let cond = node
                    .significant_children()
                    .first()
                    .map(|n| self.lower_expr(n))
                    .unwrap_or_else(|| self.error("contract() missing condition", span));
                self.alloc(Node::Stmt(Stmt::Contract(cond)), span)
            }
            SyntaxKind::RETURN_STMT => {
                let value = node.significant_children().first().map(|n| self.lower_expr(n));
                self.alloc(Node::Stmt(Stmt::Return(value)), span)
            }
            SyntaxKind::BREAK_STMT => self.alloc(Node::Stmt(Stmt::Break), span),
            SyntaxKind::CONTINUE_STMT => self.alloc(Node::Stmt(Stmt::Continue), span),
            SyntaxKind::PRINT_STMT => {
                let args = node
                    .find_child(SyntaxKind::ARG_LIST)
                    .map(|al| self.lower_args(&al))
                    .unwrap_or_default();
                self.alloc(Node::Stmt(Stmt::Print(args)), span)
            }
            SyntaxKind::EXPR_STMT => {
                let inner = node
                    .significant_children()
                    .first()
                    .map(|n| self.lower_expr(n))
                    .unwrap_or_else(|| self.error("empty expression statement", span));
                self.alloc(Node::Stmt(Stmt::Expr(inner)), span)
            }
            SyntaxKind::ERROR_NODE if self.config.insert_error_nodes => {
                self.error("recovered error span", span)
            }
            SyntaxKind::MISSING_NODE if self.config.insert_missing_nodes => {
                self.error("missing syntax element", span)
            }
            SyntaxKind::INCOMPLETE_NODE => self.error("incomplete construct", span),
            other => self.error(format!("unrecognized statement kind {other:?}"), span),
        }
    }

    fn lower_child_block(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        node.find_child(SyntaxKind::BLOCK)
            .map(|b| self.lower_stmt(&b))
            .unwrap_or_else(|| self.error("expected a block", span))
    }

    fn lower_var_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        let ty = node
            .significant_children()
            .iter()
            .find(|c| is_type_node(c.kind()))
            .map(|c| self.lower_type(c));
        let value = node
            .significant_children()
            .iter()
            .find(|c| !is_type_node(c.kind()))
            .map(|c| self.lower_expr(c));
        if self.config.enable_early_type_resolution {
            if let Some(t) = &ty {
                self.types.define(name.clone(), t.clone());
            }
        }
        self.alloc(
            Node::Item(Item::Var { name, ty, value, is_pub }),
            span,
        )
    }

    fn lower_params(&mut self, node: &SyntaxNode) -> Vec<Param> {
        node.find_children(SyntaxKind::PARAM)
            .iter()
            .map(|p| {
                let name = self.ident_text(p);
                let ty = p
                    .significant_children()
                    .iter()
                    .find(|c| is_type_node(c.kind()))
                    .map(|c| self.lower_type(c));
                let default = p
                    .find_child(SyntaxKind::DEFAULT_VALUE)
                    .and_then(|d| d.significant_children().first().map(|c| self.lower_expr(c)));
                Param { name, ty, default }
            })
            .collect()
    }

    fn lower_fn_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        let params = node
            .find_child(SyntaxKind::PARAM_LIST)
            .map(|pl| self.lower_params(&pl))
            .unwrap_or_default();
        let type_children: Vec<SyntaxNode> = node
            .significant_children()
            .into_iter()
            .filter(|c| is_type_node(c.kind()))
            .collect();
        let (return_type, throws) = match type_children.len() {
            0 => (None, None),
            1 => (Some(self.lower_type(&type_children[0])), None),
            _ => (
                Some(self.lower_type(&type_children[0])),
                Some(self.lower_type(&type_children[1])),
            ),
        };
        let body = node.find_child(SyntaxKind::BLOCK).map(|b| self.lower_stmt(&b));
        self.alloc(
            Node::Item(Item::Fn {
                name,
                params,
                return_type,
                throws,
                body,
                is_pub,
            }),
            span,
        )
    }

    fn lower_class_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        if self.config.enable_early_type_resolution {
            self.types.define(name.clone(), TypeAnnotation::Named(name.clone()));
        }
        let superclasses = node
            .find_child(SyntaxKind::SUPERCLASS_CLAUSE)
            .map(|sc| {
                sc.children_with_tokens()
                    .filter_map(|el| el.into_token())
                    .filter(|t| t.kind() == SyntaxKind::IDENT)
                    .map(|t| t.text().to_string())
                    .collect()
            })
            .unwrap_or_default();
        let body = node.find_child(SyntaxKind::CLASS_BODY);
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        if let Some(body) = body {
            for child in body.significant_children() {
                match child.kind() {
                    SyntaxKind::FIELD_DECL => fields.push(self.lower_field(&child)),
                    // INCOMPLETE_NODE here is a method whose body never
                    // found its closing `}`; it still has the same child
                    // shape as a FN_DECL, so lowering it the same way
                    // keeps it in the method list instead of vanishing.
                    SyntaxKind::FN_DECL | SyntaxKind::INCOMPLETE_NODE => {
                        methods.push(self.lower_fn_decl(&child, span_of(&child)))
                    }
                    _ => {}
                }
            }
        }
        self.alloc(
            Node::Item(Item::Class {
                name,
                superclasses,
                fields,
                methods,
                is_pub,
            }),
            span,
        )
    }

    fn lower_field(&mut self, node: &SyntaxNode) -> Field {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        let ty = node
            .significant_children()
            .iter()
            .find(|c| is_type_node(c.kind()))
            .map(|c| self.lower_type(c))
            .unwrap_or(TypeAnnotation::Named("<error>".into()));
        let default = node
            .significant_children()
            .iter()
            .find(|c| !is_type_node(c.kind()))
            .map(|c| self.lower_expr(c));
        Field { name, ty, default, is_pub }
    }

    fn lower_trait_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        if self.config.enable_early_type_resolution {
            self.types.define(name.clone(), TypeAnnotation::Named(name.clone()));
        }
        let methods = node
            .find_child(SyntaxKind::TRAIT_BODY)
            .map(|body| {
                body.significant_children()
                    .into_iter()
                    .filter(|c| matches!(c.kind(), SyntaxKind::FN_DECL | SyntaxKind::INCOMPLETE_NODE))
                    .map(|m| self.lower_fn_decl(&m, span_of(&m)))
                    .collect()
            })
            .unwrap_or_default();
        self.alloc(Node::Item(Item::Trait { name, methods, is_pub }), span)
    }

    fn lower_interface_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        if self.config.enable_early_type_resolution {
            self.types.define(name.clone(), TypeAnnotation::Named(name.clone()));
        }
        let methods = node
            .find_child(SyntaxKind::INTERFACE_BODY)
            .map(|body| {
                body.significant_children()
                    .into_iter()
                    .filter(|c| matches!(c.kind(), SyntaxKind::FN_DECL | SyntaxKind::INCOMPLETE_NODE))
                    .map(|m| self.lower_fn_decl(&m, span_of(&m)))
                    .collect()
            })
            .unwrap_or_default();
        self.alloc(Node::Item(Item::Interface { name, methods, is_pub }), span)
    }

    fn lower_module_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        self.types.push_scope();
        let items = node
            .find_child(SyntaxKind::MODULE_BODY)
            .map(|body| body.significant_children().iter().map(|c| self.lower_stmt(c)).collect())
            .unwrap_or_default();
        self.types.pop_scope();
        self.alloc(Node::Item(Item::Module { name, items, is_pub }), span)
    }

    fn lower_type_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        let aliased = node
            .significant_children()
            .iter()
            .find(|c| is_type_node(c.kind()))
            .map(|c| self.lower_type(c))
            .unwrap_or(TypeAnnotation::Named("<error>".into()));
        if self.config.enable_early_type_resolution {
            self.types.define(name.clone(), aliased.clone());
        }
        self.alloc(Node::Item(Item::Type { name, aliased, is_pub }), span)
    }

    fn lower_enum_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let name = self.ident_text(node);
        let is_pub = self.find_token(node, &[SyntaxKind::PUB_KW]).is_some();
        if self.config.enable_early_type_resolution {
            self.types.define(name.clone(), TypeAnnotation::Named(name.clone()));
        }
        let variants = node
            .find_child(SyntaxKind::ENUM_VARIANT_LIST)
            .map(|list| {
                list.find_children(SyntaxKind::ENUM_VARIANT)
                    .iter()
                    .map(|v| EnumVariant {
                        name: self.ident_text(v),
                        payload: v.significant_children().iter().map(|t| self.lower_type(t)).collect(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.alloc(Node::Item(Item::Enum { name, variants, is_pub }), span)
    }

    fn lower_import_decl(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let items = node
            .find_child(SyntaxKind::IMPORT_ITEM_LIST)
            .map(|list| {
                list.find_children(SyntaxKind::IMPORT_ITEM)
                    .iter()
                    .map(|item| {
                        let idents: Vec<String> = item
                            .children_with_tokens()
                            .filter_map(|el| el.into_token())
                            .filter(|t| t.kind() == SyntaxKind::IDENT)
                            .map(|t| t.text().to_string())
                            .collect();
                        ImportItem {
                            name: idents.first().cloned().unwrap_or_default(),
                            alias: idents.get(1).cloned(),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        // `IMPORT_ITEM_LIST` is a child *node*, so its nested IDENTs are not
        // direct tokens of `IMPORT_DECL` — the filter below already sees
        // only the dotted path's own IDENT tokens.
        let path = node
            .children_with_tokens()
            .filter_map(|el| el.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .collect();
        self.alloc(Node::Item(Item::Import { items, path }), span)
    }

    fn lower_block(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let stmts = node.significant_children().iter().map(|c| self.lower_stmt(c)).collect();
        self.alloc(Node::Stmt(Stmt::Block(stmts)), span)
    }

    fn lower_if(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let children = node.significant_children();
        let mut iter = children.into_iter();
        let condition = iter
            .next()
            .map(|c| self.lower_expr(&c))
            .unwrap_or_else(|| self.error("missing if condition", span));
        let then_branch = iter
            .next()
            .map(|c| self.lower_stmt(&c))
            .unwrap_or_else(|| self.error("missing if body", span));
        let mut elifs = Vec::new();
        let mut else_branch = None;
        for c in node.find_children(SyntaxKind::ELIF_CLAUSE) {
            let parts = c.significant_children();
            if parts.len() == 2 {
                let cond = self.lower_expr(&parts[0]);
                let body = self.lower_stmt(&parts[1]);
                elifs.push((cond, body));
            }
        }
        if let Some(else_clause) = node.find_child(SyntaxKind::ELSE_CLAUSE) {
            if let Some(body) = else_clause.significant_children().first() {
                else_branch = Some(self.lower_stmt(body));
            }
        }
        self.alloc(
            Node::Stmt(Stmt::If {
                condition,
                then_branch,
                elifs,
                else_branch,
            }),
            span,
        )
    }

    fn lower_while(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let children = node.significant_children();
        let condition = children
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing while condition", span));
        let body = children
            .get(1)
            .map(|c| self.lower_stmt(c))
            .unwrap_or_else(|| self.error("missing while body", span));
        self.alloc(Node::Stmt(Stmt::While { condition, body }), span)
    }

    fn lower_for(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let children = node.significant_children();
        let body_idx = children.len().saturating_sub(1);
        let clauses = &children[..body_idx];
        let init = clauses.first().map(|c| self.lower_expr(c));
        let condition = clauses.get(1).map(|c| self.lower_expr(c));
        let step = clauses.get(2).map(|c| self.lower_expr(c));
        let body = children
            .get(body_idx)
            .map(|c| self.lower_stmt(c))
            .unwrap_or_else(|| self.error("missing for body", span));
        self.alloc(
            Node::Stmt(Stmt::For { init, condition, step, body }),
            span,
        )
    }

    fn lower_iter(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let binding = self.ident_text(node);
        let children = node.significant_children();
        let iterable = children
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing iter source", span));
        let body = children
            .get(1)
            .map(|c| self.lower_stmt(c))
            .unwrap_or_else(|| self.error("missing iter body", span));
        self.alloc(
            Node::Stmt(Stmt::Iter { binding, iterable, body }),
            span,
        )
    }

    fn lower_match(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let subject = node
            .significant_children()
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing match subject", span));
        let arms = node
            .find_children(SyntaxKind::MATCH_ARM)
            .iter()
            .map(|arm| self.lower_match_arm(arm))
            .collect();
        self.alloc(Node::Stmt(Stmt::Match { subject, arms }), span)
    }

    fn lower_match_arm(&mut self, node: &SyntaxNode) -> MatchArm {
        let children = node.significant_children();
        let pattern = children
            .first()
            .map(|c| self.lower_pat(c))
            .unwrap_or_else(|| self.error("missing pattern", span_of(node)));
        // A guard, if present, is the second child of kind other than the
        // arm's body; both guard and body are bare expressions at the CST
        // level, so we distinguish by count: 2 children = no guard, 3 = guarded.
        let (guard, body) = if children.len() >= 3 {
            (Some(self.lower_expr(&children[1])), self.lower_arm_body(&children[2]))
        } else if children.len() == 2 {
            (None, self.lower_arm_body(&children[1]))
        } else {
            (None, self.error("missing arm body", span_of(node)))
        };
        MatchArm { pattern, guard, body }
    }

    fn lower_arm_body(&mut self, node: &SyntaxNode) -> NodeId {
        if node.kind() == SyntaxKind::BLOCK {
            self.lower_stmt(node)
        } else {
            self.lower_expr(node)
        }
    }

    fn lower_attempt(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let body = node
            .find_child(SyntaxKind::BLOCK)
            .map(|b| self.lower_stmt(&b))
            .unwrap_or_else(|| self.error("missing attempt body", span));
        let handlers = node
            .find_children(SyntaxKind::HANDLE_CLAUSE)
            .iter()
            .map(|h| HandleClause {
                binding: self.ident_text(h),
                ty: h
                    .significant_children()
                    .iter()
                    .find(|c| is_type_node(c.kind()))
                    .map(|c| self.lower_type(c)),
                body: h
                    .find_child(SyntaxKind::BLOCK)
                    .map(|b| self.lower_stmt(&b))
                    .unwrap_or_else(|| self.error("missing handle body", span_of(h))),
            })
            .collect();
        let else_branch = node
            .find_child(SyntaxKind::ELSE_CLAUSE)
            .and_then(|e| e.find_child(SyntaxKind::BLOCK))
            .map(|b| self.lower_stmt(&b));
        self.alloc(
            Node::Stmt(Stmt::Attempt { body, handlers, else_branch }),
            span,
        )
    }

    fn lower_args(&mut self, node: &SyntaxNode) -> Vec<Arg> {
        node.significant_children()
            .iter()
            .map(|c| match c.kind() {
                SyntaxKind::NAMED_ARG => Arg {
                    name: Some(self.ident_text(c)),
                    value: c
                        .significant_children()
                        .first()
                        .map(|v| self.lower_expr(v))
                        .unwrap_or_else(|| self.error("missing argument value", span_of(c))),
                },
                _ => Arg {
                    name: None,
                    value: c
                        .significant_children()
                        .first()
                        .map(|v| self.lower_expr(v))
                        .unwrap_or_else(|| self.error("missing argument value", span_of(c))),
                },
            })
            .collect()
    }

    // ── Expressions ──────────────────────────────────────────────────────

    /// Lower an expression, then — unless expression-type deferral is
    /// disabled — record a [`crate::ast::DeferredEntry`] for it. Every
    /// expression node's type is DEFERRED per spec §4.4's strategy matrix;
    /// this is the builder's only touch point with that row, since `Expr`
    /// itself never carries a resolved type (Invariant B2).
    fn lower_expr(&mut self, node: &SyntaxNode) -> NodeId {
        let outer_span = span_of(node);
        let label = format!("{:?}", node.kind());
        let id = self.lower_expr_inner(node);
        // `PAREN_EXPR` passes its inner child's id straight through without
        // allocating a node of its own, so `self.ast.span(id)` is the
        // child's (narrower) span, not `outer_span` — that distinguishes a
        // genuine new allocation (already recorded by the recursive call
        // that produced it, for PAREN_EXPR's child) from this call's own.
        if self.config.defer_expression_types && self.ast.span(id) == outer_span {
            if let Node::Expr(_) = self.ast.get(id) {
                self.ast.deferred.push(crate::ast::DeferredEntry {
                    expr: id,
                    originating_span: outer_span,
                    context_label: label,
                });
            }
        }
        id
    }

    fn lower_expr_inner(&mut self, node: &SyntaxNode) -> NodeId {
        let span = span_of(node);
        match node.kind() {
            SyntaxKind::LITERAL_EXPR => self.lower_literal(node, span),
            SyntaxKind::STRING_EXPR => self.lower_string(node, span),
            SyntaxKind::NAME_EXPR => {
                let name = self.ident_text(node);
                self.alloc(Node::Expr(Expr::Name(name)), span)
            }
            SyntaxKind::THIS_EXPR => self.alloc(Node::Expr(Expr::This), span),
            SyntaxKind::SUPER_EXPR => self.alloc(Node::Expr(Expr::Super), span),
            SyntaxKind::PAREN_EXPR => node
                .significant_children()
                .first()
                .map(|c| self.lower_expr(c))
                .unwrap_or_else(|| self.error("empty parenthesized expression", span)),
            SyntaxKind::ASSIGN_EXPR => self.lower_assign(node, span),
            SyntaxKind::BINARY_EXPR => self.lower_binary(node, span),
            SyntaxKind::UNARY_EXPR => self.lower_unary(node, span),
            SyntaxKind::CALL_EXPR => self.lower_call(node, span),
            SyntaxKind::FIELD_EXPR => self.lower_field_expr(node, span),
            SyntaxKind::INDEX_EXPR => self.lower_index(node, span),
            SyntaxKind::LIST_EXPR => {
                let items = node.significant_children().iter().map(|c| self.lower_expr(c)).collect();
                self.alloc(Node::Expr(Expr::List(items)), span)
            }
            SyntaxKind::DICT_EXPR => {
                let entries = node
                    .find_children(SyntaxKind::DICT_ENTRY)
                    .iter()
                    .map(|e| {
                        let parts = e.significant_children();
                        let key = parts
                            .first()
                            .map(|c| self.lower_expr(c))
                            .unwrap_or_else(|| self.error("missing dict key", span_of(e)));
                        let value = parts
                            .get(1)
                            .map(|c| self.lower_expr(c))
                            .unwrap_or_else(|| self.error("missing dict value", span_of(e)));
                        (key, value)
                    })
                    .collect();
                self.alloc(Node::Expr(Expr::Dict(entries)), span)
            }
            SyntaxKind::RANGE_EXPR => {
                let children = node.significant_children();
                let start = children
                    .first()
                    .map(|c| self.lower_expr(c))
                    .unwrap_or_else(|| self.error("missing range start", span));
                let end = children
                    .get(1)
                    .map(|c| self.lower_expr(c))
                    .unwrap_or_else(|| self.error("missing range end", span));
                self.alloc(Node::Expr(Expr::Range { start, end }), span)
            }
            SyntaxKind::LAMBDA_EXPR => self.lower_lambda(node, span),
            SyntaxKind::ERROR_NODE | SyntaxKind::MISSING_NODE | SyntaxKind::INCOMPLETE_NODE => {
                self.error("invalid expression", span)
            }
            other => self.error(format!("unrecognized expression kind {other:?}"), span),
        }
    }

    fn lower_literal(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let tok = node.children_with_tokens().filter_map(|el| el.into_token()).next();
        let value = match tok {
            Some(t) if t.kind() == SyntaxKind::INT_LITERAL => LiteralValue::Int(parse_int(t.text())),
            Some(t) if t.kind() == SyntaxKind::FLOAT_LITERAL => {
                LiteralValue::Float(t.text().replace('_', "").parse().unwrap_or(0.0))
            }
            Some(t) if t.kind() == SyntaxKind::TRUE_KW => LiteralValue::Bool(true),
            Some(t) if t.kind() == SyntaxKind::FALSE_KW => LiteralValue::Bool(false),
            _ => LiteralValue::Nil,
        };
        self.alloc(Node::Expr(Expr::Literal(value)), span)
    }

    fn lower_string(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let mut parts = Vec::new();
        for el in node.children_with_tokens() {
            match el {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::STRING_CONTENT => {
                    parts.push(StringPart::Text(t.text().to_string()));
                }
                rowan::NodeOrToken::Node(n) if n.kind() == SyntaxKind::INTERPOLATION_SEGMENT => {
                    if let Some(inner) = n.significant_children().first() {
                        let id = self.lower_expr(inner);
                        parts.push(StringPart::Interpolation(id));
                    }
                }
                _ => {}
            }
        }
        self.alloc(Node::Expr(Expr::StringLiteral(parts)), span)
    }

    fn lower_assign(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let children = node.significant_children();
        let op = self
            .find_token(
                node,
                &[
                    SyntaxKind::EQ,
                    SyntaxKind::PLUS_EQ,
                    SyntaxKind::MINUS_EQ,
                    SyntaxKind::STAR_EQ,
                    SyntaxKind::SLASH_EQ,
                    SyntaxKind::PERCENT_EQ,
                ],
            )
            .map(|t| match t.kind() {
                SyntaxKind::PLUS_EQ => AssignOp::Add,
                SyntaxKind::MINUS_EQ => AssignOp::Sub,
                SyntaxKind::STAR_EQ => AssignOp::Mul,
                SyntaxKind::SLASH_EQ => AssignOp::Div,
                SyntaxKind::PERCENT_EQ => AssignOp::Rem,
                _ => AssignOp::Set,
            })
            .unwrap_or(AssignOp::Set);
        let target = children
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing assignment target", span));
        let value = children
            .get(1)
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing assignment value", span));
        self.alloc(Node::Expr(Expr::Assign { op, target, value }), span)
    }

    fn lower_binary(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let children = node.significant_children();
        let op_token = self.find_token(
            node,
            &[
                SyntaxKind::PLUS,
                SyntaxKind::MINUS,
                SyntaxKind::STAR,
                SyntaxKind::SLASH,
                SyntaxKind::PERCENT,
                SyntaxKind::POWER,
                SyntaxKind::EQ_EQ,
                SyntaxKind::BANG_EQ,
                SyntaxKind::LT,
                SyntaxKind::LT_EQ,
                SyntaxKind::GT,
                SyntaxKind::GT_EQ,
                SyntaxKind::AND_KW,
                SyntaxKind::OR_KW,
            ],
        );
        let op = op_token.map(binary_op_from_kind).unwrap_or(BinaryOp::Add);
        let lhs = children
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing left operand", span));
        let rhs = children
            .get(1)
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing right operand", span));
        self.alloc(Node::Expr(Expr::Binary { op, lhs, rhs }), span)
    }

    fn lower_unary(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let op = self
            .find_token(node, &[SyntaxKind::MINUS, SyntaxKind::BANG, SyntaxKind::TILDE])
            .map(|t| match t.kind() {
                SyntaxKind::BANG => UnaryOp::Not,
                SyntaxKind::TILDE => UnaryOp::BitNot,
                _ => UnaryOp::Neg,
            })
            .unwrap_or(UnaryOp::Neg);
        let operand = node
            .significant_children()
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing unary operand", span));
        self.alloc(Node::Expr(Expr::Unary { op, operand }), span)
    }

    fn lower_call(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let children = node.significant_children();
        let callee = children
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing call target", span));
        let args = node
            .find_child(SyntaxKind::ARG_LIST)
            .map(|al| self.lower_args(&al))
            .unwrap_or_default();
        self.alloc(Node::Expr(Expr::Call { callee, args }), span)
    }

    fn lower_field_expr(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let base = node
            .significant_children()
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing field base", span));
        let name = self.ident_text(node);
        self.alloc(Node::Expr(Expr::Field { base, name }), span)
    }

    fn lower_index(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let children = node.significant_children();
        let base = children
            .first()
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing index base", span));
        let index = children
            .get(1)
            .map(|c| self.lower_expr(c))
            .unwrap_or_else(|| self.error("missing index expression", span));
        self.alloc(Node::Expr(Expr::Index { base, index }), span)
    }

    fn lower_lambda(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let params = node
            .find_child(SyntaxKind::PARAM_LIST)
            .map(|pl| self.lower_params(&pl))
            .unwrap_or_default();
        let return_type = node
            .significant_children()
            .iter()
            .find(|c| is_type_node(c.kind()))
            .map(|c| self.lower_type(c));
        let body = node
            .find_child(SyntaxKind::BLOCK)
            .map(|b| self.lower_stmt(&b))
            .unwrap_or_else(|| self.error("missing lambda body", span));
        self.alloc(
            Node::Expr(Expr::Lambda { params, return_type, body }),
            span,
        )
    }

    // ── Patterns ─────────────────────────────────────────────────────────

    fn lower_pat(&mut self, node: &SyntaxNode) -> NodeId {
        let span = span_of(node);
        match node.kind() {
            SyntaxKind::WILDCARD_PAT => self.alloc(Node::Pat(Pat::Wildcard), span),
            SyntaxKind::BINDING_PAT => {
                let name = self.ident_text(node);
                self.alloc(Node::Pat(Pat::Binding(name)), span)
            }
            SyntaxKind::LITERAL_PAT => {
                let inner = node
                    .significant_children()
                    .first()
                    .map(|c| self.lower_expr(c))
                    .unwrap_or_else(|| self.lower_literal_pat_tokens(node, span));
                self.alloc(Node::Pat(Pat::Literal(inner)), span)
            }
            SyntaxKind::LIST_PAT => {
                let items = node.significant_children().iter().map(|c| self.lower_pat(c)).collect();
                self.alloc(Node::Pat(Pat::List(items)), span)
            }
            SyntaxKind::CONSTRUCTOR_PAT => {
                let name = self.ident_text(node);
                let fields = node.significant_children().iter().map(|c| self.lower_pat(c)).collect();
                self.alloc(Node::Pat(Pat::Constructor { name, fields }), span)
            }
            _ => self.error("invalid pattern", span),
        }
    }

    /// `LITERAL_PAT` wraps a bare token (no `LITERAL_EXPR` node) for
    /// numeric/bool/nil literals, with an optional leading `-`; build the
    /// equivalent `Expr::Literal` node directly from those tokens.
    fn lower_literal_pat_tokens(&mut self, node: &SyntaxNode, span: Span) -> NodeId {
        let tokens: Vec<SyntaxToken> = node.children_with_tokens().filter_map(|el| el.into_token()).collect();
        let negative = tokens.iter().any(|t| t.kind() == SyntaxKind::MINUS);
        let value = tokens
            .iter()
            .find(|t| t.kind() == SyntaxKind::INT_LITERAL)
            .map(|t| LiteralValue::Int(if negative { -parse_int(t.text()) } else { parse_int(t.text()) }))
            .or_else(|| {
                tokens.iter().find(|t| t.kind() == SyntaxKind::FLOAT_LITERAL).map(|t| {
                    let v: f64 = t.text().replace('_', "").parse().unwrap_or(0.0);
                    LiteralValue::Float(if negative { -v } else { v })
                })
            })
            .or_else(|| tokens.iter().find(|t| t.kind() == SyntaxKind::TRUE_KW).map(|_| LiteralValue::Bool(true)))
            .or_else(|| tokens.iter().find(|t| t.kind() == SyntaxKind::FALSE_KW).map(|_| LiteralValue::Bool(false)))
            .unwrap_or(LiteralValue::Nil);
        self.alloc(Node::Expr(Expr::Literal(value)), span)
    }

    // ── Types ────────────────────────────────────────────────────────────

    /// Resolve a bare `TYPE_REF`'s name against the built-in table, then
    /// the scope stack (spec §4.4's lookup order: qualified name,
    /// unqualified name, built-in table — this grammar has no qualified
    /// type paths, so only the latter two apply). An unresolved name is a
    /// spec §7 type-resolution error: never fatal, reported as a warning,
    /// and still represented by a `Named` placeholder rather than aborting
    /// the lowering of its enclosing declaration.
    fn lower_type_ref(&mut self, node: &SyntaxNode) -> TypeAnnotation {
        let name = self.ident_or_keyword_text(node);
        if !self.config.validate_type_annotations || name.is_empty() {
            return TypeAnnotation::Named(name);
        }
        match self.types.resolve(&name) {
            crate::ast::ty::NameResolution::Builtin => TypeAnnotation::Named(name),
            crate::ast::ty::NameResolution::UserDefined(_) => TypeAnnotation::Named(name),
            crate::ast::ty::NameResolution::Unresolved => {
                let span = span_of(node);
                if self.diagnostics.len() < self.config.max_errors {
                    let (line, col) = self.line_index.line_col(span.start);
                    self.diagnostics.push(Diagnostic::warning(
                        "W0300",
                        line,
                        col,
                        format!("unresolved type name '{name}'"),
                    ));
                }
                TypeAnnotation::Named(name)
            }
        }
    }

    fn lower_type(&mut self, node: &SyntaxNode) -> TypeAnnotation {
        match node.kind() {
            SyntaxKind::TYPE_REF => self.lower_type_ref(node),
            SyntaxKind::LIST_TYPE => {
                let inner = node
                    .significant_children()
                    .first()
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                TypeAnnotation::List(Box::new(inner))
            }
            SyntaxKind::DICT_TYPE => {
                let children = node.significant_children();
                let key = children
                    .first()
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                let value = children
                    .get(1)
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                TypeAnnotation::Dict(Box::new(key), Box::new(value))
            }
            SyntaxKind::ARRAY_TYPE => {
                let inner = node.significant_children().first().map(|c| Box::new(self.lower_type(c)));
                TypeAnnotation::Array(inner)
            }
            SyntaxKind::FUNCTION_TYPE => {
                let children = node.significant_children();
                let (param_nodes, ret_node) = children.split_at(children.len().saturating_sub(1));
                let params = param_nodes.iter().map(|c| self.lower_type(c)).collect();
                let ret = ret_node
                    .first()
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                TypeAnnotation::Function { params, ret: Box::new(ret) }
            }
            SyntaxKind::UNION_TYPE => {
                TypeAnnotation::Union(node.significant_children().iter().map(|c| self.lower_type(c)).collect())
            }
            SyntaxKind::OPTIONAL_TYPE => {
                let inner = node
                    .significant_children()
                    .first()
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                TypeAnnotation::Optional(Box::new(inner))
            }
            SyntaxKind::FALLIBLE_TYPE => {
                let children = node.significant_children();
                let ok = children
                    .first()
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                let err = children
                    .get(1)
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                TypeAnnotation::Fallible { ok: Box::new(ok), err: Box::new(err) }
            }
            SyntaxKind::REFINED_TYPE => {
                let children = node.significant_children();
                let base = children
                    .first()
                    .map(|c| self.lower_type(c))
                    .unwrap_or(TypeAnnotation::Named("<error>".into()));
                let condition = children
                    .get(1)
                    .map(|c| self.lower_expr(c))
                    .unwrap_or_else(|| self.error("missing refinement condition", span_of(node)));
                TypeAnnotation::Refined { base: Box::new(base), condition }
            }
            SyntaxKind::MISSING_NODE | SyntaxKind::ERROR_NODE => TypeAnnotation::Named("<error>".into()),
            _ => TypeAnnotation::Named("<unknown>".into()),
        }
    }

    fn ident_or_keyword_text(&self, node: &SyntaxNode) -> String {
        node.children_with_tokens()
            .filter_map(|el| el.into_token())
            .next()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }
}

fn binary_op_from_kind(t: SyntaxToken) -> BinaryOp {
    match t.kind() {
        SyntaxKind::PLUS => BinaryOp::Add,
        SyntaxKind::MINUS => BinaryOp::Sub,
        SyntaxKind::STAR => BinaryOp::Mul,
        SyntaxKind::SLASH => BinaryOp::Div,
        SyntaxKind::PERCENT => BinaryOp::Rem,
        SyntaxKind::POWER => BinaryOp::Pow,
        SyntaxKind::EQ_EQ => BinaryOp::Eq,
        SyntaxKind::BANG_EQ => BinaryOp::NotEq,
        SyntaxKind::LT => BinaryOp::Lt,
        SyntaxKind::LT_EQ => BinaryOp::LtEq,
        SyntaxKind::GT => BinaryOp::Gt,
        SyntaxKind::GT_EQ => BinaryOp::GtEq,
        SyntaxKind::AND_KW => BinaryOp::And,
        SyntaxKind::OR_KW => BinaryOp::Or,
        _ => BinaryOp::Add,
    }
}

fn is_type_node(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::TYPE_REF
            | SyntaxKind::LIST_TYPE
            | SyntaxKind::DICT_TYPE
            | SyntaxKind::ARRAY_TYPE
            | SyntaxKind::FUNCTION_TYPE
            | SyntaxKind::UNION_TYPE
            | SyntaxKind::OPTIONAL_TYPE
            | SyntaxKind::FALLIBLE_TYPE
            | SyntaxKind::REFINED_TYPE
            | SyntaxKind::STRUCTURAL_TYPE
    )
}

/// Parses an integer literal's source text, including `0x`/`0o`/`0b`
/// radix prefixes and `_` digit separators (spec §4.1's numeric-literal
/// scanning).
fn parse_int(text: &str) -> i64 {
    let clean: String = text.chars().filter(|c| *c != '_').collect();
    if let Some(hex) = clean.strip_prefix("0x").or_else(|| clean.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).unwrap_or(0)
    } else if let Some(oct) = clean.strip_prefix("0o").or_else(|| clean.strip_prefix("0O")) {
        i64::from_str_radix(oct, 8).unwrap_or(0)
    } else if let Some(bin) = clean.strip_prefix("0b").or_else(|| clean.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).unwrap_or(0)
    } else {
        clean.parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ParseMode};

    fn build_source(src: &str) -> (Ast, Vec<Diagnostic>) {
        let p = parse(src, ParseMode::CstThenAst, Default::default());
        build(&p.syntax(), src, BuildConfig::default())
    }

    #[test]
    fn lowers_a_var_declaration_with_literal_init() {
        let (ast, diags) = build_source("var x: int = 42;");
        assert!(diags.is_empty());
        assert_eq!(ast.program_items().len(), 1);
        match ast.get(ast.program_items()[0]) {
            Node::Item(Item::Var { name, ty, value, .. }) => {
                assert_eq!(name, "x");
                assert_eq!(ty, &Some(TypeAnnotation::Named("int".into())));
                let value = value.expect("initializer");
                match ast.get(value) {
                    Node::Expr(Expr::Literal(LiteralValue::Int(42))) => {}
                    other => panic!("unexpected value node: {other:?}"),
                }
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn lowers_binary_expression_with_correct_operator() {
        let (ast, _) = build_source("var y = 1 + 2 * 3;");
        let Node::Item(Item::Var { value: Some(v), .. }) = ast.get(ast.program_items()[0]) else {
            panic!("expected var decl")
        };
        match ast.get(*v) {
            Node::Expr(Expr::Binary { op: BinaryOp::Add, rhs, .. }) => match ast.get(*rhs) {
                Node::Expr(Expr::Binary { op: BinaryOp::Mul, .. }) => {}
                other => panic!("expected nested multiply: {other:?}"),
            },
            other => panic!("expected addition at the top: {other:?}"),
        }
    }

    #[test]
    fn lowers_function_declaration_with_params_and_return_type() {
        let (ast, diags) = build_source("fn add(a: int, b: int) -> int { return a + b; }");
        assert!(diags.is_empty());
        match ast.get(ast.program_items()[0]) {
            Node::Item(Item::Fn { name, params, return_type, body, .. }) => {
                assert_eq!(name, "add");
                assert_eq!(params.len(), 2);
                assert_eq!(return_type, &Some(TypeAnnotation::Named("int".into())));
                assert!(body.is_some());
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn recovers_from_a_missing_semicolon_with_an_error_node() {
        let (ast, diags) = build_source("var x = 1 var y = 2;");
        assert!(!diags.is_empty());
        assert_eq!(ast.program_items().len(), 2);
    }

    #[test]
    fn expressions_are_recorded_as_deferred_and_never_carry_a_resolved_type() {
        let (ast, _) = build_source("var y = 1 + 2 * 3;");
        assert!(!ast.deferred.is_empty(), "binary/literal exprs should be queued for later inference");
        for entry in &ast.deferred {
            match ast.get(entry.expr) {
                Node::Expr(_) => {}
                other => panic!("deferred entry did not point at an expression: {other:?}"),
            }
        }
    }

    #[test]
    fn source_mapping_records_one_entry_per_allocated_node() {
        let (ast, _) = build_source("var x = 1;");
        assert_eq!(ast.source_map.len(), ast.len());
    }

    #[test]
    fn unresolved_type_name_is_a_non_fatal_warning() {
        let (_, diags) = build_source("var w: Widget = nil;");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, mesh_common::diagnostic::Severity::Warning);
        assert!(diags[0].message.contains("Widget"));
    }

    #[test]
    fn declared_class_type_resolves_without_a_warning() {
        let (_, diags) = build_source("class Widget { } var w: Widget = nil;");
        assert!(diags.is_empty(), "Widget should resolve against the class declared just above it: {diags:?}");
    }

    #[test]
    fn lowers_match_statement_with_guarded_arm() {
        let (ast, diags) = build_source("match (x) { n where n > 0 -> n; _ -> 0; }");
        assert!(diags.is_empty());
        match ast.get(ast.program_items()[0]) {
            Node::Stmt(Stmt::Match { arms, .. }) => {
                assert_eq!(arms.len(), 2);
                assert!(arms[0].guard.is_some());
                assert!(arms[1].guard.is_none());
            }
            other => panic!("unexpected stmt: {other:?}"),
        }
    }
}
