//! Declaration and statement nodes, owned by the arena in [`super::Ast`].

use super::ty::TypeAnnotation;
use super::NodeId;

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeAnnotation>,
    pub default: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: TypeAnnotation,
    pub default: Option<NodeId>,
    pub is_pub: bool,
}

#[derive(Debug, Clone)]
pub struct EnumVariant {
    pub name: String,
    pub payload: Vec<TypeAnnotation>,
}

#[derive(Debug, Clone)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Item {
    Var {
        name: String,
        ty: Option<TypeAnnotation>,
        value: Option<NodeId>,
        is_pub: bool,
    },
    Fn {
        name: String,
        params: Vec<Param>,
        return_type: Option<TypeAnnotation>,
        throws: Option<TypeAnnotation>,
        /// `None` for a signature-only declaration (trait/interface body).
        body: Option<NodeId>,
        is_pub: bool,
    },
    Class {
        name: String,
        superclasses: Vec<String>,
        fields: Vec<Field>,
        methods: Vec<NodeId>,
        is_pub: bool,
    },
    Trait {
        name: String,
        methods: Vec<NodeId>,
        is_pub: bool,
    },
    Interface {
        name: String,
        methods: Vec<NodeId>,
        is_pub: bool,
    },
    Module {
        name: String,
        items: Vec<NodeId>,
        is_pub: bool,
    },
    Type {
        name: String,
        aliased: TypeAnnotation,
        is_pub: bool,
    },
    Enum {
        name: String,
        variants: Vec<EnumVariant>,
        is_pub: bool,
    },
    Import {
        items: Vec<ImportItem>,
        path: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct MatchArm {
    pub pattern: NodeId,
    pub guard: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct HandleClause {
    pub binding: String,
    pub ty: Option<TypeAnnotation>,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(Vec<NodeId>),
    If {
        condition: NodeId,
        then_branch: NodeId,
        elifs: Vec<(NodeId, NodeId)>,
        else_branch: Option<NodeId>,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    For {
        init: Option<NodeId>,
        condition: Option<NodeId>,
        step: Option<NodeId>,
        body: NodeId,
    },
    Iter {
        binding: String,
        iterable: NodeId,
        body: NodeId,
    },
    Match {
        subject: NodeId,
        arms: Vec<MatchArm>,
    },
    Attempt {
        body: NodeId,
        handlers: Vec<HandleClause>,
        else_branch: Option<NodeId>,
    },
    Parallel(NodeId),
    Concurrent(NodeId),
    Unsafe(NodeId),
    /// A runtime-checked assertion over its condition expression.
    Contract(NodeId),
    Comptime(NodeId),
    Return(Option<NodeId>),
    Break,
    Continue,
    Print(Vec<super::expr::Arg>),
    Expr(NodeId),
}
