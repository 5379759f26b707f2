//! Expression nodes, owned by the arena in [`super::Ast`].

use super::item::Param;
use super::ty::TypeAnnotation;
use super::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone)]
pub struct Arg {
    /// `Some(name)` for a named argument (`f(x = 1)`).
    pub name: Option<String>,
    pub value: NodeId,
}

#[derive(Debug, Clone)]
pub enum StringPart {
    Text(String),
    Interpolation(NodeId),
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralValue),
    StringLiteral(Vec<StringPart>),
    Name(String),
    This,
    Super,
    Assign {
        op: AssignOp,
        target: NodeId,
        value: NodeId,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Call {
        callee: NodeId,
        args: Vec<Arg>,
    },
    Field {
        base: NodeId,
        name: String,
    },
    Index {
        base: NodeId,
        index: NodeId,
    },
    List(Vec<NodeId>),
    Dict(Vec<(NodeId, NodeId)>),
    Range {
        start: NodeId,
        end: NodeId,
    },
    Lambda {
        params: Vec<Param>,
        return_type: Option<TypeAnnotation>,
        body: NodeId,
    },
}
