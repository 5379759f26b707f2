//! Match-arm pattern nodes, owned by the arena in [`super::Ast`].

use super::NodeId;

#[derive(Debug, Clone)]
pub enum Pat {
    Wildcard,
    Binding(String),
    /// Wraps a literal `Expr` node (including a negated numeric literal).
    Literal(NodeId),
    List(Vec<NodeId>),
    Constructor { name: String, fields: Vec<NodeId> },
}
