//! Shape matchers over single argument expressions.

use vmgen_core::ast::{Argument, Expr, Literal};

/// A single-level path: optional root type plus one property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathRef {
    /// `None` for the implicit-root form `\.property`.
    pub root: Option<String>,
    pub property: String,
}

/// A `(\Root.property, Type.self)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTypePair {
    pub path: PathRef,
    pub ty: String,
}

/// `true` / `false`.
pub fn bool_literal(expr: &Expr) -> Option<bool> {
    match expr {
        Expr::Literal(Literal::Bool(value)) => Some(*value),
        _ => None,
    }
}

/// A plain string literal.
pub fn string_literal(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Literal(Literal::String(value)) => Some(value),
        _ => None,
    }
}

/// Dotted name of a reference chain, e.g. `Model.State`.
pub fn qualified_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Reference(name) => Some(name.clone()),
        Expr::MemberAccess {
            base: Some(base),
            member,
        } => qualified_name(base).map(|base| format!("{}.{}", base, member)),
        Expr::MemberAccess { base: None, .. }
        | Expr::Literal(_)
        | Expr::Call { .. }
        | Expr::Tuple(_)
        | Expr::Path(_)
        | Expr::InOut(_)
        | Expr::Try(_)
        | Expr::Await(_)
        | Expr::Subscript { .. } => None,
    }
}

/// Type name of a `Type.self` expression.
pub fn type_reference(expr: &Expr) -> Option<String> {
    match expr {
        Expr::MemberAccess {
            base: Some(base),
            member,
        } if member == "self" => qualified_name(base),
        _ => None,
    }
}

/// A key path with exactly one property component.
pub fn path_expression(expr: &Expr) -> Option<PathRef> {
    match expr {
        Expr::Path(path) => path.single_component().map(|property| PathRef {
            root: path.root.clone(),
            property: property.to_string(),
        }),
        _ => None,
    }
}

/// A two-element tuple of a path and a type reference.
pub fn path_type_pair(expr: &Expr) -> Option<PathTypePair> {
    match expr {
        Expr::Tuple(elements) => match elements.as_slice() {
            [Argument { label: None, value: path }, Argument { label: None, value: ty }] => {
                Some(PathTypePair {
                    path: path_expression(path)?,
                    ty: type_reference(ty)?,
                })
            }
            _ => None,
        },
        _ => None,
    }
}
