//! Field type inference.

use vmgen_attrs::qualified_name;
use vmgen_core::{Expr, FieldDecl, Literal, PatternBinding, TypeRef};

/// Effective type of a binding.
///
/// The declared type wins; otherwise the initializer's shape decides:
/// boolean, integer, float and string literals map to the matching
/// primitive, and a call such as `UserContext()` to the called type.
pub fn binding_type(binding: &PatternBinding) -> Option<TypeRef> {
    if let Some(ty) = &binding.ty {
        return Some(ty.clone());
    }
    binding.initializer.as_ref().and_then(initializer_type)
}

fn initializer_type(expr: &Expr) -> Option<TypeRef> {
    match expr {
        Expr::Literal(Literal::Bool(_)) => Some(TypeRef::bool()),
        Expr::Literal(Literal::Integer(_)) => Some(TypeRef::named("Int")),
        Expr::Literal(Literal::Float(_)) => Some(TypeRef::named("Float")),
        Expr::Literal(Literal::String(_)) => Some(TypeRef::named("String")),
        Expr::Call { callee, .. } => qualified_name(callee).map(TypeRef::named),
        _ => None,
    }
}

/// Nominal type name of a field's first binding.
///
/// Only a plain declared type or a constructor-call initializer count;
/// literals are not enough to identify a binding target.
pub fn declared_type_name(field: &FieldDecl) -> Option<String> {
    let binding = field.bindings.first()?;
    match &binding.ty {
        Some(ty) => ty.simple_name().map(str::to_string),
        None => match &binding.initializer {
            Some(Expr::Call { callee, .. }) => qualified_name(callee),
            _ => None,
        },
    }
}
