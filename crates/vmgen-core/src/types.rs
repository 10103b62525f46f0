//! Type references.

use std::fmt;

use crate::ast::Effects;

/// A reference to a type as spelled in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeRef {
    /// A (possibly qualified) nominal type, e.g. `Int`, `Model.State`, `Binding<Int>`.
    Named { name: String, generics: Vec<TypeRef> },
    /// `T?`
    Optional(Box<TypeRef>),
    /// `[T]`
    Array(Box<TypeRef>),
    /// `[K: V]`
    Dictionary { key: Box<TypeRef>, value: Box<TypeRef> },
    /// `(A, B)`; the empty tuple is `Void`.
    Tuple(Vec<TypeRef>),
    /// `(A, B) async throws -> R`
    Function {
        params: Vec<TypeRef>,
        effects: Effects,
        ret: Box<TypeRef>,
    },
    /// `inout T`
    InOut(Box<TypeRef>),
    /// `@escaping T`
    Escaping(Box<TypeRef>),
    /// `any T`
    Existential(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named { name: name.into(), generics: Vec::new() }
    }

    pub fn generic(name: impl Into<String>, generics: Vec<TypeRef>) -> Self {
        TypeRef::Named { name: name.into(), generics }
    }

    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    pub fn function(params: Vec<TypeRef>, ret: TypeRef) -> Self {
        TypeRef::Function { params, effects: Effects::default(), ret: Box::new(ret) }
    }

    pub fn effectful_function(params: Vec<TypeRef>, effects: Effects, ret: TypeRef) -> Self {
        TypeRef::Function { params, effects, ret: Box::new(ret) }
    }

    pub fn void() -> Self {
        TypeRef::named("Void")
    }

    pub fn bool() -> Self {
        TypeRef::named("Bool")
    }

    /// Name of a nominal type without generic arguments.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, generics } if generics.is_empty() => Some(name),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        self.simple_name() == Some("Bool")
    }

    pub fn is_void(&self) -> bool {
        match self {
            TypeRef::Tuple(elements) => elements.is_empty(),
            _ => self.simple_name() == Some("Void"),
        }
    }

    /// Wrapped type of `T?` or `Optional<T>`.
    pub fn optional_inner(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Optional(inner) => Some(inner),
            TypeRef::Named { name, generics } if name == "Optional" && generics.len() == 1 => {
                generics.first()
            }
            _ => None,
        }
    }

    pub fn is_inout(&self) -> bool {
        matches!(self, TypeRef::InOut(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, TypeRef::Function { .. })
    }

    /// `@escaping` wrapper for function types, identity otherwise.
    pub fn escaping_if_function(self) -> TypeRef {
        if self.is_function() {
            TypeRef::Escaping(Box::new(self))
        } else {
            self
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, generics } => {
                write!(f, "{}", name)?;
                if !generics.is_empty() {
                    write!(f, "<{}>", join(generics))?;
                }
                Ok(())
            }
            TypeRef::Optional(inner) => match **inner {
                TypeRef::Function { .. } | TypeRef::Existential(_) => write!(f, "({})?", inner),
                _ => write!(f, "{}?", inner),
            },
            TypeRef::Array(element) => write!(f, "[{}]", element),
            TypeRef::Dictionary { key, value } => write!(f, "[{}: {}]", key, value),
            TypeRef::Tuple(elements) => write!(f, "({})", join(elements)),
            TypeRef::Function { params, effects, ret } => {
                write!(f, "({}){} -> {}", join(params), effects.keywords(), ret)
            }
            TypeRef::InOut(inner) => write!(f, "inout {}", inner),
            TypeRef::Escaping(inner) => write!(f, "@escaping {}", inner),
            TypeRef::Existential(inner) => write!(f, "any {}", inner),
        }
    }
}

fn join(types: &[TypeRef]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
