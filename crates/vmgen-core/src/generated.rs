//! Generated-declaration model.
//!
//! Generators return ordered lists of [`GeneratedDecl`]. The model carries no
//! reference back to the input tree; rendering to text lives in `vmgen-render`.

use crate::ast::{Effects, Expr, Parameter, TypeKind, Visibility};
use crate::types::TypeRef;

/// An output unit returned to the host for splicing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneratedDecl {
    Field(GeneratedField),
    Property(GeneratedProperty),
    Function(GeneratedFunction),
    Initializer(GeneratedInitializer),
    Type(GeneratedType),
    /// An enumeration case inside a generated enumeration.
    Case(String),
    /// Declarations compiled only when `condition` holds, e.g. `#if DEBUG`.
    Conditional(ConditionalBlock),
}

impl GeneratedDecl {
    /// Declared name; `None` for initializers and conditional blocks.
    pub fn name(&self) -> Option<&str> {
        match self {
            GeneratedDecl::Field(f) => Some(&f.name),
            GeneratedDecl::Property(p) => Some(&p.name),
            GeneratedDecl::Function(f) => Some(&f.name),
            GeneratedDecl::Type(t) => Some(&t.name),
            GeneratedDecl::Case(name) => Some(name),
            GeneratedDecl::Initializer(_) | GeneratedDecl::Conditional(_) => None,
        }
    }

    pub fn as_type(&self) -> Option<&GeneratedType> {
        match self {
            GeneratedDecl::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&GeneratedProperty> {
        match self {
            GeneratedDecl::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&GeneratedFunction> {
        match self {
            GeneratedDecl::Function(f) => Some(f),
            _ => None,
        }
    }
}

/// A stored field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedField {
    pub visibility: Visibility,
    pub setter_visibility: Option<Visibility>,
    pub is_static: bool,
    pub name: String,
    pub ty: TypeRef,
    pub initializer: Option<Expr>,
}

impl GeneratedField {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            visibility: Visibility::Internal,
            setter_visibility: None,
            is_static: false,
            name: name.into(),
            ty,
            initializer: None,
        }
    }
}

/// A property with explicit accessors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedProperty {
    pub visibility: Visibility,
    pub name: String,
    pub ty: TypeRef,
    pub accessors: Accessors,
}

/// Accessor shapes of a [`GeneratedProperty`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accessors {
    /// Interface requirement: `{ get }` or `{ get set }`.
    Requirement { settable: bool },
    /// Computed property with explicit bodies; the setter sees `newValue`.
    Computed { get: Vec<Stmt>, set: Option<Vec<Stmt>> },
    /// Two-way binding built from a read expression and a write body over `newValue`.
    Binding { get: Expr, set: Vec<Stmt> },
}

/// A function or method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedFunction {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_mutating: bool,
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub effects: Effects,
    /// `None` for interface requirements.
    pub body: Option<Vec<Stmt>>,
}

/// An initializer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedInitializer {
    pub visibility: Visibility,
    pub params: Vec<Parameter>,
    pub body: Vec<Stmt>,
}

/// A nested type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedType {
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub is_final: bool,
    pub name: String,
    pub conformances: Vec<String>,
    pub members: Vec<GeneratedDecl>,
}

impl GeneratedType {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            visibility: Visibility::Internal,
            is_final: false,
            name: name.into(),
            conformances: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Cases of a generated enumeration, in order.
    pub fn cases(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|m| match m {
            GeneratedDecl::Case(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn member(&self, name: &str) -> Option<&GeneratedDecl> {
        self.members.iter().find(|m| m.name() == Some(name))
    }

    pub fn initializers(&self) -> impl Iterator<Item = &GeneratedInitializer> {
        self.members.iter().filter_map(|m| match m {
            GeneratedDecl::Initializer(init) => Some(init),
            _ => None,
        })
    }
}

/// `#if <condition> ... #endif`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalBlock {
    pub condition: String,
    pub body: Vec<GeneratedDecl>,
}

/// Statements of generated bodies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    Assign { target: Expr, value: Expr },
    Expr(Expr),
    Return(Expr),
    Switch { subject: Expr, arms: Vec<SwitchArm> },
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }
}

/// One `case <pattern>: <body>` arm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchArm {
    pub pattern: Expr,
    pub body: Vec<Stmt>,
}
