//! Declaration tree types.
//!
//! The tree is produced by an external parser and is read-only for every
//! generator. Hosts convert their own syntax nodes into these types; tests
//! build them by hand (see [`crate::builder`]).

use crate::types::TypeRef;
use smallvec::SmallVec;

/// A complete source file: an ordered list of top-level declarations.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    pub declarations: Vec<Decl>,
}

/// A declaration in the tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    Type(TypeDecl),
    Field(FieldDecl),
    Function(FunctionDecl),
    EnumCase(EnumCaseDecl),
    Freestanding(FreestandingDecl),
}

/// Kinds of type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Class,
    Struct,
    Enum,
    Protocol,
    Actor,
}

impl TypeKind {
    /// Keyword used to declare this kind of type.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Protocol => "protocol",
            TypeKind::Actor => "actor",
        }
    }
}

/// Declaration visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Private,
    FilePrivate,
    #[default]
    Internal,
    Public,
    Open,
}

impl Visibility {
    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }

    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public | Visibility::Open)
    }

    /// Modifier keyword, `None` for the implicit `internal` level.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Visibility::Private => Some("private"),
            Visibility::FilePrivate => Some("fileprivate"),
            Visibility::Internal => None,
            Visibility::Public => Some("public"),
            Visibility::Open => Some("open"),
        }
    }
}

/// A type declaration (class, struct, enum, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeDecl {
    pub attributes: Vec<Attribute>,
    pub visibility: Visibility,
    pub kind: TypeKind,
    pub name: String,
    pub members: Vec<Decl>,
    pub span: Span,
}

impl TypeDecl {
    /// Enumeration cases in declaration order.
    pub fn enum_cases(&self) -> impl Iterator<Item = &EnumCaseDecl> {
        self.members.iter().filter_map(|m| match m {
            Decl::EnumCase(case) => Some(case),
            _ => None,
        })
    }
}

/// `let` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingSpecifier {
    Let,
    Var,
}

/// A stored or computed field declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDecl {
    pub attributes: Vec<Attribute>,
    pub visibility: Visibility,
    /// Restricted setter, as in `private(set)`.
    pub setter_visibility: Option<Visibility>,
    pub specifier: BindingSpecifier,
    pub is_static: bool,
    pub bindings: Vec<PatternBinding>,
    pub span: Span,
}

impl FieldDecl {
    pub fn is_mutable(&self) -> bool {
        self.specifier == BindingSpecifier::Var
    }

    /// Name of the first binding, if it is a plain identifier.
    pub fn name(&self) -> Option<&str> {
        self.bindings.first().and_then(|b| b.pattern.identifier())
    }
}

/// One `pattern: Type = initializer` binding of a field declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternBinding {
    pub pattern: Pattern,
    pub ty: Option<TypeRef>,
    pub initializer: Option<Expr>,
    /// The binding declares its own `{ get set }` or computed body.
    pub has_accessor_block: bool,
}

/// Binding pattern of a field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    Identifier(String),
    Tuple(Vec<Pattern>),
    Wildcard,
}

impl Pattern {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Pattern::Identifier(name) => Some(name),
            Pattern::Tuple(_) | Pattern::Wildcard => None,
        }
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    pub attributes: Vec<Attribute>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_mutating: bool,
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeRef>,
    pub effects: Effects,
    pub span: Span,
}

/// A function parameter.
///
/// `label` is the external argument label; `None` stands for `_`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub label: Option<String>,
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    /// Parameter whose label equals its name, as in `value: Int`.
    pub fn labeled(name: impl Into<String>, ty: TypeRef) -> Self {
        let name = name.into();
        Self { label: Some(name.clone()), name, ty }
    }

    /// Parameter without an external label, as in `_ value: Int`.
    pub fn unlabeled(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { label: None, name: name.into(), ty }
    }

    pub fn is_inout(&self) -> bool {
        self.ty.is_inout()
    }
}

/// Effect markers of a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effects {
    pub is_async: bool,
    pub throws: bool,
    pub rethrows: bool,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        !(self.is_async || self.throws || self.rethrows)
    }

    /// Effects of a stored closure standing in for the function.
    ///
    /// `rethrows` only applies to declarations, so the closure drops it.
    pub fn closure(self) -> Effects {
        Effects { rethrows: false, ..self }
    }

    /// Signature suffix such as ` async throws`; empty without effects.
    pub fn keywords(&self) -> String {
        let mut out = String::new();
        if self.is_async {
            out.push_str(" async");
        }
        if self.rethrows {
            out.push_str(" rethrows");
        } else if self.throws {
            out.push_str(" throws");
        }
        out
    }
}

/// A single enumeration case.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumCaseDecl {
    pub attributes: Vec<Attribute>,
    pub name: String,
    pub associated: Vec<TypeRef>,
    pub span: Span,
}

/// A file-scope macro expansion such as `#GenerateKeyForImpl(...)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreestandingDecl {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

/// An attribute attached to a declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

/// An optionally labeled argument expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Argument {
    pub label: Option<String>,
    pub value: Expr,
}

impl Argument {
    pub fn new(label: Option<&str>, value: Expr) -> Self {
        Self { label: label.map(str::to_string), value }
    }

    pub fn positional(value: Expr) -> Self {
        Self { label: None, value }
    }

    pub fn labeled(label: &str, value: Expr) -> Self {
        Self { label: Some(label.to_string()), value }
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Bool(bool),
    /// Integer literal as written.
    Integer(String),
    /// Float literal as written.
    Float(String),
    String(String),
    Nil,
}

/// Expressions appearing in attribute arguments, initializers and generated bodies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Literal(Literal),
    /// A plain name, including `self` and `newValue`.
    Reference(String),
    /// `base.member`, or the implicit-base form `.member`.
    MemberAccess {
        base: Option<Box<Expr>>,
        member: String,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Argument>,
    },
    Tuple(Vec<Argument>),
    Path(PathExpr),
    /// `&expr`, forwarding by reference.
    InOut(Box<Expr>),
    /// `try expr`
    Try(Box<Expr>),
    /// `await expr`
    Await(Box<Expr>),
    Subscript {
        base: Box<Expr>,
        arguments: Vec<Argument>,
    },
}

impl Expr {
    pub fn reference(name: impl Into<String>) -> Self {
        Expr::Reference(name.into())
    }

    pub fn self_ref() -> Self {
        Expr::Reference("self".to_string())
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn integer(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::Integer(value.into()))
    }

    pub fn float(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::Float(value.into()))
    }

    pub fn nil() -> Self {
        Expr::Literal(Literal::Nil)
    }

    /// `base.member`.
    pub fn member(base: Expr, member: impl Into<String>) -> Self {
        Expr::MemberAccess { base: Some(Box::new(base)), member: member.into() }
    }

    /// `.member` with an implicit base.
    pub fn implicit_member(member: impl Into<String>) -> Self {
        Expr::MemberAccess { base: None, member: member.into() }
    }

    /// `self.member`.
    pub fn self_member(member: impl Into<String>) -> Self {
        Expr::member(Expr::self_ref(), member)
    }

    /// `Name.self`, a type used as a value.
    pub fn type_value(name: impl Into<String>) -> Self {
        Expr::member(Expr::Reference(name.into()), "self")
    }

    pub fn call(callee: Expr, arguments: Vec<Argument>) -> Self {
        Expr::Call { callee: Box::new(callee), arguments }
    }

    /// `\Root.component`, or `\.component` when `root` is `None`.
    pub fn path(root: Option<&str>, component: &str) -> Self {
        Expr::Path(PathExpr::new(root, [component]))
    }

    /// `(first, second)`.
    pub fn pair(first: Expr, second: Expr) -> Self {
        Expr::Tuple(vec![Argument::positional(first), Argument::positional(second)])
    }
}

/// A key-path expression: optional root type plus a chain of property names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathExpr {
    pub root: Option<String>,
    pub components: SmallVec<[String; 2]>,
}

impl PathExpr {
    pub fn new<I, S>(root: Option<&str>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.map(str::to_string),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// The property name of a single-level path.
    pub fn single_component(&self) -> Option<&str> {
        match self.components.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Source span for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

/// Node kinds exposed through [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Type(TypeKind),
    Field,
    Function,
    EnumCase,
    Freestanding,
}

impl DeclKind {
    /// Human-readable kind name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            DeclKind::Type(TypeKind::Class) => "class",
            DeclKind::Type(TypeKind::Struct) => "struct",
            DeclKind::Type(TypeKind::Enum) => "enum",
            DeclKind::Type(TypeKind::Protocol) => "protocol",
            DeclKind::Type(TypeKind::Actor) => "actor",
            DeclKind::Field => "variable",
            DeclKind::Function => "function",
            DeclKind::EnumCase => "enum case",
            DeclKind::Freestanding => "freestanding expansion",
        }
    }
}

/// Narrow read-only view of a declaration node.
pub trait Node {
    fn kind(&self) -> DeclKind;
    fn name(&self) -> Option<&str>;
    fn attributes(&self) -> &[Attribute];
    fn children(&self) -> &[Decl];
    fn span(&self) -> Span;

    /// First attribute with the given name.
    fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|a| a.name == name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

impl Node for Decl {
    fn kind(&self) -> DeclKind {
        match self {
            Decl::Type(t) => DeclKind::Type(t.kind),
            Decl::Field(_) => DeclKind::Field,
            Decl::Function(_) => DeclKind::Function,
            Decl::EnumCase(_) => DeclKind::EnumCase,
            Decl::Freestanding(_) => DeclKind::Freestanding,
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            Decl::Type(t) => Some(&t.name),
            Decl::Field(f) => f.name(),
            Decl::Function(f) => Some(&f.name),
            Decl::EnumCase(c) => Some(&c.name),
            Decl::Freestanding(f) => Some(&f.name),
        }
    }

    fn attributes(&self) -> &[Attribute] {
        match self {
            Decl::Type(t) => &t.attributes,
            Decl::Field(f) => &f.attributes,
            Decl::Function(f) => &f.attributes,
            Decl::EnumCase(c) => &c.attributes,
            Decl::Freestanding(_) => &[],
        }
    }

    fn children(&self) -> &[Decl] {
        match self {
            Decl::Type(t) => &t.members,
            _ => &[],
        }
    }

    fn span(&self) -> Span {
        match self {
            Decl::Type(t) => t.span,
            Decl::Field(f) => f.span,
            Decl::Function(f) => f.span,
            Decl::EnumCase(c) => c.span,
            Decl::Freestanding(f) => f.span,
        }
    }
}

impl Decl {
    /// Declared visibility; enum cases and freestanding sites have none of their own.
    pub fn visibility(&self) -> Visibility {
        match self {
            Decl::Type(t) => t.visibility,
            Decl::Field(f) => f.visibility,
            Decl::Function(f) => f.visibility,
            Decl::EnumCase(_) | Decl::Freestanding(_) => Visibility::Internal,
        }
    }
}
