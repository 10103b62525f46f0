//! Builders for declaration trees.
//!
//! Hosts normally convert their own syntax nodes; tests and benchmarks
//! assemble trees with these builders instead.

use crate::ast::{
    Argument, Attribute, BindingSpecifier, Decl, Effects, EnumCaseDecl, Expr, FieldDecl,
    FreestandingDecl, FunctionDecl, Parameter, Pattern, PatternBinding, Span, TypeDecl, TypeKind,
    Visibility,
};
use crate::types::TypeRef;

impl From<TypeDecl> for Decl {
    fn from(decl: TypeDecl) -> Self {
        Decl::Type(decl)
    }
}

impl From<FieldDecl> for Decl {
    fn from(decl: FieldDecl) -> Self {
        Decl::Field(decl)
    }
}

impl From<FunctionDecl> for Decl {
    fn from(decl: FunctionDecl) -> Self {
        Decl::Function(decl)
    }
}

impl From<EnumCaseDecl> for Decl {
    fn from(decl: EnumCaseDecl) -> Self {
        Decl::EnumCase(decl)
    }
}

impl From<FreestandingDecl> for Decl {
    fn from(decl: FreestandingDecl) -> Self {
        Decl::Freestanding(decl)
    }
}

impl From<TypeBuilder> for Decl {
    fn from(builder: TypeBuilder) -> Self {
        Decl::Type(builder.build())
    }
}

impl From<FieldBuilder> for Decl {
    fn from(builder: FieldBuilder) -> Self {
        Decl::Field(builder.build())
    }
}

impl From<FunctionBuilder> for Decl {
    fn from(builder: FunctionBuilder) -> Self {
        Decl::Function(builder.build())
    }
}

/// Builder for attributes.
pub struct AttributeBuilder {
    name: String,
    arguments: Vec<Argument>,
    span: Span,
}

impl AttributeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            arguments: Vec::new(),
            span: Span::default(),
        }
    }

    /// Add a labeled argument.
    pub fn arg(mut self, label: &str, value: Expr) -> Self {
        self.arguments.push(Argument::labeled(label, value));
        self
    }

    /// Add an unlabeled argument.
    pub fn positional(mut self, value: Expr) -> Self {
        self.arguments.push(Argument::positional(value));
        self
    }

    pub fn build(self) -> Attribute {
        Attribute {
            name: self.name,
            arguments: self.arguments,
            span: self.span,
        }
    }
}

/// Attribute without arguments.
pub fn marker(name: &str) -> Attribute {
    AttributeBuilder::new(name).build()
}

/// Builder for type declarations.
pub struct TypeBuilder {
    decl: TypeDecl,
}

impl TypeBuilder {
    pub fn new(kind: TypeKind, name: &str) -> Self {
        Self {
            decl: TypeDecl {
                attributes: Vec::new(),
                visibility: Visibility::Internal,
                kind,
                name: name.to_string(),
                members: Vec::new(),
                span: Span::default(),
            },
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn structure(name: &str) -> Self {
        Self::new(TypeKind::Struct, name)
    }

    pub fn enumeration(name: &str) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.decl.visibility = visibility;
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.decl.attributes.push(attribute);
        self
    }

    pub fn member(mut self, member: impl Into<Decl>) -> Self {
        self.decl.members.push(member.into());
        self
    }

    /// Add a payload-free enumeration case.
    pub fn case(self, name: &str) -> Self {
        self.member(EnumCaseDecl {
            attributes: Vec::new(),
            name: name.to_string(),
            associated: Vec::new(),
            span: Span::default(),
        })
    }

    /// Add an enumeration case with associated values.
    pub fn case_with(self, name: &str, associated: Vec<TypeRef>) -> Self {
        self.member(EnumCaseDecl {
            attributes: Vec::new(),
            name: name.to_string(),
            associated,
            span: Span::default(),
        })
    }

    pub fn span(mut self, span: Span) -> Self {
        self.decl.span = span;
        self
    }

    pub fn build(self) -> TypeDecl {
        self.decl
    }
}

/// Builder for field declarations.
pub struct FieldBuilder {
    decl: FieldDecl,
}

impl FieldBuilder {
    fn new(specifier: BindingSpecifier, name: &str) -> Self {
        Self {
            decl: FieldDecl {
                attributes: Vec::new(),
                visibility: Visibility::Internal,
                setter_visibility: None,
                specifier,
                is_static: false,
                bindings: vec![PatternBinding {
                    pattern: Pattern::Identifier(name.to_string()),
                    ty: None,
                    initializer: None,
                    has_accessor_block: false,
                }],
                span: Span::default(),
            },
        }
    }

    /// `var name`
    pub fn var(name: &str) -> Self {
        Self::new(BindingSpecifier::Var, name)
    }

    /// `let name`
    pub fn constant(name: &str) -> Self {
        Self::new(BindingSpecifier::Let, name)
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.decl.visibility = visibility;
        self
    }

    /// Restricted setter, as in `private(set)`.
    pub fn setter(mut self, visibility: Visibility) -> Self {
        self.decl.setter_visibility = Some(visibility);
        self
    }

    pub fn static_(mut self) -> Self {
        self.decl.is_static = true;
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.decl.attributes.push(attribute);
        self
    }

    /// Declared type of the most recent binding.
    pub fn ty(mut self, ty: TypeRef) -> Self {
        if let Some(binding) = self.decl.bindings.last_mut() {
            binding.ty = Some(ty);
        }
        self
    }

    /// Initializer of the most recent binding.
    pub fn initializer(mut self, value: Expr) -> Self {
        if let Some(binding) = self.decl.bindings.last_mut() {
            binding.initializer = Some(value);
        }
        self
    }

    /// Mark the most recent binding as declaring its own accessors.
    pub fn accessor_block(mut self) -> Self {
        if let Some(binding) = self.decl.bindings.last_mut() {
            binding.has_accessor_block = true;
        }
        self
    }

    /// Replace the pattern of the most recent binding.
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        if let Some(binding) = self.decl.bindings.last_mut() {
            binding.pattern = pattern;
        }
        self
    }

    /// Append another binding, as in `var a: Int, b: Int`.
    pub fn binding(mut self, name: &str) -> Self {
        self.decl.bindings.push(PatternBinding {
            pattern: Pattern::Identifier(name.to_string()),
            ty: None,
            initializer: None,
            has_accessor_block: false,
        });
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.decl.span = span;
        self
    }

    pub fn build(self) -> FieldDecl {
        self.decl
    }
}

/// Builder for function declarations.
pub struct FunctionBuilder {
    decl: FunctionDecl,
}

impl FunctionBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            decl: FunctionDecl {
                attributes: Vec::new(),
                visibility: Visibility::Internal,
                is_static: false,
                is_mutating: false,
                name: name.to_string(),
                params: Vec::new(),
                return_type: None,
                effects: Effects::default(),
                span: Span::default(),
            },
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.decl.visibility = visibility;
        self
    }

    pub fn static_(mut self) -> Self {
        self.decl.is_static = true;
        self
    }

    pub fn mutating(mut self) -> Self {
        self.decl.is_mutating = true;
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.decl.attributes.push(attribute);
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.decl.params.push(param);
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.decl.return_type = Some(ty);
        self
    }

    pub fn async_(mut self) -> Self {
        self.decl.effects.is_async = true;
        self
    }

    pub fn throws(mut self) -> Self {
        self.decl.effects.throws = true;
        self
    }

    pub fn rethrows(mut self) -> Self {
        self.decl.effects.rethrows = true;
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.decl.span = span;
        self
    }

    pub fn build(self) -> FunctionDecl {
        self.decl
    }
}

/// A file-scope expansion site.
pub fn freestanding(name: &str, arguments: Vec<Argument>) -> FreestandingDecl {
    FreestandingDecl {
        name: name.to_string(),
        arguments,
        span: Span::default(),
    }
}
