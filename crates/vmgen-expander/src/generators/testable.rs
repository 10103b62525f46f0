//! Interface abstraction plus a test double for classes and structs.
//!
//! The interface lists every eligible member as a requirement. The test
//! double stores every eligible field as a plain `var` and replaces each
//! function body with a call to a stored handler closure.

use log::{debug, trace};
use vmgen_core::{
    Accessors, Argument, ConditionalBlock, Decl, Expr, FieldDecl, FunctionDecl, GenerateError,
    GeneratedDecl, GeneratedField, GeneratedFunction, GeneratedInitializer, GeneratedProperty,
    GeneratedType, GeneratorConfig, Node, NodeRef, Parameter, Result, Stmt, TypeDecl, TypeKind,
    TypeRef, Visibility,
};

use super::wrong_host;
use crate::infer;

/// Eligible field binding: one entry per named binding of a field.
struct FieldEntry {
    name: String,
    ty: TypeRef,
    settable: bool,
}

enum Member<'a> {
    Field(FieldEntry),
    Function(&'a FunctionDecl),
}

pub fn generate(host: &Decl, config: &GeneratorConfig) -> Result<Vec<GeneratedDecl>> {
    let marker = &config.markers.testable;
    let decl = match host {
        Decl::Type(decl) if matches!(decl.kind, TypeKind::Class | TypeKind::Struct) => decl,
        _ => return Err(wrong_host(marker, "classes and structs", host)),
    };
    if decl.visibility.is_private() {
        return Err(GenerateError::PrivateHost {
            marker: marker.clone(),
            node: NodeRef::of(host),
        });
    }

    let members = eligible_members(decl, config);

    let interface = interface(decl, &members, config);
    let double = test_double(decl, &members, config);

    debug!(
        "@{} on '{}': {} eligible members",
        marker,
        decl.name,
        members.len()
    );

    Ok(vec![
        GeneratedDecl::Type(interface),
        GeneratedDecl::Conditional(ConditionalBlock {
            condition: config.naming.debug_condition.clone(),
            body: vec![GeneratedDecl::Type(double)],
        }),
    ])
}

fn eligible_members<'a>(decl: &'a TypeDecl, config: &GeneratorConfig) -> Vec<Member<'a>> {
    let host_public = decl.visibility.is_public();
    let mut members = Vec::new();

    for member in &decl.members {
        let is_static = match member {
            Decl::Field(field) => field.is_static,
            Decl::Function(function) => function.is_static,
            Decl::Type(_) | Decl::EnumCase(_) | Decl::Freestanding(_) => continue,
        };
        let eligible = !is_static
            && !member.visibility().is_private()
            && !member.has_attribute(&config.markers.ignore)
            && (!host_public || member.visibility().is_public());

        if !eligible {
            trace!("'{}' excluded from the interface", member.name().unwrap_or("_"));
            continue;
        }

        match member {
            Decl::Field(field) => members.extend(field_entries(field).map(Member::Field)),
            Decl::Function(function) => members.push(Member::Function(function)),
            _ => {}
        }
    }

    members
}

fn field_entries(field: &FieldDecl) -> impl Iterator<Item = FieldEntry> + '_ {
    let read_only = !field.is_mutable() || field.setter_visibility.is_some();
    field.bindings.iter().filter_map(move |binding| {
        let name = binding.pattern.identifier()?;
        let ty = infer::binding_type(binding)?;
        Some(FieldEntry {
            name: name.to_string(),
            ty,
            settable: !(read_only || binding.has_accessor_block),
        })
    })
}

fn interface(decl: &TypeDecl, members: &[Member<'_>], config: &GeneratorConfig) -> GeneratedType {
    let mut interface = GeneratedType::new(TypeKind::Protocol, config.naming.interface_name.clone());
    if decl.visibility.is_public() {
        interface.visibility = Visibility::Public;
    }

    interface.members = members
        .iter()
        .map(|member| match member {
            Member::Field(entry) => GeneratedDecl::Property(GeneratedProperty {
                visibility: Visibility::Internal,
                name: entry.name.clone(),
                ty: entry.ty.clone(),
                accessors: Accessors::Requirement {
                    settable: entry.settable,
                },
            }),
            Member::Function(function) => GeneratedDecl::Function(GeneratedFunction {
                visibility: Visibility::Internal,
                is_static: false,
                is_mutating: function.is_mutating,
                name: function.name.clone(),
                params: function.params.clone(),
                return_type: function.return_type.clone(),
                effects: function.effects,
                body: None,
            }),
        })
        .collect();

    interface
}

fn test_double(decl: &TypeDecl, members: &[Member<'_>], config: &GeneratorConfig) -> GeneratedType {
    let naming = &config.naming;
    let visibility = if decl.visibility.is_public() {
        Visibility::Public
    } else {
        Visibility::Internal
    };

    let mut double = GeneratedType::new(decl.kind, naming.test_double_name(&decl.name));
    double.visibility = visibility;
    double.is_final = decl.kind == TypeKind::Class;
    double.conformances.push(naming.interface_name.clone());

    let mut stored: Vec<(String, TypeRef)> = Vec::new();

    for member in members {
        match member {
            Member::Field(entry) => {
                double.members.push(GeneratedDecl::Field(GeneratedField {
                    visibility,
                    ..GeneratedField::new(entry.name.clone(), entry.ty.clone())
                }));
                stored.push((entry.name.clone(), entry.ty.clone()));
            }
            Member::Function(function) => {
                let handler = naming.handler_name(&function.name);
                let handler_ty = handler_type(function);

                double.members.push(GeneratedDecl::Field(GeneratedField {
                    visibility,
                    ..GeneratedField::new(handler.clone(), handler_ty.clone())
                }));
                double
                    .members
                    .push(GeneratedDecl::Function(forwarding_method(function, &handler, visibility)));
                stored.push((handler, handler_ty));
            }
        }
    }

    let labeled: Vec<Parameter> = stored
        .iter()
        .map(|(name, ty)| Parameter::labeled(name.clone(), ty.clone().escaping_if_function()))
        .collect();
    let positional: Vec<Parameter> = stored
        .iter()
        .map(|(name, ty)| Parameter::unlabeled(name.clone(), ty.clone().escaping_if_function()))
        .collect();
    let body: Vec<Stmt> = stored
        .iter()
        .map(|(name, _)| Stmt::assign(Expr::self_member(name.clone()), Expr::reference(name.clone())))
        .collect();

    double.members.push(GeneratedDecl::Initializer(GeneratedInitializer {
        visibility,
        params: labeled,
        body: body.clone(),
    }));
    // With nothing stored both forms would be `init()`.
    if !stored.is_empty() {
        double.members.push(GeneratedDecl::Initializer(GeneratedInitializer {
            visibility,
            params: positional,
            body,
        }));
    }

    double
}

/// `(param types) async throws -> Return`, with `Void` for functions without a return type.
fn handler_type(function: &FunctionDecl) -> TypeRef {
    TypeRef::effectful_function(
        function.params.iter().map(|p| p.ty.clone()).collect(),
        function.effects.closure(),
        function.return_type.clone().unwrap_or_else(TypeRef::void),
    )
}

fn forwarding_method(
    function: &FunctionDecl,
    handler: &str,
    visibility: Visibility,
) -> GeneratedFunction {
    let arguments = function
        .params
        .iter()
        .map(|param| {
            let reference = Expr::reference(param.name.clone());
            if param.is_inout() {
                Argument::positional(Expr::InOut(Box::new(reference)))
            } else {
                Argument::positional(reference)
            }
        })
        .collect();
    let mut call = Expr::call(Expr::reference(handler), arguments);
    let effects = function.effects.closure();
    if effects.is_async {
        call = Expr::Await(Box::new(call));
    }
    if effects.throws {
        call = Expr::Try(Box::new(call));
    }

    let returns_value = function
        .return_type
        .as_ref()
        .is_some_and(|ty| !ty.is_void());
    let body = if returns_value {
        Stmt::Return(call)
    } else {
        Stmt::Expr(call)
    };

    GeneratedFunction {
        visibility,
        is_static: false,
        is_mutating: false,
        name: function.name.clone(),
        params: function.params.clone(),
        return_type: function.return_type.clone(),
        effects: function.effects,
        body: Some(vec![body]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmgen_core::builder::{marker, FieldBuilder, FunctionBuilder, TypeBuilder};

    fn run(host: TypeBuilder) -> Result<Vec<GeneratedDecl>> {
        generate(&host.build().into(), &GeneratorConfig::default())
    }

    fn split(output: &[GeneratedDecl]) -> (&GeneratedType, &GeneratedType, &str) {
        match output {
            [GeneratedDecl::Type(interface), GeneratedDecl::Conditional(block)] => {
                (interface, block.body[0].as_type().unwrap(), block.condition.as_str())
            }
            other => panic!("Expected interface and conditional test double, got {:?}", other),
        }
    }

    fn service() -> TypeBuilder {
        TypeBuilder::class("Service")
            .member(FieldBuilder::constant("id").ty(TypeRef::named("UUID")))
            .member(FieldBuilder::var("count").initializer(Expr::integer("0")))
            .member(
                FieldBuilder::var("status")
                    .ty(TypeRef::named("String"))
                    .setter(Visibility::Private),
            )
            .member(
                FunctionBuilder::new("fetch")
                    .param(Parameter::labeled("id", TypeRef::named("Int")))
                    .returns(TypeRef::named("String")),
            )
            .member(FunctionBuilder::new("reset").param(Parameter::unlabeled(
                "value",
                TypeRef::InOut(Box::new(TypeRef::named("Int"))),
            )))
    }

    #[test]
    fn test_interface_requirements() {
        let output = run(service()).unwrap();
        let (interface, _, _) = split(&output);

        assert_eq!(interface.kind, TypeKind::Protocol);
        assert_eq!(interface.name, "AnyImpl");
        assert_eq!(interface.visibility, Visibility::Internal);

        let settable = |name: &str| match interface.member(name).unwrap() {
            GeneratedDecl::Property(p) => p.accessors.clone(),
            other => panic!("Expected property, got {:?}", other),
        };
        assert_eq!(settable("id"), Accessors::Requirement { settable: false });
        assert_eq!(settable("count"), Accessors::Requirement { settable: true });
        assert_eq!(settable("status"), Accessors::Requirement { settable: false });

        let fetch = interface.member("fetch").unwrap().as_function().unwrap();
        assert!(fetch.body.is_none());
        assert_eq!(fetch.return_type, Some(TypeRef::named("String")));
    }

    #[test]
    fn test_double_shape() {
        let output = run(service()).unwrap();
        let (_, double, condition) = split(&output);

        assert_eq!(condition, "DEBUG");
        assert_eq!(double.name, "TestableService");
        assert_eq!(double.kind, TypeKind::Class);
        assert!(double.is_final);
        assert_eq!(double.conformances, ["AnyImpl"]);

        let names: Vec<_> = double.members.iter().filter_map(GeneratedDecl::name).collect();
        assert_eq!(
            names,
            ["id", "count", "status", "fetchHandler", "fetch", "resetHandler", "reset"]
        );

        match double.member("fetchHandler").unwrap() {
            GeneratedDecl::Field(handler) => {
                assert_eq!(handler.ty.to_string(), "(Int) -> String");
            }
            other => panic!("Expected handler field, got {:?}", other),
        }
        match double.member("resetHandler").unwrap() {
            GeneratedDecl::Field(handler) => {
                assert_eq!(handler.ty.to_string(), "(inout Int) -> Void");
            }
            other => panic!("Expected handler field, got {:?}", other),
        }
    }

    #[test]
    fn test_forwarding_bodies() {
        let output = run(service()).unwrap();
        let (_, double, _) = split(&output);

        let fetch = double.member("fetch").unwrap().as_function().unwrap();
        assert_eq!(
            fetch.body,
            Some(vec![Stmt::Return(Expr::call(
                Expr::reference("fetchHandler"),
                vec![Argument::positional(Expr::reference("id"))],
            ))])
        );

        let reset = double.member("reset").unwrap().as_function().unwrap();
        assert_eq!(
            reset.body,
            Some(vec![Stmt::Expr(Expr::call(
                Expr::reference("resetHandler"),
                vec![Argument::positional(Expr::InOut(Box::new(Expr::reference("value"))))],
            ))])
        );
    }

    #[test]
    fn test_initializers() {
        let output = run(service()).unwrap();
        let (_, double, _) = split(&output);
        let inits: Vec<_> = double.initializers().collect();
        assert_eq!(inits.len(), 2);

        let labeled = &inits[0];
        assert_eq!(labeled.params.len(), 5);
        assert_eq!(labeled.params[3].label.as_deref(), Some("fetchHandler"));
        assert_eq!(labeled.params[3].ty.to_string(), "@escaping (Int) -> String");
        assert_eq!(labeled.params[1].ty, TypeRef::named("Int"));
        assert_eq!(
            labeled.body[0],
            Stmt::assign(Expr::self_member("id"), Expr::reference("id"))
        );

        let positional = &inits[1];
        assert!(positional.params.iter().all(|p| p.label.is_none()));
        assert_eq!(positional.body, labeled.body);
    }

    #[test]
    fn test_no_stored_members_single_initializer() {
        let output = run(TypeBuilder::class("Empty")).unwrap();
        let (_, double, _) = split(&output);
        let inits: Vec<_> = double.initializers().collect();
        assert_eq!(inits.len(), 1);
        assert!(inits[0].params.is_empty());
        assert!(inits[0].body.is_empty());
    }

    #[test]
    fn test_effects_carried_into_handlers() {
        let host = TypeBuilder::class("Loader")
            .member(
                FunctionBuilder::new("load")
                    .param(Parameter::labeled("id", TypeRef::named("Int")))
                    .returns(TypeRef::named("String"))
                    .async_()
                    .throws(),
            )
            .member(FunctionBuilder::new("refresh").async_())
            .member(
                FunctionBuilder::new("each")
                    .param(Parameter::unlabeled(
                        "body",
                        "(Int) throws -> Void".parse::<TypeRef>().unwrap(),
                    ))
                    .rethrows(),
            );
        let output = run(host).unwrap();
        let (interface, double, _) = split(&output);

        let handler_ty = |name: &str| match double.member(name).unwrap() {
            GeneratedDecl::Field(field) => field.ty.to_string(),
            other => panic!("Expected handler field, got {:?}", other),
        };
        assert_eq!(handler_ty("loadHandler"), "(Int) async throws -> String");
        assert_eq!(handler_ty("refreshHandler"), "() async -> Void");
        assert_eq!(handler_ty("eachHandler"), "((Int) throws -> Void) -> Void");

        let load = double.member("load").unwrap().as_function().unwrap();
        assert_eq!(
            load.body,
            Some(vec![Stmt::Return(Expr::Try(Box::new(Expr::Await(Box::new(Expr::call(
                Expr::reference("loadHandler"),
                vec![Argument::positional(Expr::reference("id"))],
            ))))))])
        );
        let refresh = double.member("refresh").unwrap().as_function().unwrap();
        assert_eq!(
            refresh.body,
            Some(vec![Stmt::Expr(Expr::Await(Box::new(Expr::call(
                Expr::reference("refreshHandler"),
                vec![],
            ))))])
        );
        let each = double.member("each").unwrap().as_function().unwrap();
        assert!(each.effects.rethrows);
        assert!(matches!(each.body.as_deref(), Some([Stmt::Expr(Expr::Call { .. })])));

        assert!(interface.member("each").unwrap().as_function().unwrap().effects.rethrows);
    }

    #[test]
    fn test_struct_host_and_public_visibility() {
        let host = TypeBuilder::structure("Repo")
            .visibility(Visibility::Public)
            .member(FieldBuilder::var("title").visibility(Visibility::Public).ty(TypeRef::bool()))
            .member(FieldBuilder::var("internalOnly").ty(TypeRef::bool()))
            .member(
                FunctionBuilder::new("load")
                    .visibility(Visibility::Public)
                    .mutating(),
            );
        let output = run(host).unwrap();
        let (interface, double, _) = split(&output);

        assert_eq!(interface.visibility, Visibility::Public);
        assert!(interface.member("internalOnly").is_none());
        assert!(interface.member("load").unwrap().as_function().unwrap().is_mutating);

        assert_eq!(double.kind, TypeKind::Struct);
        assert!(!double.is_final);
        assert_eq!(double.visibility, Visibility::Public);
        assert!(double.initializers().all(|i| i.visibility == Visibility::Public));
        assert!(!double.member("load").unwrap().as_function().unwrap().is_mutating);
    }

    #[test]
    fn test_private_and_ignored_members_never_leak() {
        let host = TypeBuilder::class("Service")
            .member(FieldBuilder::var("secret").visibility(Visibility::Private).ty(TypeRef::bool()))
            .member(FieldBuilder::var("cache").attribute(marker("IgnoreForImpl")).ty(TypeRef::bool()))
            .member(FunctionBuilder::new("helper").visibility(Visibility::Private))
            .member(FunctionBuilder::new("debugDump").attribute(marker("IgnoreForImpl")))
            .member(FieldBuilder::var("shared").static_().ty(TypeRef::bool()));
        let output = run(host).unwrap();
        let (interface, double, _) = split(&output);

        assert!(interface.members.is_empty());
        let names: Vec<_> = double.members.iter().filter_map(GeneratedDecl::name).collect();
        assert!(names.is_empty());
        assert_eq!(double.initializers().count(), 1);
    }

    #[test]
    fn test_multi_binding_and_untyped_fields() {
        let host = TypeBuilder::structure("Size")
            .member(
                FieldBuilder::var("width")
                    .ty(TypeRef::named("Int"))
                    .binding("height")
                    .ty(TypeRef::named("Int")),
            )
            .member(FieldBuilder::var("unknown").initializer(Expr::nil()))
            .member(
                FieldBuilder::var("area")
                    .ty(TypeRef::named("Int"))
                    .accessor_block(),
            );
        let output = run(host).unwrap();
        let (interface, _, _) = split(&output);
        let names: Vec<_> = interface.members.iter().filter_map(GeneratedDecl::name).collect();
        assert_eq!(names, ["width", "height", "area"]);
        assert_eq!(
            interface.member("area").unwrap().as_property().unwrap().accessors,
            Accessors::Requirement { settable: false }
        );
    }

    #[test]
    fn test_host_validation() {
        let private = TypeBuilder::class("Hidden").visibility(Visibility::Private);
        assert!(matches!(run(private), Err(GenerateError::PrivateHost { .. })));

        let enumeration = TypeBuilder::enumeration("Route");
        assert!(matches!(run(enumeration), Err(GenerateError::WrongHostKind { .. })));

        let file_private = TypeBuilder::class("Local").visibility(Visibility::FilePrivate);
        assert!(run(file_private).is_ok());
    }
}
