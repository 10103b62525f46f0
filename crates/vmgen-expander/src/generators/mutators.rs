//! `show`/`hide` mutator pairs for boolean and optional fields.

use log::debug;
use vmgen_attrs::{string_literal, ArgumentList};
use vmgen_core::{
    last_segment, lowercase_first, Attribute, Decl, Effects, Expr, GenerateError, GeneratedDecl,
    GeneratedField, GeneratedFunction, GeneratorConfig, NodeRef, Parameter, Pattern,
    Result, Stmt, TypeRef, Visibility,
};

use super::wrong_host;
use crate::infer;

const NAME_ARG: &str = "name";
const COUPLED_ARG: &str = "coupledValueType";

/// Shape of the field driving the pair.
enum FieldShape {
    Flag,
    /// Optional field; carries the wrapped type.
    Optional(TypeRef),
}

/// Coupled payload stored next to the field.
struct Companion {
    field: String,
    ty: String,
    param: String,
}

pub fn generate(
    attribute: &Attribute,
    host: &Decl,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedDecl>> {
    let marker = &config.markers.mutators;
    let field = match host {
        Decl::Field(field) => field,
        _ => return Err(wrong_host(marker, "variable declarations", host)),
    };

    let args = ArgumentList::of(attribute);
    let name = args
        .string(NAME_ARG)
        .or_else(|| args.first_positional().and_then(string_literal))
        .ok_or_else(|| GenerateError::MissingRequiredArgument {
            marker: marker.clone(),
            argument: NAME_ARG.to_string(),
            node: NodeRef::of(host),
        })?;

    if !field.is_mutable() {
        return Err(GenerateError::ImmutableField {
            marker: marker.clone(),
            node: NodeRef::of(host),
        });
    }

    let (binding, field_name) = match field.bindings.as_slice() {
        [binding] => match &binding.pattern {
            Pattern::Identifier(name) => (binding, name.as_str()),
            Pattern::Tuple(_) | Pattern::Wildcard => {
                return Err(ambiguous(marker, host));
            }
        },
        _ => return Err(ambiguous(marker, host)),
    };

    let shape = match infer::binding_type(binding) {
        Some(ty) if ty.is_bool() => FieldShape::Flag,
        Some(ty) => match ty.optional_inner() {
            Some(inner) => FieldShape::Optional(inner.clone()),
            None => return Err(unsupported(host)),
        },
        None => return Err(unsupported(host)),
    };

    let companion = args
        .type_ref(COUPLED_ARG)
        .filter(|ty| ty != "Void")
        .map(|ty| {
            let short = last_segment(&ty).to_string();
            Companion {
                field: config.naming.companion_field_name(field_name, &short),
                param: lowercase_first(&short),
                ty,
            }
        });

    let mut output = Vec::with_capacity(3);
    if let Some(companion) = &companion {
        output.push(GeneratedDecl::Field(GeneratedField {
            setter_visibility: Some(Visibility::Private),
            ..GeneratedField::new(
                companion.field.clone(),
                TypeRef::optional(TypeRef::named(companion.ty.clone())),
            )
        }));
    }

    let target = Expr::self_member(field_name);
    let mut show_params = Vec::new();
    let mut show_body = Vec::new();
    let mut hide_body = Vec::new();

    match shape {
        FieldShape::Flag => {
            show_body.push(Stmt::assign(target.clone(), Expr::bool(true)));
            hide_body.push(Stmt::assign(target, Expr::bool(false)));
        }
        FieldShape::Optional(inner) => {
            show_params.push(Parameter::unlabeled("value", inner));
            show_body.push(Stmt::assign(target.clone(), Expr::reference("value")));
            hide_body.push(Stmt::assign(target, Expr::nil()));
        }
    }

    if let Some(companion) = companion {
        show_params.push(Parameter {
            label: Some("with".to_string()),
            name: companion.param.clone(),
            ty: TypeRef::named(companion.ty),
        });
        show_body.push(Stmt::assign(
            Expr::self_member(companion.field.clone()),
            Expr::reference(companion.param),
        ));
        hide_body.push(Stmt::assign(Expr::self_member(companion.field), Expr::nil()));
    }

    output.push(mutator(config.naming.show_name(name), show_params, show_body));
    output.push(mutator(config.naming.hide_name(name), Vec::new(), hide_body));

    debug!(
        "@{} on '{}': {} declarations",
        marker,
        field_name,
        output.len()
    );
    Ok(output)
}

fn mutator(name: String, params: Vec<Parameter>, body: Vec<Stmt>) -> GeneratedDecl {
    GeneratedDecl::Function(GeneratedFunction {
        visibility: Visibility::Internal,
        is_static: false,
        is_mutating: true,
        name,
        params,
        return_type: None,
        effects: Effects::default(),
        body: Some(body),
    })
}

fn ambiguous(marker: &str, host: &Decl) -> GenerateError {
    GenerateError::AmbiguousBinding {
        marker: marker.to_string(),
        node: NodeRef::of(host),
    }
}

fn unsupported(host: &Decl) -> GenerateError {
    GenerateError::UnsupportedType {
        expected: "Bool, Optional<T> or T?".to_string(),
        node: NodeRef::of(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmgen_core::builder::{AttributeBuilder, FieldBuilder, FunctionBuilder};
    use vmgen_core::Span;

    fn attr(name: &str) -> AttributeBuilder {
        AttributeBuilder::new("GenerateMutators").arg("name", Expr::string(name))
    }

    fn run(attribute: Attribute, field: impl Into<Decl>) -> Result<Vec<GeneratedDecl>> {
        generate(&attribute, &field.into(), &GeneratorConfig::default())
    }

    fn function<'a>(output: &'a [GeneratedDecl], name: &str) -> &'a GeneratedFunction {
        output
            .iter()
            .filter_map(GeneratedDecl::as_function)
            .find(|f| f.name == name)
            .unwrap()
    }

    #[test]
    fn test_boolean_field() {
        let field = FieldBuilder::var("flag").ty(TypeRef::bool()).initializer(Expr::bool(false));
        let output = run(attr("Foo").build(), field.build()).unwrap();
        assert_eq!(output.len(), 2);

        let show = function(&output, "showFoo");
        assert!(show.is_mutating);
        assert!(show.params.is_empty());
        assert_eq!(
            show.body.as_deref(),
            Some(&[Stmt::assign(Expr::self_member("flag"), Expr::bool(true))][..])
        );

        let hide = function(&output, "hideFoo");
        assert_eq!(
            hide.body.as_deref(),
            Some(&[Stmt::assign(Expr::self_member("flag"), Expr::bool(false))][..])
        );
    }

    #[test]
    fn test_inferred_boolean_field() {
        let field = FieldBuilder::var("flag").initializer(Expr::bool(true)).build();
        let output = run(attr("Foo").build(), field).unwrap();
        assert!(function(&output, "showFoo").params.is_empty());
    }

    #[test]
    fn test_optional_field() {
        let field = FieldBuilder::var("payload")
            .ty(TypeRef::optional(TypeRef::named("Int")))
            .build();
        let output = run(attr("Bar").build(), field).unwrap();

        let show = function(&output, "showBar");
        assert_eq!(show.params, vec![Parameter::unlabeled("value", TypeRef::named("Int"))]);
        assert_eq!(
            show.body.as_deref(),
            Some(&[Stmt::assign(Expr::self_member("payload"), Expr::reference("value"))][..])
        );

        let hide = function(&output, "hideBar");
        assert!(hide.params.is_empty());
        assert_eq!(
            hide.body.as_deref(),
            Some(&[Stmt::assign(Expr::self_member("payload"), Expr::nil())][..])
        );
    }

    #[test]
    fn test_coupled_value() {
        let field = FieldBuilder::var("showMain").ty(TypeRef::bool()).build();
        let attribute = attr("Main")
            .arg("coupledValueType", Expr::type_value("UserContext"))
            .build();
        let output = run(attribute, field).unwrap();
        assert_eq!(output.len(), 3);

        match &output[0] {
            GeneratedDecl::Field(companion) => {
                assert_eq!(companion.name, "showMain_UserContext");
                assert_eq!(companion.setter_visibility, Some(Visibility::Private));
                assert_eq!(companion.ty, TypeRef::optional(TypeRef::named("UserContext")));
            }
            other => panic!("Expected companion field first, got {:?}", other),
        }

        let show = function(&output, "showMain");
        assert_eq!(show.params.len(), 1);
        assert_eq!(show.params[0].label.as_deref(), Some("with"));
        assert_eq!(show.params[0].name, "userContext");
        assert_eq!(show.body.as_ref().unwrap().len(), 2);

        let hide = function(&output, "hideMain");
        assert!(hide.params.is_empty());
        assert_eq!(
            hide.body.as_ref().unwrap()[1],
            Stmt::assign(Expr::self_member("showMain_UserContext"), Expr::nil())
        );
    }

    #[test]
    fn test_void_coupled_value_is_ignored() {
        let field = FieldBuilder::var("flag").ty(TypeRef::bool()).build();
        let attribute = attr("Foo")
            .arg("coupledValueType", Expr::type_value("Void"))
            .build();
        assert_eq!(run(attribute, field).unwrap().len(), 2);
    }

    #[test]
    fn test_validation_order() {
        let func = FunctionBuilder::new("flag").build();
        assert!(matches!(
            run(attr("Foo").build(), func),
            Err(GenerateError::WrongHostKind { .. })
        ));

        let constant = FieldBuilder::constant("flag").ty(TypeRef::bool()).build();
        assert!(matches!(
            run(AttributeBuilder::new("GenerateMutators").build(), constant.clone()),
            Err(GenerateError::MissingRequiredArgument { .. })
        ));
        assert!(matches!(
            run(attr("Foo").build(), constant),
            Err(GenerateError::ImmutableField { .. })
        ));

        let pair = FieldBuilder::var("a").ty(TypeRef::bool()).binding("b").build();
        assert!(matches!(
            run(attr("Foo").build(), pair),
            Err(GenerateError::AmbiguousBinding { .. })
        ));

        let counter = FieldBuilder::var("count").initializer(Expr::integer("0")).build();
        assert!(matches!(
            run(attr("Foo").build(), counter),
            Err(GenerateError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_destructuring_patterns_are_ambiguous() {
        let span = Span { start: 4, end: 30, line: 1, column: 5 };
        let tuple = FieldBuilder::var("pair")
            .pattern(Pattern::Tuple(vec![
                Pattern::Identifier("a".to_string()),
                Pattern::Identifier("b".to_string()),
            ]))
            .ty(TypeRef::bool())
            .span(span)
            .build();
        match run(attr("Foo").build(), tuple) {
            Err(GenerateError::AmbiguousBinding { node, .. }) => assert_eq!(node.span, span),
            other => panic!("Expected AmbiguousBinding, got {:?}", other),
        }

        let wildcard = FieldBuilder::var("unused").pattern(Pattern::Wildcard).ty(TypeRef::bool()).build();
        assert!(matches!(
            run(attr("Foo").build(), wildcard),
            Err(GenerateError::AmbiguousBinding { .. })
        ));
    }

    #[test]
    fn test_positional_name() {
        let field = FieldBuilder::var("flag").ty(TypeRef::bool()).build();
        let attribute = AttributeBuilder::new("GenerateMutators")
            .positional(Expr::string("Foo"))
            .build();
        let output = run(attribute, field).unwrap();
        assert_eq!(output[0].name(), Some("showFoo"));
    }
}
