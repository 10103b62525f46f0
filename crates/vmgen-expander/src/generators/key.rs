//! Dependency-registration key for a type and its test double.
//!
//! Names come from the same [`vmgen_core::NamingPolicy`] the testable
//! abstraction generator uses, so the key always refers to the interface and
//! test double that generator emits.

use log::debug;
use vmgen_attrs::ArgumentList;
use vmgen_core::{
    Accessors, Argument, ConditionalBlock, Expr, FreestandingDecl, GenerateError, GeneratedDecl,
    GeneratedField, GeneratedProperty, GeneratedType, GeneratorConfig, NodeRef, Result, Stmt,
    TypeKind, TypeRef, Visibility,
};

const TYPE_ARG: &str = "for";
const LIVE_ARGS: &str = "liveArgs";
const TEST_ARGS: &str = "testableArgs";

pub fn generate(site: &FreestandingDecl, config: &GeneratorConfig) -> Result<Vec<GeneratedDecl>> {
    let naming = &config.naming;
    let args = ArgumentList::new(&site.arguments);

    let target = args
        .type_ref(TYPE_ARG)
        .ok_or_else(|| GenerateError::MissingRequiredArgument {
            marker: config.markers.abstraction_key.clone(),
            argument: TYPE_ARG.to_string(),
            node: NodeRef::named(site.name.clone(), site.span),
        })?;

    let interface = TypeRef::Existential(Box::new(TypeRef::named(naming.interface_path(&target))));
    let key_name = naming.key_name(&target);

    let live = slot(
        "liveValue",
        interface.clone(),
        Expr::reference(target.clone()),
        args.labeled_run(LIVE_ARGS),
    );
    let preview = slot(
        "previewValue",
        interface.clone(),
        Expr::reference(naming.test_double_path(&target)),
        args.labeled_run(TEST_ARGS),
    );

    let mut key = GeneratedType::new(TypeKind::Enum, key_name.clone());
    key.conformances.push(naming.key_protocol.clone());
    key.members.push(GeneratedDecl::Field(live));
    key.members.push(GeneratedDecl::Conditional(ConditionalBlock {
        condition: naming.debug_condition.clone(),
        body: vec![GeneratedDecl::Field(preview)],
    }));

    let lookup = Expr::Subscript {
        base: Box::new(Expr::self_ref()),
        arguments: vec![Argument::positional(Expr::type_value(key_name))],
    };
    let accessor = GeneratedProperty {
        visibility: Visibility::Internal,
        name: naming.key_accessor_name(&target),
        ty: interface,
        accessors: Accessors::Computed {
            get: vec![Stmt::Expr(lookup.clone())],
            set: Some(vec![Stmt::assign(lookup, Expr::reference("newValue"))]),
        },
    };

    debug!("#{} for '{}'", config.markers.abstraction_key, target);
    Ok(vec![GeneratedDecl::Type(key), GeneratedDecl::Property(accessor)])
}

/// `static var <name>: any T.AnyImpl = <constructor>(<args>)`
fn slot(name: &str, ty: TypeRef, constructor: Expr, args: Vec<&Expr>) -> GeneratedField {
    let arguments = args.into_iter().cloned().map(Argument::positional).collect();
    GeneratedField {
        is_static: true,
        initializer: Some(Expr::call(constructor, arguments)),
        ..GeneratedField::new(name, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmgen_core::builder::freestanding;

    fn site(arguments: Vec<Argument>) -> FreestandingDecl {
        freestanding("GenerateKeyForImpl", arguments)
    }

    fn key_site() -> FreestandingDecl {
        site(vec![
            Argument::labeled("for", Expr::type_value("Service")),
            Argument::labeled("liveArgs", Expr::string("prod")),
            Argument::positional(Expr::integer("3")),
            Argument::labeled("testableArgs", Expr::reference("mock")),
        ])
    }

    fn field<'a>(decl: &'a GeneratedDecl) -> &'a GeneratedField {
        match decl {
            GeneratedDecl::Field(field) => field,
            other => panic!("Expected field, got {:?}", other),
        }
    }

    #[test]
    fn test_key_enumeration() {
        let output = generate(&key_site(), &GeneratorConfig::default()).unwrap();
        assert_eq!(output.len(), 2);

        let key = output[0].as_type().unwrap();
        assert_eq!(key.name, "ServiceKey");
        assert_eq!(key.kind, TypeKind::Enum);
        assert_eq!(key.conformances, ["DependencyKey"]);

        let live = field(&key.members[0]);
        assert!(live.is_static);
        assert_eq!(live.name, "liveValue");
        assert_eq!(live.ty.to_string(), "any Service.AnyImpl");
        assert_eq!(
            live.initializer,
            Some(Expr::call(
                Expr::reference("Service"),
                vec![
                    Argument::positional(Expr::string("prod")),
                    Argument::positional(Expr::integer("3")),
                ],
            ))
        );

        match &key.members[1] {
            GeneratedDecl::Conditional(block) => {
                assert_eq!(block.condition, "DEBUG");
                let preview = field(&block.body[0]);
                assert_eq!(preview.name, "previewValue");
                assert_eq!(
                    preview.initializer,
                    Some(Expr::call(
                        Expr::reference("Service.TestableService"),
                        vec![Argument::positional(Expr::reference("mock"))],
                    ))
                );
            }
            other => panic!("Expected conditional preview slot, got {:?}", other),
        }
    }

    #[test]
    fn test_global_accessor() {
        let output = generate(&key_site(), &GeneratorConfig::default()).unwrap();
        let accessor = output[1].as_property().unwrap();
        assert_eq!(accessor.name, "service");
        assert_eq!(accessor.ty.to_string(), "any Service.AnyImpl");
        match &accessor.accessors {
            Accessors::Computed { get, set } => {
                assert_eq!(get.len(), 1);
                assert!(set.is_some());
            }
            other => panic!("Expected computed accessors, got {:?}", other),
        }
    }

    #[test]
    fn test_no_construction_arguments() {
        let output = generate(
            &site(vec![Argument::labeled("for", Expr::type_value("Clock"))]),
            &GeneratorConfig::default(),
        )
        .unwrap();
        let key = output[0].as_type().unwrap();
        assert_eq!(
            field(&key.members[0]).initializer,
            Some(Expr::call(Expr::reference("Clock"), vec![]))
        );
    }

    #[test]
    fn test_follows_naming_policy() {
        let mut config = GeneratorConfig::default();
        config.naming.interface_name = "Contract".to_string();
        config.naming.test_double_prefix = "Fake".to_string();

        let output = generate(&key_site(), &config).unwrap();
        let key = output[0].as_type().unwrap();
        assert_eq!(field(&key.members[0]).ty.to_string(), "any Service.Contract");
        match &key.members[1] {
            GeneratedDecl::Conditional(block) => assert_eq!(
                field(&block.body[0]).initializer,
                Some(Expr::call(
                    Expr::reference("Service.FakeService"),
                    vec![Argument::positional(Expr::reference("mock"))],
                ))
            ),
            other => panic!("Expected conditional preview slot, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_type_argument() {
        let missing = site(vec![Argument::labeled("liveArgs", Expr::nil())]);
        assert!(matches!(
            generate(&missing, &GeneratorConfig::default()),
            Err(GenerateError::MissingRequiredArgument { ref argument, .. }) if argument == "for"
        ));

        let malformed = site(vec![Argument::labeled("for", Expr::reference("Service"))]);
        assert!(generate(&malformed, &GeneratorConfig::default()).is_err());
    }
}
