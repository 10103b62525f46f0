//! Two-way accessor synthesis for class hosts.
//!
//! Runs four passes over the host's members:
//! 1. collect binding targets (fields carrying the target marker),
//! 2. collect binding sources (single-parameter setter functions),
//! 3. resolve each source against the first target still exposing its
//!    property, emitting a function-backed accessor,
//! 4. optionally emit direct accessors for every property left unclaimed.
//!
//! A source that matches no target is dropped without a diagnostic.

use indexmap::IndexMap;
use log::{debug, trace};
use vmgen_attrs::{path_expression, ArgumentList};
use vmgen_core::{
    Accessors, Argument, Attribute, Decl, Expr, FieldDecl, FunctionDecl, GenerateError,
    GeneratedDecl, GeneratedProperty, GeneratorConfig, NodeRef, PathExpr, Result, Stmt,
    TypeDecl, TypeKind, TypeRef, Visibility,
};

use super::wrong_host;
use crate::infer;

const FLAG_ARG: &str = "makeNonFunctionBindings";

/// A field whose nested properties can be bound.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingTarget {
    /// Name of the owning field.
    pub field: String,
    /// Declared type of the owning field.
    pub type_name: String,
    /// Unclaimed properties and their types, in listed order.
    pub pool: IndexMap<String, String>,
}

/// A setter function routing binding writes.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingSource {
    pub function: String,
    pub target_type: String,
    pub property: String,
    /// External label of the single parameter; `None` for `_`.
    pub label: Option<String>,
    pub value_type: TypeRef,
}

pub fn generate(
    attribute: &Attribute,
    host: &Decl,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedDecl>> {
    let decl = match host {
        Decl::Type(decl) if decl.kind == TypeKind::Class => decl,
        _ => return Err(wrong_host(&config.markers.bindings, "classes", host)),
    };

    let make_direct = ArgumentList::of(attribute).flag(FLAG_ARG).unwrap_or(true);

    let mut targets = collect_targets(decl, config)?;
    let sources = collect_sources(decl, config)?;

    let mut output = resolve(&mut targets, &sources, config);
    if make_direct {
        output.extend(direct_bindings(&targets, config));
    }

    debug!(
        "@{} on '{}': {} targets, {} sources, {} accessors",
        config.markers.bindings,
        decl.name,
        targets.len(),
        sources.len(),
        output.len()
    );
    Ok(output)
}

/// Pass 1.
fn collect_targets(decl: &TypeDecl, config: &GeneratorConfig) -> Result<Vec<BindingTarget>> {
    let marker = &config.markers.bind_target;
    let mut targets = Vec::new();

    for member in &decl.members {
        let Decl::Field(field) = member else { continue };
        let Some(attribute) = field.attributes.iter().find(|a| &a.name == marker) else {
            continue;
        };
        let (Some(name), Some(type_name)) = (field.name(), infer::declared_type_name(field))
        else {
            trace!("skipping binding target without a name or determinable type");
            continue;
        };

        let pairs = ArgumentList::of(attribute)
            .path_type_pairs()
            .filter(|pairs| !pairs.is_empty())
            .ok_or_else(|| extract_failure("bindable properties", field_node(field, name)))?;

        // A property listed twice keeps its first position and type.
        let mut pool = IndexMap::new();
        for pair in pairs {
            if pool.contains_key(&pair.path.property) {
                trace!("'{}' lists '{}' more than once", name, pair.path.property);
                continue;
            }
            pool.insert(pair.path.property, pair.ty);
        }

        targets.push(BindingTarget {
            field: name.to_string(),
            type_name,
            pool,
        });
    }

    Ok(targets)
}

/// Pass 2.
fn collect_sources(decl: &TypeDecl, config: &GeneratorConfig) -> Result<Vec<BindingSource>> {
    let marker = &config.markers.bind_source;
    let mut sources = Vec::new();

    for member in &decl.members {
        let Decl::Function(function) = member else { continue };
        let Some(attribute) = function.attributes.iter().find(|a| &a.name == marker) else {
            continue;
        };
        if !has_source_shape(function) {
            trace!("skipping '{}': not a single-parameter setter", function.name);
            continue;
        }

        let source = make_source(function, attribute).ok_or_else(|| {
            extract_failure(
                "binding source information",
                NodeRef::named(function.name.clone(), function.span),
            )
        })?;
        sources.push(source);
    }

    Ok(sources)
}

/// One parameter, no return type, no effects.
pub(crate) fn has_source_shape(function: &FunctionDecl) -> bool {
    function.params.len() == 1 && function.return_type.is_none() && function.effects.is_empty()
}

fn make_source(function: &FunctionDecl, attribute: &Attribute) -> Option<BindingSource> {
    let param = function.params.first()?;
    if param.ty.is_inout() || param.ty.is_function() {
        return None;
    }

    let path = ArgumentList::of(attribute)
        .first()
        .and_then(|arg| path_expression(&arg.value))?;

    Some(BindingSource {
        function: function.name.clone(),
        target_type: path.root?,
        property: path.property,
        label: param.label.clone(),
        value_type: param.ty.clone(),
    })
}

/// Pass 3.
fn resolve(
    targets: &mut [BindingTarget],
    sources: &[BindingSource],
    config: &GeneratorConfig,
) -> Vec<GeneratedDecl> {
    let mut output = Vec::new();

    for source in sources {
        let target = targets.iter_mut().find(|target| {
            target.type_name == source.target_type && target.pool.contains_key(&source.property)
        });
        let Some(target) = target else {
            trace!(
                "dropping binding source '{}': no target of type '{}' exposes '{}'",
                source.function,
                source.target_type,
                source.property
            );
            continue;
        };

        trace!(
            "binding '{}.{}' through '{}'",
            target.field,
            source.property,
            source.function
        );

        let write = Expr::call(
            Expr::self_member(source.function.clone()),
            vec![Argument::new(source.label.as_deref(), Expr::reference("newValue"))],
        );
        output.push(accessor(
            config,
            &target.field,
            &source.property,
            source.value_type.clone(),
            vec![Stmt::Expr(write)],
        ));

        target.pool.shift_remove(&source.property);
    }

    output
}

/// Pass 4.
fn direct_bindings(targets: &[BindingTarget], config: &GeneratorConfig) -> Vec<GeneratedDecl> {
    targets
        .iter()
        .flat_map(|target| {
            target.pool.iter().map(move |(property, ty)| {
                let write = Stmt::assign(key_path_read(&target.field, property), Expr::reference("newValue"));
                accessor(config, &target.field, property, TypeRef::named(ty.clone()), vec![write])
            })
        })
        .collect()
}

fn accessor(
    config: &GeneratorConfig,
    field: &str,
    property: &str,
    value_type: TypeRef,
    set: Vec<Stmt>,
) -> GeneratedDecl {
    GeneratedDecl::Property(GeneratedProperty {
        visibility: Visibility::Internal,
        name: config.naming.binding_name(field, property),
        ty: TypeRef::generic("Binding", vec![value_type]),
        accessors: Accessors::Binding {
            get: key_path_read(field, property),
            set,
        },
    })
}

/// `self[keyPath: \.field.property]`
fn key_path_read(field: &str, property: &str) -> Expr {
    Expr::Subscript {
        base: Box::new(Expr::self_ref()),
        arguments: vec![Argument::labeled(
            "keyPath",
            Expr::Path(PathExpr::new(None, [field, property])),
        )],
    }
}

fn field_node(field: &FieldDecl, name: &str) -> NodeRef {
    NodeRef::named(name, field.span)
}

fn extract_failure(what: &str, node: NodeRef) -> GenerateError {
    GenerateError::ExtractFailure {
        what: what.to_string(),
        node,
    }
}
