//! Validators for markers that only annotate members of a bindings host.
//!
//! They emit nothing; a failure is reported at the annotated member.

use vmgen_attrs::{path_type_pair, ArgumentList};
use vmgen_core::{Attribute, Decl, GenerateError, GeneratorConfig, NodeRef, Result};

use super::{bindings::has_source_shape, wrong_host};
use crate::infer;

/// Binding target: a field with a determinable type whose first argument,
/// if any, is a `(path, type)` tuple with an explicit root, as in `\Model.count`.
pub fn validate_bind_target(
    attribute: &Attribute,
    host: &Decl,
    config: &GeneratorConfig,
) -> Result<()> {
    let field = match host {
        Decl::Field(field) => field,
        _ => return Err(wrong_host(&config.markers.bind_target, "variable declarations", host)),
    };

    let args = ArgumentList::of(attribute);
    if args.is_empty() {
        return Ok(());
    }

    if infer::declared_type_name(field).is_none() {
        return Err(GenerateError::UnsupportedType {
            expected: "a determinable type".to_string(),
            node: NodeRef::of(host),
        });
    }

    match args.first().and_then(|arg| path_type_pair(&arg.value)) {
        Some(pair) if pair.path.root.is_some() => Ok(()),
        _ => Err(GenerateError::ExtractFailure {
            what: "a (key path, type) pair".to_string(),
            node: NodeRef::of(host),
        }),
    }
}

/// Binding source: a function with one parameter, no return type and no effects.
pub fn validate_bind_source(
    _attribute: &Attribute,
    host: &Decl,
    config: &GeneratorConfig,
) -> Result<()> {
    let function = match host {
        Decl::Function(function) => function,
        _ => return Err(wrong_host(&config.markers.bind_source, "functions", host)),
    };

    if function.return_type.is_some() || !function.effects.is_empty() {
        return Err(GenerateError::InvalidSignature {
            reason: "binding setters cannot return a value or be async, throws or rethrows"
                .to_string(),
            node: NodeRef::of(host),
        });
    }
    if !has_source_shape(function) {
        return Err(GenerateError::InvalidSignature {
            reason: "binding setters take exactly one parameter carrying the new value"
                .to_string(),
            node: NodeRef::of(host),
        });
    }

    Ok(())
}
