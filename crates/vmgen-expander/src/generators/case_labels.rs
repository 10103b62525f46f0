//! Mirrors an enumeration's case names into a nested label enumeration.

use log::debug;
use vmgen_core::{
    Decl, Expr, GeneratedDecl, GeneratedInitializer, GeneratedType, GeneratorConfig, Parameter,
    Result, Stmt, SwitchArm, TypeKind, TypeRef, Visibility,
};

use super::wrong_host;

/// Emit `enum CaseLabels` with one case per source case and `init(parent:)`.
///
/// Payload-carrying cases are mirrored by name only.
pub fn generate(host: &Decl, config: &GeneratorConfig) -> Result<Vec<GeneratedDecl>> {
    let decl = match host {
        Decl::Type(decl) if decl.kind == TypeKind::Enum => decl,
        _ => return Err(wrong_host(&config.markers.case_labels, "enumerations", host)),
    };

    let names: Vec<&str> = decl.enum_cases().map(|case| case.name.as_str()).collect();

    let mut labels = GeneratedType::new(TypeKind::Enum, config.naming.case_labels_name.clone());
    labels
        .members
        .extend(names.iter().map(|name| GeneratedDecl::Case(name.to_string())));

    let arms = names
        .iter()
        .map(|name| SwitchArm {
            pattern: Expr::implicit_member(*name),
            body: vec![Stmt::assign(Expr::self_ref(), Expr::implicit_member(*name))],
        })
        .collect();

    labels.members.push(GeneratedDecl::Initializer(GeneratedInitializer {
        visibility: Visibility::Internal,
        params: vec![Parameter::labeled("parent", TypeRef::named(decl.name.clone()))],
        body: vec![Stmt::Switch {
            subject: Expr::reference("parent"),
            arms,
        }],
    }));

    debug!(
        "@{} on '{}': {} labels",
        config.markers.case_labels,
        decl.name,
        names.len()
    );
    Ok(vec![GeneratedDecl::Type(labels)])
}
