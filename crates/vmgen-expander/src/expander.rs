//! Site dispatch and whole-tree expansion.
//!
//! Every annotation site is expanded independently: a failing site
//! contributes one diagnostic and nothing else, while the output of every
//! other site is kept.

use log::debug;
use vmgen_core::{
    Attribute, Decl, Diagnostic, FreestandingDecl, GenerateError, GeneratedDecl, GeneratorConfig,
    Node, NodeRef, Result, SourceFile,
};

use crate::generators::{bindings, case_labels, key, mutators, peers, testable};
use crate::registry::{MarkerKind, MarkerRegistry};

/// One annotation site.
#[derive(Debug, Clone, Copy)]
pub enum Site<'a> {
    /// An attribute attached to a declaration.
    Attached {
        attribute: &'a Attribute,
        host: &'a Decl,
    },
    /// A file-scope expansion such as `#GenerateKeyForImpl(...)`.
    Freestanding(&'a FreestandingDecl),
}

impl<'a> Site<'a> {
    /// Marker name of the site.
    pub fn marker(&self) -> &'a str {
        match *self {
            Site::Attached { attribute, .. } => &attribute.name,
            Site::Freestanding(site) => &site.name,
        }
    }

    /// The declaration diagnostics point at.
    pub fn node(&self) -> NodeRef {
        match *self {
            Site::Attached { host, .. } => NodeRef::of(host),
            Site::Freestanding(site) => NodeRef::named(site.name.clone(), site.span),
        }
    }
}

/// Output of one successfully expanded site.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub marker: String,
    pub host: NodeRef,
    pub declarations: Vec<GeneratedDecl>,
}

/// Result of expanding a whole source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionReport {
    /// Successful sites in tree order.
    pub expansions: Vec<Expansion>,
    /// One diagnostic per failed site, in tree order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ExpansionReport {
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Total number of top-level generated declarations.
    pub fn declaration_count(&self) -> usize {
        self.expansions.iter().map(|e| e.declarations.len()).sum()
    }

    /// Generated declarations of every site, in tree order.
    pub fn declarations(&self) -> impl Iterator<Item = &GeneratedDecl> {
        self.expansions.iter().flat_map(|e| e.declarations.iter())
    }
}

/// Dispatches annotation sites to generators.
#[derive(Debug, Clone)]
pub struct Expander {
    config: GeneratorConfig,
    registry: MarkerRegistry,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Expander {
    /// Expander recognizing the configured marker names.
    pub fn new(config: GeneratorConfig) -> Self {
        let registry = MarkerRegistry::from_names(&config.markers);
        Self { config, registry }
    }

    pub fn with_registry(config: GeneratorConfig, registry: MarkerRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    /// Run the generator registered for the site's marker.
    ///
    /// Sites with an unregistered marker produce nothing.
    pub fn expand_site(&self, site: Site<'_>) -> Result<Vec<GeneratedDecl>> {
        let Some(kind) = self.registry.get(site.marker()) else {
            return Ok(Vec::new());
        };
        let config = &self.config;

        match (kind, site) {
            (MarkerKind::AbstractionKey, Site::Freestanding(decl)) => key::generate(decl, config),
            (MarkerKind::AbstractionKey, Site::Attached { .. }) | (_, Site::Freestanding(_)) => {
                Err(misplaced(kind, site))
            }
            (MarkerKind::CaseLabels, Site::Attached { host, .. }) => {
                case_labels::generate(host, config)
            }
            (MarkerKind::Mutators, Site::Attached { attribute, host }) => {
                mutators::generate(attribute, host, config)
            }
            (MarkerKind::Bindings, Site::Attached { attribute, host }) => {
                bindings::generate(attribute, host, config)
            }
            (MarkerKind::BindTarget, Site::Attached { attribute, host }) => {
                peers::validate_bind_target(attribute, host, config).map(|()| Vec::new())
            }
            (MarkerKind::BindSource, Site::Attached { attribute, host }) => {
                peers::validate_bind_source(attribute, host, config).map(|()| Vec::new())
            }
            (MarkerKind::Testable, Site::Attached { host, .. }) => testable::generate(host, config),
            (MarkerKind::Ignore, Site::Attached { .. }) => Ok(Vec::new()),
        }
    }

    /// Expand every site of a file, nested types included.
    pub fn expand_file(&self, file: &SourceFile) -> ExpansionReport {
        let mut report = ExpansionReport::default();
        for decl in &file.declarations {
            self.expand_decl(decl, &mut report);
        }

        debug!(
            "expanded file: {} sites, {} declarations, {} diagnostics",
            report.expansions.len(),
            report.declaration_count(),
            report.diagnostics.len()
        );
        report
    }

    fn expand_decl(&self, decl: &Decl, report: &mut ExpansionReport) {
        match decl {
            Decl::Freestanding(site) => self.record(Site::Freestanding(site), report),
            _ => {
                for attribute in decl.attributes() {
                    self.record(Site::Attached { attribute, host: decl }, report);
                }
            }
        }

        for child in decl.children() {
            self.expand_decl(child, report);
        }
    }

    fn record(&self, site: Site<'_>, report: &mut ExpansionReport) {
        if !self.registry.contains(site.marker()) {
            return;
        }

        match self.expand_site(site) {
            Ok(declarations) => report.expansions.push(Expansion {
                marker: site.marker().to_string(),
                host: site.node(),
                declarations,
            }),
            Err(err) => {
                debug!("@{} failed: {}", site.marker(), err);
                report.diagnostics.push(err.to_diagnostic());
            }
        }
    }
}

/// A marker used in the wrong site form.
fn misplaced(kind: MarkerKind, site: Site<'_>) -> GenerateError {
    let expected = if kind.is_freestanding() {
        "file-scope expansions"
    } else {
        "declarations"
    };
    let found = match site {
        Site::Attached { host, .. } => host.kind().describe(),
        Site::Freestanding(_) => "freestanding expansion",
    };
    GenerateError::WrongHostKind {
        marker: site.marker().to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
        node: site.node(),
    }
}
