//! Configured expansion plus rendering.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vmgen_core::{GeneratedDecl, GeneratorConfig, Result as GenerateResult, SourceFile};
use vmgen_expander::{Expander, ExpansionReport, Site};
use vmgen_render::{render, RenderOptions};

/// Errors raised by the engine itself, as opposed to per-site diagnostics.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Complete engine configuration.
///
/// Every section is optional in JSON; missing values keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub render: RenderOptions,
}

/// Rendered output of a whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSource {
    pub report: ExpansionReport,
    /// Generated declarations of every successful site, in tree order.
    pub source: String,
}

/// Expands annotation sites and renders the result.
#[derive(Debug, Clone)]
pub struct Engine {
    expander: Expander,
    render: RenderOptions,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            expander: Expander::new(config.generator),
            render: config.render,
        }
    }

    /// Build an engine from a JSON document such as
    /// `{ "generator": { "naming": { "interface_name": "Contract" } }, "render": { "indent_width": 2 } }`.
    pub fn from_json_config(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        debug!("loaded engine configuration: {:?}", config);
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.expander.config()
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render
    }

    /// Expand one site.
    pub fn expand_site(&self, site: Site<'_>) -> GenerateResult<Vec<GeneratedDecl>> {
        self.expander.expand_site(site)
    }

    /// Expand every site of a file.
    pub fn expand_file(&self, file: &SourceFile) -> ExpansionReport {
        self.expander.expand_file(file)
    }

    /// Render declarations with the configured options.
    pub fn render(&self, decls: &[GeneratedDecl]) -> String {
        render(decls, &self.render)
    }

    /// Expand a file and render everything it generated.
    pub fn generate(&self, file: &SourceFile) -> GeneratedSource {
        let report = self.expand_file(file);
        let decls: Vec<GeneratedDecl> = report.declarations().cloned().collect();
        let source = self.render(&decls);

        info!(
            "generated {} declarations from {} sites ({} failed)",
            decls.len(),
            report.expansions.len(),
            report.diagnostics.len()
        );
        GeneratedSource { report, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_config() {
        let engine = Engine::from_json_config(
            r#"{ "generator": { "naming": { "interface_name": "Contract" } } }"#,
        )
        .unwrap();
        assert_eq!(engine.config().naming.interface_name, "Contract");
        assert_eq!(engine.config().naming.test_double_prefix, "Testable");
        assert_eq!(engine.config().markers.case_labels, "EnumCaseLabels");
        assert_eq!(engine.render_options().indent_width, 4);
    }

    #[test]
    fn test_empty_json_config() {
        let engine = Engine::from_json_config("{}").unwrap();
        assert_eq!(engine.config(), &GeneratorConfig::default());
    }

    #[test]
    fn test_invalid_json_config() {
        let err = Engine::from_json_config(r#"{ "render": { "indent_width": "wide" } }"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
        assert!(Engine::from_json_config("not json").is_err());
    }
}
