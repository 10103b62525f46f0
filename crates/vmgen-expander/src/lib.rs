//! Declaration generators for vmgen.
//!
//! This crate handles:
//! - Case-label mirroring for enumerations
//! - `show`/`hide` mutator pairs
//! - Binding synthesis for class hosts
//! - Testable abstractions and their dependency keys
//! - Dispatching annotation sites and expanding whole files

mod expander;
pub mod generators;
mod infer;
mod registry;

pub use expander::{Expander, Expansion, ExpansionReport, Site};
pub use generators::bindings::{BindingSource, BindingTarget};
pub use infer::{binding_type, declared_type_name};
pub use registry::{MarkerKind, MarkerRegistry};

use vmgen_core::{GeneratorConfig, SourceFile};

/// Expand every annotation site of a file with the given configuration.
pub fn expand(file: &SourceFile, config: &GeneratorConfig) -> ExpansionReport {
    Expander::new(config.clone()).expand_file(file)
}
