//! Declaration synthesis for reactive view models.
//!
//! Hosts hand over an already-parsed [`SourceFile`]; the [`Engine`] expands
//! every annotation site in it and renders the generated declarations.
//!
//! ## Example
//!
//! ```
//! use vmgen::builder::{marker, TypeBuilder};
//! use vmgen::{Engine, SourceFile};
//!
//! let route = TypeBuilder::enumeration("Route")
//!     .attribute(marker("EnumCaseLabels"))
//!     .case("home")
//!     .case("settings");
//! let file = SourceFile { declarations: vec![route.into()] };
//!
//! let output = Engine::default().generate(&file);
//! assert!(output.report.is_success());
//! assert!(output.source.contains("enum CaseLabels"));
//! ```

mod engine;

pub use engine::{Engine, EngineConfig, EngineError, GeneratedSource};

pub use vmgen_core::type_syntax::parse_type;
pub use vmgen_core::*;
pub use vmgen_expander::{Expander, Expansion, ExpansionReport, MarkerKind, MarkerRegistry, Site};
pub use vmgen_render::{render, RenderOptions};
