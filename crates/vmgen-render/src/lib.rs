//! Source rendering for generated declarations.
//!
//! Output is a pure function of the declaration list and the options: the
//! same input always renders to the same bytes.

mod expr;
mod writer;

pub use expr::{render_expr, render_params, render_stmt};

use vmgen_core::GeneratedDecl;
use writer::SwiftWriter;

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

/// Render a list of declarations, one after another.
pub fn render(decls: &[GeneratedDecl], options: &RenderOptions) -> String {
    let mut writer = SwiftWriter::new(options);
    writer.write_decls(decls);
    writer.finish()
}
