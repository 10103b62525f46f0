//! One module per generator.
//!
//! Each generator is a pure function of the annotated declaration, the
//! marker's arguments and the shared configuration.

pub mod bindings;
pub mod case_labels;
pub mod key;
pub mod mutators;
pub mod peers;
pub mod testable;

use vmgen_core::{Decl, GenerateError, Node, NodeRef};

pub(crate) fn wrong_host(marker: &str, expected: &str, host: &Decl) -> GenerateError {
    GenerateError::WrongHostKind {
        marker: marker.to_string(),
        expected: expected.to_string(),
        found: host.kind().describe().to_string(),
        node: NodeRef::of(host),
    }
}
