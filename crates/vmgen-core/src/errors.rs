//! Error types and diagnostics.

use crate::ast::{Node, Span};
use thiserror::Error;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// The declaration a diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef {
    pub name: Option<String>,
    pub span: Span,
}

impl NodeRef {
    pub fn of(node: &impl Node) -> Self {
        Self {
            name: node.name().map(str::to_string),
            span: node.span(),
        }
    }

    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self { name: Some(name.into()), span }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
}

/// A `(message, node, severity)` triple handed to the host's reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub message: String,
    pub node: NodeRef,
    pub severity: Severity,
}

/// Errors raised while synthesizing declarations for one annotation site.
///
/// Every variant is fatal for its site only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("@{marker} can only be attached to {expected}, found {found} '{}'", .node.display_name())]
    WrongHostKind {
        marker: String,
        expected: String,
        found: String,
        node: NodeRef,
    },

    #[error("Missing required argument '{argument}' for @{marker}")]
    MissingRequiredArgument {
        marker: String,
        argument: String,
        node: NodeRef,
    },

    #[error("@{marker} cannot be used on immutable variable '{}'", .node.display_name())]
    ImmutableField { marker: String, node: NodeRef },

    #[error("Variable declaration must bind exactly one plain name for @{marker}")]
    AmbiguousBinding { marker: String, node: NodeRef },

    #[error("Unsupported type for '{}': expected {expected}", .node.display_name())]
    UnsupportedType { expected: String, node: NodeRef },

    #[error("@{marker} cannot be used with private declaration '{}'", .node.display_name())]
    PrivateHost { marker: String, node: NodeRef },

    #[error("Failed to extract {what} from '{}'", .node.display_name())]
    ExtractFailure { what: String, node: NodeRef },

    #[error("Invalid signature of '{}': {reason}", .node.display_name())]
    InvalidSignature { reason: String, node: NodeRef },
}

impl GenerateError {
    /// The offending declaration.
    pub fn node(&self) -> &NodeRef {
        match self {
            GenerateError::WrongHostKind { node, .. }
            | GenerateError::MissingRequiredArgument { node, .. }
            | GenerateError::ImmutableField { node, .. }
            | GenerateError::AmbiguousBinding { node, .. }
            | GenerateError::UnsupportedType { node, .. }
            | GenerateError::PrivateHost { node, .. }
            | GenerateError::ExtractFailure { node, .. }
            | GenerateError::InvalidSignature { node, .. } => node,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            message: self.to_string(),
            node: self.node().clone(),
            severity: Severity::Error,
        }
    }
}

/// A type spelling that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid type syntax '{input}': {reason}")]
pub struct TypeSyntaxError {
    pub input: String,
    pub reason: String,
}
