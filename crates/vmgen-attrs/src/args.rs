//! Argument lists of attributes and freestanding sites.

use vmgen_core::ast::{Argument, Attribute, Expr};

use crate::shapes::{self, PathTypePair};

/// Read-only view over an ordered argument list.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentList<'a> {
    args: &'a [Argument],
}

impl<'a> ArgumentList<'a> {
    pub fn new(args: &'a [Argument]) -> Self {
        Self { args }
    }

    /// Arguments of an attribute.
    pub fn of(attribute: &'a Attribute) -> Self {
        Self::new(&attribute.arguments)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn first(&self) -> Option<&'a Argument> {
        self.args.first()
    }

    /// Value of the first argument carrying `label`.
    pub fn labeled(&self, label: &str) -> Option<&'a Expr> {
        self.args
            .iter()
            .find(|arg| arg.label.as_deref() == Some(label))
            .map(|arg| &arg.value)
    }

    /// Value of the first unlabeled argument.
    pub fn first_positional(&self) -> Option<&'a Expr> {
        self.args
            .iter()
            .find(|arg| arg.label.is_none())
            .map(|arg| &arg.value)
    }

    /// Boolean literal under `label`.
    pub fn flag(&self, label: &str) -> Option<bool> {
        self.labeled(label).and_then(shapes::bool_literal)
    }

    /// String literal under `label`.
    pub fn string(&self, label: &str) -> Option<&'a str> {
        self.labeled(label).and_then(shapes::string_literal)
    }

    /// Type name of a `Type.self` argument under `label`.
    pub fn type_ref(&self, label: &str) -> Option<String> {
        self.labeled(label).and_then(shapes::type_reference)
    }

    /// Every argument read as a `(path, type)` tuple.
    ///
    /// Labels are ignored, so `for: (\A.x, Int.self), (\.y, Float.self)`
    /// yields two pairs. A single malformed argument yields `None`.
    pub fn path_type_pairs(&self) -> Option<Vec<PathTypePair>> {
        self.args
            .iter()
            .map(|arg| shapes::path_type_pair(&arg.value))
            .collect()
    }

    /// The argument under `label` followed by the unlabeled arguments after it.
    ///
    /// `liveArgs: a, b, testableArgs: c` gives `[a, b]` for `liveArgs`.
    /// Empty when the label is absent.
    pub fn labeled_run(&self, label: &str) -> Vec<&'a Expr> {
        let Some(start) = self
            .args
            .iter()
            .position(|arg| arg.label.as_deref() == Some(label))
        else {
            return Vec::new();
        };

        let mut run = vec![&self.args[start].value];
        run.extend(
            self.args[start + 1..]
                .iter()
                .take_while(|arg| arg.label.is_none())
                .map(|arg| &arg.value),
        );
        run
    }
}
