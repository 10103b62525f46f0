//! Attribute argument extraction.
//!
//! Every extractor returns `None` when an argument does not have the
//! expected shape. Whether absence is an error is up to the caller.

mod args;
mod shapes;

pub use args::ArgumentList;
pub use shapes::{
    bool_literal, path_expression, path_type_pair, qualified_name, string_literal,
    type_reference, PathRef, PathTypePair,
};
