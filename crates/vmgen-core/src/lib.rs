//! Core types for the vmgen declaration-synthesis engine.
//!
//! This crate provides the foundational types shared by every other vmgen crate:
//! - Declaration tree types handed over by the host parser
//! - Type references and their textual syntax
//! - The generated-declaration model returned to the host
//! - Error taxonomy and diagnostics
//! - The naming policy and configuration shared by all generators

pub mod ast;
pub mod builder;
pub mod config;
pub mod errors;
pub mod generated;
pub mod naming;
pub mod type_syntax;
pub mod types;

pub use ast::*;
pub use config::*;
pub use errors::*;
pub use generated::*;
pub use naming::*;
pub use types::*;
