//! AST visitor for TypeScript exports
//!
//! Walks a module's top-level statements, discovers exported functions and
//! builds one signature record per public name.

pub mod exports;
pub mod helpers;
pub mod signature;

pub use exports::discover_signatures;
pub use signature::build_signature;
