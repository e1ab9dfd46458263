//! TypeScript exported-function signature extraction
//!
//! This module turns TypeScript (and TSX) source text into signature records
//! for every exported function:
//!
//! - Export discovery (declarations, arrow bindings, default exports, export lists)
//! - Parameter and signature building
//! - Canonical type expression serialization
//!
//! # Example
//!
//! ```
//! use declmap::analyzers::typescript::extract_signatures;
//!
//! let source = "export async function getTodos(): Promise<Todo[]> { return []; }";
//! let signatures = extract_signatures("app/actions.ts", source);
//!
//! assert_eq!(signatures[0].name, "getTodos");
//! assert!(signatures[0].is_async);
//! ```

pub mod orchestration;
pub mod parser;
pub mod type_expr;
pub mod types;
pub mod visitor;

// Re-export main types
pub use orchestration::{extract_module, extract_signatures};
pub use types::{
    ExtractionWarning, FunctionSignature, ModuleSignatures, Parameter, SignatureKind, TypeText,
};
