pub mod ast;
pub mod errors;

pub use ast::{JsLanguageVariant, TypeScriptAst};
pub use errors::{Error, Result};
