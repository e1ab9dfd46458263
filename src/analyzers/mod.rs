//! Source analyzers
//!
//! `typescript` holds the extraction engine; `batch` runs it over many modules.

pub mod batch;
pub mod typescript;

pub use batch::{discover_modules, extract_all, ModuleSource};
