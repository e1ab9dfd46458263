// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;

// Re-export commonly used types
pub use crate::analyzers::batch::{discover_modules, extract_all, ModuleSource};
pub use crate::analyzers::typescript::{
    extract_module, extract_signatures, ExtractionWarning, FunctionSignature, ModuleSignatures,
    Parameter, SignatureKind, TypeText,
};
pub use crate::config::{load_config, DeclmapConfig, ParallelConfig};
pub use crate::core::{Error, Result};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::writers::declarations::{render_declarations, EmitOptions};
