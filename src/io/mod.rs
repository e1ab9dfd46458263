pub mod output;
pub mod walker;
pub mod writers;

pub use output::{create_writer, OutputFormat, OutputWriter};
pub use walker::{module_id, FileWalker};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
