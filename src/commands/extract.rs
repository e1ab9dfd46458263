use crate::analyzers::batch::{discover_modules, extract_all};
use crate::analyzers::typescript::{ExtractionWarning, ModuleSignatures};
use crate::config::{DeclmapConfig, ParallelConfig};
use crate::io::output::{create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Settings shared by `extract` and `emit`
pub struct ExtractConfig {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub config: DeclmapConfig,
    pub parallel: ParallelConfig,
}

/// Discover, read and extract every module under `path`
pub fn collect_signatures(
    path: &Path,
    config: &DeclmapConfig,
    parallel: &ParallelConfig,
) -> Result<Vec<ModuleSignatures>> {
    let modules = discover_modules(path, config)
        .with_context(|| format!("Failed to collect modules under {}", path.display()))?;
    let results = extract_all(&modules, parallel);
    report_warnings(&results);
    Ok(results)
}

/// Parse failures are already logged during extraction
fn report_warnings(results: &[ModuleSignatures]) {
    for module in results {
        for warning in &module.warnings {
            match warning {
                ExtractionWarning::ParseFailure { .. } => {}
                _ => log::warn!("{}: {warning}", module.id),
            }
        }
    }
}

/// Stdout unless an output file is given
pub fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}

pub fn handle_extract(settings: ExtractConfig, format: OutputFormat) -> Result<()> {
    let results = collect_signatures(&settings.path, &settings.config, &settings.parallel)?;

    let mut writer = create_writer(format, open_output(settings.output.as_deref())?);
    writer.write_modules(&results)?;
    Ok(())
}
