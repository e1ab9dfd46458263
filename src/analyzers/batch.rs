//! Batch extraction over many modules.
//!
//! Extraction is pure per module, so modules are fanned out over rayon's
//! thread pool with no coordination. Results keep the input order.
//!
//! # Example
//!
//! ```rust
//! use declmap::analyzers::batch::{extract_all, ModuleSource};
//! use declmap::config::ParallelConfig;
//!
//! let modules = vec![
//!     ModuleSource::new("a.ts", "export function a() {}"),
//!     ModuleSource::new("b.ts", "export const b = async () => {};"),
//! ];
//! let results = extract_all(&modules, &ParallelConfig::default());
//!
//! assert_eq!(results[0].id, "a.ts");
//! assert!(results[1].signatures[0].is_async);
//! ```

use crate::analyzers::typescript::{extract_module, ModuleSignatures};
use crate::config::{DeclmapConfig, ParallelConfig};
use crate::core::errors::{Error, Result};
use crate::io::walker::{module_id, FileWalker};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// One module handed to the extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSource {
    /// Module identifier, usually the path relative to the project root
    pub id: String,
    pub source: String,
}

impl ModuleSource {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

/// Extract every module; output order equals input order
pub fn extract_all(modules: &[ModuleSource], config: &ParallelConfig) -> Vec<ModuleSignatures> {
    let start = Instant::now();

    let results: Vec<ModuleSignatures> = if config.should_parallelize(modules.len()) {
        modules
            .par_iter()
            .map(|module| extract_module(&module.id, &module.source))
            .collect()
    } else {
        modules
            .iter()
            .map(|module| extract_module(&module.id, &module.source))
            .collect()
    };

    let warning_count: usize = results.iter().map(|m| m.warnings.len()).sum();
    log::debug!(
        "Extracted {} modules ({} warnings) in {:.2}s",
        results.len(),
        warning_count,
        start.elapsed().as_secs_f64()
    );
    results
}

/// Collect and read the modules under `root` (a directory or a single file)
pub fn discover_modules(root: &Path, config: &DeclmapConfig) -> Result<Vec<ModuleSource>> {
    let paths = if root.is_file() {
        vec![root.to_path_buf()]
    } else {
        FileWalker::new(root.to_path_buf())
            .with_extensions(config.extensions())
            .with_ignore_patterns(&config.ignore_patterns())?
            .walk()?
    };
    log::debug!("Found {} modules under {}", paths.len(), root.display());

    paths
        .iter()
        .map(|path| {
            let source = std::fs::read_to_string(path)
                .map_err(|e| Error::file_system("Failed to read module", path, e))?;
            Ok(ModuleSource::new(module_id(root, path), source))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parallel_and_sequential_agree() {
        let modules: Vec<ModuleSource> = (0..16)
            .map(|i| {
                ModuleSource::new(
                    format!("m{i}.ts"),
                    format!("export function f{i}(x: number): number {{ return x; }}"),
                )
            })
            .collect();

        let parallel = extract_all(&modules, &ParallelConfig::default());
        let sequential = extract_all(&modules, &ParallelConfig::sequential());

        let ids: Vec<&str> = parallel.iter().map(|m| m.id.as_str()).collect();
        let expected: Vec<String> = (0..16).map(|i| format!("m{i}.ts")).collect();
        assert_eq!(ids, expected);
        for (a, b) in parallel.iter().zip(&sequential) {
            assert_eq!(a.signatures, b.signatures);
        }
    }

    #[test]
    fn test_malformed_module_does_not_stop_batch() {
        let modules = vec![
            ModuleSource::new("bad.ts", "export function (: {"),
            ModuleSource::new("good.ts", "export function ok() {}"),
        ];
        let results = extract_all(&modules, &ParallelConfig::default());

        assert!(results[0].signatures.is_empty());
        assert_eq!(results[1].signatures.len(), 1);
    }

    #[test]
    fn test_discover_modules_reads_sources() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        fs::write(dir.path().join("app/actions.ts"), "export function a() {}").unwrap();

        let modules = discover_modules(dir.path(), &DeclmapConfig::default()).unwrap();
        assert_eq!(modules, vec![ModuleSource::new("app/actions.ts", "export function a() {}")]);
    }

    #[test]
    fn test_discover_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("actions.ts");
        fs::write(&file, "export function a() {}").unwrap();

        let modules = discover_modules(&file, &DeclmapConfig::default()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].id, "actions.ts");
    }
}
