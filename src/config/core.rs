use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use crate::io::writers::declarations::EmitOptions;

/// Root configuration structure for declmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DeclmapConfig {
    /// Declaration document settings
    #[serde(default)]
    pub emit: Option<EmitConfig>,

    /// Module discovery settings
    #[serde(default)]
    pub files: Option<FilesConfig>,

    /// Batch extraction parallelism
    #[serde(default)]
    pub parallel: Option<ParallelConfig>,
}

/// `[emit]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EmitConfig {
    /// Global namespace wrapping every module (default: `ServerActions`)
    #[serde(default)]
    pub namespace: Option<String>,

    /// Spaces per indentation level (default: 2)
    #[serde(default)]
    pub indent: Option<usize>,
}

/// `[files]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FilesConfig {
    /// File extensions to scan, without the dot
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Glob patterns for paths to skip
    #[serde(default)]
    pub ignore: Vec<String>,
}

pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

impl DeclmapConfig {
    pub fn emit_options(&self) -> EmitOptions {
        let defaults = EmitOptions::default();
        let emit = self.emit.clone().unwrap_or_default();
        EmitOptions {
            namespace: emit.namespace.unwrap_or(defaults.namespace),
            indent: emit.indent.unwrap_or(defaults.indent),
        }
    }

    pub fn extensions(&self) -> Vec<String> {
        self.files
            .as_ref()
            .and_then(|files| files.extensions.clone())
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
    }

    pub fn ignore_patterns(&self) -> Vec<String> {
        self.files
            .as_ref()
            .map(|files| files.ignore.clone())
            .unwrap_or_default()
    }

    pub fn parallel(&self) -> ParallelConfig {
        self.parallel.clone().unwrap_or_default()
    }
}
