//! Parallelism configuration for batch extraction.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Configuration for parallel processing operations.
///
/// When enabled, modules are extracted concurrently on rayon's thread pool.
///
/// # Example
///
/// ```rust
/// use declmap::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     jobs: Some(4),
/// };
/// assert_eq!(config.jobs, Some(4));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Worker threads; `None` or `0` uses all available cores
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            jobs: None,
        }
    }
}

impl ParallelConfig {
    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            jobs: None,
        }
    }

    /// Parallel processing is only worth it for more than one module
    pub fn should_parallelize(&self, module_count: usize) -> bool {
        self.enabled && module_count > 1
    }
}
