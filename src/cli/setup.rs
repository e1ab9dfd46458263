//! Setup and initialization functions for CLI
//!
//! Thread pool configuration and logging setup.

use crate::config::{DeclmapConfig, ParallelConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Rayon thread stack size (8MB for deeply nested type annotations)
const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(RAYON_STACK_SIZE);

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        log::debug!("Thread pool already configured: {e}");
    }
}

/// Merge `--jobs` / `--no-parallel` into the `[parallel]` section
pub fn parallel_config(
    config: &DeclmapConfig,
    jobs: Option<usize>,
    no_parallel: bool,
) -> ParallelConfig {
    let mut parallel = config.parallel();
    if no_parallel {
        parallel.enabled = false;
    }
    if jobs.is_some() {
        parallel.jobs = jobs;
    }
    parallel
}
