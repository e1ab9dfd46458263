//! Configuration loading from `.declmap.toml`

mod core;
mod loader;
mod parallel;

pub use self::core::{DeclmapConfig, EmitConfig, FilesConfig, DEFAULT_EXTENSIONS};
pub use loader::{
    apply_env_overrides, directory_ancestors, find_config, load_config, parse_config,
    try_load_config_from_path, validate_namespace, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE,
    NAMESPACE_ENV_VAR,
};
pub use parallel::ParallelConfig;
