use std::fs;
use std::path::{Path, PathBuf};

use super::core::DeclmapConfig;
use crate::core::errors::{Error, Result};
use crate::io::writers::declarations::is_identifier;

pub const CONFIG_FILE_NAME: &str = ".declmap.toml";
pub const NAMESPACE_ENV_VAR: &str = "DECLMAP_NAMESPACE";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Written by `declmap init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# declmap configuration

[emit]
# Global namespace wrapping every module's declarations
namespace = "ServerActions"
indent = 2

[files]
extensions = ["ts", "tsx", "mts", "cts"]
# Glob patterns for paths to skip
ignore = []

[parallel]
enabled = true
# jobs = 4
"#;

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<DeclmapConfig> {
    let config = toml::from_str::<DeclmapConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

    if let Some(indent) = config.emit.as_ref().and_then(|emit| emit.indent) {
        if indent > 16 {
            return Err(Error::Configuration(format!(
                "emit.indent must be at most 16, got {indent}"
            )));
        }
    }
    if let Some(namespace) = config.emit.as_ref().and_then(|emit| emit.namespace.as_deref()) {
        validate_namespace(namespace)?;
    }

    Ok(config)
}

/// Namespaces are emitted verbatim, so they must be valid identifiers
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if is_identifier(namespace) {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "namespace `{namespace}` is not a valid identifier"
        )))
    }
}

/// Load a config file. A missing file is `Ok(None)`.
pub fn try_load_config_from_path(config_path: &Path) -> Result<Option<DeclmapConfig>> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::file_system(
                "Failed to read config file",
                config_path,
                e,
            ))
        }
    };

    let config = parse_config(&contents).map_err(|e| match e {
        Error::Configuration(message) => {
            Error::Configuration(format!("{}: {message}", config_path.display()))
        }
        other => other,
    })?;
    log::debug!("Loaded config from {}", config_path.display());
    Ok(Some(config))
}

/// Directory ancestors up to a depth limit, nearest first
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.declmap.toml`
pub fn find_config(start: &Path) -> Result<DeclmapConfig> {
    for dir in directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH) {
        if let Some(config) = try_load_config_from_path(&dir.join(CONFIG_FILE_NAME))? {
            return Ok(config);
        }
    }
    log::debug!(
        "No config found after checking {} directories. Using default config.",
        MAX_TRAVERSAL_DEPTH
    );
    Ok(DeclmapConfig::default())
}

/// Load configuration, apply environment overrides.
///
/// An explicit path must exist; otherwise the working directory and its
/// ancestors are searched and a missing file means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<DeclmapConfig> {
    let config = match explicit {
        Some(path) => try_load_config_from_path(path)?.ok_or_else(|| {
            Error::Configuration(format!("config file {} not found", path.display()))
        })?,
        None => {
            let current = std::env::current_dir()
                .map_err(|e| Error::file_system("Failed to get current directory", ".", e))?;
            find_config(&current)?
        }
    };

    apply_env_overrides(config, std::env::var(NAMESPACE_ENV_VAR).ok())
}

/// `DECLMAP_NAMESPACE` replaces `emit.namespace`
pub fn apply_env_overrides(
    mut config: DeclmapConfig,
    namespace: Option<String>,
) -> Result<DeclmapConfig> {
    if let Some(namespace) = namespace.filter(|ns| !ns.is_empty()) {
        validate_namespace(&namespace)?;
        log::debug!("{NAMESPACE_ENV_VAR} overrides emit.namespace with `{namespace}`");
        config.emit.get_or_insert_with(Default::default).namespace = Some(namespace);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_parses() {
        let config = parse_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.emit_options().namespace, "ServerActions");
        assert!(config.parallel().enabled);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let err = parse_config("[emit\nnamespace = 1").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_invalid_namespace_rejected() {
        assert!(parse_config("[emit]\nnamespace = \"Server Actions\"").is_err());
        assert!(validate_namespace("Actions_2").is_ok());
        assert!(validate_namespace("2Actions").is_err());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded = try_load_config_from_path(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_find_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[emit]\nnamespace = \"Rpc\"\n",
        )
        .unwrap();
        let nested = dir.path().join("app").join("actions");
        fs::create_dir_all(&nested).unwrap();

        let config = find_config(&nested).unwrap();
        assert_eq!(config.emit_options().namespace, "Rpc");
    }

    #[test]
    fn test_directory_ancestors_bounded() {
        let ancestors: Vec<PathBuf> =
            directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(ancestors, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_env_override() {
        let config = apply_env_overrides(DeclmapConfig::default(), Some("Api".to_string())).unwrap();
        assert_eq!(config.emit_options().namespace, "Api");

        let config = apply_env_overrides(DeclmapConfig::default(), None).unwrap();
        assert_eq!(config.emit_options().namespace, "ServerActions");

        assert!(apply_env_overrides(DeclmapConfig::default(), Some("a-b".to_string())).is_err());
    }
}
