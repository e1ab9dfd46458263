use super::extract::{collect_signatures, open_output, ExtractConfig};
use crate::config::validate_namespace;
use crate::io::output::OutputWriter;
use crate::io::writers::DeclarationWriter;
use anyhow::Result;

pub fn handle_emit(settings: ExtractConfig, namespace: Option<String>) -> Result<()> {
    let mut options = settings.config.emit_options();
    if let Some(namespace) = namespace {
        validate_namespace(&namespace)?;
        options.namespace = namespace;
    }

    let results = collect_signatures(&settings.path, &settings.config, &settings.parallel)?;

    let mut writer = DeclarationWriter::new(open_output(settings.output.as_deref())?, options);
    writer.write_modules(&results)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeclmapConfig, ParallelConfig};
    use std::fs;
    use tempfile::TempDir;

    fn settings(dir: &TempDir) -> ExtractConfig {
        ExtractConfig {
            path: dir.path().to_path_buf(),
            output: Some(dir.path().join("out.d.ts")),
            config: DeclmapConfig::default(),
            parallel: ParallelConfig::sequential(),
        }
    }

    #[test]
    fn test_handle_emit_uses_namespace_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("todos.ts"), "export function list() {}").unwrap();

        handle_emit(settings(&dir), Some("Rpc".to_string())).unwrap();

        let document = fs::read_to_string(dir.path().join("out.d.ts")).unwrap();
        assert!(document.contains("declare module \"todos.ts\" {"));
        assert!(document.contains("  namespace Rpc {"));
        assert!(document.contains("    namespace Todos {"));
    }

    #[test]
    fn test_handle_emit_rejects_bad_namespace() {
        let dir = TempDir::new().unwrap();
        assert!(handle_emit(settings(&dir), Some("not valid".to_string())).is_err());
    }
}
