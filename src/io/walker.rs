use crate::config::DEFAULT_EXTENSIONS;
use crate::core::errors::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};

/// Collects TypeScript modules under a root directory.
///
/// Hidden entries, `node_modules`, `.gitignore`d paths and declaration files
/// (`.d.ts`) are skipped. Ignore globs match the module id, i.e. the path
/// relative to the root with `/` separators.
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            ignore_patterns: vec![],
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = patterns
            .iter()
            .map(|pattern| glob::Pattern::new(pattern))
            .collect::<std::result::Result<_, _>>()?;
        Ok(self)
    }

    /// Matching files in a stable order
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| entry.file_name() != "node_modules")
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| Error::FileSystem {
                message: format!("Failed to walk {}: {e}", self.root.display()),
                path: Some(self.root.clone()),
                source: None,
            })?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().map(|name| name.to_string_lossy()) else {
            return false;
        };
        if is_declaration_file(&file_name) {
            return false;
        }

        let Some(ext) = path.extension().map(|ext| ext.to_string_lossy()) else {
            return false;
        };
        if !self.extensions.iter().any(|allowed| *allowed == ext) {
            return false;
        }

        let id = module_id(&self.root, path);
        !self.ignore_patterns.iter().any(|pattern| pattern.matches(&id))
    }
}

/// `foo.d.ts`, `foo.d.mts`, `foo.d.cts`
fn is_declaration_file(file_name: &str) -> bool {
    [".d.ts", ".d.mts", ".d.cts"]
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}

/// Path of `path` relative to `root`, joined with `/`.
/// A root that is itself a file yields the file name.
pub fn module_id(root: &Path, path: &Path) -> String {
    let relative = match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => path.file_name().map(Path::new).unwrap_or(path),
    };
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    fn walk_ids(walker: &FileWalker, root: &Path) -> Vec<String> {
        walker
            .walk()
            .unwrap()
            .iter()
            .map(|path| module_id(root, path))
            .collect()
    }

    #[test]
    fn test_walk_filters_and_orders() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "app/b.ts");
        touch(root, "app/a.tsx");
        touch(root, "app/types.d.ts");
        touch(root, "app/readme.md");
        touch(root, "node_modules/pkg/index.ts");
        touch(root, ".cache/x.ts");
        touch(root, "lib/util.mts");

        let walker = FileWalker::new(root.to_path_buf());
        assert_eq!(
            walk_ids(&walker, root),
            vec!["app/a.tsx", "app/b.ts", "lib/util.mts"]
        );
    }

    #[test]
    fn test_ignore_patterns_match_module_id() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "app/actions.ts");
        touch(root, "app/generated/client.ts");

        let walker = FileWalker::new(root.to_path_buf())
            .with_ignore_patterns(&["app/generated/**".to_string()])
            .unwrap();
        assert_eq!(walk_ids(&walker, root), vec!["app/actions.ts"]);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let result = FileWalker::new(PathBuf::from(".")).with_ignore_patterns(&["a/[".to_string()]);
        assert!(matches!(result, Err(Error::Pattern(_))));
    }

    #[test]
    fn test_custom_extensions() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.ts");
        touch(root, "b.tsx");

        let walker = FileWalker::new(root.to_path_buf()).with_extensions(vec![".tsx".to_string()]);
        assert_eq!(walk_ids(&walker, root), vec!["b.tsx"]);
    }

    #[test]
    fn test_module_id() {
        assert_eq!(
            module_id(Path::new("/repo"), Path::new("/repo/app/actions.ts")),
            "app/actions.ts"
        );
        assert_eq!(
            module_id(Path::new("/repo/app/actions.ts"), Path::new("/repo/app/actions.ts")),
            "actions.ts"
        );
    }
}
