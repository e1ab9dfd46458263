use std::path::PathBuf;

/// Grammar variant used to parse a module.
///
/// Plain `.js` sources are parsed with the TypeScript grammar, which is a
/// superset for everything this crate looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsLanguageVariant {
    TypeScript,
    Tsx,
}

impl JsLanguageVariant {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" | "js" | "mjs" | "cjs" => Some(Self::TypeScript),
            "tsx" | "jsx" => Some(Self::Tsx),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypeScriptAst {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub path: PathBuf,
    pub language_variant: JsLanguageVariant,
}
