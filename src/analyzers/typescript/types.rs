//! Signature records produced by export discovery
//!
//! Core data structures handed to declaration emitters, stub generators and
//! documentation checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// Canonical text of a type annotation.
///
/// Produced by the type expression serializer. Structurally identical
/// annotations always produce byte-identical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeText(String);

impl TypeText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for TypeText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for TypeText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How an exported function was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureKind {
    /// `export function foo() {}`
    Declaration,
    /// `export const foo = () => {}` or `export const foo = function () {}`
    ArrowBinding,
    /// `export { foo as bar }`
    RenamedExport,
    /// `export default function () {}`
    Default,
}

/// One parameter of an exported function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Binding text; rest parameters keep their `...` prefix
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<TypeText>,
    /// Explicit `?` marker or a default value
    pub is_optional: bool,
    pub is_rest: bool,
    /// Raw source text of the default value expression
    pub default_text: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            is_optional: false,
            is_rest: false,
            default_text: None,
        }
    }
}

/// Call signature of one exported function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSignature {
    /// Exported (public) name, `"default"` for default exports
    pub name: String,
    pub kind: SignatureKind,
    pub is_async: bool,
    pub is_default: bool,
    /// Generic parameter list including angle brackets
    pub type_params: Option<TypeText>,
    pub params: Vec<Parameter>,
    /// `None` means no annotation was written, not `void`
    pub return_type: Option<TypeText>,
    /// Verbatim leading comment text
    pub doc: Option<String>,
    /// 1-based line of the function in its module
    pub line: usize,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, kind: SignatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_async: false,
            is_default: false,
            type_params: None,
            params: Vec::new(),
            return_type: None,
            doc: None,
            line: 0,
        }
    }

    pub fn required_param_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.is_optional && !p.is_rest)
            .count()
    }

    pub fn has_rest(&self) -> bool {
        self.params.last().is_some_and(|p| p.is_rest)
    }
}

/// Non-fatal conditions found while extracting a module
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExtractionWarning {
    /// The module did not parse; it contributes no signatures
    #[error("{path}: module failed to parse, no signatures extracted")]
    ParseFailure { path: String },

    /// A type form outside the known grammar was rendered from raw text
    #[error("line {line}: unhandled type node `{node_kind}` rendered verbatim")]
    UnhandledTypeNode { node_kind: String, line: usize },

    /// Two exports share a public name; the later one was kept
    #[error("line {line}: export `{name}` redeclared, keeping the later one")]
    NameCollision { name: String, line: usize },
}

/// Extraction result for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSignatures {
    /// Module identifier as supplied by the caller
    pub id: String,
    pub signatures: Vec<FunctionSignature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ExtractionWarning>,
}

impl ModuleSignatures {
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&FunctionSignature> {
        self.signatures.iter().find(|s| s.name == name)
    }
}
