//! Extraction orchestration
//!
//! Top-level entry points: source text in, signature records out.

use super::parser::{detect_variant, has_parse_errors, parse_source};
use super::types::{ExtractionWarning, FunctionSignature, ModuleSignatures};
use super::visitor::discover_signatures;
use std::path::Path;
use std::time::Instant;

/// Extract every exported function signature of one module.
///
/// Never fails. A module that does not parse yields no signatures and a
/// [`ExtractionWarning::ParseFailure`].
pub fn extract_module(id: &str, source: &str) -> ModuleSignatures {
    let _span = tracing::debug_span!("extract_module", module = %id).entered();
    let start = Instant::now();

    let path = Path::new(id);
    let mut warnings = Vec::new();

    let signatures = match parse_source(source, path, detect_variant(path)) {
        Ok(ast) if !has_parse_errors(&ast.tree, &ast.source) => {
            discover_signatures(&ast, &mut warnings)
        }
        Ok(_) => {
            log::warn!("{id}: syntax errors, skipping module");
            warnings.push(ExtractionWarning::ParseFailure {
                path: id.to_string(),
            });
            Vec::new()
        }
        Err(e) => {
            log::warn!("{id}: {e}");
            warnings.push(ExtractionWarning::ParseFailure {
                path: id.to_string(),
            });
            Vec::new()
        }
    };

    for warning in &warnings {
        if let ExtractionWarning::UnhandledTypeNode { .. } = warning {
            log::debug!("{id}: {warning}");
        }
    }
    log::debug!(
        "{id}: {} signatures, {} warnings in {:.2}ms",
        signatures.len(),
        warnings.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    ModuleSignatures {
        id: id.to_string(),
        signatures,
        warnings,
    }
}

/// Signatures only; warnings are dropped
pub fn extract_signatures(id: &str, source: &str) -> Vec<FunctionSignature> {
    extract_module(id, source).signatures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_module() {
        let source = r#"
export async function getTodos(): Promise<Todo[]> {
    return [];
}
"#;
        let module = extract_module("app/actions.ts", source);

        assert_eq!(module.id, "app/actions.ts");
        assert_eq!(module.signatures.len(), 1);
        assert!(module.warnings.is_empty());
        assert_eq!(module.signatures[0].line, 2);
    }

    #[test]
    fn test_malformed_module_yields_nothing() {
        let module = extract_module("broken.ts", "export function (: {");

        assert!(module.signatures.is_empty());
        assert_eq!(
            module.warnings,
            vec![ExtractionWarning::ParseFailure {
                path: "broken.ts".to_string()
            }]
        );
    }

    #[test]
    fn test_tsx_module_parsed_with_tsx_grammar() {
        let source = "export const Button = (props: { label: string }) => <button>{props.label}</button>;";
        let signatures = extract_signatures("components/button.tsx", source);

        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].params[0].ty.as_deref(), Some("{ label: string }"));
    }

    #[test]
    fn test_empty_module() {
        assert!(extract_signatures("empty.ts", "").is_empty());
    }
}
