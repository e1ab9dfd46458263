//! Signature building for one function-like node
//!
//! Works on function declarations, overload signatures, function expressions
//! and arrow functions alike. Every type annotation goes through the type
//! expression serializer.

use super::helpers::has_async_modifier;
use crate::analyzers::typescript::parser::{
    collapse_whitespace, named_children, node_line, node_text,
};
use crate::analyzers::typescript::type_expr::{serialize_annotation, serialize_type_parameters};
use crate::analyzers::typescript::types::{
    ExtractionWarning, FunctionSignature, Parameter, SignatureKind,
};
use tree_sitter::Node;

/// Build the signature of `function`, published under `name`
pub fn build_signature(
    function: &Node,
    name: &str,
    kind: SignatureKind,
    source: &str,
    warnings: &mut Vec<ExtractionWarning>,
) -> FunctionSignature {
    let mut signature = FunctionSignature::new(name, kind);
    signature.is_async = has_async_modifier(function);
    signature.is_default = name == "default";
    signature.line = node_line(function);

    signature.type_params = function
        .child_by_field_name("type_parameters")
        .and_then(|params| serialize_type_parameters(&params, source, warnings));

    signature.params = if let Some(params) = function.child_by_field_name("parameters") {
        build_parameters(&params, source, warnings)
    } else if let Some(single) = function.child_by_field_name("parameter") {
        // `x => x`: a bare identifier, never typed or optional
        vec![Parameter::new(node_text(&single, source))]
    } else {
        Vec::new()
    };

    signature.return_type =
        serialize_annotation(function.child_by_field_name("return_type"), source, warnings);

    signature
}

fn build_parameters(
    params: &Node,
    source: &str,
    warnings: &mut Vec<ExtractionWarning>,
) -> Vec<Parameter> {
    named_children(params)
        .iter()
        .filter(|param| matches!(param.kind(), "required_parameter" | "optional_parameter"))
        .filter_map(|param| build_parameter(param, source, warnings))
        .collect()
}

fn build_parameter(
    param: &Node,
    source: &str,
    warnings: &mut Vec<ExtractionWarning>,
) -> Option<Parameter> {
    let pattern = param
        .child_by_field_name("pattern")
        .or_else(|| named_children(param).into_iter().next())?;

    // `this: Window` types the receiver; callers never pass it
    if pattern.kind() == "this" || node_text(&pattern, source) == "this" {
        return None;
    }

    let is_rest = pattern.kind() == "rest_pattern";
    let name = if is_rest {
        // `... items` is still `...items`
        let binding = node_text(&pattern, source).trim_start_matches("...");
        format!("...{}", collapse_whitespace(binding))
    } else {
        collapse_whitespace(node_text(&pattern, source))
    };

    let default_text = param
        .child_by_field_name("value")
        .map(|value| node_text(&value, source).to_string());

    let mut parameter = Parameter::new(name);
    // Rest annotations already spell the array type; serialize as written
    parameter.ty = serialize_annotation(param.child_by_field_name("type"), source, warnings);
    parameter.is_rest = is_rest;
    parameter.is_optional = param.kind() == "optional_parameter" || default_text.is_some();
    parameter.default_text = default_text;

    Some(parameter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_source;
    use crate::core::ast::JsLanguageVariant;
    use std::path::Path;

    fn build_first(source: &str) -> (FunctionSignature, Vec<ExtractionWarning>) {
        let ast = parse_source(source, Path::new("t.ts"), JsLanguageVariant::TypeScript).unwrap();
        let function = ast.tree.root_node().named_child(0).unwrap();
        let mut warnings = Vec::new();
        let signature = build_signature(
            &function,
            "f",
            SignatureKind::Declaration,
            &ast.source,
            &mut warnings,
        );
        (signature, warnings)
    }

    #[test]
    fn test_async_and_return_type() {
        let (sig, warnings) = build_first("async function f(): Promise<Todo[]> {}");
        assert!(sig.is_async);
        assert_eq!(sig.return_type.as_deref(), Some("Promise<Todo[]>"));
        assert!(sig.params.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_return_annotation_is_none() {
        let (sig, _) = build_first("function f(a: string) { return a; }");
        assert!(sig.return_type.is_none());
    }

    #[test]
    fn test_explicit_void_is_kept() {
        let (sig, _) = build_first("function f(): void {}");
        assert_eq!(sig.return_type.as_deref(), Some("void"));
    }

    #[test]
    fn test_default_value_implies_optional() {
        let (sig, _) = build_first("function f(limit: number = 10, label = \"x\") {}");
        assert_eq!(sig.params.len(), 2);

        let limit = &sig.params[0];
        assert!(limit.is_optional);
        assert_eq!(limit.ty.as_deref(), Some("number"));
        assert_eq!(limit.default_text.as_deref(), Some("10"));

        let label = &sig.params[1];
        assert!(label.is_optional);
        assert!(label.ty.is_none());
        assert_eq!(label.default_text.as_deref(), Some("\"x\""));
    }

    #[test]
    fn test_rest_parameter_keeps_element_type() {
        let (sig, _) = build_first("function f(first: string, ...items: number[]) {}");
        let rest = &sig.params[1];
        assert_eq!(rest.name, "...items");
        assert_eq!(rest.ty.as_deref(), Some("number[]"));
        assert!(rest.is_rest);
        assert!(!rest.is_optional);
        assert!(sig.has_rest());
    }

    #[test]
    fn test_destructured_parameter_name() {
        let (sig, _) = build_first("function f({ id,\n  title }: Todo) {}");
        assert_eq!(sig.params[0].name, "{ id, title }");
        assert_eq!(sig.params[0].ty.as_deref(), Some("Todo"));
    }

    #[test]
    fn test_type_parameters_and_predicate() {
        let (sig, _) = build_first("function f<T extends string>(x: unknown): x is T {}");
        assert_eq!(sig.type_params.as_deref(), Some("<T extends string>"));
        assert_eq!(sig.return_type.as_deref(), Some("x is T"));
    }

    #[test]
    fn test_arrow_single_parameter() {
        let source = "const f = async x => x;";
        let ast = parse_source(source, Path::new("t.ts"), JsLanguageVariant::TypeScript).unwrap();
        let declaration = ast.tree.root_node().named_child(0).unwrap();
        let declarator = declaration.named_child(0).unwrap();
        let arrow = declarator.child_by_field_name("value").unwrap();
        let mut warnings = Vec::new();
        let sig = build_signature(
            &arrow,
            "f",
            SignatureKind::ArrowBinding,
            &ast.source,
            &mut warnings,
        );
        assert!(sig.is_async);
        assert_eq!(sig.params.len(), 1);
        assert_eq!(sig.params[0].name, "x");
        assert!(sig.params[0].ty.is_none());
    }

    #[test]
    fn test_this_parameter_skipped() {
        let (sig, warnings) = build_first("function f(this: Window, id: string) {}");
        assert_eq!(sig.params.len(), 1);
        assert_eq!(sig.params[0].name, "id");
        assert_eq!(sig.required_param_count(), 1);
        assert!(warnings.is_empty());
    }
}
