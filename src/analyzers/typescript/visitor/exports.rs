//! Export discovery
//!
//! Finds every exported function of a module, however it was declared, and
//! folds the results into one list keyed by public name. A later export with
//! the same public name replaces the earlier one in place.

use super::helpers::{
    function_declarators, is_function_declaration, is_function_value, is_variable_declaration,
    leading_doc, unwrap_declaration, unwrap_value,
};
use super::signature::build_signature;
use crate::analyzers::typescript::parser::{has_token, named_children, node_line, node_text};
use crate::analyzers::typescript::types::{ExtractionWarning, FunctionSignature, SignatureKind};
use crate::core::ast::TypeScriptAst;
use indexmap::IndexMap;
use std::collections::HashMap;
use tree_sitter::Node;

/// A module-level name bound to a function
#[derive(Clone, Copy)]
struct Binding<'tree> {
    function: Node<'tree>,
    /// Top-level statement holding the binding; leading docs attach here
    statement: Node<'tree>,
    kind: SignatureKind,
}

/// Discover exported function signatures in source order
pub fn discover_signatures(
    ast: &TypeScriptAst,
    warnings: &mut Vec<ExtractionWarning>,
) -> Vec<FunctionSignature> {
    let root = ast.tree.root_node();
    let statements = named_children(&root);
    let bindings = collect_bindings(&statements, &ast.source);

    let mut discoverer = ExportDiscoverer {
        source: &ast.source,
        bindings,
        signatures: IndexMap::new(),
        warnings,
    };
    for statement in statements
        .iter()
        .filter(|statement| statement.kind() == "export_statement")
    {
        discoverer.visit_export(statement);
    }

    discoverer.signatures.into_values().collect()
}

/// Binding table of every top-level function, exported or not.
/// Redeclared names (overloads) resolve to the last declaration.
fn collect_bindings<'tree>(statements: &[Node<'tree>], source: &str) -> HashMap<String, Binding<'tree>> {
    let mut bindings = HashMap::new();

    for statement in statements {
        let declaration = if statement.kind() == "export_statement" {
            match statement.child_by_field_name("declaration") {
                Some(declaration) => unwrap_declaration(declaration),
                None => continue,
            }
        } else {
            unwrap_declaration(*statement)
        };

        if is_function_declaration(&declaration) {
            if let Some(name) = declaration.child_by_field_name("name") {
                bindings.insert(
                    node_text(&name, source).to_string(),
                    Binding {
                        function: declaration,
                        statement: *statement,
                        kind: SignatureKind::Declaration,
                    },
                );
            }
        } else if is_variable_declaration(&declaration) {
            for (name, function) in function_declarators(&declaration) {
                bindings.insert(
                    node_text(&name, source).to_string(),
                    Binding {
                        function,
                        statement: *statement,
                        kind: SignatureKind::ArrowBinding,
                    },
                );
            }
        }
    }

    bindings
}

struct ExportDiscoverer<'a, 'tree> {
    source: &'a str,
    bindings: HashMap<String, Binding<'tree>>,
    signatures: IndexMap<String, FunctionSignature>,
    warnings: &'a mut Vec<ExtractionWarning>,
}

impl<'a, 'tree> ExportDiscoverer<'a, 'tree> {
    fn visit_export(&mut self, statement: &Node<'tree>) {
        // `export { x } from "./y"` and `export * from "./y"` live elsewhere
        if statement.child_by_field_name("source").is_some() {
            return;
        }

        if has_token(statement, "default") {
            self.visit_default_export(statement);
            return;
        }

        if let Some(declaration) = statement.child_by_field_name("declaration") {
            self.visit_exported_declaration(statement, unwrap_declaration(declaration));
            return;
        }

        if let Some(clause) = named_children(statement)
            .into_iter()
            .find(|child| child.kind() == "export_clause")
        {
            self.visit_export_clause(statement, &clause);
        }
    }

    /// `export function f() {}` / `export const f = () => {}`
    fn visit_exported_declaration(&mut self, statement: &Node<'tree>, declaration: Node<'tree>) {
        if is_function_declaration(&declaration) {
            let Some(name) = declaration.child_by_field_name("name") else {
                return;
            };
            let name = node_text(&name, self.source);
            let signature = self.build(&declaration, name, SignatureKind::Declaration, statement);
            self.record(signature, node_line(statement));
        } else if is_variable_declaration(&declaration) {
            for (name, function) in function_declarators(&declaration) {
                let name = node_text(&name, self.source);
                let signature = self.build(&function, name, SignatureKind::ArrowBinding, statement);
                self.record(signature, node_line(&function));
            }
        }
    }

    /// `export default function () {}`, `export default async () => {}`,
    /// `export default handler;`
    fn visit_default_export(&mut self, statement: &Node<'tree>) {
        let exported = statement
            .child_by_field_name("declaration")
            .map(unwrap_declaration)
            .or_else(|| statement.child_by_field_name("value").map(unwrap_value));
        let Some(exported) = exported else {
            return;
        };

        if is_function_declaration(&exported) || is_function_value(&exported) {
            let signature = self.build(&exported, "default", SignatureKind::Default, statement);
            self.record(signature, node_line(statement));
        } else if exported.kind() == "identifier" {
            let local = node_text(&exported, self.source);
            if let Some(binding) = self.bindings.get(local).copied() {
                let signature = self.build(
                    &binding.function,
                    "default",
                    SignatureKind::Default,
                    &binding.statement,
                );
                self.record(signature, node_line(statement));
            }
        }
    }

    /// `export { local, local as exported }`
    fn visit_export_clause(&mut self, statement: &Node<'tree>, clause: &Node<'tree>) {
        for specifier in named_children(clause)
            .into_iter()
            .filter(|child| child.kind() == "export_specifier")
        {
            let Some(local) = specifier.child_by_field_name("name") else {
                continue;
            };
            let local = node_text(&local, self.source);
            let Some(binding) = self.bindings.get(local).copied() else {
                log::debug!("export `{local}` is not a module-level function, skipping");
                continue;
            };
            let exported = specifier
                .child_by_field_name("alias")
                .map(|alias| export_name(node_text(&alias, self.source)))
                .unwrap_or(local);

            let signature = self.build(
                &binding.function,
                exported,
                SignatureKind::RenamedExport,
                &binding.statement,
            );
            self.record(signature, node_line(&specifier).max(node_line(statement)));
        }
    }

    fn build(
        &mut self,
        function: &Node<'tree>,
        name: &str,
        kind: SignatureKind,
        doc_anchor: &Node<'tree>,
    ) -> FunctionSignature {
        let mut signature = build_signature(function, name, kind, self.source, self.warnings);
        signature.doc = leading_doc(doc_anchor, self.source);
        signature
    }

    /// Last-wins insert; an existing key keeps its position
    fn record(&mut self, signature: FunctionSignature, line: usize) {
        if let Some(previous) = self.signatures.get(&signature.name) {
            let is_overload = previous.kind == SignatureKind::Declaration
                && signature.kind == SignatureKind::Declaration;
            if !is_overload {
                self.warnings.push(ExtractionWarning::NameCollision {
                    name: signature.name.clone(),
                    line,
                });
            }
        }
        self.signatures.insert(signature.name.clone(), signature);
    }
}

/// `export { a as "b" }` names may be string literals
fn export_name(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}
