//! Lowering from tree-sitter type syntax to [`TypeNode`]

use super::{
    CallSignature, FunctionType, FunctionTypeKind, MappedType, Modifier, ObjectMember, ParamType,
    Primitive, TemplatePart, TupleElement, TypeNode, TypeOperator, TypeParam,
};
use crate::analyzers::typescript::parser::{
    collapse_whitespace, has_token, import_type_starts, named_children, node_line, node_text,
    parse_source, ANNOTATION_KINDS,
};
use crate::analyzers::typescript::types::ExtractionWarning;
use crate::core::ast::JsLanguageVariant;
use std::path::Path;
use tree_sitter::Node;

/// Stands in for `import("m")` while a rejected annotation is re-parsed
const IMPORT_PLACEHOLDER: &str = "__declmap_import_";

pub(crate) struct TypeLowering<'a> {
    source: &'a str,
    warnings: &'a mut Vec<ExtractionWarning>,
    /// Module specifiers behind each placeholder, by index
    imports: Vec<String>,
}

impl<'a> TypeLowering<'a> {
    pub(crate) fn new(source: &'a str, warnings: &'a mut Vec<ExtractionWarning>) -> Self {
        Self {
            source,
            warnings,
            imports: Vec::new(),
        }
    }

    fn text(&self, node: &Node) -> &'a str {
        node_text(node, self.source)
    }

    /// Identifier paths such as `React . FC` lose their inner whitespace
    fn compact(&self, node: &Node) -> String {
        self.text(node).split_whitespace().collect()
    }

    pub(crate) fn lower(&mut self, node: &Node) -> TypeNode {
        match node.kind() {
            // Annotation wrappers: `: T`, `?: T`, `-?: T`, `: x is T`
            "type_annotation"
            | "opting_type_annotation"
            | "omitting_type_annotation"
            | "adding_type_annotation"
            | "type_predicate_annotation"
            | "asserts_annotation"
            | "constraint"
            | "default_type" => {
                if node.has_error() && ANNOTATION_KINDS.contains(&node.kind()) {
                    return self.recover(node);
                }
                match named_children(node).first() {
                    Some(inner) => self.lower(inner),
                    None => self.unhandled(node),
                }
            }
            "predefined_type" => self.lower_predefined(node),
            "type_identifier" | "identifier" => {
                let name = self.text(node);
                match Primitive::from_keyword(name) {
                    Some(primitive) => TypeNode::Primitive(primitive),
                    None => TypeNode::Reference {
                        name: name.to_string(),
                        args: Vec::new(),
                    },
                }
            }
            "this_type" | "this" => TypeNode::Primitive(Primitive::This),
            "nested_type_identifier" => {
                if let Some((module, qualifier)) = self.resolve_placeholder(&self.compact(node)) {
                    return TypeNode::Import {
                        module,
                        qualifier,
                        args: Vec::new(),
                    };
                }
                if self.is_import_reference(node) {
                    return self.lower_import(node);
                }
                TypeNode::Reference {
                    name: self.compact(node),
                    args: Vec::new(),
                }
            }
            "generic_type" => self.lower_generic(node),
            "import_type" => self.lower_import(node),
            "literal_type" => self.lower_literal(node),
            "array_type" => match named_children(node).first() {
                Some(element) => TypeNode::Array(Box::new(self.lower(element))),
                None => self.unhandled(node),
            },
            "parenthesized_type" => match named_children(node).first() {
                Some(inner) => TypeNode::Parenthesized(Box::new(self.lower(inner))),
                None => self.unhandled(node),
            },
            "union_type" => {
                let mut members = Vec::new();
                self.collect_members(node, "union_type", &mut members);
                TypeNode::Union(members)
            }
            "intersection_type" => {
                let mut members = Vec::new();
                self.collect_members(node, "intersection_type", &mut members);
                TypeNode::Intersection(members)
            }
            "tuple_type" => self.lower_tuple(node),
            "template_literal_type" => self.lower_template(node),
            "conditional_type" => self.lower_conditional(node),
            "infer_type" => self.lower_infer(node),
            "lookup_type" => {
                let mut indices = Vec::new();
                match self.lower_lookup_chain(node, &mut indices) {
                    Some(object) => TypeNode::IndexedAccess {
                        object: Box::new(object),
                        indices,
                    },
                    None => self.unhandled(node),
                }
            }
            "index_type_query" => self.lower_operator(node, TypeOperator::Keyof),
            "readonly_type" => self.lower_operator(node, TypeOperator::Readonly),
            "type_query" => match named_children(node).first() {
                Some(operand) => TypeNode::Operator {
                    op: TypeOperator::Typeof,
                    operand: Box::new(TypeNode::Reference {
                        name: self.restore_imports(&collapse_whitespace(self.text(operand))),
                        args: Vec::new(),
                    }),
                },
                None => self.unhandled(node),
            },
            "function_type" => self.lower_function_type(node, FunctionTypeKind::Plain),
            "constructor_type" => {
                let is_abstract = has_token(node, "abstract");
                self.lower_function_type(node, FunctionTypeKind::Constructor { is_abstract })
            }
            "object_type" => self.lower_object(node),
            "type_predicate" => self.lower_predicate(node, false),
            "asserts" => self.lower_asserts(node),
            _ if self.is_import_reference(node) => self.lower_import(node),
            _ => self.unhandled(node),
        }
    }

    /// Record the node as unsupported and keep its source text
    fn unhandled(&mut self, node: &Node) -> TypeNode {
        self.warnings.push(ExtractionWarning::UnhandledTypeNode {
            node_kind: node.kind().to_string(),
            line: node_line(node),
        });
        TypeNode::Unhandled {
            kind: node.kind().to_string(),
            text: collapse_whitespace(self.text(node)),
        }
    }

    fn lower_predefined(&mut self, node: &Node) -> TypeNode {
        let keyword = collapse_whitespace(self.text(node));
        if keyword == "unique symbol" {
            return TypeNode::Operator {
                op: TypeOperator::Unique,
                operand: Box::new(TypeNode::Primitive(Primitive::Symbol)),
            };
        }
        match Primitive::from_keyword(&keyword) {
            Some(primitive) => TypeNode::Primitive(primitive),
            None => self.unhandled(node),
        }
    }

    fn lower_literal(&mut self, node: &Node) -> TypeNode {
        let Some(value) = named_children(node).into_iter().next() else {
            return self.unhandled(node);
        };
        match value.kind() {
            "null" => TypeNode::Primitive(Primitive::Null),
            "undefined" => TypeNode::Primitive(Primitive::Undefined),
            "string" => TypeNode::Literal(self.text(&value).to_string()),
            _ => TypeNode::Literal(self.compact(&value)),
        }
    }

    fn lower_generic(&mut self, node: &Node) -> TypeNode {
        if self.is_import_reference(node) {
            return self.lower_import(node);
        }
        let Some(name) = node.child_by_field_name("name") else {
            return self.unhandled(node);
        };
        let args = node
            .child_by_field_name("type_arguments")
            .map(|args| self.lower_type_arguments(&args))
            .unwrap_or_default();
        let name = self.compact(&name);
        match self.resolve_placeholder(&name) {
            Some((module, qualifier)) => TypeNode::Import {
                module,
                qualifier,
                args,
            },
            None => TypeNode::Reference { name, args },
        }
    }

    /// Lower an annotation the grammar rejected. Import types with type
    /// arguments are the only recoverable cause: each `import("m")` prefix is
    /// swapped for a placeholder identifier and the text is parsed again as a
    /// type alias.
    fn recover(&mut self, node: &Node) -> TypeNode {
        let is_prefix = |c: char| matches!(c, '-' | '+' | '?' | ':') || c.is_whitespace();
        let text = self.text(node).trim_start_matches(is_prefix);
        let (rewritten, imports) = replace_import_prefixes(text);
        let source = format!("type Recovered = {rewritten};");

        let path = Path::new("recovered.ts");
        let ast = match parse_source(&source, path, JsLanguageVariant::TypeScript) {
            Ok(ast) if !ast.tree.root_node().has_error() => ast,
            _ => return self.unhandled(node),
        };
        let value = ast
            .tree
            .root_node()
            .named_child(0)
            .and_then(|alias| alias.child_by_field_name("value"));
        let Some(value) = value else {
            return self.unhandled(node);
        };

        let mut nested = TypeLowering {
            source: &ast.source,
            warnings: &mut *self.warnings,
            imports,
        };
        nested.lower(&value)
    }

    /// `__declmap_import_0.models.Todo` back to the module specifier and
    /// `["models", "Todo"]`
    fn resolve_placeholder(&self, name: &str) -> Option<(String, Vec<String>)> {
        let rest = name.strip_prefix(IMPORT_PLACEHOLDER)?;
        let mut segments = rest.split('.');
        let index: usize = segments.next()?.parse().ok()?;
        let module = self.imports.get(index)?.clone();
        Some((module, segments.map(str::to_string).collect()))
    }

    /// Placeholders left in raw text, e.g. under `typeof`
    fn restore_imports(&self, text: &str) -> String {
        let mut restored = text.to_string();
        for (index, module) in self.imports.iter().enumerate().rev() {
            restored = restored.replace(
                &format!("{IMPORT_PLACEHOLDER}{index}"),
                &format!("import({module})"),
            );
        }
        restored
    }

    fn lower_type_arguments(&mut self, node: &Node) -> Vec<TypeNode> {
        named_children(node)
            .iter()
            .map(|arg| self.lower(arg))
            .collect()
    }

    /// Flatten left-nested `A | B | C` chains, keeping declared order
    fn collect_members(&mut self, node: &Node, kind: &str, members: &mut Vec<TypeNode>) {
        for child in named_children(node) {
            if child.kind() == kind {
                self.collect_members(&child, kind, members);
            } else {
                members.push(self.lower(&child));
            }
        }
    }

    fn lower_tuple(&mut self, node: &Node) -> TypeNode {
        let elements = named_children(node)
            .iter()
            .map(|member| self.lower_tuple_element(member))
            .collect();
        TypeNode::Tuple(elements)
    }

    fn lower_tuple_element(&mut self, member: &Node) -> TupleElement {
        match member.kind() {
            // Labelled members share the parameter node kinds: `id: T`,
            // `id?: T`, `...rest: T[]`
            "required_parameter" | "optional_parameter" => {
                let name = member
                    .child_by_field_name("name")
                    .or_else(|| member.child_by_field_name("pattern"))
                    .or_else(|| {
                        named_children(member)
                            .into_iter()
                            .find(|child| child.kind() != "type_annotation")
                    });
                let Some(name) = name else {
                    return self.unhandled_tuple_element(member);
                };
                let rest = name.kind() == "rest_pattern";
                let label = self.compact(&name).trim_start_matches("...").to_string();
                let annotation = member.child_by_field_name("type").or_else(|| {
                    named_children(member)
                        .into_iter()
                        .find(|child| child.kind() == "type_annotation")
                });
                let Some(annotation) = annotation else {
                    return self.unhandled_tuple_element(member);
                };
                TupleElement {
                    label: Some(label),
                    optional: member.kind() == "optional_parameter",
                    rest,
                    ty: self.lower(&annotation),
                }
            }
            "optional_type" | "rest_type" => {
                let ty = match named_children(member).first() {
                    Some(inner) => self.lower(inner),
                    None => self.unhandled(member),
                };
                TupleElement {
                    label: None,
                    optional: member.kind() == "optional_type",
                    rest: member.kind() == "rest_type",
                    ty,
                }
            }
            _ => TupleElement {
                label: None,
                optional: false,
                rest: false,
                ty: self.lower(member),
            },
        }
    }

    fn unhandled_tuple_element(&mut self, member: &Node) -> TupleElement {
        TupleElement {
            label: None,
            optional: false,
            rest: false,
            ty: self.unhandled(member),
        }
    }

    /// Literal text between `${...}` holes is copied byte for byte
    fn lower_template(&mut self, node: &Node) -> TypeNode {
        let end = node.end_byte().saturating_sub(1);
        let mut position = (node.start_byte() + 1).min(end);
        let mut parts = Vec::new();

        let mut cursor = node.walk();
        let holes: Vec<Node> = node
            .children(&mut cursor)
            .filter(|child| child.kind() == "template_type")
            .collect();

        for hole in holes {
            if hole.start_byte() > position {
                parts.push(TemplatePart::Text(
                    self.source[position..hole.start_byte()].to_string(),
                ));
            }
            let inner = match named_children(&hole).first() {
                Some(inner) => self.lower(inner),
                None => self.unhandled(&hole),
            };
            parts.push(TemplatePart::Type(inner));
            position = hole.end_byte();
        }
        if end > position {
            parts.push(TemplatePart::Text(self.source[position..end].to_string()));
        }

        TypeNode::TemplateLiteral(parts)
    }

    fn lower_conditional(&mut self, node: &Node) -> TypeNode {
        let children = named_children(node);
        let field = |name: &str, index: usize| {
            node.child_by_field_name(name)
                .or_else(|| children.get(index).copied())
        };
        let (Some(check), Some(extends), Some(true_type), Some(false_type)) = (
            field("left", 0),
            field("right", 1),
            field("consequence", 2),
            field("alternative", 3),
        ) else {
            return self.unhandled(node);
        };

        TypeNode::Conditional {
            check: Box::new(self.lower(&check)),
            extends: Box::new(self.lower(&extends)),
            true_type: Box::new(self.lower(&true_type)),
            false_type: Box::new(self.lower(&false_type)),
        }
    }

    fn lower_infer(&mut self, node: &Node) -> TypeNode {
        let children = named_children(node);
        let Some(name) = children.first() else {
            return self.unhandled(node);
        };
        let constraint = children
            .get(1)
            .map(|constraint| Box::new(self.lower(constraint)));
        TypeNode::Infer {
            name: self.text(name).to_string(),
            constraint,
        }
    }

    /// `A["b"]["c"]` nests as lookup(lookup(A, "b"), "c"); returns the base
    /// and pushes keys outermost-last
    fn lower_lookup_chain(&mut self, node: &Node, indices: &mut Vec<TypeNode>) -> Option<TypeNode> {
        let children = named_children(node);
        let (object, index) = (children.first()?, children.get(1)?);
        if object.kind() == "lookup_type" {
            let base = self.lower_lookup_chain(object, indices)?;
            indices.push(self.lower(index));
            Some(base)
        } else {
            let base = self.lower(object);
            indices.push(self.lower(index));
            Some(base)
        }
    }

    fn lower_operator(&mut self, node: &Node, op: TypeOperator) -> TypeNode {
        match named_children(node).first() {
            Some(operand) => TypeNode::Operator {
                op,
                operand: Box::new(self.lower(operand)),
            },
            None => self.unhandled(node),
        }
    }

    fn lower_function_type(&mut self, node: &Node, kind: FunctionTypeKind) -> TypeNode {
        let type_params = self.type_parameters_of(node);
        let params = node
            .child_by_field_name("parameters")
            .map(|params| self.lower_parameters(&params))
            .unwrap_or_default();
        let return_node = node
            .child_by_field_name("return_type")
            .or_else(|| node.child_by_field_name("type"))
            .or_else(|| named_children(node).last().copied());
        let Some(return_node) = return_node else {
            return self.unhandled(node);
        };
        let return_type = self.lower(&return_node);

        TypeNode::Function(Box::new(FunctionType {
            kind,
            type_params,
            params,
            return_type,
        }))
    }

    fn type_parameters_of(&mut self, node: &Node) -> Vec<TypeParam> {
        node.child_by_field_name("type_parameters")
            .map(|params| self.lower_type_parameters(&params))
            .unwrap_or_default()
    }

    pub(crate) fn lower_type_parameters(&mut self, node: &Node) -> Vec<TypeParam> {
        named_children(node)
            .iter()
            .filter(|param| param.kind() == "type_parameter")
            .filter_map(|param| {
                let name = param.child_by_field_name("name")?;
                Some(TypeParam {
                    is_const: has_token(param, "const"),
                    name: self.text(&name).to_string(),
                    constraint: param
                        .child_by_field_name("constraint")
                        .map(|constraint| self.lower(&constraint)),
                    default: param
                        .child_by_field_name("value")
                        .map(|default| self.lower(&default)),
                })
            })
            .collect()
    }

    fn lower_parameters(&mut self, node: &Node) -> Vec<ParamType> {
        named_children(node)
            .iter()
            .filter(|param| matches!(param.kind(), "required_parameter" | "optional_parameter"))
            .map(|param| {
                let name = param
                    .child_by_field_name("pattern")
                    .or_else(|| named_children(param).first().copied())
                    .map(|pattern| collapse_whitespace(self.text(&pattern)))
                    .unwrap_or_default();
                ParamType {
                    name,
                    optional: param.kind() == "optional_parameter",
                    ty: param
                        .child_by_field_name("type")
                        .map(|ty| self.lower(&ty)),
                }
            })
            .collect()
    }

    fn lower_call_signature(&mut self, node: &Node) -> CallSignature {
        CallSignature {
            type_params: self.type_parameters_of(node),
            params: node
                .child_by_field_name("parameters")
                .map(|params| self.lower_parameters(&params))
                .unwrap_or_default(),
            return_type: node
                .child_by_field_name("return_type")
                .or_else(|| node.child_by_field_name("type"))
                .map(|ret| self.lower(&ret)),
        }
    }

    fn lower_object(&mut self, node: &Node) -> TypeNode {
        let members = named_children(node);
        if let [only] = members.as_slice() {
            if only.kind() == "index_signature" {
                if let Some(mapped) = self.lower_mapped(only) {
                    return TypeNode::Mapped(Box::new(mapped));
                }
            }
        }

        let members = members
            .iter()
            .map(|member| self.lower_member(member))
            .collect();
        TypeNode::Object(members)
    }

    fn lower_member(&mut self, member: &Node) -> ObjectMember {
        match member.kind() {
            "property_signature" => ObjectMember::Property {
                readonly: has_token(member, "readonly"),
                name: member
                    .child_by_field_name("name")
                    .map(|name| self.text(&name).to_string())
                    .unwrap_or_default(),
                optional: has_token(member, "?"),
                ty: member
                    .child_by_field_name("type")
                    .map(|ty| self.lower(&ty)),
            },
            "method_signature" => ObjectMember::Method {
                name: member
                    .child_by_field_name("name")
                    .map(|name| self.text(&name).to_string())
                    .unwrap_or_default(),
                optional: has_token(member, "?"),
                signature: self.lower_call_signature(member),
            },
            "call_signature" => ObjectMember::Call(self.lower_call_signature(member)),
            "construct_signature" => ObjectMember::Construct(self.lower_call_signature(member)),
            "index_signature" => {
                let param = member.child_by_field_name("name");
                let key = member.child_by_field_name("index_type");
                match (param, key) {
                    (Some(param), Some(key)) => ObjectMember::Index {
                        readonly: has_token(member, "readonly"),
                        param: self.text(&param).to_string(),
                        key: self.lower(&key),
                        value: member
                            .child_by_field_name("type")
                            .map(|value| self.lower(&value)),
                    },
                    _ => self.unhandled_member(member),
                }
            }
            _ => self.unhandled_member(member),
        }
    }

    fn unhandled_member(&mut self, member: &Node) -> ObjectMember {
        match self.unhandled(member) {
            TypeNode::Unhandled { text, .. } => ObjectMember::Unhandled(text),
            other => ObjectMember::Unhandled(other.to_string()),
        }
    }

    /// `{ -readonly [K in keyof T as N]+?: V }`, stored as an index signature
    /// wrapping a `mapped_type_clause`
    fn lower_mapped(&mut self, signature: &Node) -> Option<MappedType> {
        let mut cursor = signature.walk();
        let children: Vec<Node> = signature.children(&mut cursor).collect();

        let mut readonly = None;
        let mut sign = Modifier::Plain;
        let mut clause = None;
        let mut annotation = None;
        for child in &children {
            match child.kind() {
                "-" if clause.is_none() => sign = Modifier::Minus,
                "+" if clause.is_none() => sign = Modifier::Plus,
                "readonly" => readonly = Some(sign),
                "mapped_type_clause" => clause = Some(*child),
                "type_annotation"
                | "opting_type_annotation"
                | "omitting_type_annotation"
                | "adding_type_annotation" => annotation = Some(*child),
                _ => {}
            }
        }
        let clause = clause?;

        let clause_children = named_children(&clause);
        let param = clause
            .child_by_field_name("name")
            .or_else(|| clause_children.first().copied())?;
        let constraint = clause
            .child_by_field_name("type")
            .or_else(|| clause_children.get(1).copied())?;
        let name_type = clause
            .child_by_field_name("alias")
            .or_else(|| clause_children.get(2).copied());

        let optional = annotation.and_then(|annotation| match annotation.kind() {
            "opting_type_annotation" => Some(Modifier::Plain),
            "omitting_type_annotation" => Some(Modifier::Minus),
            "adding_type_annotation" => Some(Modifier::Plus),
            _ => None,
        });

        Some(MappedType {
            readonly,
            param: self.text(&param).to_string(),
            constraint: self.lower(&constraint),
            name_type: name_type.map(|name_type| self.lower(&name_type)),
            optional,
            value: annotation.map(|annotation| self.lower(&annotation)),
        })
    }

    fn lower_predicate(&mut self, node: &Node, asserts: bool) -> TypeNode {
        let children = named_children(node);
        let subject = node
            .child_by_field_name("name")
            .or_else(|| children.first().copied());
        let Some(subject) = subject else {
            return self.unhandled(node);
        };
        let target = node
            .child_by_field_name("type")
            .or_else(|| children.get(1).copied())
            .map(|target| Box::new(self.lower(&target)));

        TypeNode::Predicate {
            asserts,
            subject: self.text(&subject).to_string(),
            target,
        }
    }

    /// `asserts x` or `asserts x is T`
    fn lower_asserts(&mut self, node: &Node) -> TypeNode {
        let Some(inner) = named_children(node).into_iter().next() else {
            return self.unhandled(node);
        };
        if inner.kind() == "type_predicate" {
            return self.lower_predicate(&inner, true);
        }
        TypeNode::Predicate {
            asserts: true,
            subject: self.text(&inner).to_string(),
            target: None,
        }
    }

    fn is_import_reference(&self, node: &Node) -> bool {
        self.text(node)
            .trim_start()
            .strip_prefix("import")
            .is_some_and(|rest| rest.trim_start().starts_with('('))
    }

    /// `import("mod").A.B<Args>`
    fn lower_import(&mut self, node: &Node) -> TypeNode {
        let text = self.text(node);
        let parsed = text
            .trim_start()
            .strip_prefix("import")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| {
                let close = rest.find(')')?;
                Some((rest[..close].trim(), &rest[close + 1..]))
            });
        let Some((module, tail)) = parsed else {
            return self.unhandled(node);
        };

        let (path, has_args) = match tail.find('<') {
            Some(open) => (&tail[..open], true),
            None => (tail, false),
        };
        let qualifier: Vec<String> = path
            .split('.')
            .map(|segment| segment.split_whitespace().collect::<String>())
            .filter(|segment| !segment.is_empty())
            .collect();

        let args = if has_args {
            match find_descendant(node, "type_arguments") {
                Some(args) => self.lower_type_arguments(&args),
                None => return self.unhandled(node),
            }
        } else {
            Vec::new()
        };

        TypeNode::Import {
            module: module.to_string(),
            qualifier,
            args,
        }
    }
}

/// Swap each `import("m")` for a numbered placeholder identifier and return
/// the module specifiers in placeholder order
fn replace_import_prefixes(text: &str) -> (String, Vec<String>) {
    let mut rewritten = String::with_capacity(text.len());
    let mut imports = Vec::new();
    let mut position = 0;

    for start in import_type_starts(text) {
        if start < position {
            continue;
        }
        let Some(open) = text[start..].find('(').map(|offset| start + offset) else {
            continue;
        };
        let Some(close) = text[open..].find(')').map(|offset| open + offset) else {
            continue;
        };
        rewritten.push_str(&text[position..start]);
        rewritten.push_str(&format!("{IMPORT_PLACEHOLDER}{}", imports.len()));
        imports.push(text[open + 1..close].trim().to_string());
        position = close + 1;
    }
    rewritten.push_str(&text[position..]);

    (rewritten, imports)
}

fn find_descendant<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'tree>> = node.children(&mut cursor).collect();
    for child in children {
        if child.kind() == kind {
            return Some(child);
        }
        if let Some(found) = find_descendant(&child, kind) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_source;
    use crate::core::ast::JsLanguageVariant;
    use std::path::Path;

    fn lower_alias(text: &str) -> (TypeNode, Vec<ExtractionWarning>) {
        let source = format!("type T = {text};");
        let ast = parse_source(&source, Path::new("t.ts"), JsLanguageVariant::TypeScript).unwrap();
        let alias = ast.tree.root_node().named_child(0).unwrap();
        let value = alias.child_by_field_name("value").unwrap();
        let mut warnings = Vec::new();
        let node = TypeLowering::new(&ast.source, &mut warnings).lower(&value);
        (node, warnings)
    }

    #[test]
    fn test_union_is_flattened_in_order() {
        let (node, _) = lower_alias("\"a\" | \"b\" | \"c\"");
        match node {
            TypeNode::Union(members) => {
                let texts: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                assert_eq!(texts, vec!["\"a\"", "\"b\"", "\"c\""]);
            }
            other => panic!("expected union, got {other:?}"),
        }
    }

    #[test]
    fn test_parenthesized_union_not_flattened() {
        let (node, _) = lower_alias("A | (B | C)");
        match node {
            TypeNode::Union(members) => {
                assert_eq!(members.len(), 2);
                assert!(matches!(members[1], TypeNode::Parenthesized(_)));
            }
            other => panic!("expected union, got {other:?}"),
        }
    }

    #[test]
    fn test_null_and_undefined_are_primitives() {
        let (node, _) = lower_alias("null");
        assert_eq!(node, TypeNode::Primitive(Primitive::Null));
        let (node, _) = lower_alias("undefined");
        assert_eq!(node, TypeNode::Primitive(Primitive::Undefined));
    }

    #[test]
    fn test_lookup_chain_flattened() {
        let (node, _) = lower_alias("Base[\"k1\"][\"k2\"]");
        match node {
            TypeNode::IndexedAccess { object, indices } => {
                assert_eq!(object.to_string(), "Base");
                assert_eq!(indices.len(), 2);
                assert_eq!(indices[0].to_string(), "\"k1\"");
                assert_eq!(indices[1].to_string(), "\"k2\"");
            }
            other => panic!("expected indexed access, got {other:?}"),
        }
    }

    #[test]
    fn test_mapped_type_lowered() {
        let (node, warnings) = lower_alias("{ readonly [K in keyof T]?: T[K] }");
        assert!(warnings.is_empty());
        match node {
            TypeNode::Mapped(mapped) => {
                assert_eq!(mapped.readonly, Some(Modifier::Plain));
                assert_eq!(mapped.optional, Some(Modifier::Plain));
                assert_eq!(mapped.param, "K");
            }
            other => panic!("expected mapped type, got {other:?}"),
        }
    }

    #[test]
    fn test_template_literal_parts() {
        let (node, _) = lower_alias("`todo-${number}-done`");
        match node {
            TypeNode::TemplateLiteral(parts) => {
                assert_eq!(parts.len(), 3);
                assert_eq!(parts[0], TemplatePart::Text("todo-".to_string()));
                assert_eq!(
                    parts[1],
                    TemplatePart::Type(TypeNode::Primitive(Primitive::Number))
                );
                assert_eq!(parts[2], TemplatePart::Text("-done".to_string()));
            }
            other => panic!("expected template literal, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_reference_arguments() {
        let (node, _) = lower_alias("Record<string, Array<number>>");
        match node {
            TypeNode::Reference { name, args } => {
                assert_eq!(name, "Record");
                assert_eq!(args.len(), 2);
                assert_eq!(args[1].to_string(), "Array<number>");
            }
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn test_labelled_tuple_members() {
        let (node, warnings) = lower_alias("[id:string, label?: string, ...rest: boolean[]]");
        assert!(warnings.is_empty(), "{warnings:?}");
        match node {
            TypeNode::Tuple(elements) => {
                let labels: Vec<Option<&str>> =
                    elements.iter().map(|e| e.label.as_deref()).collect();
                assert_eq!(labels, vec![Some("id"), Some("label"), Some("rest")]);
                assert!(elements[1].optional);
                assert!(elements[2].rest);
                assert_eq!(elements[2].ty.to_string(), "boolean[]");
            }
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    fn test_replace_import_prefixes() {
        let (text, imports) =
            replace_import_prefixes("Map<import(\"./a\").A<string>, import ('b').B>");
        assert_eq!(text, "Map<__declmap_import_0.A<string>, __declmap_import_1.B>");
        assert_eq!(imports, vec!["\"./a\"", "'b'"]);
    }
}
