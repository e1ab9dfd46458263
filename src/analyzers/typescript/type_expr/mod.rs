//! Type expression serialization
//!
//! Type annotations are lowered from the tree-sitter syntax tree into a closed
//! [`TypeNode`] tree (`lower`), then rendered back to canonical text
//! (`render`). Canonical text uses single spaces around binary operators,
//! `, ` between list items and `; ` between object members, so re-parsing and
//! re-serializing the output always yields the same text.

mod lower;
mod render;

use super::types::{ExtractionWarning, TypeText};
use lower::TypeLowering;
use tree_sitter::Node;

/// Serialize one type node (or annotation wrapper) to canonical text
pub fn serialize_type(
    node: &Node,
    source: &str,
    warnings: &mut Vec<ExtractionWarning>,
) -> TypeText {
    let tree = TypeLowering::new(source, warnings).lower(node);
    TypeText::new(tree.to_string())
}

/// Serialize an optional annotation; `None` stays `None`
pub fn serialize_annotation(
    node: Option<Node>,
    source: &str,
    warnings: &mut Vec<ExtractionWarning>,
) -> Option<TypeText> {
    node.map(|n| serialize_type(&n, source, warnings))
}

/// Serialize a `type_parameters` node, including the angle brackets
pub fn serialize_type_parameters(
    node: &Node,
    source: &str,
    warnings: &mut Vec<ExtractionWarning>,
) -> Option<TypeText> {
    let params = TypeLowering::new(source, warnings).lower_type_parameters(node);
    if params.is_empty() {
        None
    } else {
        Some(TypeText::new(render::type_parameter_list(&params)))
    }
}

/// Keyword types rendered as their literal keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Primitive {
    String,
    Number,
    Boolean,
    Any,
    Unknown,
    Void,
    Null,
    Undefined,
    Never,
    Bigint,
    Symbol,
    Object,
    This,
}

impl Primitive {
    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        let primitive = match keyword {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "any" => Self::Any,
            "unknown" => Self::Unknown,
            "void" => Self::Void,
            "null" => Self::Null,
            "undefined" => Self::Undefined,
            "never" => Self::Never,
            "bigint" => Self::Bigint,
            "symbol" => Self::Symbol,
            "object" => Self::Object,
            "this" => Self::This,
            _ => return None,
        };
        Some(primitive)
    }

    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Void => "void",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Never => "never",
            Self::Bigint => "bigint",
            Self::Symbol => "symbol",
            Self::Object => "object",
            Self::This => "this",
        }
    }
}

/// Prefix operators applied to a single operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeOperator {
    Keyof,
    Typeof,
    Readonly,
    Unique,
}

impl TypeOperator {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Keyof => "keyof",
            Self::Typeof => "typeof",
            Self::Readonly => "readonly",
            Self::Unique => "unique",
        }
    }
}

/// `readonly` / `?` modifier on a mapped type, with its optional sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Modifier {
    Plain,
    Plus,
    Minus,
}

impl Modifier {
    pub(crate) fn sign(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TupleElement {
    pub label: Option<String>,
    pub optional: bool,
    pub rest: bool,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TemplatePart {
    Text(String),
    Type(TypeNode),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MappedType {
    pub readonly: Option<Modifier>,
    pub param: String,
    pub constraint: TypeNode,
    pub name_type: Option<TypeNode>,
    pub optional: Option<Modifier>,
    pub value: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TypeParam {
    pub is_const: bool,
    pub name: String,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

/// Parameter inside a function type or member signature.
/// Rest parameters keep `...` in `name`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParamType {
    pub name: String,
    pub optional: bool,
    pub ty: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CallSignature {
    pub type_params: Vec<TypeParam>,
    pub params: Vec<ParamType>,
    pub return_type: Option<TypeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionTypeKind {
    Plain,
    Constructor { is_abstract: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FunctionType {
    pub kind: FunctionTypeKind,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<ParamType>,
    pub return_type: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ObjectMember {
    Property {
        readonly: bool,
        name: String,
        optional: bool,
        ty: Option<TypeNode>,
    },
    Method {
        name: String,
        optional: bool,
        signature: CallSignature,
    },
    Call(CallSignature),
    Construct(CallSignature),
    Index {
        readonly: bool,
        param: String,
        key: TypeNode,
        value: Option<TypeNode>,
    },
    Unhandled(String),
}

/// Internal type expression tree. Every node is owned by its parent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TypeNode {
    Primitive(Primitive),
    /// String, number, boolean and negative number literals, as written
    Literal(String),
    Reference {
        name: String,
        args: Vec<TypeNode>,
    },
    Array(Box<TypeNode>),
    Parenthesized(Box<TypeNode>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    Tuple(Vec<TupleElement>),
    TemplateLiteral(Vec<TemplatePart>),
    Conditional {
        check: Box<TypeNode>,
        extends: Box<TypeNode>,
        true_type: Box<TypeNode>,
        false_type: Box<TypeNode>,
    },
    Infer {
        name: String,
        constraint: Option<Box<TypeNode>>,
    },
    Mapped(Box<MappedType>),
    IndexedAccess {
        object: Box<TypeNode>,
        indices: Vec<TypeNode>,
    },
    Operator {
        op: TypeOperator,
        operand: Box<TypeNode>,
    },
    Function(Box<FunctionType>),
    Object(Vec<ObjectMember>),
    Import {
        /// Module specifier literal including its quotes
        module: String,
        qualifier: Vec<String>,
        args: Vec<TypeNode>,
    },
    Predicate {
        asserts: bool,
        subject: String,
        target: Option<Box<TypeNode>>,
    },
    /// Best-effort fallback: whitespace-collapsed source text
    Unhandled {
        kind: String,
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::parser::parse_source;
    use crate::core::ast::JsLanguageVariant;
    use std::path::Path;

    /// Serialize the right-hand side of `type T = ...;`
    fn serialize_alias(text: &str) -> (String, Vec<ExtractionWarning>) {
        let source = format!("type T = {text};");
        let ast = parse_source(&source, Path::new("t.ts"), JsLanguageVariant::TypeScript).unwrap();
        let alias = ast.tree.root_node().named_child(0).unwrap();
        let value = alias.child_by_field_name("value").unwrap();
        let mut warnings = Vec::new();
        let text = serialize_type(&value, &ast.source, &mut warnings);
        (text.into_string(), warnings)
    }

    #[test]
    fn test_primitive_keywords_round_trip() {
        for keyword in [
            "string",
            "number",
            "boolean",
            "any",
            "unknown",
            "void",
            "null",
            "undefined",
            "never",
            "bigint",
            "symbol",
            "object",
        ] {
            let (text, warnings) = serialize_alias(keyword);
            assert_eq!(text, keyword);
            assert!(warnings.is_empty(), "{keyword}: {warnings:?}");
        }
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let (text, _) = serialize_alias("Map<  string ,Array< number >>|null");
        assert_eq!(text, "Map<string, Array<number>> | null");
    }

    #[test]
    fn test_leading_union_pipe_dropped() {
        let (text, _) = serialize_alias("\n  | 'a'\n  | 'b'");
        assert_eq!(text, "'a' | 'b'");
    }

    #[test]
    fn test_type_parameters_serialized() {
        let source = "function f<T extends object, K extends keyof T = keyof T>() {}";
        let ast = parse_source(source, Path::new("t.ts"), JsLanguageVariant::TypeScript).unwrap();
        let func = ast.tree.root_node().named_child(0).unwrap();
        let params = func.child_by_field_name("type_parameters").unwrap();
        let mut warnings = Vec::new();
        let text = serialize_type_parameters(&params, &ast.source, &mut warnings).unwrap();
        assert_eq!(text, "<T extends object, K extends keyof T = keyof T>");
    }

    #[test]
    fn test_serialize_annotation_absent() {
        let mut warnings = Vec::new();
        assert!(serialize_annotation(None, "", &mut warnings).is_none());
    }
}
