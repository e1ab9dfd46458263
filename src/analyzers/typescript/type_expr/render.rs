//! Canonical text rendering for [`TypeNode`] trees

use super::{
    CallSignature, FunctionType, FunctionTypeKind, MappedType, ObjectMember, ParamType,
    TemplatePart, TupleElement, TypeNode, TypeParam,
};
use std::fmt::{self, Display, Formatter, Write};

impl Display for TypeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Primitive(primitive) => f.write_str(primitive.keyword()),
            TypeNode::Literal(text) => f.write_str(text),
            TypeNode::Reference { name, args } => {
                f.write_str(name)?;
                write_type_arguments(f, args)
            }
            TypeNode::Array(element) => write!(f, "{element}[]"),
            TypeNode::Parenthesized(inner) => write!(f, "({inner})"),
            TypeNode::Union(members) => write_separated(f, members, " | "),
            TypeNode::Intersection(members) => write_separated(f, members, " & "),
            TypeNode::Tuple(elements) => {
                f.write_char('[')?;
                write_separated(f, elements, ", ")?;
                f.write_char(']')
            }
            TypeNode::TemplateLiteral(parts) => {
                f.write_char('`')?;
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => f.write_str(text)?,
                        TemplatePart::Type(ty) => write!(f, "${{{ty}}}")?,
                    }
                }
                f.write_char('`')
            }
            TypeNode::Conditional {
                check,
                extends,
                true_type,
                false_type,
            } => write!(f, "{check} extends {extends} ? {true_type} : {false_type}"),
            TypeNode::Infer { name, constraint } => {
                write!(f, "infer {name}")?;
                if let Some(constraint) = constraint {
                    write!(f, " extends {constraint}")?;
                }
                Ok(())
            }
            TypeNode::Mapped(mapped) => mapped.fmt(f),
            TypeNode::IndexedAccess { object, indices } => {
                object.fmt(f)?;
                for index in indices {
                    write!(f, "[{index}]")?;
                }
                Ok(())
            }
            TypeNode::Operator { op, operand } => write!(f, "{} {operand}", op.keyword()),
            TypeNode::Function(function) => function.fmt(f),
            TypeNode::Object(members) => {
                if members.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                write_separated(f, members, "; ")?;
                f.write_str(" }")
            }
            TypeNode::Import {
                module,
                qualifier,
                args,
            } => {
                write!(f, "import({module})")?;
                for segment in qualifier {
                    write!(f, ".{segment}")?;
                }
                write_type_arguments(f, args)
            }
            TypeNode::Predicate {
                asserts,
                subject,
                target,
            } => {
                if *asserts {
                    f.write_str("asserts ")?;
                }
                f.write_str(subject)?;
                if let Some(target) = target {
                    write!(f, " is {target}")?;
                }
                Ok(())
            }
            TypeNode::Unhandled { text, .. } => f.write_str(text),
        }
    }
}

impl Display for TupleElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.rest {
            f.write_str("...")?;
        }
        match &self.label {
            Some(label) => {
                f.write_str(label)?;
                if self.optional {
                    f.write_char('?')?;
                }
                write!(f, ": {}", self.ty)
            }
            None => {
                self.ty.fmt(f)?;
                if self.optional {
                    f.write_char('?')?;
                }
                Ok(())
            }
        }
    }
}

impl Display for MappedType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        if let Some(readonly) = self.readonly {
            write!(f, "{}readonly ", readonly.sign())?;
        }
        write!(f, "[{} in {}", self.param, self.constraint)?;
        if let Some(name_type) = &self.name_type {
            write!(f, " as {name_type}")?;
        }
        f.write_char(']')?;
        if let Some(optional) = self.optional {
            write!(f, "{}?", optional.sign())?;
        }
        if let Some(value) = &self.value {
            write!(f, ": {value}")?;
        }
        f.write_str(" }")
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let FunctionTypeKind::Constructor { is_abstract } = self.kind {
            if is_abstract {
                f.write_str("abstract ")?;
            }
            f.write_str("new ")?;
        }
        write_type_parameters(f, &self.type_params)?;
        write_parameters(f, &self.params)?;
        write!(f, " => {}", self.return_type)
    }
}

impl Display for ObjectMember {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ObjectMember::Property {
                readonly,
                name,
                optional,
                ty,
            } => {
                if *readonly {
                    f.write_str("readonly ")?;
                }
                f.write_str(name)?;
                if *optional {
                    f.write_char('?')?;
                }
                if let Some(ty) = ty {
                    write!(f, ": {ty}")?;
                }
                Ok(())
            }
            ObjectMember::Method {
                name,
                optional,
                signature,
            } => {
                f.write_str(name)?;
                if *optional {
                    f.write_char('?')?;
                }
                signature.fmt(f)
            }
            ObjectMember::Call(signature) => signature.fmt(f),
            ObjectMember::Construct(signature) => {
                f.write_str("new ")?;
                signature.fmt(f)
            }
            ObjectMember::Index {
                readonly,
                param,
                key,
                value,
            } => {
                if *readonly {
                    f.write_str("readonly ")?;
                }
                write!(f, "[{param}: {key}]")?;
                if let Some(value) = value {
                    write!(f, ": {value}")?;
                }
                Ok(())
            }
            ObjectMember::Unhandled(text) => f.write_str(text),
        }
    }
}

impl Display for CallSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_type_parameters(f, &self.type_params)?;
        write_parameters(f, &self.params)?;
        if let Some(return_type) = &self.return_type {
            write!(f, ": {return_type}")?;
        }
        Ok(())
    }
}

impl Display for ParamType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.optional {
            f.write_char('?')?;
        }
        if let Some(ty) = &self.ty {
            write!(f, ": {ty}")?;
        }
        Ok(())
    }
}

impl Display for TypeParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_const {
            f.write_str("const ")?;
        }
        f.write_str(&self.name)?;
        if let Some(constraint) = &self.constraint {
            write!(f, " extends {constraint}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// `<A, B extends C>`; empty lists render as nothing
pub(crate) fn type_parameter_list(params: &[TypeParam]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_type_parameters(&mut out, params);
    out
}

fn write_separated<W: Write, T: Display>(out: &mut W, items: &[T], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.write_str(separator)?;
        }
        write!(out, "{item}")?;
    }
    Ok(())
}

fn write_type_arguments<W: Write>(out: &mut W, args: &[TypeNode]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    out.write_char('<')?;
    write_separated(out, args, ", ")?;
    out.write_char('>')
}

fn write_type_parameters<W: Write>(out: &mut W, params: &[TypeParam]) -> fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    out.write_char('<')?;
    write_separated(out, params, ", ")?;
    out.write_char('>')
}

fn write_parameters<W: Write>(out: &mut W, params: &[ParamType]) -> fmt::Result {
    out.write_char('(')?;
    write_separated(out, params, ", ")?;
    out.write_char(')')
}
