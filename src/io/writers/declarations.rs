//! Declaration document emitter
//!
//! Renders extracted signatures as a `.d.ts`-style document: one
//! `declare module "<id>"` block per module, then one `declare global` block
//! nesting every module under `namespace <Namespace>.<ModuleKey>`.
//!
//! Exports published under a string-literal name that is not an identifier
//! (`export { f as "two words" }`) cannot be declared as functions. They are
//! left out of the document and logged.
//!
//! Return types of async functions are wrapped in `Promise<...>` unless the
//! serialized text already starts with `Promise<`. This is a textual check:
//! an alias that resolves to a promise (`type Pending = Promise<void>`) is
//! wrapped again.

use crate::analyzers::typescript::{FunctionSignature, ModuleSignatures, Parameter};
use crate::io::output::OutputWriter;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::Write;

pub const DEFAULT_NAMESPACE: &str = "ServerActions";
pub const DEFAULT_INDENT: usize = 2;

/// Name rendered for a `"default"` export inside the global namespace
const DEFAULT_EXPORT_ALIAS: &str = "_default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub namespace: String,
    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// Render the full declaration document
pub fn render_declarations(modules: &[ModuleSignatures], options: &EmitOptions) -> String {
    let mut out = String::new();

    for module in modules {
        for signature in module.signatures.iter().filter(|s| !is_declarable(s)) {
            log::warn!(
                "{}: export `{}` is not a valid identifier, leaving it out of the declarations",
                module.id,
                signature.name
            );
        }
    }

    for module in modules {
        render_module_block(&mut out, module, options);
        out.push('\n');
    }
    render_global_block(&mut out, modules, options);

    out
}

fn render_module_block(out: &mut String, module: &ModuleSignatures, options: &EmitOptions) {
    let quoted = quote_module_id(&module.id);
    let signatures = declarable(module);
    if signatures.is_empty() {
        let _ = writeln!(out, "declare module {quoted} {{}}");
        return;
    }

    let _ = writeln!(out, "declare module {quoted} {{");
    let pad = " ".repeat(options.indent);
    for signature in signatures {
        write_doc(out, signature.doc.as_deref(), &pad);
        let head = if signature.is_default || signature.name == "default" {
            "export default function ".to_string()
        } else {
            format!("export function {}", signature.name)
        };
        let _ = writeln!(out, "{pad}{head}{};", render_call_signature(signature));
    }
    out.push_str("}\n");
}

fn render_global_block(out: &mut String, modules: &[ModuleSignatures], options: &EmitOptions) {
    let pad = |level: usize| " ".repeat(options.indent * level);

    out.push_str("declare global {\n");
    let _ = writeln!(out, "{}namespace {} {{", pad(1), options.namespace);
    for module in modules {
        let key = namespace_key(&module.id);
        let signatures = declarable(module);
        if signatures.is_empty() {
            let _ = writeln!(out, "{}namespace {key} {{}}", pad(2));
            continue;
        }
        let _ = writeln!(out, "{}namespace {key} {{", pad(2));
        for signature in signatures {
            let name = if signature.name == "default" {
                DEFAULT_EXPORT_ALIAS
            } else {
                signature.name.as_str()
            };
            write_doc(out, signature.doc.as_deref(), &pad(3));
            let _ = writeln!(
                out,
                "{}function {name}{};",
                pad(3),
                render_call_signature(signature)
            );
        }
        let _ = writeln!(out, "{}}}", pad(2));
    }
    let _ = writeln!(out, "{}}}", pad(1));
    out.push_str("}\n");
}

fn declarable(module: &ModuleSignatures) -> Vec<&FunctionSignature> {
    module.signatures.iter().filter(|s| is_declarable(s)).collect()
}

fn is_declarable(signature: &FunctionSignature) -> bool {
    signature.name == "default" || is_identifier(&signature.name)
}

/// ASCII identifier: letter, `_` or `$`, then alphanumerics, `_` or `$`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `<T>(a: string, b?: number): Promise<void>`
pub fn render_call_signature(signature: &FunctionSignature) -> String {
    let params: Vec<String> = signature.params.iter().map(render_parameter).collect();
    format!(
        "{}({}): {}",
        signature.type_params.as_deref().unwrap_or(""),
        params.join(", "),
        emitted_return_type(signature)
    )
}

/// Parameter as written in a declaration; defaults are dropped and a
/// missing type becomes `any`
pub fn render_parameter(param: &Parameter) -> String {
    let ty = param.ty.as_deref().unwrap_or("any");
    let marker = if param.is_optional && !param.is_rest {
        "?"
    } else {
        ""
    };
    format!("{}{marker}: {ty}", param.name)
}

/// Return type used in the document. The signature itself is not changed.
pub fn emitted_return_type(signature: &FunctionSignature) -> Cow<'_, str> {
    match (signature.return_type.as_deref(), signature.is_async) {
        (None, false) => Cow::Borrowed("any"),
        (None, true) => Cow::Borrowed("Promise<any>"),
        (Some(ty), true) if !ty.starts_with("Promise<") => Cow::Owned(format!("Promise<{ty}>")),
        (Some(ty), _) => Cow::Borrowed(ty),
    }
}

/// Namespace key for a module id: `app/todo-actions.ts` → `AppTodoActions`
pub fn namespace_key(id: &str) -> String {
    let stem = strip_extension(id);
    let mut key: String = stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(capitalize)
        .collect();

    if key.is_empty() || key.starts_with(|c: char| c.is_ascii_digit()) {
        key.insert(0, '_');
    }
    key
}

/// Drop the extension of the last path segment only
fn strip_extension(id: &str) -> &str {
    let file_start = id.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match id[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &id[..file_start + dot],
        _ => id,
    }
}

fn capitalize(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// JSON string escaping is a valid TypeScript string literal
fn quote_module_id(id: &str) -> String {
    serde_json::to_string(id).unwrap_or_else(|_| format!("\"{id}\""))
}

/// Re-indent a verbatim comment block under `pad`
fn write_doc(out: &mut String, doc: Option<&str>, pad: &str) {
    let Some(doc) = doc else {
        return;
    };
    for line in doc.lines() {
        let line = line.trim();
        let continuation = if line.starts_with('*') { " " } else { "" };
        let _ = writeln!(out, "{pad}{continuation}{line}");
    }
}

/// Writes the declaration document for a set of modules
pub struct DeclarationWriter<W: Write> {
    writer: W,
    options: EmitOptions,
}

impl<W: Write> DeclarationWriter<W> {
    pub fn new(writer: W, options: EmitOptions) -> Self {
        Self { writer, options }
    }
}

impl<W: Write> OutputWriter for DeclarationWriter<W> {
    fn write_modules(&mut self, modules: &[ModuleSignatures]) -> anyhow::Result<()> {
        let document = render_declarations(modules, &self.options);
        self.writer.write_all(document.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
