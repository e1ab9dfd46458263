//! Human-readable signature listing

use crate::analyzers::typescript::{FunctionSignature, ModuleSignatures, SignatureKind};
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct TextWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_module(&mut self, module: &ModuleSignatures) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", module.id)?;
        if module.signatures.is_empty() {
            writeln!(self.writer, "  (no exported functions)")?;
        }
        for signature in &module.signatures {
            writeln!(
                self.writer,
                "  {:>4}  {}  [{}]",
                signature.line,
                format_signature(signature),
                kind_label(signature.kind)
            )?;
        }
        for warning in &module.warnings {
            writeln!(self.writer, "  warning: {warning}")?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_modules(&mut self, modules: &[ModuleSignatures]) -> anyhow::Result<()> {
        for (i, module) in modules.iter().enumerate() {
            if i > 0 {
                writeln!(self.writer)?;
            }
            self.write_module(module)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// `async getTodos(limit?: number = 10): Promise<Todo[]>`, source defaults kept
fn format_signature(signature: &FunctionSignature) -> String {
    let params: Vec<String> = signature
        .params
        .iter()
        .map(|param| {
            let mut text = param.name.clone();
            if param.is_optional && !param.is_rest && param.default_text.is_none() {
                text.push('?');
            }
            if let Some(ty) = &param.ty {
                text.push_str(": ");
                text.push_str(ty);
            }
            if let Some(default) = &param.default_text {
                text.push_str(" = ");
                text.push_str(default);
            }
            text
        })
        .collect();

    let mut out = String::new();
    if signature.is_async {
        out.push_str("async ");
    }
    out.push_str(&signature.name);
    if let Some(type_params) = &signature.type_params {
        out.push_str(type_params);
    }
    out.push('(');
    out.push_str(&params.join(", "));
    out.push(')');
    if let Some(return_type) = &signature.return_type {
        out.push_str(": ");
        out.push_str(return_type);
    }
    out
}

fn kind_label(kind: SignatureKind) -> &'static str {
    match kind {
        SignatureKind::Declaration => "declaration",
        SignatureKind::ArrowBinding => "arrow-binding",
        SignatureKind::RenamedExport => "renamed-export",
        SignatureKind::Default => "default",
    }
}
