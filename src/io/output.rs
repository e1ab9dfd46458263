use crate::analyzers::typescript::ModuleSignatures;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::writers::{JsonWriter, TextWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Signature records as pretty-printed JSON
    #[default]
    Json,
    /// Human-readable listing
    Text,
}

pub trait OutputWriter {
    fn write_modules(&mut self, modules: &[ModuleSignatures]) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(format: OutputFormat, writer: Box<dyn Write + 'a>) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Text => Box::new(TextWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::extract_module;

    #[test]
    fn test_create_writer_json() {
        let modules = vec![extract_module("a.ts", "export function a() {}")];
        let mut buffer = Vec::new();
        create_writer(OutputFormat::Json, Box::new(&mut buffer))
            .write_modules(&modules)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["id"], "a.ts");
        assert_eq!(value[0]["signatures"][0]["name"], "a");
    }

    #[test]
    fn test_create_writer_text() {
        let modules = vec![extract_module("a.ts", "export function a() {}")];
        let mut buffer = Vec::new();
        create_writer(OutputFormat::Text, Box::new(&mut buffer))
            .write_modules(&modules)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("a.ts\n"));
    }
}
