//! Metadata document output.
//!
//! The wire document is the two top-level collections, `functions` and
//! `enums`; diagnostics and associations stay on the in-memory result
//! for the caller. Field omission is part of the contract and is
//! handled entirely by the model types.

use crate::core::types::{EnumMetadata, ExtractionResult, FunctionMetadata};
use serde::Serialize;
use std::io::Write;

/// Borrowed wire view of an extraction result.
#[derive(Debug, Serialize)]
pub struct MetadataDocument<'a> {
    pub functions: &'a [FunctionMetadata],
    pub enums: &'a [EnumMetadata],
}

impl<'a> From<&'a ExtractionResult> for MetadataDocument<'a> {
    fn from(result: &'a ExtractionResult) -> Self {
        Self {
            functions: &result.functions,
            enums: &result.enums,
        }
    }
}

/// Pretty-printed JSON rendering of the metadata document.
pub fn to_json_string(result: &ExtractionResult) -> crate::core::Result<String> {
    Ok(serde_json::to_string_pretty(&MetadataDocument::from(
        result,
    ))?)
}

pub struct MetadataWriter<W: Write> {
    writer: W,
}

impl<W: Write> MetadataWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_document(&mut self, result: &ExtractionResult) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&MetadataDocument::from(result))?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
