//! ADF JSON format implementation
//!
//! Reads and writes the wire JSON sent to and received from Jira. Output is pretty-printed.
//! See [`crate::adf::wire`] for how unknown node kinds are read.

use crate::adf::Document;
use crate::error::ConversionError;
use crate::format::Format;

/// Format implementation for ADF JSON
#[derive(Default)]
pub struct AdfFormat;

impl Format for AdfFormat {
    fn name(&self) -> &str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format (JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "adf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConversionError> {
        serde_json::from_str(source).map_err(|e| ConversionError::ParseError(e.to_string()))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| ConversionError::SerializationError(e.to_string()))
    }
}
