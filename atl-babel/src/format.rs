//! Format trait definition
//!
//! This module defines the Format trait that all format implementations implement.
//! The trait provides a uniform interface for parsing into and serializing from the ADF tree,
//! plus a direct path to Markdown for formats that are only ever read for display.

use crate::adf::Document;
use crate::error::ConversionError;
use crate::formats::markdown::serializer::serialize_to_markdown;

/// Trait for rich-text formats
///
/// Implementors provide conversion between a string representation and the ADF [`Document`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct WikiFormat;
///
/// impl Format for WikiFormat {
///     fn name(&self) -> &str {
///         "wiki"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, ConversionError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "adf", "storage")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    fn parse(&self, _source: &str) -> Result<Document, ConversionError> {
        Err(ConversionError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into source text
    fn serialize(&self, _doc: &Document) -> Result<String, ConversionError> {
        Err(ConversionError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Render source text as Markdown.
    ///
    /// The default goes through the ADF tree. Formats richer than ADF (HTML, Confluence
    /// storage) override this to keep tables, quotes and macros that the tree cannot hold.
    fn to_markdown(&self, source: &str) -> Result<String, ConversionError> {
        let doc = self.parse(source)?;
        serialize_to_markdown(&doc)
    }
}
