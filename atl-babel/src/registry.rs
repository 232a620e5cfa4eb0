//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::adf::Document;
use crate::error::ConversionError;
use crate::format::Format;
use std::collections::HashMap;

/// Registry of rich-text formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let adf = registry.convert("# Title", "markdown", "adf")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, ConversionError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| ConversionError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, ConversionError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(ConversionError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, ConversionError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(ConversionError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize(doc)
    }

    /// Convert source text from one format to another.
    ///
    /// Markdown targets use the source format's own Markdown path, so HTML and storage
    /// constructs the ADF tree cannot hold (tables, quotes, macros) survive.
    pub fn convert(&self, source: &str, from: &str, to: &str) -> Result<String, ConversionError> {
        let target = self.get(to)?;
        let origin = self.get(from)?;
        if target.name() == "markdown" {
            return origin.to_markdown(source);
        }
        let doc = self.parse(source, from)?;
        self.serialize(&doc, to)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::adf::AdfFormat);
        registry.register(crate::formats::storage::StorageFormat);
        registry.register(crate::formats::html::HtmlFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
