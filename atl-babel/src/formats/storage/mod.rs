//! Confluence storage format implementation
//!
//! Storage format is the XHTML dialect Confluence stores pages in: HTML plus `ac:` macro
//! elements and `ri:` resource references. It is only ever read, and is converted to
//! Markdown in three passes:
//!
//! 1. [`macros`]: rewrite macros and links into plain HTML or placeholders
//! 2. [`crate::formats::html::converter`]: generic HTML → Markdown
//! 3. [`postprocess`]: expand placeholders, squeeze blank lines, trim
//!
//! | Macro                         | Markdown                                        |
//! |-------------------------------|-------------------------------------------------|
//! | `toc`                         | `[Table of Contents]`                           |
//! | `drawio`                      | `[Diagram: name]` or `[Diagram]`                |
//! | `code`                        | Fenced block with the `language` parameter      |
//! | `info`, `warning`, `note`, `tip` | `> **Label:** text`                          |
//! | `expand`                      | `<details>` block with the `title` parameter    |
//! | `ac:link`                     | Link text, page title, or `[Link]`              |
//! | anything else                 | `[Confluence Macro: name]`                      |
//!
//! Only the HTML pass can fail; the regex passes always produce output.

pub mod macros;
pub mod postprocess;

use crate::adf::Document;
use crate::error::ConversionError;
use crate::format::Format;
use crate::formats::html::html_to_markdown;
use crate::formats::markdown::parser::parse_markdown_to_blocks;

/// Convert Confluence storage markup to Markdown. Blank input yields an empty string.
pub fn storage_to_markdown(storage: &str) -> Result<String, ConversionError> {
    if storage.trim().is_empty() {
        return Ok(String::new());
    }
    let html = macros::rewrite_macros(storage);
    let markdown = html_to_markdown(&html)?;
    Ok(postprocess::finish(&markdown))
}

/// Format implementation for Confluence storage markup
#[derive(Default)]
pub struct StorageFormat;

impl Format for StorageFormat {
    fn name(&self) -> &str {
        "storage"
    }

    fn description(&self) -> &str {
        "Confluence storage format (import only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xhtml", "storage"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConversionError> {
        let markdown = storage_to_markdown(source)?;
        Ok(Document::new(parse_markdown_to_blocks(&markdown)))
    }

    fn to_markdown(&self, source: &str) -> Result<String, ConversionError> {
        storage_to_markdown(source)
    }
}
