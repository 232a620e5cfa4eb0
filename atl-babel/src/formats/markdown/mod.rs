//! Markdown format implementation
//!
//! This module implements bidirectional conversion between Markdown and ADF.
//!
//! # Library Choice
//!
//! Import is hand-rolled: issue descriptions are typed by people in a terminal, and the
//! accepted grammar must stay small and predictable (see [`parser`] and [`inline`]). Export
//! builds a `comrak` AST and lets comrak's CommonMark renderer handle escaping.
//!
//! # Element Mapping Table
//!
//! | ADF Node      | Markdown Equivalent     | Import Notes                               |
//! |---------------|-------------------------|--------------------------------------------|
//! | heading       | `#` … `######`          | Needs whitespace after the hashes          |
//! | paragraph     | Text lines              | Consecutive lines join with one space      |
//! | bulletList    | `- item` / `* item`     | Flat only, blank line ends the list        |
//! | orderedList   | `1. item`               | Numbering is not preserved                 |
//! | codeBlock     | ```` ```lang ````       | Raw lines, unterminated fence is kept      |
//! | strong        | `**x**`                 |                                            |
//! | em            | `*x*` / `_x_`           | Delimiter must not touch another delimiter |
//! | strong + em   | `***x***`               |                                            |
//! | code          | `` `x` ``               | Content is never rescanned                 |
//! | link          | `[text](href)`          |                                            |
//!
//! # Lossy Conversions
//!
//! - Nested lists flatten into the enclosing item's text
//! - Ordered list start numbers reset to 1
//! - Block quotes, tables and rules import as plain paragraph text

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::adf::Document;
use crate::error::ConversionError;
use crate::format::Format;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown (headings, paragraphs, lists, fenced code, inline marks)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConversionError> {
        Ok(Document::new(parser::parse_markdown_to_blocks(source)))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConversionError> {
        serializer::serialize_to_markdown(doc)
    }

    fn to_markdown(&self, source: &str) -> Result<String, ConversionError> {
        Ok(source.to_string())
    }
}
