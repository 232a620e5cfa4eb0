//! HTML format implementation
//!
//! Read-only: HTML is what Jira returns for rendered issue fields, and what Confluence
//! storage markup becomes once its macros are rewritten. It is turned into Markdown for
//! display, or into plain text.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for parsing:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project, tolerant of the
//!   unbalanced and namespaced (`ac:`, `ri:`) markup found in storage documents
//! - `markup5ever_rcdom`: Reference-counted DOM tree that the converter walks
//!
//! # Element Mapping Table
//!
//! | HTML                     | Markdown                        |
//! |--------------------------|---------------------------------|
//! | `h1`–`h6`                | `#` … `######`                  |
//! | `p`                      | Paragraph                       |
//! | `strong`, `b`            | `**x**`                         |
//! | `em`, `i`                | `*x*`                           |
//! | `del`, `s`, `strike`     | `~~x~~`                         |
//! | `code`                   | `` `x` ``                       |
//! | `pre` (`language-X`)     | Fenced block with info string   |
//! | `a`, `img`               | `[text](href)`, `![alt](src)`   |
//! | `ul`, `ol` (`start`)     | `-` / `N.` items, nested indent |
//! | `blockquote`             | `> ` prefixed lines             |
//! | `table`                  | GFM pipe table                  |
//! | `br`, `hr`               | Hard break, `---`               |
//! | `script`, `style`, etc.  | Dropped                         |
//!
//! Paragraph lines that would read back as a heading or list item get a leading backslash.

pub mod converter;
pub mod strip;

use crate::adf::Document;
use crate::error::ConversionError;
use crate::format::Format;
use crate::formats::markdown::parser::parse_markdown_to_blocks;

pub use converter::html_to_markdown;
pub use strip::strip_html;

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML (import only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConversionError> {
        let markdown = html_to_markdown(source)?;
        Ok(Document::new(parse_markdown_to_blocks(&markdown)))
    }

    fn to_markdown(&self, source: &str) -> Result<String, ConversionError> {
        html_to_markdown(source)
    }
}
