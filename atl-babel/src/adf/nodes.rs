//! Core data structures for the document tree.

use serde::{Deserialize, Serialize};

/// The root of an ADF document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "super::wire::WireDocument", try_from = "super::wire::WireDocument")]
pub struct Document {
    pub content: Vec<Block>,
}

impl Document {
    pub fn new(content: Vec<Block>) -> Self {
        Document { content }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Block-level nodes allowed directly under the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Text>),
    Heading { level: u8, content: Vec<Text> },
    BulletList(Vec<ListItem>),
    OrderedList(Vec<ListItem>),
    /// Raw lines joined by `\n`; an empty string means the block has no content node.
    CodeBlock {
        language: Option<String>,
        text: String,
    },
}

/// A list item, wrapping a single paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub content: Vec<Text>,
}

impl ListItem {
    pub fn new(content: Vec<Text>) -> Self {
        ListItem { content }
    }
}

/// A run of text sharing the same set of marks.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Text {
            text: text.into(),
            marks,
        }
    }

    pub fn has_mark(&self, kind: &str) -> bool {
        self.marks.iter().any(|mark| mark.kind() == kind)
    }

    pub fn link_href(&self) -> Option<&str> {
        self.marks.iter().find_map(|mark| match mark {
            Mark::Link { href } => Some(href.as_str()),
            _ => None,
        })
    }
}

/// Inline styling applied to a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Em,
    Code,
    Link { href: String },
}

impl Mark {
    /// Wire name of the mark.
    pub fn kind(&self) -> &'static str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
        }
    }
}
