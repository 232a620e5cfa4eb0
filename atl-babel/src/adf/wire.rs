//! JSON wire mapping for ADF documents.
//!
//! Outbound documents are always well-formed: optional members are omitted when empty.
//! Inbound documents (issue bodies fetched from Jira, `.json` files fed to `convert`) may use
//! node kinds this crate does not model. Those degrade to their text content, and marks other
//! than strong, em, code and link are dropped.

use super::nodes::{Block, Document, ListItem, Mark, Text};
use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DOC_TYPE: &str = "doc";
pub const DOC_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDocument {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub content: Vec<WireNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<WireNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<WireMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
}

fn default_version() -> u32 {
    DOC_VERSION
}

impl WireNode {
    fn container(kind: &str, content: Vec<WireNode>) -> Self {
        WireNode {
            kind: kind.to_string(),
            attrs: None,
            content,
            text: None,
            marks: Vec::new(),
        }
    }

    fn with_attr(mut self, key: &str, value: Value) -> Self {
        self.attrs
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value);
        self
    }

    fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }
}

// Model → wire

impl From<Document> for WireDocument {
    fn from(doc: Document) -> Self {
        WireDocument {
            kind: DOC_TYPE.to_string(),
            version: DOC_VERSION,
            content: doc.content.into_iter().map(block_to_wire).collect(),
        }
    }
}

fn block_to_wire(block: Block) -> WireNode {
    match block {
        Block::Paragraph(content) => paragraph_to_wire(content),
        Block::Heading { level, content } => {
            WireNode::container("heading", inlines_to_wire(content))
                .with_attr("level", Value::from(level))
        }
        Block::BulletList(items) => WireNode::container("bulletList", items_to_wire(items)),
        Block::OrderedList(items) => WireNode::container("orderedList", items_to_wire(items)),
        Block::CodeBlock { language, text } => {
            let content = if text.is_empty() {
                Vec::new()
            } else {
                vec![text_to_wire(Text::plain(text))]
            };
            let node = WireNode::container("codeBlock", content);
            match language {
                Some(language) if !language.is_empty() => {
                    node.with_attr("language", Value::from(language))
                }
                _ => node,
            }
        }
    }
}

fn paragraph_to_wire(content: Vec<Text>) -> WireNode {
    WireNode::container("paragraph", inlines_to_wire(content))
}

fn items_to_wire(items: Vec<ListItem>) -> Vec<WireNode> {
    items
        .into_iter()
        .map(|item| WireNode::container("listItem", vec![paragraph_to_wire(item.content)]))
        .collect()
}

fn inlines_to_wire(content: Vec<Text>) -> Vec<WireNode> {
    content.into_iter().map(text_to_wire).collect()
}

fn text_to_wire(text: Text) -> WireNode {
    WireNode {
        kind: "text".to_string(),
        attrs: None,
        content: Vec::new(),
        text: Some(text.text),
        marks: text.marks.into_iter().map(mark_to_wire).collect(),
    }
}

fn mark_to_wire(mark: Mark) -> WireMark {
    let attrs = match &mark {
        Mark::Link { href } => {
            let mut attrs = Map::new();
            attrs.insert("href".to_string(), Value::from(href.as_str()));
            Some(attrs)
        }
        _ => None,
    };
    WireMark {
        kind: mark.kind().to_string(),
        attrs,
    }
}

// Wire → model

impl TryFrom<WireDocument> for Document {
    type Error = ConversionError;

    fn try_from(wire: WireDocument) -> Result<Self, Self::Error> {
        if wire.kind != DOC_TYPE {
            return Err(ConversionError::ParseError(format!(
                "expected root node of type '{DOC_TYPE}', found '{}'",
                wire.kind
            )));
        }
        let mut content = Vec::new();
        for node in &wire.content {
            wire_to_blocks(node, &mut content);
        }
        Ok(Document { content })
    }
}

fn wire_to_blocks(node: &WireNode, out: &mut Vec<Block>) {
    match node.kind.as_str() {
        "paragraph" => out.push(Block::Paragraph(wire_to_inlines(&node.content))),
        "heading" => {
            let level = node
                .attr("level")
                .and_then(Value::as_u64)
                .unwrap_or(1)
                .clamp(1, 6) as u8;
            out.push(Block::Heading {
                level,
                content: wire_to_inlines(&node.content),
            });
        }
        "bulletList" => out.push(Block::BulletList(wire_to_items(&node.content))),
        "orderedList" => out.push(Block::OrderedList(wire_to_items(&node.content))),
        "codeBlock" => {
            let language = node
                .attr("language")
                .and_then(Value::as_str)
                .filter(|language| !language.is_empty())
                .map(str::to_string);
            out.push(Block::CodeBlock {
                language,
                text: plain_text(node),
            });
        }
        _ if node.content.iter().any(is_block) => {
            for child in &node.content {
                wire_to_blocks(child, out);
            }
        }
        _ => {
            let content = wire_to_inlines(std::slice::from_ref(node));
            if !content.is_empty() {
                out.push(Block::Paragraph(content));
            }
        }
    }
}

fn is_block(node: &WireNode) -> bool {
    !matches!(
        node.kind.as_str(),
        "text" | "hardBreak" | "mention" | "emoji" | "inlineCard" | "date" | "status"
    )
}

fn wire_to_items(nodes: &[WireNode]) -> Vec<ListItem> {
    nodes
        .iter()
        .map(|node| {
            let mut content = Vec::new();
            collect_inlines(&node.content, &mut content);
            ListItem { content }
        })
        .collect()
}

fn wire_to_inlines(nodes: &[WireNode]) -> Vec<Text> {
    let mut content = Vec::new();
    collect_inlines(nodes, &mut content);
    content
}

fn collect_inlines(nodes: &[WireNode], out: &mut Vec<Text>) {
    for node in nodes {
        match node.kind.as_str() {
            "text" => {
                if let Some(text) = node.text.as_deref().filter(|text| !text.is_empty()) {
                    out.push(Text {
                        text: text.to_string(),
                        marks: wire_to_marks(&node.marks),
                    });
                }
            }
            "hardBreak" => out.push(Text::plain("\n")),
            "mention" | "emoji" | "inlineCard" | "date" | "status" => {
                let label = ["text", "shortName", "url", "timestamp"]
                    .iter()
                    .find_map(|key| node.attr(key).and_then(Value::as_str));
                if let Some(label) = label {
                    out.push(Text::plain(label));
                }
            }
            // Nested lists or paragraphs inside an item: keep reading their text.
            _ => {
                if !out.is_empty() && node.kind == "paragraph" {
                    out.push(Text::plain(" "));
                }
                collect_inlines(&node.content, out);
            }
        }
    }
}

fn wire_to_marks(marks: &[WireMark]) -> Vec<Mark> {
    let mut out: Vec<Mark> = marks
        .iter()
        .filter_map(|mark| match mark.kind.as_str() {
            "strong" => Some(Mark::Strong),
            "em" => Some(Mark::Em),
            "code" => Some(Mark::Code),
            "link" => mark
                .attrs
                .as_ref()
                .and_then(|attrs| attrs.get("href"))
                .and_then(Value::as_str)
                .map(|href| Mark::Link {
                    href: href.to_string(),
                }),
            _ => None,
        })
        .collect();
    // code never combines with other marks
    if out.contains(&Mark::Code) {
        out = vec![Mark::Code];
    }
    out
}

fn plain_text(node: &WireNode) -> String {
    let mut text = node.text.clone().unwrap_or_default();
    for child in &node.content {
        text.push_str(&plain_text(child));
    }
    text
}
