//! Markdown parsing (Markdown → ADF)
//!
//! A line-oriented state machine. At most one block is open at a time: a paragraph being
//! accumulated, a list being accumulated, or a fenced code block collecting raw lines. Each
//! line either extends the open block or flushes it and starts another one. Inline spans are
//! resolved by [`super::inline::parse_inline`] when a block is flushed.
//!
//! The grammar is deliberately small (headings, paragraphs, flat bullet and ordered lists,
//! fenced code). Anything it does not recognize is paragraph text.

use super::inline::parse_inline;
use crate::adf::{Block, Document, ListItem};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = lazy_regex!(r"^(#{1,6})\s+(.+)$", "heading pattern should compile");
static BULLET_ITEM: Lazy<Regex> =
    lazy_regex!(r"^[-*]\s+(.+)$", "bullet item pattern should compile");
static ORDERED_ITEM: Lazy<Regex> =
    lazy_regex!(r"^[0-9]+\.\s+(.+)$", "ordered item pattern should compile");
static CODE_FENCE: Lazy<Regex> =
    lazy_regex!(r"^```([0-9A-Za-z_]*)\s*$", "code fence pattern should compile");

const CLOSING_FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

#[derive(Debug, Default)]
struct CodeFence {
    language: String,
    lines: Vec<String>,
}

/// Parse state for a single conversion call.
#[derive(Debug, Default)]
struct BlockParser {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Option<(ListKind, Vec<ListItem>)>,
    code: Option<CodeFence>,
}

impl BlockParser {
    fn feed(&mut self, line: &str) {
        let trimmed = line.trim();

        if let Some(code) = self.code.as_mut() {
            if trimmed == CLOSING_FENCE {
                self.flush_code();
            } else {
                code.lines.push(line.to_string());
            }
            return;
        }

        if let Some(caps) = CODE_FENCE.captures(trimmed) {
            self.flush_paragraph();
            self.flush_list();
            self.code = Some(CodeFence {
                language: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                lines: Vec::new(),
            });
            return;
        }

        if trimmed.is_empty() {
            self.flush_paragraph();
            self.flush_list();
            return;
        }

        if let Some(caps) = HEADING.captures(trimmed) {
            self.flush_paragraph();
            self.flush_list();
            let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
            let content = caps.get(2).map_or("", |m| m.as_str()).trim();
            self.blocks.push(Block::Heading {
                level,
                content: parse_inline(content),
            });
            return;
        }

        if let Some(caps) = BULLET_ITEM.captures(trimmed) {
            self.push_item(ListKind::Bullet, caps.get(1).map_or("", |m| m.as_str()));
            return;
        }

        if let Some(caps) = ORDERED_ITEM.captures(trimmed) {
            self.push_item(ListKind::Ordered, caps.get(1).map_or("", |m| m.as_str()));
            return;
        }

        self.flush_list();
        self.paragraph.push(trimmed.to_string());
    }

    fn push_item(&mut self, kind: ListKind, content: &str) {
        self.flush_paragraph();
        if matches!(&self.list, Some((open, _)) if *open != kind) {
            self.flush_list();
        }
        let (_, items) = self.list.get_or_insert_with(|| (kind, Vec::new()));
        items.push(ListItem::new(parse_inline(content)));
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let joined = self.paragraph.join(" ");
        self.paragraph.clear();
        let text = joined.trim();
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph(parse_inline(text)));
        }
    }

    fn flush_list(&mut self) {
        match self.list.take() {
            Some((ListKind::Bullet, items)) if !items.is_empty() => {
                self.blocks.push(Block::BulletList(items))
            }
            Some((ListKind::Ordered, items)) if !items.is_empty() => {
                self.blocks.push(Block::OrderedList(items))
            }
            _ => {}
        }
    }

    fn flush_code(&mut self) {
        if let Some(code) = self.code.take() {
            let language = Some(code.language).filter(|language| !language.is_empty());
            self.blocks.push(Block::CodeBlock {
                language,
                text: code.lines.join("\n"),
            });
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_paragraph();
        self.flush_list();
        // An unterminated fence keeps whatever it collected.
        self.flush_code();
        self.blocks
    }
}

/// Parse Markdown into the block sequence of an ADF document. Never fails.
pub fn parse_markdown_to_blocks(text: &str) -> Vec<Block> {
    let mut parser = BlockParser::default();
    for line in text.split('\n') {
        parser.feed(line.strip_suffix('\r').unwrap_or(line));
    }
    parser.finish()
}

/// Convert Markdown to an ADF document.
///
/// Returns `None` when the input is empty or produces no blocks, meaning "no content" to
/// callers that build API payloads.
pub fn markdown_to_adf(text: &str) -> Option<Document> {
    if text.is_empty() {
        return None;
    }
    let blocks = parse_markdown_to_blocks(text);
    if blocks.is_empty() {
        None
    } else {
        Some(Document::new(blocks))
    }
}
