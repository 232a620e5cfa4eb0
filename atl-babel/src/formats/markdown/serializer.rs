//! Markdown serialization (ADF → Markdown export)
//!
//! Pipeline: ADF tree → Comrak AST → CommonMark string. Building a Comrak AST instead of
//! concatenating strings lets comrak handle escaping and list markers.

use crate::adf::{Block, Document, ListItem, Mark, Text};
use crate::error::ConversionError;
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeLink,
    NodeList, NodeValue,
};
use comrak::{format_commonmark, Arena, ComrakOptions};
use std::cell::RefCell;

/// Serialize an ADF document to Markdown
pub fn serialize_to_markdown(doc: &Document) -> Result<String, ConversionError> {
    let arena = Arena::new();
    let root = build_comrak_ast(&arena, doc);

    let mut output = Vec::new();
    let options = default_comrak_options();
    format_commonmark(root, &options, &mut output).map_err(|e| {
        ConversionError::SerializationError(format!("Comrak serialization failed: {e}"))
    })?;

    let markdown = String::from_utf8(output).map_err(|e| {
        ConversionError::SerializationError(format!("UTF-8 conversion failed: {e}"))
    })?;

    // Comrak separates consecutive lists with an "end list" HTML comment
    Ok(markdown.replace("<!-- end list -->\n\n", ""))
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn build_comrak_ast<'a>(arena: &'a Arena<AstNode<'a>>, doc: &Document) -> &'a AstNode<'a> {
    let root = alloc(arena, NodeValue::Document);
    for block in &doc.content {
        root.append(build_block(arena, block));
    }
    root
}

fn build_block<'a>(arena: &'a Arena<AstNode<'a>>, block: &Block) -> &'a AstNode<'a> {
    match block {
        Block::Paragraph(content) => build_paragraph(arena, content),
        Block::Heading { level, content } => {
            let heading = alloc(
                arena,
                NodeValue::Heading(NodeHeading {
                    level: (*level).clamp(1, 6),
                    setext: false,
                }),
            );
            append_inlines(arena, heading, content);
            heading
        }
        Block::BulletList(items) => build_list(arena, ListType::Bullet, items),
        Block::OrderedList(items) => build_list(arena, ListType::Ordered, items),
        Block::CodeBlock { language, text } => {
            let mut literal = text.clone();
            if !literal.is_empty() && !literal.ends_with('\n') {
                literal.push('\n');
            }
            alloc(
                arena,
                NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: language.clone().unwrap_or_default(),
                    literal,
                }),
            )
        }
    }
}

fn build_paragraph<'a>(arena: &'a Arena<AstNode<'a>>, content: &[Text]) -> &'a AstNode<'a> {
    let paragraph = alloc(arena, NodeValue::Paragraph);
    append_inlines(arena, paragraph, content);
    paragraph
}

fn list_attributes(list_type: ListType) -> NodeList {
    NodeList {
        list_type,
        marker_offset: 0,
        padding: 0,
        start: 1,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true,
    }
}

fn build_list<'a>(
    arena: &'a Arena<AstNode<'a>>,
    list_type: ListType,
    items: &[ListItem],
) -> &'a AstNode<'a> {
    let list = alloc(arena, NodeValue::List(list_attributes(list_type)));
    for item in items {
        let item_node = alloc(arena, NodeValue::Item(list_attributes(list_type)));
        item_node.append(build_paragraph(arena, &item.content));
        list.append(item_node);
    }
    list
}

fn append_inlines<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, content: &[Text]) {
    for text in content {
        parent.append(build_text(arena, text));
    }
}

/// Wrap a text run in its marks: link outermost, then strong, then emphasis.
fn build_text<'a>(arena: &'a Arena<AstNode<'a>>, text: &Text) -> &'a AstNode<'a> {
    if text.has_mark(Mark::Code.kind()) {
        return alloc(
            arena,
            NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal: text.text.clone(),
            }),
        );
    }

    let mut node = if text.text == "\n" {
        alloc(arena, NodeValue::LineBreak)
    } else {
        alloc(arena, NodeValue::Text(text.text.clone()))
    };

    if text.has_mark(Mark::Em.kind()) {
        let emph = alloc(arena, NodeValue::Emph);
        emph.append(node);
        node = emph;
    }
    if text.has_mark(Mark::Strong.kind()) {
        let strong = alloc(arena, NodeValue::Strong);
        strong.append(node);
        node = strong;
    }
    if let Some(href) = text.link_href() {
        let link = alloc(
            arena,
            NodeValue::Link(NodeLink {
                url: href.to_string(),
                title: String::new(),
            }),
        );
        link.append(node);
        node = link;
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::parser::parse_markdown_to_blocks;

    fn render(markdown: &str) -> String {
        let doc = Document::new(parse_markdown_to_blocks(markdown));
        serialize_to_markdown(&doc).unwrap()
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render("hello world"), "hello world\n");
    }

    #[test]
    fn test_heading() {
        assert_eq!(render("## Title"), "## Title\n");
    }

    #[test]
    fn test_marks_survive_reparse() {
        let source = "**b** and *i* and `c`";
        let output = render(source);
        assert_eq!(
            parse_markdown_to_blocks(&output),
            parse_markdown_to_blocks(source)
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("[docs](https://example.com)"),
            "[docs](https://example.com)\n"
        );
    }

    #[test]
    fn test_code_block_with_language() {
        let output = render("```rust\nfn main() {}\n```");
        let fence = output.lines().next().unwrap();
        assert!(fence.starts_with("```"));
        assert!(fence.ends_with("rust"));
        assert!(output.contains("\nfn main() {}\n"));
    }

    #[test]
    fn test_consecutive_lists_do_not_leak_comments() {
        let output = render("- a\n\n- b");
        assert!(!output.contains("end list"));
        assert!(output.contains("- a"));
        assert!(output.contains("- b"));
    }
}
