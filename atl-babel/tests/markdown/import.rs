//! Import tests for Markdown (Markdown → ADF)

use atl_babel::adf::{Block, ListItem, Mark, Text};
use atl_babel::{markdown_to_adf, parse_markdown_to_blocks};
use serde_json::json;

#[test]
fn test_heading_detection() {
    assert_eq!(
        parse_markdown_to_blocks("# H1"),
        vec![Block::Heading {
            level: 1,
            content: vec![Text::plain("H1")],
        }]
    );
    assert!(matches!(
        parse_markdown_to_blocks("####### X").as_slice(),
        [Block::Paragraph(_)]
    ));
    assert!(matches!(
        parse_markdown_to_blocks("#nospace").as_slice(),
        [Block::Paragraph(_)]
    ));
}

#[test]
fn test_list_type_switch() {
    assert_eq!(
        parse_markdown_to_blocks("- bullet\n1. ordered"),
        vec![
            Block::BulletList(vec![ListItem::new(vec![Text::plain("bullet")])]),
            Block::OrderedList(vec![ListItem::new(vec![Text::plain("ordered")])]),
        ]
    );
}

#[test]
fn test_code_span_immunity() {
    assert_eq!(
        parse_markdown_to_blocks("`**not bold**`"),
        vec![Block::Paragraph(vec![Text::marked(
            "**not bold**",
            vec![Mark::Code]
        )])]
    );
}

#[test]
fn test_unclosed_fence() {
    assert_eq!(
        parse_markdown_to_blocks("```\ncode"),
        vec![Block::CodeBlock {
            language: None,
            text: "code".to_string(),
        }]
    );
}

#[test]
fn test_blank_line_splits_lists() {
    let blocks = parse_markdown_to_blocks("- a\n\n- b");
    assert_eq!(blocks.len(), 2);
    assert!(blocks
        .iter()
        .all(|block| matches!(block, Block::BulletList(items) if items.len() == 1)));
}

#[test]
fn test_issue_description_wire_shape() {
    let doc = markdown_to_adf(
        "## Steps\n\n1. Open the **settings** page\n2. Click [Save](https://example.com/save)\n\n```sh\nmake test\n```",
    )
    .expect("description has content");

    assert_eq!(
        serde_json::to_value(&doc).unwrap(),
        json!({
            "type": "doc",
            "version": 1,
            "content": [
                {
                    "type": "heading",
                    "attrs": {"level": 2},
                    "content": [{"type": "text", "text": "Steps"}]
                },
                {
                    "type": "orderedList",
                    "content": [
                        {
                            "type": "listItem",
                            "content": [{
                                "type": "paragraph",
                                "content": [
                                    {"type": "text", "text": "Open the "},
                                    {"type": "text", "text": "settings", "marks": [{"type": "strong"}]},
                                    {"type": "text", "text": " page"}
                                ]
                            }]
                        },
                        {
                            "type": "listItem",
                            "content": [{
                                "type": "paragraph",
                                "content": [
                                    {"type": "text", "text": "Click "},
                                    {
                                        "type": "text",
                                        "text": "Save",
                                        "marks": [{"type": "link", "attrs": {"href": "https://example.com/save"}}]
                                    }
                                ]
                            }]
                        }
                    ]
                },
                {
                    "type": "codeBlock",
                    "attrs": {"language": "sh"},
                    "content": [{"type": "text", "text": "make test"}]
                }
            ]
        })
    );
}

#[test]
fn test_empty_input_has_no_document() {
    assert!(markdown_to_adf("").is_none());
    assert!(markdown_to_adf("  \n\n ").is_none());
}
