//! Export tests for Markdown (ADF → Markdown)

use atl_babel::format::Format;
use atl_babel::formats::adf::AdfFormat;
use atl_babel::{parse_markdown_to_blocks, serialize_to_markdown, AdfDocument, FormatRegistry};

fn roundtrip(markdown: &str) -> String {
    let doc = AdfDocument::new(parse_markdown_to_blocks(markdown));
    serialize_to_markdown(&doc).expect("document should serialize")
}

#[test]
fn test_plain_paragraph_round_trip() {
    assert_eq!(roundtrip("A plain sentence").trim(), "A plain sentence");
}

#[test]
fn test_multiline_paragraph_normalizes_whitespace() {
    assert_eq!(roundtrip("first\n  second").trim(), "first second");
}

#[test]
fn test_structure_survives_round_trip() {
    let source = "# Title\n\n- one\n- two\n\n1. first\n\nclosing **words**";
    let output = roundtrip(source);
    assert_eq!(
        parse_markdown_to_blocks(&output),
        parse_markdown_to_blocks(source)
    );
}

#[test]
fn test_adf_json_to_markdown() {
    let json = r#"{
        "type": "doc",
        "version": 1,
        "content": [
            {"type": "heading", "attrs": {"level": 3}, "content": [{"type": "text", "text": "Notes"}]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "Run "},
                {"type": "text", "text": "cargo test", "marks": [{"type": "code"}]}
            ]}
        ]
    }"#;

    let doc = AdfFormat.parse(json).expect("valid ADF");
    assert_eq!(
        serialize_to_markdown(&doc).unwrap(),
        "### Notes\n\nRun `cargo test`\n"
    );
}

#[test]
fn test_registry_markdown_to_adf_and_back() {
    let registry = FormatRegistry::default();
    let json = registry
        .convert("Hello *there*", "markdown", "adf")
        .expect("markdown converts to adf");
    let markdown = registry
        .convert(&json, "adf", "markdown")
        .expect("adf converts to markdown");
    assert_eq!(
        parse_markdown_to_blocks(&markdown),
        parse_markdown_to_blocks("Hello *there*")
    );
}
