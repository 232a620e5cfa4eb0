//! Storage → Markdown tests for plain HTML constructs

use atl_babel::storage_to_markdown;

fn md(storage: &str) -> String {
    storage_to_markdown(storage).expect("storage should convert")
}

#[test]
fn test_paragraph() {
    assert_eq!(md("<p>Hello world</p>"), "Hello world");
}

#[test]
fn test_headings() {
    assert_eq!(md("<h1>Title</h1>"), "# Title");
    assert_eq!(md("<h2>Subtitle</h2>"), "## Subtitle");
}

#[test]
fn test_emphasis() {
    assert_eq!(md("<p><strong>bold text</strong></p>"), "**bold text**");
    assert_eq!(md("<p><em>italic text</em></p>"), "*italic text*");
    assert_eq!(
        md("<p><strong><em>bold and italic</em></strong></p>"),
        "***bold and italic***"
    );
}

#[test]
fn test_link() {
    assert_eq!(
        md(r#"<p><a href="https://example.com">Example</a></p>"#),
        "[Example](https://example.com)"
    );
}

#[test]
fn test_lists() {
    assert_eq!(md("<ul><li>Item 1</li><li>Item 2</li></ul>"), "- Item 1\n- Item 2");
    assert_eq!(md("<ol><li>First</li><li>Second</li></ol>"), "1. First\n2. Second");
}

#[test]
fn test_code() {
    assert_eq!(md("<p><code>inline code</code></p>"), "`inline code`");
    assert_eq!(md("<pre><code>code block</code></pre>"), "```\ncode block\n```");
}

#[test]
fn test_table_uses_pipes() {
    let result = md(
        "<table><tbody><tr><th>Header 1</th><th>Header 2</th></tr>\
         <tr><td>Cell 1</td><td>Cell 2</td></tr></tbody></table>",
    );
    assert!(result.contains('|'));
    assert!(result.contains("Header 1"));
    assert!(result.contains("Cell 2"));
}

#[test]
fn test_blank_input() {
    assert_eq!(md(""), "");
    assert_eq!(md("   \n\t  "), "");
}

#[test]
fn test_mixed_page() {
    let page = r#"<h1>Release plan</h1>
<ac:structured-macro ac:name="toc" />
<p>Owner: <ac:link><ri:user ri:account-id="abc" /></ac:link></p>
<ac:structured-macro ac:name="info"><ac:rich-text-body><p>Freeze on <strong>Friday</strong></p></ac:rich-text-body></ac:structured-macro>
<ul><li>Cut branch</li><li>Tag <code>v1.2</code></li></ul>"#;

    assert_eq!(
        md(page),
        "# Release plan\n\n[Table of Contents]\n\nOwner: [Link]\n\n> **Info:** Freeze on Friday\n\n- Cut branch\n- Tag `v1.2`"
    );
}
