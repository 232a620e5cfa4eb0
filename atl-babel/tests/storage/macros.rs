//! Macro conversion tests

use atl_babel::storage_to_markdown;

fn md(storage: &str) -> String {
    storage_to_markdown(storage).expect("storage should convert")
}

#[test]
fn test_toc() {
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="toc"><ac:parameter ac:name="maxLevel">3</ac:parameter></ac:structured-macro>"#),
        "[Table of Contents]"
    );
}

#[test]
fn test_drawio() {
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="drawio"><ac:parameter ac:name="diagramName">Architecture Diagram</ac:parameter></ac:structured-macro>"#),
        "[Diagram: Architecture Diagram]"
    );
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="drawio"></ac:structured-macro>"#),
        "[Diagram]"
    );
}

#[test]
fn test_code_macro() {
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="code"><ac:parameter ac:name="language">python</ac:parameter><ac:plain-text-body><![CDATA[print("hello")]]></ac:plain-text-body></ac:structured-macro>"#),
        "```python\nprint(\"hello\")\n```"
    );
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="code"><ac:plain-text-body><![CDATA[some code]]></ac:plain-text-body></ac:structured-macro>"#),
        "```\nsome code\n```"
    );
}

#[test]
fn test_code_macro_keeps_markup_literal() {
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="code"><ac:plain-text-body><![CDATA[if a < b && c > d {}]]></ac:plain-text-body></ac:structured-macro>"#),
        "```\nif a < b && c > d {}\n```"
    );
}

#[test]
fn test_admonitions() {
    for (name, label, body) in [
        ("info", "Info", "Important note"),
        ("warning", "Warning", "Be careful!"),
        ("note", "Note", "A note here"),
        ("tip", "Tip", "A helpful tip"),
    ] {
        let storage = format!(
            r#"<ac:structured-macro ac:name="{name}"><ac:rich-text-body><p>{body}</p></ac:rich-text-body></ac:structured-macro>"#
        );
        assert_eq!(md(&storage), format!("> **{label}:** {body}"));
    }
}

#[test]
fn test_admonition_with_nested_macro() {
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="info"><ac:rich-text-body><p>Build <ac:structured-macro ac:name="status"><ac:parameter ac:name="title">OK</ac:parameter></ac:structured-macro> now</p></ac:rich-text-body></ac:structured-macro>"#),
        "> **Info:** Build OK now"
    );
}

#[test]
fn test_unknown_macro() {
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="custom-macro"><ac:parameter ac:name="foo">bar</ac:parameter></ac:structured-macro>"#),
        "[Confluence Macro: custom-macro]"
    );
}

#[test]
fn test_expand() {
    assert_eq!(
        md(r#"<ac:structured-macro ac:name="expand"><ac:parameter ac:name="title">Click to expand</ac:parameter><ac:rich-text-body><p>Hidden content</p></ac:rich-text-body></ac:structured-macro>"#),
        "<details>\n<summary>Click to expand</summary>\n\nHidden content\n</details>"
    );
}

#[test]
fn test_links() {
    assert!(md(r#"<ac:link><ri:page ri:content-title="Target Page" /><ac:plain-text-link-body><![CDATA[Link Text]]></ac:plain-text-link-body></ac:link>"#)
        .contains("Link Text"));
    assert!(md(r#"<ac:link><ri:page ri:content-title="Target Page" /></ac:link>"#)
        .contains("Target Page"));
}

#[test]
fn test_multiline_macro() {
    let storage = "<ac:structured-macro ac:name=\"code\" ac:schema-version=\"1\">\n  \
                   <ac:parameter ac:name=\"language\">sh</ac:parameter>\n  \
                   <ac:plain-text-body><![CDATA[make\nmake test]]></ac:plain-text-body>\n\
                   </ac:structured-macro>";
    assert_eq!(md(storage), "```sh\nmake\nmake test\n```");
}
