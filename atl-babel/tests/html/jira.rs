use atl_babel::{html_to_markdown, strip_html, FormatRegistry};

const RENDERED: &str = "<p>As a user I want <b>search</b>.</p>\n\n\
<h3><a name=\"Acceptance\"></a>Acceptance</h3>\n\
<ul>\n\t<li>results in <tt>200ms</tt></li>\n\
\t<li>see <a href=\"https://example.atlassian.net/browse/PROJ-1\" class=\"issue-link\">PROJ-1</a></li>\n</ul>";

#[test]
fn test_rendered_description_to_markdown() {
    assert_eq!(
        html_to_markdown(RENDERED).unwrap(),
        "As a user I want **search**.\n\n### Acceptance\n\n- results in `200ms`\n- see [PROJ-1](https://example.atlassian.net/browse/PROJ-1)"
    );
}

#[test]
fn test_rendered_description_to_text() {
    assert_eq!(
        strip_html(RENDERED),
        "As a user I want search. Acceptance results in 200ms see PROJ-1"
    );
}

#[test]
fn test_registry_html_to_markdown_matches_converter() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.convert(RENDERED, "html", "markdown").unwrap(),
        html_to_markdown(RENDERED).unwrap()
    );
}

#[test]
fn test_empty_description() {
    assert_eq!(html_to_markdown("").unwrap(), "");
    assert_eq!(strip_html(""), "");
}
