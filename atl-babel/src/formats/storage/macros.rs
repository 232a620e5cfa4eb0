//! Storage macro rewriting (first pass)
//!
//! Confluence storage markup embeds `ac:structured-macro` elements that no HTML converter
//! understands. Each recognized macro is rewritten into plain HTML, or into a `CFPLACEHOLDER`
//! marker that [`super::postprocess`] turns into its final Markdown after the HTML pass (the
//! HTML converter would otherwise escape the brackets). The rewriting is regex based and
//! tolerant: missing parameters fall back to defaults and nothing here can fail.
//!
//! Rewrite order matters. Code macros are rewritten before expand and admonition bodies are
//! stripped, so code nested in those keeps its text, and the catch-all for unknown macros
//! runs last.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

pub const PLACEHOLDER: &str = "CFPLACEHOLDER";

fn macro_pattern(name: &str) -> String {
    format!(
        r#"(?s)<ac:structured-macro[^>]*?ac:name="{name}"[^>]*?(?:/>|>(.*?)</ac:structured-macro>)"#
    )
}

static TOC: Lazy<Regex> = lazy_regex!(&macro_pattern("toc"), "toc macro pattern should compile");
static DRAWIO: Lazy<Regex> =
    lazy_regex!(&macro_pattern("drawio"), "drawio macro pattern should compile");
static CODE: Lazy<Regex> =
    lazy_regex!(&macro_pattern("code"), "code macro pattern should compile");
/// Anchored on the body's closing tag so macros nested in the body stay inside the match.
static ADMONITION: Lazy<Regex> = lazy_regex!(
    r#"(?s)<ac:structured-macro[^>]*?ac:name="(info|warning|note|tip)"[^>]*?>.*?<ac:rich-text-body>(.*?)</ac:rich-text-body>.*?</ac:structured-macro>"#,
    "admonition macro pattern should compile",
);
static EXPAND: Lazy<Regex> =
    lazy_regex!(&macro_pattern("expand"), "expand macro pattern should compile");
static ANY_MACRO: Lazy<Regex> =
    lazy_regex!(&macro_pattern("([^\"]*)"), "macro pattern should compile");

static PARAMETER: Lazy<Regex> = lazy_regex!(
    r#"(?s)<ac:parameter[^>]*?ac:name="([^"]*)"[^>]*>([^<]*)</ac:parameter>"#,
    "parameter pattern should compile",
);
static RICH_TEXT_BODY: Lazy<Regex> = lazy_regex!(
    r"(?s)<ac:rich-text-body>(.*?)</ac:rich-text-body>",
    "rich text body pattern should compile",
);
static PLAIN_TEXT_BODY: Lazy<Regex> = lazy_regex!(
    r"(?s)<ac:plain-text-body><!\[CDATA\[(.*?)\]\]></ac:plain-text-body>",
    "plain text body pattern should compile",
);
static LINK: Lazy<Regex> =
    lazy_regex!(r"(?s)<ac:link(?:\s[^>]*)?>(.*?)</ac:link>", "link pattern should compile");
static LINK_BODY: Lazy<Regex> = lazy_regex!(
    r"(?s)<ac:plain-text-link-body><!\[CDATA\[(.*?)\]\]></ac:plain-text-link-body>",
    "link body pattern should compile",
);
static CONTENT_TITLE: Lazy<Regex> = lazy_regex!(
    r#"ri:content-title="([^"]*)""#,
    "content title pattern should compile",
);
static TAG: Lazy<Regex> = lazy_regex!(r"<[^>]+>", "tag pattern should compile");

/// Look up an `ac:parameter` value inside a macro.
fn parameter(markup: &str, name: &str) -> Option<String> {
    PARAMETER
        .captures_iter(markup)
        .find(|caps| &caps[1] == name)
        .map(|caps| caps[2].to_string())
}

fn rich_text_body(markup: &str) -> Option<String> {
    RICH_TEXT_BODY
        .captures(markup)
        .map(|caps| TAG.replace_all(&caps[1], "").trim().to_string())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn placeholder(kind: &str, value: &str) -> String {
    format!("<p>{PLACEHOLDER}:{kind}:{value}:</p>")
}

fn rewrite_toc(html: &str) -> String {
    let marker = format!("<p>{PLACEHOLDER}:TOC:</p>");
    TOC.replace_all(html, NoExpand(&marker)).into_owned()
}

fn rewrite_drawio(html: &str) -> String {
    DRAWIO
        .replace_all(html, |caps: &Captures<'_>| {
            let name = parameter(&caps[0], "diagramName").unwrap_or_default();
            placeholder("DIAGRAM", &name)
        })
        .into_owned()
}

fn rewrite_code(html: &str) -> String {
    CODE.replace_all(html, |caps: &Captures<'_>| {
        let markup = &caps[0];
        let language = parameter(markup, "language").unwrap_or_default();
        let code = PLAIN_TEXT_BODY
            .captures(markup)
            .map(|body| body[1].to_string())
            .unwrap_or_default();
        let class = if language.is_empty() {
            String::new()
        } else {
            format!(" class=\"language-{}\"", escape_html(&language))
        };
        format!("<pre><code{class}>{}</code></pre>", escape_html(&code))
    })
    .into_owned()
}

fn rewrite_admonitions(html: &str) -> String {
    ADMONITION
        .replace_all(html, |caps: &Captures<'_>| {
            let body = TAG.replace_all(&caps[2], "");
            let body = body.trim();
            let kind = &caps[1];
            let mut label = kind.to_string();
            label[..1].make_ascii_uppercase();
            format!("<blockquote><strong>{label}:</strong> {body}</blockquote>")
        })
        .into_owned()
}

fn rewrite_expand(html: &str) -> String {
    EXPAND
        .replace_all(html, |caps: &Captures<'_>| {
            let markup = &caps[0];
            let title = parameter(markup, "title").unwrap_or_else(|| "Expand".to_string());
            let body = rich_text_body(markup).unwrap_or_default();
            format!(
                "{PLACEHOLDER}:EXPANDSTART:{title}:{PLACEHOLDER}:EXPANDBODY:{body}:{PLACEHOLDER}:EXPANDEND:"
            )
        })
        .into_owned()
}

fn rewrite_links(html: &str) -> String {
    LINK.replace_all(html, |caps: &Captures<'_>| {
        let markup = &caps[1];
        if let Some(body) = LINK_BODY.captures(markup) {
            return escape_html(&body[1]);
        }
        if let Some(title) = CONTENT_TITLE.captures(markup) {
            return title[1].to_string();
        }
        format!("{PLACEHOLDER}:LINK::")
    })
    .into_owned()
}

fn rewrite_unknown(html: &str) -> String {
    ANY_MACRO
        .replace_all(html, |caps: &Captures<'_>| {
            let name = &caps[1];
            tracing::debug!(macro_name = name, "unsupported storage macro replaced by placeholder");
            placeholder("MACRO", name)
        })
        .into_owned()
}

/// Rewrite every `ac:` macro and link in `storage` into plain HTML or placeholders.
pub fn rewrite_macros(storage: &str) -> String {
    let html = rewrite_toc(storage);
    let html = rewrite_drawio(&html);
    let html = rewrite_code(&html);
    let html = rewrite_admonitions(&html);
    let html = rewrite_expand(&html);
    let html = rewrite_links(&html);
    rewrite_unknown(&html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toc_placeholder() {
        assert_eq!(
            rewrite_macros(r#"<ac:structured-macro ac:name="toc"><ac:parameter ac:name="maxLevel">3</ac:parameter></ac:structured-macro>"#),
            "<p>CFPLACEHOLDER:TOC:</p>"
        );
    }

    #[test]
    fn test_self_closing_macro() {
        assert_eq!(
            rewrite_macros(r#"<ac:structured-macro ac:name="toc" ac:schema-version="1" />"#),
            "<p>CFPLACEHOLDER:TOC:</p>"
        );
    }

    #[test]
    fn test_drawio_with_and_without_name() {
        assert_eq!(
            rewrite_macros(r#"<ac:structured-macro ac:name="drawio"><ac:parameter ac:name="diagramName">Flow</ac:parameter></ac:structured-macro>"#),
            "<p>CFPLACEHOLDER:DIAGRAM:Flow:</p>"
        );
        assert_eq!(
            rewrite_macros(r#"<ac:structured-macro ac:name="drawio"></ac:structured-macro>"#),
            "<p>CFPLACEHOLDER:DIAGRAM::</p>"
        );
    }

    #[test]
    fn test_code_body_is_escaped() {
        assert_eq!(
            rewrite_macros(
                "<ac:structured-macro ac:name=\"code\"><ac:parameter ac:name=\"language\">html</ac:parameter>\
                 <ac:plain-text-body><![CDATA[<b>&</b>]]></ac:plain-text-body></ac:structured-macro>"
            ),
            r#"<pre><code class="language-html">&lt;b&gt;&amp;&lt;/b&gt;</code></pre>"#
        );
    }

    #[test]
    fn test_macro_spanning_lines() {
        let storage = "<ac:structured-macro ac:name=\"code\">\n<ac:plain-text-body><![CDATA[a\nb]]></ac:plain-text-body>\n</ac:structured-macro>";
        assert_eq!(rewrite_macros(storage), "<pre><code>a\nb</code></pre>");
    }

    #[test]
    fn test_admonition_without_body_becomes_placeholder() {
        assert_eq!(
            rewrite_macros(r#"<ac:structured-macro ac:name="note"></ac:structured-macro>"#),
            "<p>CFPLACEHOLDER:MACRO:note:</p>"
        );
    }

    #[test]
    fn test_admonition_body_keeps_nested_macro_text() {
        assert_eq!(
            rewrite_macros(
                r#"<ac:structured-macro ac:name="warning"><ac:rich-text-body><p>Ship <ac:structured-macro ac:name="status"><ac:parameter ac:name="title">BLOCKED</ac:parameter></ac:structured-macro> today</p></ac:rich-text-body></ac:structured-macro><p>after</p>"#
            ),
            "<blockquote><strong>Warning:</strong> Ship BLOCKED today</blockquote><p>after</p>"
        );
    }

    #[test]
    fn test_expand_defaults_title() {
        assert_eq!(
            rewrite_macros(r#"<ac:structured-macro ac:name="expand"><ac:rich-text-body><p>body</p></ac:rich-text-body></ac:structured-macro>"#),
            "CFPLACEHOLDER:EXPANDSTART:Expand:CFPLACEHOLDER:EXPANDBODY:body:CFPLACEHOLDER:EXPANDEND:"
        );
    }

    #[test]
    fn test_link_fallbacks() {
        assert_eq!(
            rewrite_macros(r#"<ac:link><ri:page ri:content-title="Target" /></ac:link>"#),
            "Target"
        );
        assert_eq!(
            rewrite_macros(r#"<ac:link><ri:user ri:account-id="42" /></ac:link>"#),
            "CFPLACEHOLDER:LINK::"
        );
    }
}
