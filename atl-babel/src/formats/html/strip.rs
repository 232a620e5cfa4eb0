//! Plain-text rendering of HTML fragments.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = lazy_regex!(r"<[^>]*>", "tag pattern should compile");

/// Entities decoded by [`strip_html`]. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Remove tags, decode the common entities and normalize whitespace to single spaces.
pub fn strip_html(html: &str) -> String {
    let mut text = TAG.replace_all(html, "").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
