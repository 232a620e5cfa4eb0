//! Entity handling: decoded to Unicode, except angle brackets which stay encoded

use atl_babel::storage_to_markdown;

fn md(storage: &str) -> String {
    storage_to_markdown(storage).expect("storage should convert")
}

#[test]
fn test_ampersand_is_decoded() {
    assert_eq!(md("<p>Tom &amp; Jerry</p>"), "Tom & Jerry");
}

#[test]
fn test_angle_brackets_stay_encoded() {
    assert_eq!(md("<p>1 &lt; 2</p>"), "1 &lt; 2");
    assert_eq!(md("<p>3 &gt; 2</p>"), "3 &gt; 2");
}

#[test]
fn test_smart_quotes() {
    assert_eq!(md("<p>&ldquo;quoted&rdquo;</p>"), "\u{201c}quoted\u{201d}");
}

#[test]
fn test_non_breaking_space_is_kept() {
    assert_eq!(md("<p>hello&nbsp;world</p>"), "hello\u{a0}world");
}
