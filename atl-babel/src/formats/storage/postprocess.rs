//! Placeholder expansion and cleanup (final pass)

use super::macros::PLACEHOLDER;
use once_cell::sync::Lazy;
use regex::Regex;

static DIAGRAM: Lazy<Regex> = lazy_regex!(
    r"CFPLACEHOLDER:DIAGRAM:([^:]+):",
    "diagram placeholder pattern should compile",
);
static MACRO: Lazy<Regex> = lazy_regex!(
    r"CFPLACEHOLDER:MACRO:([^:]+):",
    "macro placeholder pattern should compile",
);
static EXPAND: Lazy<Regex> = lazy_regex!(
    r"CFPLACEHOLDER:EXPANDSTART:([^:]*):CFPLACEHOLDER:EXPANDBODY:([^:]*):CFPLACEHOLDER:EXPANDEND:",
    "expand placeholder pattern should compile",
);
static BLANK_RUN: Lazy<Regex> = lazy_regex!(r"\n{3,}", "blank run pattern should compile");

/// Replace placeholders with their Markdown, squeeze blank runs and trim.
pub fn finish(markdown: &str) -> String {
    let markdown = markdown
        .replace(&format!("{PLACEHOLDER}:TOC:"), "[Table of Contents]")
        .replace(&format!("{PLACEHOLDER}:DIAGRAM::"), "[Diagram]")
        .replace(&format!("{PLACEHOLDER}:LINK::"), "[Link]");
    let markdown = DIAGRAM.replace_all(&markdown, "[Diagram: $1]");
    let markdown = MACRO.replace_all(&markdown, "[Confluence Macro: $1]");
    let markdown = EXPAND.replace_all(
        &markdown,
        "<details>\n<summary>$1</summary>\n\n$2\n</details>",
    );
    let markdown = BLANK_RUN.replace_all(&markdown, "\n\n");
    markdown.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_placeholders() {
        assert_eq!(
            finish("CFPLACEHOLDER:TOC:\n\nCFPLACEHOLDER:DIAGRAM::\n\nsee CFPLACEHOLDER:LINK::"),
            "[Table of Contents]\n\n[Diagram]\n\nsee [Link]"
        );
    }

    #[test]
    fn test_named_placeholders() {
        assert_eq!(
            finish("CFPLACEHOLDER:DIAGRAM:Flow:\n\nCFPLACEHOLDER:MACRO:jira:"),
            "[Diagram: Flow]\n\n[Confluence Macro: jira]"
        );
    }

    #[test]
    fn test_expand_block() {
        assert_eq!(
            finish("CFPLACEHOLDER:EXPANDSTART:More:CFPLACEHOLDER:EXPANDBODY:text:CFPLACEHOLDER:EXPANDEND:"),
            "<details>\n<summary>More</summary>\n\ntext\n</details>"
        );
    }

    #[test]
    fn test_blank_runs_and_trim() {
        assert_eq!(finish("\n\na\n\n\n\nb\n"), "a\n\nb");
    }
}
