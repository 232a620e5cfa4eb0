//! Inline span resolution (Markdown text run → styled text nodes)
//!
//! A text run is scanned as a tournament: every pattern proposes its leftmost match, the
//! earliest start wins, a longer span wins a tie on start, and on a full tie the pattern listed
//! first keeps the win. The plain text before the winner is emitted, the winner becomes a
//! styled node, and scanning resumes right after it. Matched content is never rescanned, so a
//! code span or link text is emitted verbatim.
//!
//! Italic delimiters must not touch another delimiter of the same kind. The neighbouring
//! character is part of the regex match but stays in the surrounding plain text; the start and
//! end of the remaining run count as valid neighbours.

use crate::adf::{Mark, Text};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static BOLD_ITALIC: Lazy<Regex> =
    lazy_regex!(r"\*\*\*(.*?)\*\*\*", "bold-italic pattern should compile");
static BOLD: Lazy<Regex> = lazy_regex!(r"\*\*(.*?)\*\*", "bold pattern should compile");
static ITALIC_STAR: Lazy<Regex> = lazy_regex!(
    r"(?:^|[^*])\*([^*]+?)\*(?:[^*]|$)",
    "star italic pattern should compile",
);
static ITALIC_UNDERSCORE: Lazy<Regex> = lazy_regex!(
    r"(?:^|[^_])_([^_]+?)_(?:[^_]|$)",
    "underscore italic pattern should compile",
);
static CODE_SPAN: Lazy<Regex> = lazy_regex!(r"`([^`]+)`", "code span pattern should compile");
static LINK: Lazy<Regex> = lazy_regex!(
    r"\[([^\]]+)\]\(([^)]+)\)",
    "link pattern should compile",
);

/// The span kinds recognized inside a text run, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    BoldItalic,
    Bold,
    ItalicStar,
    ItalicUnderscore,
    Code,
    Link,
}

const CANDIDATES: [SpanKind; 6] = [
    SpanKind::BoldItalic,
    SpanKind::Bold,
    SpanKind::ItalicStar,
    SpanKind::ItalicUnderscore,
    SpanKind::Code,
    SpanKind::Link,
];

impl SpanKind {
    fn pattern(self) -> &'static Regex {
        match self {
            SpanKind::BoldItalic => &BOLD_ITALIC,
            SpanKind::Bold => &BOLD,
            SpanKind::ItalicStar => &ITALIC_STAR,
            SpanKind::ItalicUnderscore => &ITALIC_UNDERSCORE,
            SpanKind::Code => &CODE_SPAN,
            SpanKind::Link => &LINK,
        }
    }

    /// Locate this kind's leftmost match in `text`, if it has non-empty content.
    fn find(self, text: &str) -> Option<SpanMatch> {
        let caps = self.pattern().captures(text)?;
        let content = caps.get(1)?;
        if content.as_str().is_empty() {
            return None;
        }
        let (start, end) = match self {
            // Only the delimiter pair belongs to the span, not the boundary characters.
            SpanKind::ItalicStar | SpanKind::ItalicUnderscore => {
                (content.start() - 1, content.end() + 1)
            }
            _ => {
                let whole = caps.get(0)?;
                (whole.start(), whole.end())
            }
        };
        Some(SpanMatch {
            start,
            end,
            node: self.node(&caps),
        })
    }

    fn node(self, caps: &Captures<'_>) -> Text {
        let content = caps.get(1).map_or("", |m| m.as_str());
        match self {
            SpanKind::BoldItalic => Text::marked(content, vec![Mark::Strong, Mark::Em]),
            SpanKind::Bold => Text::marked(content, vec![Mark::Strong]),
            SpanKind::ItalicStar | SpanKind::ItalicUnderscore => {
                Text::marked(content, vec![Mark::Em])
            }
            SpanKind::Code => Text::marked(content, vec![Mark::Code]),
            SpanKind::Link => {
                let href = caps.get(2).map_or("", |m| m.as_str());
                Text::marked(
                    content,
                    vec![Mark::Link {
                        href: href.to_string(),
                    }],
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SpanMatch {
    start: usize,
    end: usize,
    node: Text,
}

impl SpanMatch {
    /// Earlier start wins; on the same start the longer span wins.
    fn beats(&self, other: &SpanMatch) -> bool {
        self.start < other.start || (self.start == other.start && self.end > other.end)
    }
}

fn best_match(text: &str) -> Option<SpanMatch> {
    CANDIDATES
        .iter()
        .filter_map(|kind| kind.find(text))
        .fold(None, |best, candidate| match best {
            Some(current) if !candidate.beats(&current) => Some(current),
            _ => Some(candidate),
        })
}

/// Split a run of Markdown text into styled text nodes.
///
/// Never fails: unmatched delimiters are emitted as literal text. Empty input yields no nodes.
pub fn parse_inline(text: &str) -> Vec<Text> {
    let mut nodes = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(found) = best_match(rest) else {
            nodes.push(Text::plain(rest));
            break;
        };
        if found.start > 0 {
            nodes.push(Text::plain(&rest[..found.start]));
        }
        nodes.push(found.node);
        rest = &rest[found.end..];
    }

    nodes
}
