//! HTML → Markdown conversion
//!
//! Walks an html5ever DOM and renders GitHub-flavoured Markdown. Block elements become
//! blocks separated by one blank line; loose inline content between blocks is gathered into
//! an implicit paragraph. Entities are decoded by the parser, and on output `<` and `>` are
//! written back as `&lt;`/`&gt;` so the Markdown never contains raw tags it did not produce.

use crate::error::ConversionError;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

/// Elements whose content never reaches the output.
const SKIPPED: &[&str] = &[
    "head", "script", "style", "title", "meta", "link", "noscript", "template",
];

/// Elements rendered as the concatenation of their child blocks.
const CONTAINERS: &[&str] = &[
    "html",
    "body",
    "div",
    "section",
    "article",
    "main",
    "header",
    "footer",
    "nav",
    "aside",
    "figure",
    "details",
    "summary",
    "center",
    "ac:rich-text-body",
    "ac:layout",
    "ac:layout-section",
    "ac:layout-cell",
];

/// Line starts that would read back as a heading or list item. `*` and `>` never get here
/// unescaped.
static BLOCK_START: Lazy<Regex> = lazy_regex!(
    r"^(?:([0-9]+)[.)]|#{1,6}|[-+])(?:\s|$)",
    "block start pattern should compile",
);

const BLOCKS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "pre", "blockquote", "table", "hr",
];

/// Convert an HTML document or fragment to Markdown.
pub fn html_to_markdown(html: &str) -> Result<String, ConversionError> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| ConversionError::ParseError(e.to_string()))?;

    Ok(render_blocks(&dom.document).join("\n\n"))
}

fn tag_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_ascii_lowercase()),
        _ => None,
    }
}

fn attribute(handle: &Handle, key: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == key)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

fn is_block_tag(tag: &str) -> bool {
    BLOCKS.contains(&tag) || CONTAINERS.contains(&tag)
}

fn has_block_descendant(handle: &Handle) -> bool {
    handle.children.borrow().iter().any(|child| {
        tag_name(child).is_some_and(|tag| is_block_tag(&tag)) || has_block_descendant(child)
    })
}

/// Accumulates rendered blocks, turning stray inline content into paragraphs.
#[derive(Default)]
struct BlockWriter {
    blocks: Vec<String>,
    inline: String,
}

impl BlockWriter {
    fn push_inline(&mut self, text: &str) {
        self.inline.push_str(text);
    }

    fn flush_inline(&mut self) {
        let paragraph = paragraph(&self.inline);
        self.inline.clear();
        if !paragraph.is_empty() {
            self.blocks.push(paragraph);
        }
    }

    fn push_block(&mut self, block: String) {
        self.flush_inline();
        if !block.trim().is_empty() {
            self.blocks.push(block);
        }
    }

    fn extend(&mut self, blocks: Vec<String>) {
        self.flush_inline();
        self.blocks.extend(blocks);
    }

    fn finish(mut self) -> Vec<String> {
        self.flush_inline();
        self.blocks
    }
}

fn render_blocks(handle: &Handle) -> Vec<String> {
    let mut writer = BlockWriter::default();

    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => writer.push_inline(&escape_text(&collapse_whitespace(
                &contents.borrow(),
            ))),
            NodeData::Element { .. } => {
                let Some(tag) = tag_name(child) else {
                    continue;
                };
                if SKIPPED.contains(&tag.as_str()) {
                    continue;
                }
                if BLOCKS.contains(&tag.as_str()) {
                    writer.push_block(render_block(child, &tag));
                } else if CONTAINERS.contains(&tag.as_str()) || has_block_descendant(child) {
                    writer.extend(render_blocks(child));
                } else {
                    writer.push_inline(&render_inline(child));
                }
            }
            _ => {}
        }
    }

    writer.finish()
}

fn render_block(handle: &Handle, tag: &str) -> String {
    match tag {
        "p" => paragraph(&render_inline_children(handle)),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse::<usize>().unwrap_or(1);
            let text = tidy_inline(&render_inline_children(handle)).replace('\n', " ");
            if text.is_empty() {
                String::new()
            } else {
                format!("{} {}", "#".repeat(level), text)
            }
        }
        "ul" => render_list(handle, None),
        "ol" => {
            let start = attribute(handle, "start")
                .and_then(|start| start.trim().parse::<usize>().ok())
                .unwrap_or(1);
            render_list(handle, Some(start))
        }
        "pre" => render_code_block(handle),
        "blockquote" => render_blocks(handle)
            .join("\n\n")
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        "table" => render_table(handle),
        "hr" => "---".to_string(),
        _ => paragraph(&render_inline_children(handle)),
    }
}

/// Render `ul`/`ol` items; `start` is `Some` for ordered lists.
fn render_list(handle: &Handle, start: Option<usize>) -> String {
    let mut lines = Vec::new();
    let mut number = start.unwrap_or(1);

    for item in handle.children.borrow().iter() {
        if tag_name(item).as_deref() != Some("li") {
            continue;
        }
        let marker = match start {
            Some(_) => format!("{number}."),
            None => "-".to_string(),
        };
        number += 1;

        let body = render_blocks(item).join("\n");
        let indent = " ".repeat(marker.len() + 1);
        let mut body_lines = body.lines();
        lines.push(format!("{marker} {}", body_lines.next().unwrap_or("")).trim_end().to_string());
        for line in body_lines {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
    }

    lines.join("\n")
}

fn render_code_block(handle: &Handle) -> String {
    let code = handle
        .children
        .borrow()
        .iter()
        .find(|child| tag_name(child).as_deref() == Some("code"))
        .cloned();
    let language = code
        .as_ref()
        .and_then(|code| attribute(code, "class"))
        .or_else(|| attribute(handle, "class"))
        .and_then(|class| {
            class
                .split_whitespace()
                .find_map(|name| name.strip_prefix("language-").map(str::to_string))
        })
        .unwrap_or_default();

    let mut text = String::new();
    collect_text(handle, &mut text);
    let text = text.strip_suffix('\n').unwrap_or(&text);

    let fence = if text.contains("```") { "````" } else { "```" };
    format!("{fence}{language}\n{text}\n{fence}")
}

fn render_table(handle: &Handle) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    collect_rows(handle, &mut rows);
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let format_row = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(width, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&rows[0]));
    lines.push(format!("|{}", " --- |".repeat(width)));
    for row in &rows[1..] {
        lines.push(format_row(row));
    }
    lines.join("\n")
}

fn collect_rows(handle: &Handle, rows: &mut Vec<Vec<String>>) {
    for child in handle.children.borrow().iter() {
        match tag_name(child).as_deref() {
            Some("tr") => {
                let cells = child
                    .children
                    .borrow()
                    .iter()
                    .filter(|cell| matches!(tag_name(cell).as_deref(), Some("td" | "th")))
                    .map(|cell| {
                        render_blocks(cell)
                            .join(" ")
                            .replace('\n', " ")
                            .replace('|', "\\|")
                    })
                    .collect();
                rows.push(cells);
            }
            Some("thead" | "tbody" | "tfoot") => collect_rows(child, rows),
            _ => {}
        }
    }
}

fn render_inline_children(handle: &Handle) -> String {
    handle
        .children
        .borrow()
        .iter()
        .map(render_inline)
        .collect()
}

fn render_inline(handle: &Handle) -> String {
    match &handle.data {
        NodeData::Text { contents } => escape_text(&collapse_whitespace(&contents.borrow())),
        NodeData::Element { .. } => {
            let tag = tag_name(handle).unwrap_or_default();
            match tag.as_str() {
                t if SKIPPED.contains(&t) => String::new(),
                "strong" | "b" => wrap(&render_inline_children(handle), "**"),
                "em" | "i" => wrap(&render_inline_children(handle), "*"),
                "del" | "s" | "strike" => wrap(&render_inline_children(handle), "~~"),
                "code" | "kbd" | "samp" | "tt" => {
                    let mut text = String::new();
                    collect_text(handle, &mut text);
                    code_span(&collapse_whitespace(&text))
                }
                "a" => {
                    let label = render_inline_children(handle);
                    let label = label.trim();
                    match attribute(handle, "href").filter(|href| !href.is_empty()) {
                        Some(href) if label.is_empty() => format!("[{href}]({href})"),
                        Some(href) => format!("[{label}]({href})"),
                        None => label.to_string(),
                    }
                }
                "img" => {
                    let alt = attribute(handle, "alt").unwrap_or_default();
                    match attribute(handle, "src") {
                        Some(src) => format!("![{}]({src})", escape_text(&alt)),
                        None => String::new(),
                    }
                }
                "br" => "  \n".to_string(),
                "hr" => "\n---\n".to_string(),
                _ => render_inline_children(handle),
            }
        }
        _ => String::new(),
    }
}

/// Wrap inline content in a delimiter, keeping surrounding whitespace outside it.
fn wrap(inner: &str, delimiter: &str) -> String {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return inner.to_string();
    }
    let leading = if inner.starts_with(char::is_whitespace) { " " } else { "" };
    let trailing = if inner.ends_with(char::is_whitespace) { " " } else { "" };
    format!("{leading}{delimiter}{trimmed}{delimiter}{trailing}")
}

fn code_span(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}

fn collect_text(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => {
                if tag_name(child).as_deref() == Some("br") {
                    out.push('\n');
                } else {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of ASCII whitespace to one space. Non-breaking spaces are content.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Escape text so it reads back as literal Markdown.
fn escape_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '*' | '`' | '[' | ']' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '_' => {
                let intraword = i > 0
                    && i + 1 < chars.len()
                    && chars[i - 1].is_alphanumeric()
                    && chars[i + 1].is_alphanumeric();
                if !intraword {
                    out.push('\\');
                }
                out.push('_');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Trim a rendered paragraph, dropping the indentation that whitespace collapsing leaves
/// after hard line breaks.
fn tidy_inline(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_start_matches(' '))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Tidy a paragraph and escape every line start that would parse as block syntax.
fn paragraph(text: &str) -> String {
    tidy_inline(text)
        .split('\n')
        .map(escape_block_start)
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_block_start(line: &str) -> String {
    match BLOCK_START.captures(line) {
        Some(caps) => match caps.get(1) {
            Some(number) => format!("{}\\{}", number.as_str(), &line[number.end()..]),
            None => format!("\\{line}"),
        },
        None => line.to_string(),
    }
}
