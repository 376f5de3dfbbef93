//! Parsing and plain-text rendering of doc comment text.
//!
//! Input is the normalized text returned by
//! [`CommentGroup::text`](crate::ast::CommentGroup::text). The parser splits
//! it into blocks the way the Go doc tooling does:
//!
//! - unindented spans are paragraphs, `# Heading` lines, or old-style
//!   headings (a lone capitalized line surrounded by blank lines);
//! - indented spans are code blocks, unless they start with a list marker;
//! - spans made only of `[Text]: URL` lines are link definitions.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static LINK_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]:\s+(\S+)$").expect("valid link definition pattern")
});

#[allow(clippy::expect_used)]
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-*+•]|[0-9]+[.)])(?:[ \t]+|$)").expect("valid list marker pattern")
});

/// A block of documentation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Running text; lines are kept as written.
    Paragraph {
        /// Lines of the paragraph.
        lines: Vec<String>,
    },
    /// A section heading.
    Heading {
        /// Heading text without the `#` marker.
        text: String,
    },
    /// A preformatted block, common indentation removed.
    Code {
        /// Lines of code.
        lines: Vec<String>,
    },
    /// A bullet or numbered list.
    List {
        /// Items in order.
        items: Vec<ListItem>,
    },
}

/// A single list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// The marker as written, e.g. `-` or `2.`.
    pub marker: String,
    /// Item lines, marker removed and whitespace trimmed.
    pub lines: Vec<String>,
}

impl Block {
    /// Returns the block's prose as plain text. Code blocks yield their lines.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Paragraph { lines } | Self::Code { lines } => lines.join("\n"),
            Self::Heading { text } => text.clone(),
            Self::List { items } => items
                .iter()
                .map(|i| i.lines.join("\n"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Returns true for code blocks.
    #[must_use]
    pub fn is_code(&self) -> bool {
        matches!(self, Self::Code { .. })
    }
}

/// A link definition, `[Text]: URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDef {
    /// Link text.
    pub text: String,
    /// Target URL.
    pub url: String,
}

/// A parsed doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    /// Content blocks in order.
    pub blocks: Vec<Block>,
    /// Link definitions, in order of appearance.
    pub links: Vec<LinkDef>,
}

impl ParsedDoc {
    /// Iterates over all blocks except code blocks.
    pub fn prose(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| !b.is_code())
    }

    /// Iterates over the first line of every paragraph.
    pub fn paragraph_leads(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph { lines } => lines.first().map(String::as_str),
            _ => None,
        })
    }
}

struct Span<'a> {
    lines: Vec<&'a str>,
    indented: bool,
    blank_before: bool,
    blank_after: bool,
}

fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

fn split_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans: Vec<Span<'_>> = Vec::new();
    let mut blank_before = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_before = true;
            if let Some(last) = spans.last_mut() {
                last.blank_after = true;
            }
            continue;
        }
        let indented = is_indented(line);
        match spans.last_mut() {
            Some(last) if !blank_before && last.indented == indented => last.lines.push(line),
            _ => spans.push(Span {
                lines: vec![line],
                indented,
                blank_before,
                blank_after: false,
            }),
        }
        blank_before = false;
    }
    spans
}

/// Parses normalized doc text into blocks and link definitions.
#[must_use]
pub fn parse(text: &str) -> ParsedDoc {
    let spans = split_spans(text);
    let mut doc = ParsedDoc::default();

    for (i, span) in spans.iter().enumerate() {
        if span.indented {
            doc.blocks.push(parse_indented(&span.lines));
            continue;
        }

        let defs: Vec<LinkDef> = span
            .lines
            .iter()
            .filter_map(|l| {
                LINK_DEF.captures(l).map(|c| LinkDef {
                    text: c[1].to_string(),
                    url: c[2].to_string(),
                })
            })
            .collect();
        if defs.len() == span.lines.len() {
            doc.links.extend(defs);
            continue;
        }

        if let [line] = span.lines.as_slice() {
            let followed_by_break = span.blank_after || i + 1 == spans.len();
            if let Some(heading) = line.strip_prefix("# ") {
                if followed_by_break && !heading.trim().is_empty() {
                    doc.blocks.push(Block::Heading {
                        text: heading.trim().to_string(),
                    });
                    continue;
                }
            }
            let next_unindented = spans.get(i + 1).is_some_and(|next| !next.indented);
            if i > 0
                && span.blank_before
                && span.blank_after
                && next_unindented
                && is_old_heading(line)
            {
                doc.blocks.push(Block::Heading {
                    text: line.trim().to_string(),
                });
                continue;
            }
        }

        doc.blocks.push(Block::Paragraph {
            lines: span.lines.iter().map(ToString::to_string).collect(),
        });
    }
    doc
}

fn parse_indented(lines: &[&str]) -> Block {
    let first = lines.first().map_or("", |l| l.trim_start());
    if LIST_MARKER.is_match(first) {
        let mut items: Vec<ListItem> = Vec::new();
        for line in lines {
            let trimmed = line.trim();
            if let Some(m) = LIST_MARKER.captures(trimmed) {
                let marker = m[1].to_string();
                let rest = trimmed[m[0].len()..].trim();
                items.push(ListItem {
                    marker,
                    lines: if rest.is_empty() { Vec::new() } else { vec![rest.to_string()] },
                });
            } else if let Some(item) = items.last_mut() {
                item.lines.push(trimmed.to_string());
            }
        }
        return Block::List { items };
    }

    let indent = lines
        .iter()
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    Block::Code {
        lines: lines.iter().map(|l| l[indent..].to_string()).collect(),
    }
}

fn is_old_heading(line: &str) -> bool {
    const FORBIDDEN: &str = ";:!?+*/=[]{}_^°&§~%#@<\">\\";
    let mut chars = line.chars();
    if !chars.next().is_some_and(char::is_uppercase) {
        return false;
    }
    if !line.chars().last().is_some_and(char::is_alphanumeric) {
        return false;
    }
    if line.chars().any(|c| FORBIDDEN.contains(c)) {
        return false;
    }
    // Apostrophes are only allowed as in "'s".
    let bytes = line.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'\''
            || (bytes.get(i + 1) == Some(&b's') && bytes.get(i + 2).map_or(true, |c| *c == b' '))
    })
}

/// Renders blocks back to plain text.
///
/// Paragraph lines are kept as written, headings print as `# Heading`,
/// list items as `  - item` or `  1. item`, and code lines are tab-indented.
/// Blocks are separated by one blank line.
#[must_use]
pub fn render_plain<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> String {
    let mut out: Vec<String> = Vec::new();
    for block in blocks {
        let rendered = match block {
            Block::Paragraph { lines } => lines.join("\n"),
            Block::Heading { text } => format!("# {text}"),
            Block::Code { lines } => lines
                .iter()
                .map(|l| if l.is_empty() { String::new() } else { format!("\t{l}") })
                .collect::<Vec<_>>()
                .join("\n"),
            Block::List { items } => items
                .iter()
                .map(|item| {
                    let mut lines = item.lines.iter();
                    let first = lines.next().map_or("", String::as_str);
                    let head = format!("  {} {first}", item.marker);
                    std::iter::once(head.trim_end().to_string())
                        .chain(lines.map(|l| format!("    {l}")))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };
        out.push(rendered);
    }
    out.join("\n\n")
}
