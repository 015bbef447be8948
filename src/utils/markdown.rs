//! Small markdown subset used for generated study material.
//!
//! Each line is classified (heading, bullet item, numbered item, quote,
//! plain) and contiguous list items are grouped into one list. Emphasis is
//! parsed inside every block. Nested lists, code blocks, links, images and
//! tables are not recognised and pass through as plain lines. No escaping is
//! done: the text comes from our own provider call.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref INLINE_RE: Regex =
        Regex::new(r"\*\*\*(.+?)\*\*\*|\*\*(.+?)\*\*|\*(.+?)\*").expect("valid inline regex");
}

const LINE_BREAK: &str = "<br />";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    BoldItalic(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    UnorderedList(Vec<Vec<Inline>>),
    OrderedList(Vec<Vec<Inline>>),
    Quote(Vec<Inline>),
    Paragraph(Vec<Inline>),
}

enum LineKind<'a> {
    Heading(u8, &'a str),
    Bullet(&'a str),
    Numbered(&'a str),
    Quote(&'a str),
    Plain(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if (1..=3).contains(&hashes)
        && let Some(rest) = line[hashes..].strip_prefix(' ')
    {
        return LineKind::Heading(hashes as u8, rest);
    }

    if let Some(rest) = line.strip_prefix("* ") {
        return LineKind::Bullet(rest);
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = line[digits..].strip_prefix(". ")
    {
        return LineKind::Numbered(rest);
    }

    if let Some(rest) = line.strip_prefix("> ") {
        return LineKind::Quote(rest);
    }

    LineKind::Plain(line)
}

/// Parse emphasis spans, matched left to right and non-greedy.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut last = 0;

    for caps in INLINE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            inlines.push(Inline::Text(text[last..whole.start()].to_string()));
        }

        if let Some(m) = caps.get(1) {
            inlines.push(Inline::BoldItalic(m.as_str().to_string()));
        } else if let Some(m) = caps.get(2) {
            inlines.push(Inline::Bold(m.as_str().to_string()));
        } else if let Some(m) = caps.get(3) {
            inlines.push(Inline::Italic(m.as_str().to_string()));
        }
        last = whole.end();
    }

    if last < text.len() {
        inlines.push(Inline::Text(text[last..].to_string()));
    }
    inlines
}

pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for line in text.lines() {
        match classify(line) {
            LineKind::Heading(level, rest) => blocks.push(Block::Heading {
                level,
                content: parse_inline(rest),
            }),
            LineKind::Bullet(rest) => match blocks.last_mut() {
                Some(Block::UnorderedList(items)) => items.push(parse_inline(rest)),
                _ => blocks.push(Block::UnorderedList(vec![parse_inline(rest)])),
            },
            LineKind::Numbered(rest) => match blocks.last_mut() {
                Some(Block::OrderedList(items)) => items.push(parse_inline(rest)),
                _ => blocks.push(Block::OrderedList(vec![parse_inline(rest)])),
            },
            LineKind::Quote(rest) => blocks.push(Block::Quote(parse_inline(rest))),
            LineKind::Plain(rest) => blocks.push(Block::Paragraph(parse_inline(rest))),
        }
    }

    blocks
}

fn inline_html(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push_str(t),
            Inline::Bold(t) => {
                out.push_str("<strong>");
                out.push_str(t);
                out.push_str("</strong>");
            }
            Inline::Italic(t) => {
                out.push_str("<em>");
                out.push_str(t);
                out.push_str("</em>");
            }
            Inline::BoldItalic(t) => {
                out.push_str("<strong><em>");
                out.push_str(t);
                out.push_str("</em></strong>");
            }
        }
    }
}

fn list_html(tag: &str, items: &[Vec<Inline>], out: &mut String) {
    out.push_str(&format!("<{}>", tag));
    for item in items {
        out.push_str("<li>");
        inline_html(item, out);
        out.push_str("</li>");
    }
    out.push_str(&format!("</{}>", tag));
}

/// Render to HTML markup. Blocks are separated by `<br />`; list items are
/// not. A trailing newline in the input adds nothing.
pub fn to_html(text: &str) -> String {
    let mut out = String::new();

    for (i, block) in parse(text).iter().enumerate() {
        if i > 0 {
            out.push_str(LINE_BREAK);
        }
        match block {
            Block::Heading { level, content } => {
                out.push_str(&format!("<h{}>", level));
                inline_html(content, &mut out);
                out.push_str(&format!("</h{}>", level));
            }
            Block::UnorderedList(items) => list_html("ul", items, &mut out),
            Block::OrderedList(items) => list_html("ol", items, &mut out),
            Block::Quote(content) => {
                out.push_str("<blockquote>");
                inline_html(content, &mut out);
                out.push_str("</blockquote>");
            }
            Block::Paragraph(content) => inline_html(content, &mut out),
        }
    }

    out
}

fn inline_spans(inlines: &[Inline], base: Style) -> Vec<Span<'static>> {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(t) => Span::styled(t.clone(), base),
            Inline::Bold(t) => Span::styled(t.clone(), base.add_modifier(Modifier::BOLD)),
            Inline::Italic(t) => Span::styled(t.clone(), base.add_modifier(Modifier::ITALIC)),
            Inline::BoldItalic(t) => Span::styled(
                t.clone(),
                base.add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ),
        })
        .collect()
}

/// Render to styled terminal lines, one block per line (one line per list
/// item).
pub fn to_lines(text: &str) -> Vec<Line<'static>> {
    let mut result: Vec<Line<'static>> = Vec::new();

    for block in parse(text) {
        match block {
            Block::Heading { content, .. } => {
                let style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                result.push(Line::from(inline_spans(&content, style)));
            }
            Block::UnorderedList(items) => {
                for item in items {
                    let mut spans = vec![Span::from("  • ")];
                    spans.extend(inline_spans(&item, Style::default()));
                    result.push(Line::from(spans));
                }
            }
            Block::OrderedList(items) => {
                for (n, item) in items.into_iter().enumerate() {
                    let mut spans = vec![Span::from(format!("  {}. ", n + 1))];
                    spans.extend(inline_spans(&item, Style::default()));
                    result.push(Line::from(spans));
                }
            }
            Block::Quote(content) => {
                let mut spans = vec![Span::styled(
                    "│ ",
                    Style::default().add_modifier(Modifier::DIM),
                )];
                spans.extend(inline_spans(
                    &content,
                    Style::default().add_modifier(Modifier::ITALIC),
                ));
                result.push(Line::from(spans));
            }
            Block::Paragraph(content) => {
                if content.is_empty() {
                    result.push(Line::from(""));
                } else {
                    result.push(Line::from(inline_spans(&content, Style::default())));
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!(to_html("**bold**"), "<strong>bold</strong>");
    }

    #[test]
    fn test_heading_then_body() {
        assert_eq!(to_html("# Title\nBody"), "<h1>Title</h1><br />Body");
    }

    #[test]
    fn test_bullet_list_has_two_items() {
        let html = to_html("* a\n* b");
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(
            parse("* a\n* b"),
            vec![Block::UnorderedList(vec![
                vec![Inline::Text("a".to_string())],
                vec![Inline::Text("b".to_string())],
            ])]
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(to_html("## Two"), "<h2>Two</h2>");
        assert_eq!(to_html("### Three"), "<h3>Three</h3>");
        assert_eq!(to_html("#### Four"), "#### Four");
        assert_eq!(to_html("#NoSpace"), "#NoSpace");
    }

    #[test]
    fn test_emphasis_variants() {
        assert_eq!(
            to_html("***both*** **b** *i*"),
            "<strong><em>both</em></strong> <strong>b</strong> <em>i</em>"
        );
    }

    #[test]
    fn test_emphasis_is_non_greedy() {
        assert_eq!(
            to_html("**one** and **two**"),
            "<strong>one</strong> and <strong>two</strong>"
        );
    }

    #[test]
    fn test_emphasis_inside_list_and_heading() {
        assert_eq!(
            to_html("# A *big* deal\n* **Core** idea"),
            "<h1>A <em>big</em> deal</h1><br /><ul><li><strong>Core</strong> idea</li></ul>"
        );
    }

    #[test]
    fn test_italic_in_bullet_does_not_break_list() {
        assert_eq!(to_html("* a *b*"), "<ul><li>a <em>b</em></li></ul>");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            to_html("Steps:\n1. First\n2. Second\nDone"),
            "Steps:<br /><ol><li>First</li><li>Second</li></ol><br />Done"
        );
    }

    #[test]
    fn test_multi_digit_numbers() {
        assert_eq!(to_html("10. Ten"), "<ol><li>Ten</li></ol>");
    }

    #[test]
    fn test_adjacent_lists_of_different_kinds_stay_separate() {
        assert_eq!(
            to_html("* a\n1. b"),
            "<ul><li>a</li></ul><br /><ol><li>b</li></ol>"
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        assert_eq!(
            to_html("* a\n\n* b"),
            "<ul><li>a</li></ul><br /><br /><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            to_html("> quoted *text*"),
            "<blockquote>quoted <em>text</em></blockquote>"
        );
    }

    #[test]
    fn test_plain_newlines_become_breaks() {
        assert_eq!(to_html("a\n\nb"), "a<br /><br />b");
    }

    #[test]
    fn test_trailing_list_ends_with_closing_tag() {
        assert_eq!(to_html("Intro\n* a\n* b"), "Intro<br /><ul><li>a</li><li>b</li></ul>");
        assert_eq!(to_html("Intro\n* a\n* b\n"), "Intro<br /><ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_unsupported_syntax_passes_through() {
        assert_eq!(
            to_html("```\ncode\n```\n[link](http://x)\n  * nested"),
            "```<br />code<br />```<br />[link](http://x)<br />  * nested"
        );
    }

    #[test]
    fn test_no_escaping() {
        assert_eq!(to_html("<b>raw</b>"), "<b>raw</b>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
        assert!(to_lines("").is_empty());
    }

    #[test]
    fn test_dash_is_not_a_bullet() {
        assert_eq!(to_html("- item"), "- item");
    }

    #[test]
    fn test_to_lines_plain_text() {
        let result = to_lines("Hello world");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].to_string(), "Hello world");
    }

    #[test]
    fn test_to_lines_bold_styling_preserved() {
        let result = to_lines("**bold**");
        let line = &result[0];
        assert_eq!(line.spans.len(), 1);
        assert!(line.spans[0].style.add_modifier.intersects(Modifier::BOLD));
    }

    #[test]
    fn test_to_lines_heading() {
        let result = to_lines("### My Heading");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].spans[0].content, "My Heading");
        assert!(result[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD | Modifier::UNDERLINED));
    }

    #[test]
    fn test_to_lines_lists() {
        let result = to_lines("* one\n* two\n1. first\n2. second");
        assert_eq!(result.len(), 4);
        assert!(result[0].to_string().contains("•"));
        assert!(result[1].to_string().contains("two"));
        assert_eq!(result[3].to_string(), "  2. second");
    }

    #[test]
    fn test_to_lines_empty_lines() {
        let result = to_lines("Line 1\n\nLine 2");
        assert_eq!(result.len(), 3);
        assert_eq!(result[1].to_string(), "");
    }

    #[test]
    fn test_to_lines_quote_is_italic() {
        let result = to_lines("> note");
        assert_eq!(result[0].to_string(), "│ note");
        assert!(result[0].spans[1].style.add_modifier.intersects(Modifier::ITALIC));
    }
}
