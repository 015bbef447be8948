pub mod markdown;

use ratatui::text::Text;
use unicode_width::UnicodeWidthStr;

pub use markdown::{parse as parse_markdown, to_html as render_markdown_html, to_lines as render_markdown};

/// Estimate how many rows `text` takes in a wrapped paragraph of `width`
/// columns. Word boundaries are ignored, so this can under-count slightly.
pub fn estimate_text_height(text: &Text, width: usize) -> usize {
    if width == 0 {
        return text.lines.len();
    }

    text.lines
        .iter()
        .map(|line| {
            let line_width: usize = line
                .spans
                .iter()
                .map(|span| span.content.as_ref().width())
                .sum();
            line_width.div_ceil(width).max(1)
        })
        .sum()
}

pub fn calculate_max_scroll(content_height: usize, visible_height: usize) -> u16 {
    content_height
        .saturating_sub(visible_height)
        .min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Line;

    #[test]
    fn test_estimate_height_short_lines() {
        let text = Text::from(vec![Line::from("one"), Line::from(""), Line::from("two")]);
        assert_eq!(estimate_text_height(&text, 20), 3);
    }

    #[test]
    fn test_estimate_height_wrapped_line() {
        let text = Text::from("a".repeat(25));
        assert_eq!(estimate_text_height(&text, 10), 3);
    }

    #[test]
    fn test_estimate_height_wide_chars() {
        // Each CJK character takes two columns.
        let text = Text::from("漢字漢字漢字");
        assert_eq!(estimate_text_height(&text, 4), 3);
    }

    #[test]
    fn test_estimate_height_zero_width() {
        let text = Text::from("abc");
        assert_eq!(estimate_text_height(&text, 0), 1);
    }

    #[test]
    fn test_max_scroll() {
        assert_eq!(calculate_max_scroll(10, 20), 0);
        assert_eq!(calculate_max_scroll(30, 20), 10);
    }
}
