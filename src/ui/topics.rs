use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::topics::TopicBrowser;
use crate::ui::layout::{calculate_browser_chunks, calculate_screen_chunks};
use crate::ui::{draw_header, draw_help};
use crate::utils::{calculate_max_scroll, estimate_text_height, render_markdown};

fn material_text(browser: &TopicBrowser) -> Text<'static> {
    if browser.is_loading() {
        return Text::from(Line::from(Span::styled(
            "Memuat materi...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(error) = browser.error() {
        return Text::from(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    match browser.content() {
        Some(content) => Text::from(render_markdown(content)),
        None => Text::from(Line::from(Span::styled(
            "Pilih topik untuk melihat materi.",
            Style::default().fg(Color::DarkGray),
        ))),
    }
}

pub fn draw_topics(f: &mut Frame, browser: &mut TopicBrowser) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(
        f,
        layout.header_area,
        &format!("Materi: {}", browser.section().title()),
    );

    let panes = calculate_browser_chunks(layout.body_area);

    let items: Vec<ListItem> = browser
        .topics()
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let active = browser.active_topic() == Some(*topic);
            let mut style = if i == browser.cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if active {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            ListItem::new(topic.to_string()).style(style)
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Topik"));
    f.render_widget(list, panes.list_area);

    let text = material_text(browser);
    let visible_height = panes.content_area.height.saturating_sub(2) as usize;
    let text_width = panes.content_area.width.saturating_sub(2) as usize;
    let max_scroll = calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
    browser.scroll = browser.scroll.min(max_scroll);

    let title = browser.active_topic().unwrap_or("Materi").to_string();
    let material = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((browser.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(material, panes.content_area);

    draw_help(
        f,
        layout.help_area,
        &[
            ("↑/↓", "Topic"),
            ("Enter", "Load"),
            ("PgUp/PgDn", "Scroll"),
            ("Esc", "Back"),
        ],
    );
}
