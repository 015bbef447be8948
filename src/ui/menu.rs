use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::HOME_ENTRIES;
use crate::models::QuizSection;
use crate::ui::layout::calculate_screen_chunks;
use crate::ui::{draw_header, draw_help};

fn highlight(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn draw_entries(f: &mut Frame, area: Rect, title: &str, entries: &[(&str, &str)], selected: usize) {
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, (name, description))| {
            let marker = if i == selected { "> " } else { "  " };
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("{}{}", marker, name),
                    highlight(i == selected),
                )),
                Line::from(Span::styled(
                    format!("    {}", description),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title.to_string()),
    );
    f.render_widget(list, area);
}

pub fn draw_home(f: &mut Frame, selected: usize) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "TOEFL ITP Trainer");

    let intro = Paragraph::new("Pilih menu untuk mulai belajar.")
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(layout.body_area);
    f.render_widget(intro, body[0]);
    draw_entries(f, body[1], "Menu", &HOME_ENTRIES, selected);

    draw_help(
        f,
        layout.help_area,
        &[("↑/↓", "Navigate"), ("Enter", "Open"), ("q", "Quit")],
    );
}

/// Section list shared by Material Selection and the Practice picker.
pub fn draw_section_menu(f: &mut Frame, title: &str, selected: usize) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, title);

    let entries: Vec<(&str, &str)> = QuizSection::ALL
        .iter()
        .map(|section| (section.name(), section.title()))
        .collect();
    draw_entries(f, layout.body_area, "Bagian", &entries, selected);

    draw_help(
        f,
        layout.help_area,
        &[("↑/↓", "Navigate"), ("Enter", "Select"), ("Esc", "Back")],
    );
}
