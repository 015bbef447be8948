pub mod layout;
mod menu;
mod quiz;
mod topics;

use crate::app::App;
use crate::models::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub use menu::{draw_home, draw_section_menu};
pub use quiz::draw_quiz;
pub use topics::draw_topics;

pub(crate) fn draw_header(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub(crate) fn draw_help(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::from(format!(" {}  ", action)));
    }
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.state {
        AppState::Home => draw_home(f, app.home_index),
        AppState::MaterialSelection => draw_section_menu(f, "Materi Belajar", app.section_index),
        AppState::Listening | AppState::Structure | AppState::Reading => {
            if let Some(browser) = app.browser.as_mut() {
                draw_topics(f, browser);
            }
        }
        AppState::Practice => match app.quiz.as_ref() {
            Some(engine) => draw_quiz(f, engine, &mut app.quiz_scroll),
            None => draw_section_menu(f, "Latihan Soal", app.section_index),
        },
    }
}
