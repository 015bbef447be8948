use crate::quiz::{ChoiceStyle, QuizEngine, QuizPhase};
use crate::ui::layout::{calculate_quiz_chunks, calculate_screen_chunks};
use crate::ui::{draw_header, draw_help};
use crate::utils::{calculate_max_scroll, estimate_text_height, render_markdown};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn label_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn choice_style(style: ChoiceStyle) -> Style {
    match style {
        ChoiceStyle::Neutral => Style::default(),
        ChoiceStyle::Selected => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        ChoiceStyle::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        ChoiceStyle::Incorrect => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::CROSSED_OUT),
        ChoiceStyle::Muted => Style::default().fg(Color::DarkGray),
    }
}

fn question_text(engine: &QuizEngine) -> Text<'static> {
    let mut text = Text::default();
    let Some(question) = engine.question() else {
        return text;
    };

    if let Some(script) = &question.audio_script {
        text.push_line(Line::from(Span::styled("Audio Script:", label_style())));
        for line in script.lines() {
            text.push_line(Line::from(line.to_string()));
        }
        text.push_line(Line::from(""));
    }
    if let Some(passage) = &question.passage {
        text.push_line(Line::from(Span::styled("Passage:", label_style())));
        for line in passage.lines() {
            text.push_line(Line::from(line.to_string()));
        }
        text.push_line(Line::from(""));
    }

    text.push_line(Line::from(Span::styled(
        question.question.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text
}

fn feedback_text(engine: &QuizEngine) -> Text<'static> {
    let mut text = Text::default();
    let attempt = engine.attempt();

    let (heading, color) = if attempt.is_correct == Some(true) {
        ("Jawaban Benar!", Color::Green)
    } else {
        ("Jawaban Kurang Tepat", Color::Red)
    };
    text.push_line(Line::from(Span::styled(
        heading,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));

    if let Some(question) = engine.question() {
        text.push_line(Line::from(format!(
            "Jawaban yang benar: {}. {}",
            question.answer,
            question.option_text(&question.answer)
        )));
    }
    text.push_line(Line::from(""));

    if attempt.analysis_loading {
        text.push_line(Line::from(Span::styled(
            "Menganalisis jawaban...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    } else if let Some(analysis) = &attempt.analysis {
        text.extend(render_markdown(analysis));
    }
    text
}

/// Clamp `scroll` to what `text` needs in `area` and return it.
fn bounded_scroll(text: &Text, area: Rect, scroll: &mut u16) -> u16 {
    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2) as usize;
    let content_height = estimate_text_height(text, text_width);
    *scroll = (*scroll).min(calculate_max_scroll(content_height, visible_height));
    *scroll
}

fn draw_status(f: &mut Frame, area: Rect, message: Line<'static>) {
    let status = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

pub fn draw_quiz(f: &mut Frame, engine: &QuizEngine, scroll: &mut u16) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(
        f,
        layout.header_area,
        &format!("Latihan Soal: {}", engine.section().title()),
    );

    match engine.phase() {
        QuizPhase::Loading => {
            draw_status(
                f,
                layout.body_area,
                Line::from(Span::styled(
                    "Memuat soal...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )),
            );
            draw_help(f, layout.help_area, &[("Esc", "Back")]);
        }
        QuizPhase::Error => {
            let message = engine.error().unwrap_or_default().to_string();
            draw_status(
                f,
                layout.body_area,
                Line::from(Span::styled(message, Style::default().fg(Color::Red))),
            );
            draw_help(f, layout.help_area, &[("r", "Retry"), ("Esc", "Back")]);
        }
        QuizPhase::Ready | QuizPhase::Submitted => {
            let submitted = engine.phase() == QuizPhase::Submitted;
            let choice_count = engine.question().map_or(0, |q| q.options.len());
            let quiz = calculate_quiz_chunks(layout.body_area, choice_count, submitted);

            let question = question_text(engine);
            let question_scroll = if submitted {
                0
            } else {
                bounded_scroll(&question, quiz.question_area, scroll)
            };
            let paragraph = Paragraph::new(question)
                .wrap(Wrap { trim: false })
                .scroll((question_scroll, 0))
                .block(Block::default().borders(Borders::ALL).title("Soal"));
            f.render_widget(paragraph, quiz.question_area);

            let choices: Vec<Line> = engine
                .question()
                .map(|q| {
                    q.options
                        .iter()
                        .map(|(label, option)| {
                            let style = choice_style(engine.choice_style(label));
                            Line::from(Span::styled(format!("{}. {}", label, option), style))
                        })
                        .collect()
                })
                .unwrap_or_default();
            let choices = Paragraph::new(choices)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Pilihan"));
            f.render_widget(choices, quiz.choices_area);

            if submitted {
                let feedback = feedback_text(engine);
                let feedback_scroll = bounded_scroll(&feedback, quiz.feedback_area, scroll);
                let paragraph = Paragraph::new(feedback)
                    .wrap(Wrap { trim: false })
                    .scroll((feedback_scroll, 0))
                    .block(Block::default().borders(Borders::ALL).title("Pembahasan"));
                f.render_widget(paragraph, quiz.feedback_area);
                draw_help(
                    f,
                    layout.help_area,
                    &[("Enter/n", "Next"), ("PgUp/PgDn", "Scroll"), ("Esc", "Back")],
                );
            } else {
                let submit_hint = if engine.can_submit() {
                    ("Enter", "Submit")
                } else {
                    ("A-D", "Choose")
                };
                draw_help(
                    f,
                    layout.help_area,
                    &[("↑/↓", "Select"), submit_hint, ("PgUp/PgDn", "Scroll"), ("Esc", "Back")],
                );
            }
        }
    }
}
