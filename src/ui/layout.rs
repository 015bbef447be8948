use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ScreenLayout {
    pub header_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

pub struct BrowserLayout {
    pub list_area: Rect,
    pub content_area: Rect,
}

pub struct QuizLayout {
    pub question_area: Rect,
    pub choices_area: Rect,
    pub feedback_area: Rect,
}

pub fn calculate_screen_chunks(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header_area: chunks[0],
        body_area: chunks[1],
        help_area: chunks[2],
    }
}

/// Topic list on the left, generated material on the right.
pub fn calculate_browser_chunks(body: Rect) -> BrowserLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(body);

    BrowserLayout {
        list_area: chunks[0],
        content_area: chunks[1],
    }
}

/// The choice list needs one row per option plus borders. The feedback area
/// has zero height until an answer is submitted.
pub fn calculate_quiz_chunks(body: Rect, choice_count: usize, show_feedback: bool) -> QuizLayout {
    let choices_height = (choice_count as u16).saturating_add(2);
    let constraints = if show_feedback {
        [
            Constraint::Percentage(35),
            Constraint::Length(choices_height),
            Constraint::Min(3),
        ]
    } else {
        [
            Constraint::Min(3),
            Constraint::Length(choices_height),
            Constraint::Length(0),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(body);

    QuizLayout {
        question_area: chunks[0],
        choices_area: chunks[1],
        feedback_area: chunks[2],
    }
}
