use crate::logger;
use crate::models::{AiRequest, AiResponse, AppState, QuizSection, RequestSlot};
use crate::quiz::{QuizEngine, QuizPhase};
use crate::topics::TopicBrowser;
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const HOME_ENTRIES: [(&str, &str); 2] = [
    (
        "Materi Belajar",
        "Pelajari konsep, strategi, dan contoh soal untuk setiap bagian.",
    ),
    (
        "Latihan Soal",
        "Uji pemahaman Anda dengan soal-soal yang dibuat oleh AI.",
    ),
];

/// Top-level view switch. Owns the screen that is currently open and routes
/// worker responses to it; a response for a screen that has since been
/// closed finds no owner and is dropped.
pub struct App {
    pub state: AppState,
    pub home_index: usize,
    pub section_index: usize,
    pub browser: Option<TopicBrowser>,
    pub quiz: Option<QuizEngine>,
    pub quiz_scroll: u16,
    pub should_quit: bool,
    ai_tx: Sender<AiRequest>,
}

impl App {
    pub fn new(ai_tx: Sender<AiRequest>) -> Self {
        Self {
            state: AppState::Home,
            home_index: 0,
            section_index: 0,
            browser: None,
            quiz: None,
            quiz_scroll: 0,
            should_quit: false,
            ai_tx,
        }
    }

    fn dispatch(&self, request: AiRequest) {
        if self.ai_tx.send(request).is_err() {
            logger::error("AI worker is gone, request dropped");
        }
    }

    fn selected_section(&self) -> QuizSection {
        QuizSection::ALL[self.section_index.min(QuizSection::ALL.len() - 1)]
    }

    fn go_to(&mut self, state: AppState) {
        logger::log(&format!("Navigating to {:?}", state));
        self.browser = match state {
            AppState::Listening => Some(TopicBrowser::new(QuizSection::Listening)),
            AppState::Structure => Some(TopicBrowser::new(QuizSection::Structure)),
            AppState::Reading => Some(TopicBrowser::new(QuizSection::Reading)),
            _ => None,
        };
        if state != AppState::Practice {
            self.quiz = None;
        }
        self.state = state;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Home => self.handle_home_key(key.code),
            AppState::MaterialSelection => self.handle_material_key(key.code),
            AppState::Listening | AppState::Structure | AppState::Reading => {
                self.handle_topic_key(key.code)
            }
            AppState::Practice => {
                if self.quiz.is_some() {
                    self.handle_quiz_key(key.code);
                } else {
                    self.handle_practice_key(key.code);
                }
            }
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.home_index = self.home_index.saturating_sub(1),
            KeyCode::Down => {
                self.home_index = (self.home_index + 1).min(HOME_ENTRIES.len() - 1);
            }
            KeyCode::Enter => {
                self.section_index = 0;
                if self.home_index == 0 {
                    self.go_to(AppState::MaterialSelection);
                } else {
                    self.go_to(AppState::Practice);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn move_section(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => {
                self.section_index = self.section_index.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.section_index = (self.section_index + 1).min(QuizSection::ALL.len() - 1);
                true
            }
            _ => false,
        }
    }

    fn handle_material_key(&mut self, code: KeyCode) {
        if self.move_section(code) {
            return;
        }
        match code {
            KeyCode::Enter => {
                let state = match self.selected_section() {
                    QuizSection::Listening => AppState::Listening,
                    QuizSection::Structure => AppState::Structure,
                    QuizSection::Reading => AppState::Reading,
                };
                self.go_to(state);
            }
            KeyCode::Esc => self.go_to(AppState::Home),
            _ => {}
        }
    }

    fn handle_topic_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.go_to(AppState::MaterialSelection);
            return;
        }
        let Some(browser) = self.browser.as_mut() else {
            return;
        };
        let request = match code {
            KeyCode::Up => {
                browser.move_cursor(-1);
                None
            }
            KeyCode::Down => {
                browser.move_cursor(1);
                None
            }
            KeyCode::PageUp => {
                browser.scroll_by(-5);
                None
            }
            KeyCode::PageDown => {
                browser.scroll_by(5);
                None
            }
            KeyCode::Enter => browser.select_current(),
            _ => None,
        };
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    fn handle_practice_key(&mut self, code: KeyCode) {
        if self.move_section(code) {
            return;
        }
        match code {
            KeyCode::Enter => {
                let mut engine = QuizEngine::new(self.selected_section());
                let request = engine.begin_fetch();
                self.quiz = Some(engine);
                self.quiz_scroll = 0;
                self.dispatch(request);
            }
            KeyCode::Esc => self.go_to(AppState::Home),
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.quiz = None;
            return;
        }
        let Some(engine) = self.quiz.as_mut() else {
            return;
        };

        let request = match code {
            KeyCode::Up => {
                engine.select_relative(-1);
                None
            }
            KeyCode::Down => {
                engine.select_relative(1);
                None
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() && engine.phase() == QuizPhase::Ready => {
                engine.select(&c.to_ascii_uppercase().to_string());
                None
            }
            KeyCode::Enter => match engine.phase() {
                QuizPhase::Ready => engine.submit(),
                QuizPhase::Submitted => engine.next(),
                _ => None,
            },
            KeyCode::Char('n') | KeyCode::Char('r') => engine.next(),
            KeyCode::PageUp => {
                self.quiz_scroll = self.quiz_scroll.saturating_sub(5);
                None
            }
            KeyCode::PageDown => {
                self.quiz_scroll = self.quiz_scroll.saturating_add(5);
                None
            }
            _ => None,
        };

        if let Some(request) = request {
            self.quiz_scroll = 0;
            self.dispatch(request);
        }
    }

    pub fn process_ai_response(&mut self, response: AiResponse) {
        let ticket = response.ticket();
        let applied = match (ticket.slot, response) {
            (RequestSlot::Question, AiResponse::Question { ticket, result }) => self
                .quiz
                .as_mut()
                .is_some_and(|engine| engine.resolve_question(ticket, result)),
            (RequestSlot::Analysis, AiResponse::Text { ticket, text }) => self
                .quiz
                .as_mut()
                .is_some_and(|engine| engine.resolve_analysis(ticket, text)),
            (RequestSlot::Material(_), AiResponse::Text { ticket, text }) => self
                .browser
                .as_mut()
                .is_some_and(|browser| browser.resolve(ticket, text)),
            (slot, _) => {
                logger::error(&format!("Response shape does not match slot {:?}", slot));
                false
            }
        };

        if !applied {
            logger::log(&format!(
                "Dropped response for {:?} (generation {})",
                ticket.slot, ticket.generation
            ));
        }
    }
}
