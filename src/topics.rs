use crate::ai::prompts::{material_prompt, topics};
use crate::logger;
use crate::models::{AiRequest, QuizSection, RequestSlot, RequestTicket};

/// Marker that `generate_text` puts in front of every failure.
const ERROR_MARKER: &str = "Error";

/// Study material browser for one section: pick a topic, show the generated
/// explanation. Only the most recently selected topic's result is kept.
#[derive(Debug)]
pub struct TopicBrowser {
    section: QuizSection,
    topics: &'static [&'static str],
    pub cursor: usize,
    pub scroll: u16,
    active_topic: Option<String>,
    content: Option<String>,
    error: Option<String>,
    loading: bool,
    generation: Option<u64>,
}

impl TopicBrowser {
    pub fn new(section: QuizSection) -> Self {
        Self {
            section,
            topics: topics(section),
            cursor: 0,
            scroll: 0,
            active_topic: None,
            content: None,
            error: None,
            loading: false,
            generation: None,
        }
    }

    pub fn section(&self) -> QuizSection {
        self.section
    }

    pub fn topics(&self) -> &'static [&'static str] {
        self.topics
    }

    pub fn active_topic(&self) -> Option<&str> {
        self.active_topic.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.topics.is_empty() {
            return;
        }
        let max = self.topics.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    pub fn select_current(&mut self) -> Option<AiRequest> {
        let topics = self.topics;
        let topic = *topics.get(self.cursor)?;
        Some(self.select_topic(topic))
    }

    /// Any previous result, including one still in flight, is dropped.
    pub fn select_topic(&mut self, topic: &str) -> AiRequest {
        let ticket = RequestTicket::issue(RequestSlot::Material(self.section));
        self.active_topic = Some(topic.to_string());
        self.content = None;
        self.error = None;
        self.loading = true;
        self.scroll = 0;
        self.generation = Some(ticket.generation);

        logger::log(&format!(
            "Requesting {} material for {:?} (generation {})",
            self.section, topic, ticket.generation
        ));

        AiRequest::GenerateText {
            ticket,
            prompt: material_prompt(self.section, topic),
        }
    }

    /// Returns false when the response was stale and ignored.
    pub fn resolve(&mut self, ticket: RequestTicket, text: String) -> bool {
        if ticket.slot != RequestSlot::Material(self.section)
            || self.generation != Some(ticket.generation)
        {
            logger::log(&format!(
                "Discarding stale {} material (generation {})",
                self.section, ticket.generation
            ));
            return false;
        }

        if text.starts_with(ERROR_MARKER) {
            self.error = Some(text);
        } else {
            self.content = Some(text);
        }
        self.loading = false;
        true
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = (self.scroll as i32 + delta).max(0) as u16;
    }
}
