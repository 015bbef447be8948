use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A generated practice question. Options are keyed by choice label and
/// iterate in label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: BTreeMap<String, String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    #[serde(
        rename = "audioScript",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub audio_script: Option<String>,
}

impl QuizQuestion {
    pub fn has_valid_answer(&self) -> bool {
        self.options.contains_key(&self.answer)
    }

    pub fn option_text(&self, label: &str) -> &str {
        self.options.get(label).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizSection {
    Listening,
    Structure,
    Reading,
}

impl QuizSection {
    pub const ALL: [QuizSection; 3] = [
        QuizSection::Listening,
        QuizSection::Structure,
        QuizSection::Reading,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuizSection::Listening => "Listening",
            QuizSection::Structure => "Structure",
            QuizSection::Reading => "Reading",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            QuizSection::Listening => "Listening Comprehension",
            QuizSection::Structure => "Structure & Written Expression",
            QuizSection::Reading => "Reading Comprehension",
        }
    }
}

impl fmt::Display for QuizSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which request lifecycle a ticket belongs to. Each slot has its own
/// generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestSlot {
    Question,
    Analysis,
    Material(QuizSection),
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Tag carried by a request and its response. Generations are unique across
/// the process, so a response can only ever match the owner that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub slot: RequestSlot,
    pub generation: u64,
}

impl RequestTicket {
    pub fn issue(slot: RequestSlot) -> Self {
        Self {
            slot,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AiRequest {
    GenerateQuestion {
        ticket: RequestTicket,
        prompt: String,
    },
    GenerateText {
        ticket: RequestTicket,
        prompt: String,
    },
}

impl AiRequest {
    pub fn ticket(&self) -> RequestTicket {
        match self {
            AiRequest::GenerateQuestion { ticket, .. } | AiRequest::GenerateText { ticket, .. } => {
                *ticket
            }
        }
    }
}

#[derive(Debug)]
pub enum AiResponse {
    Question {
        ticket: RequestTicket,
        result: Result<QuizQuestion, crate::ai::GenerationError>,
    },
    Text {
        ticket: RequestTicket,
        text: String,
    },
}

impl AiResponse {
    pub fn ticket(&self) -> RequestTicket {
        match self {
            AiResponse::Question { ticket, .. } | AiResponse::Text { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    MaterialSelection,
    Listening,
    Structure,
    Reading,
    Practice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_deserializes_camel_case_script() {
        let json = r#"{
            "question": "What does the woman mean?",
            "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
            "answer": "C",
            "audioScript": "M: Coffee? W: I'd rather not."
        }"#;
        let question: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(
            question.audio_script.as_deref(),
            Some("M: Coffee? W: I'd rather not.")
        );
        assert!(question.passage.is_none());
        assert!(question.has_valid_answer());
    }

    #[test]
    fn test_options_iterate_in_label_order() {
        let json = r#"{"question": "q", "options": {"D": "4", "B": "2", "A": "1", "C": "3"}, "answer": "A"}"#;
        let question: QuizQuestion = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = question.options.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_answer_outside_options_is_invalid() {
        let json = r#"{"question": "q", "options": {"A": "1", "B": "2"}, "answer": "E"}"#;
        let question: QuizQuestion = serde_json::from_str(json).unwrap();
        assert!(!question.has_valid_answer());
        assert_eq!(question.option_text("E"), "");
    }

    #[test]
    fn test_tickets_are_unique() {
        let first = RequestTicket::issue(RequestSlot::Question);
        let second = RequestTicket::issue(RequestSlot::Question);
        assert!(second.generation > first.generation);
        assert_eq!(second.slot, RequestSlot::Question);
    }

    #[test]
    fn test_section_display() {
        assert_eq!(QuizSection::Reading.to_string(), "Reading");
        assert_eq!(QuizSection::Structure.title(), "Structure & Written Expression");
    }
}
