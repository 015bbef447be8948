use crate::ai::GenerationError;
use crate::ai::prompts::{analysis_prompt, question_prompt};
use crate::logger;
use crate::models::{AiRequest, QuizQuestion, QuizSection, RequestSlot, RequestTicket};

pub const LOAD_ERROR_MESSAGE: &str = "Gagal memuat soal. Silakan coba lagi.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Ready,
    Submitted,
    Error,
}

/// How an answer choice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStyle {
    Neutral,
    Selected,
    Correct,
    Incorrect,
    Muted,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attempt {
    pub selected_answer: Option<String>,
    pub submitted: bool,
    pub is_correct: Option<bool>,
    pub analysis: Option<String>,
    pub analysis_loading: bool,
}

/// One practice question at a time for a single section.
///
/// The engine never performs I/O. Each transition that needs the provider
/// returns an [`AiRequest`]; the matching response is fed back through
/// `resolve_question` / `resolve_analysis` and applied only if its ticket is
/// still the current one for that slot.
#[derive(Debug)]
pub struct QuizEngine {
    section: QuizSection,
    phase: QuizPhase,
    question: Option<QuizQuestion>,
    error: Option<String>,
    attempt: Attempt,
    question_generation: Option<u64>,
    analysis_generation: Option<u64>,
}

impl QuizEngine {
    pub fn new(section: QuizSection) -> Self {
        Self {
            section,
            phase: QuizPhase::Loading,
            question: None,
            error: None,
            attempt: Attempt::default(),
            question_generation: None,
            analysis_generation: None,
        }
    }

    pub fn section(&self) -> QuizSection {
        self.section
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        self.question.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    /// Enter Loading: drop the current question and attempt, supersede any
    /// outstanding question or analysis request.
    pub fn begin_fetch(&mut self) -> AiRequest {
        let ticket = RequestTicket::issue(RequestSlot::Question);
        self.phase = QuizPhase::Loading;
        self.question = None;
        self.error = None;
        self.attempt = Attempt::default();
        self.question_generation = Some(ticket.generation);
        self.analysis_generation = None;

        logger::log(&format!(
            "Requesting {} question (generation {})",
            self.section, ticket.generation
        ));

        AiRequest::GenerateQuestion {
            ticket,
            prompt: question_prompt(self.section),
        }
    }

    /// Returns false when the response was stale and ignored.
    pub fn resolve_question(
        &mut self,
        ticket: RequestTicket,
        result: Result<QuizQuestion, GenerationError>,
    ) -> bool {
        if ticket.slot != RequestSlot::Question || self.question_generation != Some(ticket.generation)
        {
            logger::log(&format!(
                "Discarding stale question response (generation {})",
                ticket.generation
            ));
            return false;
        }

        match result {
            Ok(question) => {
                self.question = Some(question);
                self.phase = QuizPhase::Ready;
            }
            Err(e) => {
                logger::error(&format!("Failed to load {} question: {}", self.section, e));
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                self.phase = QuizPhase::Error;
            }
        }
        true
    }

    /// Selecting again overwrites the previous choice.
    pub fn select(&mut self, label: &str) -> bool {
        if self.phase != QuizPhase::Ready {
            return false;
        }
        let Some(question) = &self.question else {
            return false;
        };
        if !question.options.contains_key(label) {
            return false;
        }
        self.attempt.selected_answer = Some(label.to_string());
        true
    }

    /// Move the selection up or down the option list, starting from the
    /// first option when nothing is selected yet.
    pub fn select_relative(&mut self, delta: isize) -> bool {
        let Some(question) = &self.question else {
            return false;
        };
        let labels: Vec<&String> = question.options.keys().collect();
        if labels.is_empty() {
            return false;
        }

        let next = match &self.attempt.selected_answer {
            Some(current) => {
                let index = labels.iter().position(|l| *l == current).unwrap_or(0) as isize;
                (index + delta).clamp(0, labels.len() as isize - 1) as usize
            }
            None => 0,
        };
        let label = labels[next].clone();
        self.select(&label)
    }

    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::Ready && self.attempt.selected_answer.is_some()
    }

    /// Score the selection and request the analysis. No-op without a
    /// selection.
    pub fn submit(&mut self) -> Option<AiRequest> {
        if !self.can_submit() {
            return None;
        }
        let question = self.question.as_ref()?;
        let selected = self.attempt.selected_answer.clone()?;

        let ticket = RequestTicket::issue(RequestSlot::Analysis);
        self.attempt.submitted = true;
        self.attempt.is_correct = Some(selected == question.answer);
        self.attempt.analysis = None;
        self.attempt.analysis_loading = true;
        self.analysis_generation = Some(ticket.generation);
        self.phase = QuizPhase::Submitted;

        logger::log(&format!(
            "Submitted {} for {} question, correct: {}",
            selected,
            self.section,
            selected == question.answer
        ));

        Some(AiRequest::GenerateText {
            ticket,
            prompt: analysis_prompt(question, &selected),
        })
    }

    pub fn resolve_analysis(&mut self, ticket: RequestTicket, text: String) -> bool {
        if ticket.slot != RequestSlot::Analysis || self.analysis_generation != Some(ticket.generation)
        {
            logger::log(&format!(
                "Discarding stale analysis response (generation {})",
                ticket.generation
            ));
            return false;
        }
        self.attempt.analysis = Some(text);
        self.attempt.analysis_loading = false;
        true
    }

    /// Fetch the next question, or retry after a failed load.
    pub fn next(&mut self) -> Option<AiRequest> {
        match self.phase {
            QuizPhase::Submitted | QuizPhase::Error => Some(self.begin_fetch()),
            QuizPhase::Loading | QuizPhase::Ready => None,
        }
    }

    pub fn choice_style(&self, label: &str) -> ChoiceStyle {
        let selected = self.attempt.selected_answer.as_deref() == Some(label);
        if !self.attempt.submitted {
            return if selected {
                ChoiceStyle::Selected
            } else {
                ChoiceStyle::Neutral
            };
        }

        let is_answer = self.question.as_ref().is_some_and(|q| q.answer == label);
        if is_answer {
            ChoiceStyle::Correct
        } else if selected {
            ChoiceStyle::Incorrect
        } else {
            ChoiceStyle::Muted
        }
    }
}
