use crate::ai::client::GenerativeProvider;
use crate::logger;
use crate::models::QuizQuestion;
use serde_json::json;
use thiserror::Error;

pub const NO_CONTENT_MESSAGE: &str = "No content generated. Please try again.";
pub const ERROR_PREFIX: &str = "Error generating content:";

pub const REQUIRED_OPTIONS: [&str; 4] = ["A", "B", "C", "D"];

/// Why a structured quiz question could not be produced.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider call failed: {0}")]
    Provider(String),
    #[error("No content generated from API.")]
    EmptyResponse,
    #[error("response is not a valid quiz question: {0}")]
    InvalidJson(String),
    #[error("option {0} is missing")]
    MissingOption(&'static str),
    #[error("answer {0:?} is not one of the options")]
    InvalidAnswer(String),
}

/// JSON schema sent with every structured request.
pub fn quiz_question_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "question": { "type": "string" },
            "options": {
                "type": "object",
                "properties": {
                    "A": { "type": "string" },
                    "B": { "type": "string" },
                    "C": { "type": "string" },
                    "D": { "type": "string" }
                },
                "required": REQUIRED_OPTIONS
            },
            "answer": { "type": "string" },
            "passage": { "type": "string" },
            "audioScript": { "type": "string" }
        },
        "required": ["question", "options", "answer"]
    })
}

/// Strip code fences and surrounding chatter from a model reply that should
/// contain a single JSON object.
pub fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

pub fn parse_quiz_question(response: &str) -> Result<QuizQuestion, GenerationError> {
    let cleaned = clean_json_response(response);
    let question: QuizQuestion =
        serde_json::from_str(&cleaned).map_err(|e| GenerationError::InvalidJson(e.to_string()))?;

    if let Some(missing) = REQUIRED_OPTIONS
        .iter()
        .find(|label| !question.options.contains_key(**label))
    {
        return Err(GenerationError::MissingOption(*missing));
    }

    if !question.has_valid_answer() {
        return Err(GenerationError::InvalidAnswer(question.answer));
    }

    Ok(question)
}

/// Front door to the generative provider. Two calls, two error policies:
/// `generate_text` never fails and encodes problems in the returned text,
/// `generate_structured` returns a `GenerationError`.
pub struct ContentClient {
    provider: Box<dyn GenerativeProvider>,
}

impl ContentClient {
    pub fn new(provider: Box<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    pub async fn generate_text(&self, prompt: &str) -> String {
        match self.provider.complete(prompt, None).await {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => NO_CONTENT_MESSAGE.to_string(),
            Err(e) => {
                logger::error(&format!("{} {}", ERROR_PREFIX, e));
                format!(
                    "{} {}. Please check your API key and network connection.",
                    ERROR_PREFIX, e
                )
            }
        }
    }

    pub async fn generate_structured(&self, prompt: &str) -> Result<QuizQuestion, GenerationError> {
        let schema = quiz_question_schema();
        let result = match self.provider.complete(prompt, Some(&schema)).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                logger::log(&format!("Raw quiz response: {}", text));
                parse_quiz_question(&text)
            }
            Ok(_) => Err(GenerationError::EmptyResponse),
            Err(e) => Err(GenerationError::Provider(e.to_string())),
        };

        if let Err(e) = &result {
            logger::error(&format!("Error generating JSON content: {}", e));
        }
        result
    }
}
