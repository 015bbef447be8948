use async_trait::async_trait;
use openrouter_api::{
    api::request::ResponseFormatConfig,
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    models::structured::{JsonSchemaConfig, JsonSchemaDefinition},
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

const SCHEMA_NAME: &str = "quiz_question";

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// `Ok(None)` means the provider answered but produced no text.
pub type ProviderResult = Result<Option<String>, ProviderError>;

/// A single round trip to a generative model. When `schema` is given the
/// reply must be one JSON object validating against it.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn complete(&self, prompt: &str, schema: Option<&serde_json::Value>) -> ProviderResult;
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

impl OpenRouterClient {
    /// One call is one round trip: the library's automatic retries are
    /// turned off.
    pub fn new(api_key: &str, config: ModelConfig) -> Result<Self, String> {
        let client = openrouter_api::OpenRouterClient::new()
            .skip_url_configuration()
            .without_retries()
            .with_api_key(api_key)
            .map_err(|e| format!("Failed to create OpenRouter client: {}", e))?;

        Ok(Self { client, config })
    }

    fn build_messages(prompt: &str, structured: bool) -> Vec<Message> {
        let system = if structured {
            "You are a TOEFL ITP expert. Respond ONLY with a single JSON object \
             (no markdown, no extra text) that follows the response schema."
        } else {
            "You are a TOEFL ITP expert tutor."
        };

        vec![Message::text("system", system), Message::text("user", prompt)]
    }

    /// A structured call carries `schema` as a strict `json_schema` response
    /// format; a text call carries none.
    fn build_request(
        &self,
        prompt: &str,
        schema: Option<&serde_json::Value>,
    ) -> Result<ChatCompletionRequest, ProviderError> {
        let response_format = match schema {
            Some(schema) => {
                let definition: JsonSchemaDefinition = serde_json::from_value(schema.clone())
                    .map_err(|e| format!("Invalid response schema: {}", e))?;
                Some(ResponseFormatConfig {
                    format_type: "json_schema".to_string(),
                    json_schema: JsonSchemaConfig {
                        name: SCHEMA_NAME.to_string(),
                        strict: true,
                        schema: definition,
                    },
                })
            }
            None => None,
        };
        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        Ok(ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: Self::build_messages(prompt, schema.is_some()),
            provider: Some(provider),
            stream: None,
            response_format,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        })
    }
}

#[async_trait]
impl GenerativeProvider for OpenRouterClient {
    async fn complete(&self, prompt: &str, schema: Option<&serde_json::Value>) -> ProviderResult {
        let request = self.build_request(prompt, schema)?;

        let response = self
            .client
            .chat()?
            .chat_completion(request)
            .await
            .map_err(|e| format!("OpenRouter API error: {}", e))?;

        let Some(choice) = response.choices.first() else {
            return Ok(None);
        };

        let text = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| {
                    if let openrouter_api::ContentPart::Text(tc) = p {
                        Some(tc.text.clone())
                    } else {
                        None
                    }
                })
                .collect::<Vec<String>>()
                .join("\n"),
        };

        Ok(Some(text))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::sleep;

    #[derive(Debug, Clone)]
    pub enum MockReply {
        Text(String),
        Empty,
        Fail(String),
    }

    /// Mock provider for tests. Replies are picked by the first rule whose key
    /// occurs in the prompt, after the rule's simulated network delay.
    pub struct MockProvider {
        rules: Vec<(String, Duration, MockReply)>,
        fallback: MockReply,
        calls: Mutex<Vec<(String, bool)>>,
    }

    impl MockProvider {
        pub fn new(fallback: MockReply) -> Self {
            Self {
                rules: Vec::new(),
                fallback,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn text(reply: &str) -> Self {
            Self::new(MockReply::Text(reply.to_string()))
        }

        pub fn with_rule(mut self, prompt_contains: &str, delay: Duration, reply: MockReply) -> Self {
            self.rules.push((prompt_contains.to_string(), delay, reply));
            self
        }

        /// Prompts seen so far, with whether a schema was attached.
        pub fn calls(&self) -> Vec<(String, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeProvider for MockProvider {
        async fn complete(&self, prompt: &str, schema: Option<&serde_json::Value>) -> ProviderResult {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), schema.is_some()));

            let (delay, reply) = self
                .rules
                .iter()
                .find(|(key, _, _)| prompt.contains(key.as_str()))
                .map(|(_, delay, reply)| (*delay, reply.clone()))
                .unwrap_or((Duration::ZERO, self.fallback.clone()));

            if !delay.is_zero() {
                sleep(delay).await;
            }

            match reply {
                MockReply::Text(text) => Ok(Some(text)),
                MockReply::Empty => Ok(None),
                MockReply::Fail(message) => Err(message.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_default() {
        let config = ModelConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, Some(DEFAULT_MAX_TOKENS));
    }

    #[test]
    fn test_model_config_serialization_skips_none() {
        let config = ModelConfig {
            model: "m".to_string(),
            temperature: None,
            max_tokens: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"model":"m"}"#);
    }

    const TEST_KEY: &str = "sk-or-v1-0123456789abcdef0123456789abcdef";

    fn test_client() -> OpenRouterClient {
        OpenRouterClient::new(TEST_KEY, ModelConfig::default()).unwrap()
    }

    #[test]
    fn test_client_makes_single_attempt() {
        let client = test_client();
        assert_eq!(client.client.config.retry_config.max_retries, 0);
        assert!(client.client.config.api_key.is_some());
    }

    #[test]
    fn test_client_rejects_malformed_key() {
        assert!(OpenRouterClient::new("short", ModelConfig::default()).is_err());
    }

    #[test]
    fn test_structured_request_carries_json_schema() {
        let client = test_client();
        let schema = crate::ai::generator::quiz_question_schema();
        let request = client.build_request("question please", Some(&schema)).unwrap();

        let format = request.response_format.expect("structured call has a format");
        assert_eq!(format.format_type, "json_schema");
        assert!(format.json_schema.strict);
        assert_eq!(format.json_schema.schema.schema_type, "object");
        assert!(format.json_schema.schema.properties.contains_key("audioScript"));
        assert_eq!(
            format.json_schema.schema.required,
            Some(vec![
                "question".to_string(),
                "options".to_string(),
                "answer".to_string()
            ])
        );
        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.messages.len(), 2);
    }

    #[test]
    fn test_text_request_has_no_format() {
        let client = test_client();
        let request = client.build_request("explain appositives", None).unwrap();
        assert!(request.response_format.is_none());
        assert_eq!(request.messages[1].role, "user");
    }

    #[tokio::test]
    async fn test_mock_provider_rules() {
        use mock::{MockProvider, MockReply};
        use std::time::Duration;

        let provider = MockProvider::text("default")
            .with_rule("boom", Duration::ZERO, MockReply::Fail("down".to_string()))
            .with_rule("quiet", Duration::from_millis(5), MockReply::Empty);

        assert_eq!(
            provider.complete("hello", None).await.unwrap(),
            Some("default".to_string())
        );
        assert_eq!(provider.complete("be quiet", None).await.unwrap(), None);
        assert!(provider.complete("boom", None).await.is_err());
        assert_eq!(provider.calls().len(), 3);
    }
}
