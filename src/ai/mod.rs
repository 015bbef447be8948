pub mod client;
pub mod generator;
pub mod prompts;

// Public API exports
pub use client::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerativeProvider, ModelConfig,
    OpenRouterClient,
};
pub use generator::{ContentClient, ERROR_PREFIX, GenerationError, NO_CONTENT_MESSAGE};
