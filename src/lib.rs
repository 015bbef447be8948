pub mod ai;
pub mod ai_worker;
pub mod app;
pub mod config;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod topics;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{
    ContentClient, DEFAULT_MODEL, GenerationError, GenerativeProvider, ModelConfig,
    OpenRouterClient,
};
pub use ai_worker::spawn_ai_worker;
pub use app::App;
pub use config::{Config, ConfigError};
pub use models::{AiRequest, AiResponse, AppState, QuizQuestion, QuizSection};
pub use quiz::QuizEngine;
pub use topics::TopicBrowser;
pub use utils::{render_markdown, render_markdown_html};
