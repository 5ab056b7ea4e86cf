pub mod client;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod types;
pub mod waiter;

pub use client::AssistantClient;
pub use config::OpenAIConfig;
pub use error::{AssistantError, Result};
pub use openai::OpenAIAssistantClient;
pub use orchestrator::{ChatOrchestrator, ChatTurn, NO_RESPONSE_TEXT};
pub use types::{Message, MessageContent, MessageRole, Run, RunStatus, Thread};
pub use waiter::{wait_for_completion, WaitOptions};
