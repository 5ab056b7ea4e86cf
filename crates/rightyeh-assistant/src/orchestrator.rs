use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::client::AssistantClient;
use crate::error::{AssistantError, Result};
use crate::types::{Message, MessageRole};
use crate::waiter::{wait_for_completion, WaitOptions};

pub const NO_RESPONSE_TEXT: &str = "No response from assistant";

/// Outcome of one conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub thread_id: String,
    pub response: String,
    pub run_id: String,
}

/// Composes the client and the waiter into a single "send message, get reply"
/// operation.
#[derive(Clone)]
pub struct ChatOrchestrator {
    client: Arc<dyn AssistantClient>,
    wait: WaitOptions,
}

impl ChatOrchestrator {
    pub fn new(client: Arc<dyn AssistantClient>) -> Self {
        Self {
            client,
            wait: WaitOptions::default(),
        }
    }

    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    pub fn client(&self) -> &Arc<dyn AssistantClient> {
        &self.client
    }

    pub fn wait_options(&self) -> WaitOptions {
        self.wait
    }

    /// Run one turn: resolve the thread, post the message, run the assistant,
    /// wait for it and read back the latest assistant reply.
    ///
    /// An absent or blank `thread_id` creates a new thread. Waiter failures
    /// (timeout, failed run) propagate unchanged.
    pub async fn chat_with_assistant(&self, message: &str, thread_id: Option<&str>) -> Result<ChatTurn> {
        if message.trim().is_empty() {
            return Err(AssistantError::Validation("Message is required".to_string()));
        }

        let thread_id = match thread_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id.to_string(),
            None => self.client.create_thread().await?.id,
        };

        let turn = self.run_turn(message, &thread_id).await;
        if let Err(e) = &turn {
            tracing::error!(thread_id = %thread_id, error = %e, "Error in chat turn");
        }
        turn
    }

    async fn run_turn(&self, message: &str, thread_id: &str) -> Result<ChatTurn> {
        self.client
            .add_message(thread_id, message, MessageRole::User)
            .await?;

        let run = self.client.run_assistant(thread_id).await?;

        wait_for_completion(self.client.as_ref(), thread_id, &run.id, self.wait).await?;

        let messages = self.client.get_messages(thread_id).await?;
        let response = latest_assistant_text(&messages)
            .unwrap_or(NO_RESPONSE_TEXT)
            .to_string();

        Ok(ChatTurn {
            thread_id: thread_id.to_string(),
            response,
            run_id: run.id,
        })
    }
}

/// Text of the most recent assistant message, given upstream
/// most-recent-first ordering.
pub fn latest_assistant_text(messages: &[Message]) -> Option<&str> {
    messages
        .iter()
        .find(|m| m.is_assistant())
        .and_then(Message::text)
        .filter(|text| !text.is_empty())
}
