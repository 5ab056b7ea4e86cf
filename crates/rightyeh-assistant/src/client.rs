use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Message, MessageRole, Run, Thread};

/// One-to-one mapping onto the upstream Assistants primitives.
///
/// Implementations add no retries or other logic; each call is exactly one
/// upstream request.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Create a new, empty conversation thread
    async fn create_thread(&self) -> Result<Thread>;

    /// Append a message to an existing thread
    async fn add_message(&self, thread_id: &str, content: &str, role: MessageRole) -> Result<Message>;

    /// Start a run of the configured assistant on the thread's current history
    async fn run_assistant(&self, thread_id: &str) -> Result<Run>;

    /// Fetch the current state of a run
    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// List a thread's messages in upstream order (most recent first)
    async fn get_messages(&self, thread_id: &str) -> Result<Vec<Message>>;
}
