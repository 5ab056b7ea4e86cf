pub mod message;
pub mod run;
pub mod thread;

pub use message::{Message, MessageContent, MessageRole, TextContent};
pub use run::{Run, RunError, RunStatus};
pub use thread::Thread;

use serde::Deserialize;

/// Paginated list envelope returned by the Assistants API
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}
