use rightyeh_assistant::{AssistantClient, ChatOrchestrator};
use rightyeh_persist::{HistoryStore, UserStore};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// Owns every piece of mutable state the service has; nothing lives in
/// module-level globals, so each test builds its own isolated instance.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chat: ChatOrchestrator,
    pub history: Arc<dyn HistoryStore>,
    pub users: Arc<UserStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        assistant: Arc<dyn AssistantClient>,
        history: Arc<dyn HistoryStore>,
        users: Arc<UserStore>,
    ) -> Self {
        let chat = ChatOrchestrator::new(assistant)
            .with_wait_options(config.assistant.wait_options());

        Self {
            config: Arc::new(config),
            chat,
            history,
            users,
            started_at: Instant::now(),
        }
    }

    pub fn assistant(&self) -> &dyn AssistantClient {
        self.chat.client().as_ref()
    }
}
