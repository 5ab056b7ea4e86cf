use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ANONYMOUS_USER: &str = "anonymous";

/// One local record of a user message and the assistant's reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub user_message: String,
    pub assistant_response: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
}

impl HistoryEntry {
    pub fn new(
        user_message: impl Into<String>,
        assistant_response: impl Into<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            assistant_response: assistant_response.into(),
            timestamp: Utc::now(),
            user_id: user_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        }
    }
}
