use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message stored on an upstream thread. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    #[serde(default)]
    pub content: Vec<MessageContent>,
    /// Unix timestamp (seconds)
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl Message {
    /// Text of the first content block, if that block is text.
    ///
    /// Mirrors how the upstream renders a single-part reply; callers decide
    /// what to show when there is none.
    pub fn text(&self) -> Option<&str> {
        self.content.first().and_then(MessageContent::as_text)
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}

/// Content blocks the Assistants API can attach to a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text {
        text: TextContent,
    },
    ImageFile {
        image_file: serde_json::Value,
    },
    ImageUrl {
        image_url: serde_json::Value,
    },
    Refusal {
        refusal: String,
    },
    /// Any block type not modelled here
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

impl MessageContent {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            text: TextContent {
                value: value.into(),
                annotations: Vec::new(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(&text.value),
            _ => None,
        }
    }
}
