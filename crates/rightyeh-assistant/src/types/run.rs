use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a run.
///
/// `Unknown` absorbs any status string added upstream after this was written,
/// and is treated as still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }

    /// Statuses a run can leave on its own. Everything else except
    /// `completed` ends the wait without a reply; `requires_action` among
    /// them, since nothing here submits tool outputs.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::Queued | Self::InProgress | Self::Cancelling | Self::Unknown
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunError {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// One invocation of the assistant against a thread. Observed, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    #[serde(default)]
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
    #[serde(default)]
    pub created_at: i64,
}

impl Run {
    pub fn new(id: impl Into<String>, thread_id: impl Into<String>, status: RunStatus) -> Self {
        Self {
            id: id.into(),
            thread_id: thread_id.into(),
            assistant_id: String::new(),
            status,
            last_error: None,
            created_at: 0,
        }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.last_error = Some(RunError {
            code: None,
            message: Some(message.into()),
        });
        self
    }

    pub fn error_message(&self) -> Option<&str> {
        self.last_error.as_ref().and_then(|e| e.message.as_deref())
    }
}
