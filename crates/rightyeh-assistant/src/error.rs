use std::time::Duration;
use thiserror::Error;

use crate::types::RunStatus;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The upstream call failed (transport, auth, 4xx/5xx, undecodable body)
    #[error("{0}")]
    Upstream(String),

    /// The run reached a terminal status other than `completed`
    #[error("Run {status}: {message}")]
    RunFailed { status: RunStatus, message: String },

    /// The run may still finish upstream; we only stopped watching it
    #[error("Run timeout - assistant took too long to respond")]
    RunTimeout { run_id: String, waited: Duration },
}

impl AssistantError {
    pub(crate) fn upstream(context: &str, detail: impl std::fmt::Display) -> Self {
        Self::Upstream(format!("{}: {}", context, detail))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RunTimeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
