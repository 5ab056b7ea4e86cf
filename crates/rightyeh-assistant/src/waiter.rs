use std::time::Duration;
use tokio::time::Instant;

use crate::client::AssistantClient;
use crate::error::{AssistantError, Result};
use crate::types::{Run, RunStatus};

pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

const UNKNOWN_RUN_ERROR: &str = "Unknown error";

/// Bounds for waiting on a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub max_wait: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_MAX_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// States of the polling loop
#[derive(Debug)]
enum PollState {
    Polling,
    Completed(Run),
    Failed { status: RunStatus, message: String },
    TimedOut { waited: Duration },
}

impl PollState {
    /// Classify one observation of the run
    fn observe(run: Run, elapsed: Duration, max_wait: Duration) -> Self {
        match run.status {
            RunStatus::Completed => Self::Completed(run),
            status if status.is_pending() => {
                if elapsed >= max_wait {
                    Self::TimedOut { waited: elapsed }
                } else {
                    Self::Polling
                }
            }
            status => Self::Failed {
                status,
                message: run
                    .error_message()
                    .unwrap_or(UNKNOWN_RUN_ERROR)
                    .to_string(),
            },
        }
    }
}

/// Poll a run until it reaches a terminal status or the wait budget runs out.
///
/// The status is always checked before sleeping, so a run that is already
/// finished is observed even with a zero budget. Sleeping yields to the
/// runtime. Timing out stops the polling only; the upstream run keeps going.
pub async fn wait_for_completion(
    client: &dyn AssistantClient,
    thread_id: &str,
    run_id: &str,
    options: WaitOptions,
) -> Result<Run> {
    let started = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let run = client.get_run_status(thread_id, run_id).await?;
        polls += 1;

        let elapsed = started.elapsed();
        tracing::debug!(run_id = %run_id, status = %run.status, polls, "Polled run status");

        match PollState::observe(run, elapsed, options.max_wait) {
            PollState::Completed(run) => {
                tracing::info!(
                    run_id = %run_id,
                    polls,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Run completed"
                );
                return Ok(run);
            }
            PollState::Failed { status, message } => {
                tracing::warn!(run_id = %run_id, status = %status, error = %message, "Run failed");
                return Err(AssistantError::RunFailed { status, message });
            }
            PollState::TimedOut { waited } => {
                tracing::warn!(
                    run_id = %run_id,
                    polls,
                    waited_ms = waited.as_millis() as u64,
                    "Stopped waiting for run"
                );
                return Err(AssistantError::RunTimeout {
                    run_id: run_id.to_string(),
                    waited,
                });
            }
            PollState::Polling => {
                let remaining = options.max_wait.saturating_sub(elapsed);
                tokio::time::sleep(options.poll_interval.min(remaining)).await;
            }
        }
    }
}
