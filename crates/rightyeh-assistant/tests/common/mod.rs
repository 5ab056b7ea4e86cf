#![allow(dead_code)]

use async_trait::async_trait;
use rightyeh_assistant::{
    AssistantClient, AssistantError, Message, MessageContent, MessageRole, Result, Run, RunStatus,
    Thread,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted in-process stand-in for the upstream service
pub struct MockAssistant {
    statuses: Mutex<VecDeque<Run>>,
    messages: Mutex<Vec<Message>>,
    added: Mutex<Vec<(String, String)>>,
    fail_run_creation: bool,
    threads_created: AtomicUsize,
    status_checks: AtomicUsize,
}

impl MockAssistant {
    /// Each status poll pops the next run; the last one repeats forever
    pub fn with_statuses(statuses: Vec<RunStatus>) -> Self {
        let runs = statuses
            .into_iter()
            .map(|s| Run::new("run_1", "thread_new", s))
            .collect();
        Self::with_runs(runs)
    }

    pub fn with_runs(runs: Vec<Run>) -> Self {
        Self {
            statuses: Mutex::new(runs.into()),
            messages: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
            fail_run_creation: false,
            threads_created: AtomicUsize::new(0),
            status_checks: AtomicUsize::new(0),
        }
    }

    pub fn completing() -> Self {
        Self::with_statuses(vec![RunStatus::Queued, RunStatus::InProgress, RunStatus::Completed])
    }

    pub fn failing_run_creation(mut self) -> Self {
        self.fail_run_creation = true;
        self
    }

    /// Messages returned by `get_messages`, most recent first
    pub fn with_messages(self, messages: Vec<Message>) -> Self {
        *self.messages.lock().unwrap() = messages;
        self
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    pub fn status_checks(&self) -> usize {
        self.status_checks.load(Ordering::SeqCst)
    }

    pub fn added_messages(&self) -> Vec<(String, String)> {
        self.added.lock().unwrap().clone()
    }
}

pub fn message(role: MessageRole, text: &str) -> Message {
    Message {
        id: format!("msg_{}", text.len()),
        thread_id: "thread_new".to_string(),
        role,
        content: vec![MessageContent::text(text)],
        created_at: 1_700_000_000,
        run_id: None,
    }
}

#[async_trait]
impl AssistantClient for MockAssistant {
    async fn create_thread(&self) -> Result<Thread> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst);
        let id = if n == 0 {
            "thread_new".to_string()
        } else {
            format!("thread_new_{}", n)
        };
        Ok(Thread::new(id, 1_700_000_000))
    }

    async fn add_message(&self, thread_id: &str, content: &str, role: MessageRole) -> Result<Message> {
        self.added
            .lock()
            .unwrap()
            .push((thread_id.to_string(), content.to_string()));
        let mut message = message(role, content);
        message.thread_id = thread_id.to_string();
        Ok(message)
    }

    async fn run_assistant(&self, thread_id: &str) -> Result<Run> {
        if self.fail_run_creation {
            return Err(AssistantError::Upstream(
                "Failed to run assistant: OpenAI API error (500 Internal Server Error): boom"
                    .to_string(),
            ));
        }
        Ok(Run::new("run_1", thread_id, RunStatus::Queued))
    }

    async fn get_run_status(&self, _thread_id: &str, _run_id: &str) -> Result<Run> {
        self.status_checks.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        let run = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        run.ok_or_else(|| AssistantError::Upstream("Failed to get run status".to_string()))
    }

    async fn get_messages(&self, _thread_id: &str) -> Result<Vec<Message>> {
        Ok(self.messages.lock().unwrap().clone())
    }
}
