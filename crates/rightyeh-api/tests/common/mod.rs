#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use rightyeh_api::{build_router, config::Config, state::AppState};
use rightyeh_assistant::{
    AssistantClient, AssistantError, Message, MessageContent, MessageRole, Result, Run, RunStatus,
    Thread,
};
use rightyeh_persist::{InMemoryHistoryStore, UserStore};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Upstream stand-in: every run reports `run_status`, and `get_messages`
/// returns `reply` (if any) above the last user message.
pub struct MockAssistant {
    pub run_status: RunStatus,
    pub run_error: Option<String>,
    pub reply: Option<String>,
    pub fail_upstream: bool,
    threads_created: AtomicUsize,
    last_user_message: Mutex<Option<String>>,
}

impl MockAssistant {
    pub fn replying(reply: &str) -> Self {
        Self {
            run_status: RunStatus::Completed,
            run_error: None,
            reply: Some(reply.to_string()),
            fail_upstream: false,
            threads_created: AtomicUsize::new(0),
            last_user_message: Mutex::new(None),
        }
    }

    pub fn silent() -> Self {
        Self {
            reply: None,
            ..Self::replying("")
        }
    }

    pub fn with_run(mut self, status: RunStatus, error: Option<&str>) -> Self {
        self.run_status = status;
        self.run_error = error.map(str::to_string);
        self
    }

    pub fn unreachable() -> Self {
        Self {
            fail_upstream: true,
            ..Self::replying("")
        }
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    fn upstream_error(&self, context: &str) -> AssistantError {
        AssistantError::Upstream(format!(
            "{}: OpenAI API error (401 Unauthorized): Incorrect API key provided",
            context
        ))
    }

    fn message(thread_id: &str, id: &str, role: MessageRole, text: &str) -> Message {
        Message {
            id: id.to_string(),
            thread_id: thread_id.to_string(),
            role,
            content: vec![MessageContent::text(text)],
            created_at: 1_700_000_000,
            run_id: None,
        }
    }
}

#[async_trait]
impl AssistantClient for MockAssistant {
    async fn create_thread(&self) -> Result<Thread> {
        if self.fail_upstream {
            return Err(self.upstream_error("Failed to create OpenAI thread"));
        }
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst);
        Ok(Thread::new(format!("thread_{}", n + 1), 1_700_000_000))
    }

    async fn add_message(&self, thread_id: &str, content: &str, role: MessageRole) -> Result<Message> {
        if self.fail_upstream {
            return Err(self.upstream_error("Failed to add message to thread"));
        }
        *self.last_user_message.lock().unwrap() = Some(content.to_string());
        Ok(Self::message(thread_id, "msg_user", role, content))
    }

    async fn run_assistant(&self, thread_id: &str) -> Result<Run> {
        Ok(Run::new("run_1", thread_id, RunStatus::Queued))
    }

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        let run = Run::new(run_id, thread_id, self.run_status);
        Ok(match &self.run_error {
            Some(error) => run.with_error(error.clone()),
            None => run,
        })
    }

    async fn get_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        if self.fail_upstream {
            return Err(self.upstream_error("Failed to get messages"));
        }
        let mut messages = Vec::new();
        if let Some(reply) = &self.reply {
            messages.push(Self::message(thread_id, "msg_assistant", MessageRole::Assistant, reply));
        }
        if let Some(user) = self.last_user_message.lock().unwrap().clone() {
            messages.push(Self::message(thread_id, "msg_user", MessageRole::User, &user));
        }
        Ok(messages)
    }
}

pub struct TestApp {
    pub router: Router,
    pub assistant: Arc<MockAssistant>,
}

pub fn test_app(assistant: MockAssistant) -> TestApp {
    test_app_with(assistant, |_| {})
}

/// Like `test_app`, with a hook to adjust the config before the router is built
pub fn test_app_with(assistant: MockAssistant, configure: impl FnOnce(&mut Config)) -> TestApp {
    let mut config = Config::default();
    config.assistant.max_wait_ms = 2_000;
    config.assistant.poll_interval_ms = 1_000;
    configure(&mut config);

    let assistant = Arc::new(assistant);
    let state = AppState::new(
        config,
        assistant.clone(),
        Arc::new(InMemoryHistoryStore::new()),
        Arc::new(UserStore::seeded()),
    );

    TestApp {
        router: build_router(Arc::new(state)),
        assistant,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}
