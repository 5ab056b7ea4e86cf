// OpenAI Assistants API client (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::client::AssistantClient;
use crate::config::OpenAIConfig;
use crate::error::{AssistantError, Result};
use crate::types::{ListResponse, Message, MessageRole, Run, Thread};

const ASSISTANTS_BETA_HEADER: &str = "OpenAI-Beta";
const ASSISTANTS_BETA_VERSION: &str = "assistants=v2";

/// OpenAI Assistants client
pub struct OpenAIAssistantClient {
    http_client: reqwest::Client,
    base_url: String,
    assistant_id: String,
}

impl OpenAIAssistantClient {
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| AssistantError::Validation("Invalid API key format".to_string()))?,
        );
        headers.insert(
            ASSISTANTS_BETA_HEADER,
            HeaderValue::from_static(ASSISTANTS_BETA_VERSION),
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AssistantError::upstream("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            base_url: config.base_url().to_string(),
            assistant_id: config.assistant_id,
        })
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
        context: &str,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::upstream(context, e))?;

        Self::handle_response(response, context).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| AssistantError::upstream(context, e))?;

        Self::handle_response(response, context).await
    }

    /// Map non-2xx responses to `Upstream`, surfacing the API's own message
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<OpenAIErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);

            tracing::error!(status = %status, detail = %detail, "{}", context);
            return Err(AssistantError::upstream(
                context,
                format!("OpenAI API error ({}): {}", status, detail),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AssistantError::upstream(context, format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl AssistantClient for OpenAIAssistantClient {
    async fn create_thread(&self) -> Result<Thread> {
        let thread: Thread = self
            .post("/threads", serde_json::json!({}), "Failed to create OpenAI thread")
            .await?;

        tracing::info!(thread_id = %thread.id, "Created new OpenAI thread");
        Ok(thread)
    }

    async fn add_message(&self, thread_id: &str, content: &str, role: MessageRole) -> Result<Message> {
        if content.is_empty() {
            return Err(AssistantError::Validation("Message content is empty".to_string()));
        }

        let message: Message = self
            .post(
                &format!("/threads/{}/messages", thread_id),
                serde_json::json!({
                    "role": role,
                    "content": content,
                }),
                "Failed to add message to thread",
            )
            .await?;

        tracing::info!(thread_id = %thread_id, message_id = %message.id, "Added message to thread");
        Ok(message)
    }

    async fn run_assistant(&self, thread_id: &str) -> Result<Run> {
        let run: Run = self
            .post(
                &format!("/threads/{}/runs", thread_id),
                serde_json::json!({ "assistant_id": self.assistant_id }),
                "Failed to run assistant",
            )
            .await?;

        tracing::info!(thread_id = %thread_id, run_id = %run.id, "Started assistant run");
        Ok(run)
    }

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get(
            &format!("/threads/{}/runs/{}", thread_id, run_id),
            "Failed to get run status",
        )
        .await
    }

    async fn get_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        let list: ListResponse<Message> = self
            .get(
                &format!("/threads/{}/messages", thread_id),
                "Failed to get messages",
            )
            .await?;

        Ok(list.data)
    }
}

// ============================================================================
// OPENAI ERROR ENVELOPE
// ============================================================================

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAIAssistantClient::new(OpenAIConfig::new("sk-test", "asst_123"));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().assistant_id(), "asst_123");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let client = OpenAIAssistantClient::new(OpenAIConfig::new("sk-\ntest", "asst_123"));
        assert!(matches!(client, Err(AssistantError::Validation(_))));
    }
}
