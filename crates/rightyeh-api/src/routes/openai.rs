// Direct access to the assistant primitives, without the local history.

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    error::ApiResult,
    extract::ValidJson,
    response::ApiResponse,
    routes::chat::{ChatRequest, TranscriptMessage, TranscriptResponse},
    state::AppState,
    validation::{require_thread_id, Validator},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub thread_id: String,
    pub response: String,
    pub run_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadCreated {
    pub thread_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMessageRequest {
    /// 1 to 4000 characters
    #[serde(default)]
    pub content: String,
    /// `user` (default) or `assistant`
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageAdded {
    pub message_id: String,
    pub thread_id: String,
    pub role: String,
    pub content: String,
}

/// One assistant turn without recording history
#[utoipa::path(
    post,
    path = "/api/openai/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = AssistantReply),
        (status = 400, description = "Validation failed"),
        (status = 502, description = "Upstream call or run failed"),
        (status = 504, description = "Run did not finish in time")
    ),
    tag = "openai"
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<ChatRequest>,
) -> ApiResult<ApiResponse<AssistantReply>> {
    let mut v = Validator::new();
    v.message_text("message", "Message", &req.message);
    v.finish()?;

    tracing::info!(
        thread_id = ?req.thread_id,
        message_length = req.message.chars().count(),
        "Received chat request"
    );

    let turn = state
        .chat
        .chat_with_assistant(&req.message, req.thread_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(AssistantReply {
        thread_id: turn.thread_id,
        response: turn.response,
        run_id: turn.run_id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/openai/thread",
    operation_id = "openai_create_thread",
    responses(
        (status = 200, description = "Thread created", body = ThreadCreated),
        (status = 502, description = "Upstream call failed")
    ),
    tag = "openai"
)]
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
) -> ApiResult<ApiResponse<ThreadCreated>> {
    let thread = state.assistant().create_thread().await?;
    Ok(ApiResponse::ok(ThreadCreated { thread_id: thread.id }))
}

#[utoipa::path(
    get,
    path = "/api/openai/thread/{thread_id}/messages",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Upstream messages, most recent first", body = TranscriptResponse),
        (status = 502, description = "Upstream call failed")
    ),
    tag = "openai"
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<ApiResponse<TranscriptResponse>> {
    require_thread_id(&thread_id)?;

    let messages = state.assistant().get_messages(&thread_id).await?;

    Ok(ApiResponse::ok(TranscriptResponse {
        thread_id,
        messages: messages.into_iter().map(TranscriptMessage::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/openai/thread/{thread_id}/message",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    request_body = AddMessageRequest,
    responses(
        (status = 200, description = "Message appended", body = MessageAdded),
        (status = 400, description = "Validation failed"),
        (status = 502, description = "Upstream call failed")
    ),
    tag = "openai"
)]
pub async fn add_message(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    ValidJson(req): ValidJson<AddMessageRequest>,
) -> ApiResult<ApiResponse<MessageAdded>> {
    require_thread_id(&thread_id)?;

    let mut v = Validator::new();
    v.message_text("content", "Content", &req.content);
    let role = v.role(req.role.as_deref());
    v.finish()?;

    let message = state
        .assistant()
        .add_message(&thread_id, &req.content, role)
        .await?;

    Ok(ApiResponse::ok(MessageAdded {
        content: message.text().unwrap_or_default().to_string(),
        role: message.role.to_string(),
        message_id: message.id,
        thread_id,
    }))
}
