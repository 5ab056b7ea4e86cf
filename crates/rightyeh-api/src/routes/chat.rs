use axum::extract::{Path, State};
use chrono::{DateTime, TimeZone, Utc};
use rightyeh_assistant::Message;
use rightyeh_persist::{HistoryEntry, ANONYMOUS_USER};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ApiResult},
    extract::ValidJson,
    response::ApiResponse,
    state::AppState,
    validation::{require_thread_id, Validator},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// 1 to 4000 characters
    #[serde(default)]
    pub message: String,
    /// Continue an existing thread; a new one is created when absent
    pub thread_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub thread_id: String,
    pub response: String,
    pub run_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub thread_id: String,
    pub history: Vec<HistoryEntry>,
}

/// Upstream message flattened for clients
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMessage {
    pub id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for TranscriptMessage {
    fn from(message: Message) -> Self {
        Self {
            content: message.text().unwrap_or_default().to_string(),
            created_at: Utc
                .timestamp_opt(message.created_at, 0)
                .single()
                .unwrap_or_default(),
            role: message.role.to_string(),
            id: message.id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub thread_id: String,
    pub messages: Vec<TranscriptMessage>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadResponse {
    pub thread_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteThreadResponse {
    pub thread_id: String,
    pub message: String,
}

/// Send a message and wait for the assistant's reply
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Validation failed"),
        (status = 502, description = "Upstream call or run failed"),
        (status = 504, description = "Run did not finish in time")
    ),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<ChatRequest>,
) -> ApiResult<ApiResponse<ChatResponse>> {
    let mut v = Validator::new();
    v.message_text("message", "Message", &req.message);
    v.finish()?;

    tracing::info!(
        thread_id = ?req.thread_id,
        user_id = ?req.user_id,
        message_length = req.message.chars().count(),
        "Received chat request"
    );

    let turn = state
        .chat
        .chat_with_assistant(&req.message, req.thread_id.as_deref())
        .await?;

    state
        .history
        .append(
            &turn.thread_id,
            HistoryEntry::new(req.message, turn.response.clone(), req.user_id),
        )
        .await;

    Ok(ApiResponse::ok(ChatResponse {
        thread_id: turn.thread_id,
        response: turn.response,
        run_id: turn.run_id,
        timestamp: Utc::now(),
    }))
}

/// Local history recorded for a thread
#[utoipa::path(
    get,
    path = "/api/v1/chat/history/{thread_id}",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Recorded turns, oldest first"),
        (status = 404, description = "Chat history not found")
    ),
    tag = "chat"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<ApiResponse<HistoryResponse>> {
    require_thread_id(&thread_id)?;

    let history = state
        .history
        .get(&thread_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Chat history not found".to_string()))?;

    Ok(ApiResponse::ok(HistoryResponse { thread_id, history }))
}

/// Transcript of a thread as stored upstream
#[utoipa::path(
    get,
    path = "/api/v1/chat/thread/{thread_id}",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Upstream messages, most recent first", body = TranscriptResponse),
        (status = 502, description = "Upstream call failed")
    ),
    tag = "chat"
)]
pub async fn get_thread(
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

/// Create a thread upstream and start an empty local history for it
#[utoipa::path(
    post,
    path = "/api/v1/chat/thread",
    request_body = CreateThreadRequest,
    responses(
        (status = 201, description = "Thread created", body = CreateThreadResponse),
        (status = 502, description = "Upstream call failed")
    ),
    tag = "chat"
)]
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    body: Option<ValidJson<CreateThreadRequest>>,
) -> ApiResult<ApiResponse<CreateThreadResponse>> {
    let req = body.map(|ValidJson(req)| req).unwrap_or_default();

    let thread = state.assistant().create_thread().await?;
    state.history.init(&thread.id).await;

    let user_id = req
        .user_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());

    tracing::info!(thread_id = %thread.id, user_id = %user_id, "Created new chat thread");

    Ok(ApiResponse::created(CreateThreadResponse {
        thread_id: thread.id,
        user_id,
        created_at: Utc::now(),
    }))
}

/// Forget the local history of a thread; the upstream thread is untouched
#[utoipa::path(
    delete,
    path = "/api/v1/chat/thread/{thread_id}",
    params(
        ("thread_id" = String, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Local history removed", body = DeleteThreadResponse)
    ),
    tag = "chat"
)]
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<ApiResponse<DeleteThreadResponse>> {
    require_thread_id(&thread_id)?;

    state.history.delete(&thread_id).await;
    tracing::info!(thread_id = %thread_id, "Deleted chat thread");

    Ok(ApiResponse::ok(DeleteThreadResponse {
        thread_id,
        message: "Thread deleted successfully".to_string(),
    }))
}
