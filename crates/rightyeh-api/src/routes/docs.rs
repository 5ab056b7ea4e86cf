use axum::Json;
use serde_json::{json, Value};
use utoipa::OpenApi;

use crate::routes::{chat, health, openai, users};

#[derive(OpenApi)]
#[openapi(
    info(title = "RightYeh Backend API"),
    paths(
        health::health_check,
        health::api_health,
        chat::send_message,
        chat::get_history,
        chat::get_thread,
        chat::create_thread,
        chat::delete_thread,
        openai::chat,
        openai::create_thread,
        openai::list_messages,
        openai::add_message,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(
        health::HealthResponse,
        health::ApiHealthResponse,
        chat::ChatRequest,
        chat::ChatResponse,
        chat::TranscriptMessage,
        chat::TranscriptResponse,
        chat::CreateThreadRequest,
        chat::CreateThreadResponse,
        chat::DeleteThreadResponse,
        openai::AssistantReply,
        openai::ThreadCreated,
        openai::AddMessageRequest,
        openai::MessageAdded,
        users::CreateUserRequest,
        users::UpdateUserRequest,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "chat", description = "Assistant conversations with local history"),
        (name = "openai", description = "Direct assistant primitives"),
        (name = "users", description = "In-memory user list")
    )
)]
pub struct ApiDoc;

/// Human-readable endpoint index
pub async fn api_docs() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API Documentation",
        "endpoints": {
            "health": "GET /api/health",
            "openapi": "GET /api/openapi.json",
            "users": {
                "list": "GET /api/v1/users",
                "create": "POST /api/v1/users",
                "get": "GET /api/v1/users/:id",
                "update": "PUT /api/v1/users/:id",
                "delete": "DELETE /api/v1/users/:id"
            },
            "chat": {
                "create": "POST /api/v1/chat",
                "getHistory": "GET /api/v1/chat/history/:threadId",
                "getThread": "GET /api/v1/chat/thread/:threadId",
                "createThread": "POST /api/v1/chat/thread",
                "deleteThread": "DELETE /api/v1/chat/thread/:threadId"
            },
            "openai": {
                "chat": "POST /api/openai/chat",
                "createThread": "POST /api/openai/thread",
                "getMessages": "GET /api/openai/thread/:threadId/messages",
                "addMessage": "POST /api/openai/thread/:threadId/message"
            }
        }
    }))
}

/// Generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
