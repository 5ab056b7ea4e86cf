pub mod chat;
pub mod docs;
pub mod health;
pub mod openai;
pub mod users;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Fallback for unmatched routes
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Route not found"
        })),
    )
}
