use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use rightyeh_assistant::AssistantError;
use rightyeh_persist::PersistError;
use serde_json::json;
use thiserror::Error;

use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    /// The whole-request timeout fired before the handler answered
    #[error("Request timeout - the server took too long to respond")]
    RequestTimeout,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Assistant(e) => match e {
                AssistantError::Validation(_) => StatusCode::BAD_REQUEST,
                AssistantError::Upstream(_) | AssistantError::RunFailed { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                AssistantError::RunTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            },
            ApiError::Persist(e) => match e {
                PersistError::UserNotFound(_) => StatusCode::NOT_FOUND,
                PersistError::EmailExists(_) => StatusCode::BAD_REQUEST,
            },
            ApiError::RequestTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        }

        let body = match &self {
            ApiError::Validation(details) => json!({
                "success": false,
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({
                "success": false,
                "error": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised by the middleware stack rather than by a handler
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::RequestTimeout
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        ApiError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rightyeh_assistant::RunStatus;
    use std::time::Duration;

    #[test]
    fn test_assistant_errors_are_distinguishable() {
        let timeout = ApiError::from(AssistantError::RunTimeout {
            run_id: "run_1".to_string(),
            waited: Duration::from_secs(30),
        });
        let failed = ApiError::from(AssistantError::RunFailed {
            status: RunStatus::Failed,
            message: "rate_limited".to_string(),
        });
        let upstream = ApiError::from(AssistantError::Upstream("Failed to run assistant".to_string()));

        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(failed.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(timeout.to_string(), "Run timeout - assistant took too long to respond");
        assert_eq!(failed.to_string(), "Run failed: rate_limited");
        assert_eq!(upstream.to_string(), "Failed to run assistant");
    }

    #[tokio::test]
    async fn test_elapsed_maps_to_gateway_timeout() {
        let err = handle_middleware_error(Box::new(tower::timeout::error::Elapsed::new())).await;
        assert!(matches!(err, ApiError::RequestTimeout));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);

        let err = handle_middleware_error("boom".into()).await;
        assert!(matches!(err, ApiError::Internal));
    }

    #[test]
    fn test_persist_errors() {
        assert_eq!(ApiError::from(PersistError::UserNotFound(9)).status(), StatusCode::NOT_FOUND);
        let exists = ApiError::from(PersistError::EmailExists("a@b.co".to_string()));
        assert_eq!(exists.status(), StatusCode::BAD_REQUEST);
        assert_eq!(exists.to_string(), "Email already exists");
    }
}
