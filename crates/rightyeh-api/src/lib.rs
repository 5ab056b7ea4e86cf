pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod validation;

use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::handle_middleware_error,
    routes::{chat, docs, health, openai, users},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let chat_routes = Router::new()
        .route("/", post(chat::send_message))
        .route("/history/:thread_id", get(chat::get_history))
        .route("/thread", post(chat::create_thread))
        .route(
            "/thread/:thread_id",
            get(chat::get_thread).delete(chat::delete_thread),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let openai_routes = Router::new()
        .route("/chat", post(openai::chat))
        .route("/thread", post(openai::create_thread))
        .route("/thread/:thread_id/messages", get(openai::list_messages))
        .route("/thread/:thread_id/message", post(openai::add_message));

    let api_routes = Router::new()
        .route("/health", get(health::api_health))
        .route("/docs", get(docs::api_docs))
        .route("/openapi.json", get(docs::openapi_json))
        .nest("/v1/chat", chat_routes)
        .nest("/v1/users", user_routes)
        .nest("/openai", openai_routes);

    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&state.config))
                .layer(CompressionLayer::new())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout))
                .layer(axum_middleware::from_fn(middleware::logging::log_request)),
        )
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if !config.cors.enabled {
        return CorsLayer::new();
    }

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if config.cors.origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();

        cors.allow_origin(origins)
    }
}
