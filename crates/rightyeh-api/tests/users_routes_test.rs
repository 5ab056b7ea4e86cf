mod common;

use axum::http::StatusCode;
use common::{test_app, MockAssistant};
use serde_json::json;

fn app() -> common::TestApp {
    test_app(MockAssistant::replying("unused"))
}

#[tokio::test]
async fn test_list_users_default_page() {
    let app = app();

    let (status, body) = app.get("/api/v1/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["data"]["pagination"],
        json!({
            "currentPage": 1,
            "totalPages": 1,
            "totalUsers": 2,
            "hasNext": false,
            "hasPrev": false
        })
    );
}

#[tokio::test]
async fn test_list_users_second_page() {
    let app = app();

    let (status, body) = app.get("/api/v1/users?page=2&limit=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"][0]["name"], "Jane Smith");
    assert_eq!(body["data"]["pagination"]["hasPrev"], true);
    assert_eq!(body["data"]["pagination"]["hasNext"], false);
}

#[tokio::test]
async fn test_list_users_bad_query() {
    let app = app();
    let (status, body) = app.get("/api/v1/users?page=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_get_user() {
    let app = app();

    let (status, body) = app.get("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "john@example.com");
    assert!(body["data"]["user"]["createdAt"].is_string());

    let (status, body) = app.get("/api/v1/users/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, body) = app.get("/api/v1/users/zero").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["message"], "Valid user ID is required");
}

#[tokio::test]
async fn test_create_user() {
    let app = app();

    let (status, body) = app
        .post("/api/v1/users", json!({"name": "Alice", "email": "Alice@Example.com"}))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["id"], 3);
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");

    let (status, body) = app
        .post("/api/v1/users", json!({"name": "Alice Two", "email": "alice@example.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = app();

    let (status, body) = app
        .post("/api/v1/users", json!({"name": "A", "email": "not-an-email"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!([
            {"field": "name", "message": "Name must be between 2 and 50 characters"},
            {"field": "email", "message": "Valid email is required"}
        ])
    );
}

#[tokio::test]
async fn test_update_user() {
    let app = app();

    let (status, body) = app.put("/api/v1/users/2", json!({"name": "Janet"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["name"], "Janet");
    assert_eq!(body["data"]["user"]["email"], "jane@example.com");
    assert!(body["data"]["user"]["updatedAt"].is_string());

    let (status, body) = app
        .put("/api/v1/users/2", json!({"email": "john@example.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");

    let (status, _) = app.put("/api/v1/users/42", json!({"name": "Nobody"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let app = app();

    let (status, body) = app.delete("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["name"], "John Doe");

    let (status, _) = app.delete("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/v1/users").await;
    assert_eq!(body["data"]["pagination"]["totalUsers"], 1);
}
