use axum::extract::{Path, State};
use rightyeh_persist::{NewUser, User, UserPage, UserUpdate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiResult,
    extract::{ValidJson, ValidQuery},
    response::ApiResponse,
    state::AppState,
    validation::{parse_user_id, Validator},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page (default: 1)
    pub page: Option<usize>,
    /// Page size (default: 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users with pagination info")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<ListUsersQuery>,
) -> ApiResponse<UserPage> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    ApiResponse::ok(state.users.list(page, limit).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User"),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let id = parse_user_id(&id)?;
    let user = state.users.get(id).await?;
    Ok(ApiResponse::ok(UserResponse { user }))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation failed or email already exists")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let mut v = Validator::new();
    if req.name.trim().is_empty() {
        v.error("name", "Name is required");
    } else {
        v.name(&req.name);
    }
    let email = v.email(&req.email);
    v.finish()?;

    let user = state
        .users
        .create(NewUser {
            name: req.name.trim().to_string(),
            email: email.unwrap_or_default(),
        })
        .await?;

    Ok(ApiResponse::created(UserResponse { user }))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Validation failed or email already exists"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let id = parse_user_id(&id)?;

    let mut v = Validator::new();
    if let Some(name) = &req.name {
        v.name(name);
    }
    let email = req.email.as_deref().and_then(|email| v.email(email));
    v.finish()?;

    let update = UserUpdate {
        name: req.name.map(|name| name.trim().to_string()),
        email,
    };
    let user = state.users.update(id, update).await?;

    Ok(ApiResponse::ok(UserResponse { user }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Deleted user"),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let id = parse_user_id(&id)?;
    let user = state.users.delete(id).await?;
    Ok(ApiResponse::ok(UserResponse { user }))
}
