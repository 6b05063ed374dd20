//! Admin user management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::UserDto;
use crate::application::UserService;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::MessageResponse;
use crate::interfaces::http::error::{ApiResult, ErrorBody};

/// User handler state, concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<UserDto>),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 403, description = "Not an admin", body = ErrorBody)
    )
)]
pub async fn list_users(State(state): State<UserHandlerState>) -> ApiResult<Json<Vec<UserDto>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Target is an admin", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.user_service.delete_user(&id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
