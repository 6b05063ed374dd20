//! Music API handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{MusicForm, MusicResponse};
use super::form::read_music_form;
use crate::application::MusicService;
use crate::infrastructure::database::repositories::{CategoryRepository, MusicRepository};
use crate::interfaces::http::common::MessageResponse;
use crate::interfaces::http::error::{ApiResult, ErrorBody};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct MusicHandlerState {
    pub music_service: Arc<MusicService<MusicRepository, CategoryRepository>>,
}

impl MusicHandlerState {
    fn max_file_size(&self) -> usize {
        self.music_service.uploads().max_file_size()
    }
}

#[utoipa::path(
    get,
    path = "/api/music",
    tag = "Music",
    responses((status = 200, description = "All tracks", body = Vec<MusicResponse>))
)]
pub async fn list_music(State(state): State<MusicHandlerState>) -> ApiResult<Json<Vec<MusicResponse>>> {
    let tracks = state.music_service.list().await?;
    Ok(Json(tracks.into_iter().map(MusicResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/music/category/{category_id}",
    tag = "Music",
    params(("category_id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Tracks in the category", body = Vec<MusicResponse>),
        (status = 400, description = "Invalid category ID", body = ErrorBody),
        (status = 404, description = "No music found for this category", body = ErrorBody)
    )
)]
pub async fn list_music_by_category(
    State(state): State<MusicHandlerState>,
    Path(category_id): Path<String>,
) -> ApiResult<Json<Vec<MusicResponse>>> {
    let tracks = state.music_service.list_by_category(&category_id).await?;
    Ok(Json(tracks.into_iter().map(MusicResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/music/create",
    tag = "Music",
    security(("bearer_auth" = [])),
    request_body(content = MusicForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Track created", body = MusicResponse),
        (status = 400, description = "Missing fields, invalid values or rejected upload", body = ErrorBody),
        (status = 403, description = "Not an admin", body = ErrorBody)
    )
)]
pub async fn create_music(
    State(state): State<MusicHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<MusicResponse>)> {
    let form = read_music_form(multipart, state.max_file_size()).await?;
    let view = state.music_service.create(form, user.id()).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

#[utoipa::path(
    put,
    path = "/api/music/{id}",
    tag = "Music",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Track ID")),
    request_body(content = MusicForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Track updated", body = MusicResponse),
        (status = 400, description = "Invalid values or rejected upload", body = ErrorBody),
        (status = 404, description = "Music not found", body = ErrorBody)
    )
)]
pub async fn update_music(
    State(state): State<MusicHandlerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<MusicResponse>> {
    let form = read_music_form(multipart, state.max_file_size()).await?;
    let view = state.music_service.update(&id, form).await?;
    Ok(Json(view.into()))
}

#[utoipa::path(
    delete,
    path = "/api/music/{id}",
    tag = "Music",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Track ID")),
    responses(
        (status = 200, description = "Track and its files deleted", body = MessageResponse),
        (status = 404, description = "Music not found", body = ErrorBody)
    )
)]
pub async fn delete_music(
    State(state): State<MusicHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.music_service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Music deleted successfully")))
}
