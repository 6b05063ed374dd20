//! Category API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AddCategoryTypeRequest, CategoryDto, CreateCategoryRequest, UpdateCategoryRequest,
    UpdateCategoryTypeRequest,
};
use crate::application::CategoryService;
use crate::infrastructure::database::repositories::CategoryRepository;
use crate::interfaces::http::common::{MessageResponse, ValidatedJson};
use crate::interfaces::http::error::{ApiResult, ErrorBody};

#[derive(Clone)]
pub struct CategoryHandlerState {
    pub category_service: Arc<CategoryService<CategoryRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses((status = 200, description = "All categories with their types", body = Vec<CategoryDto>))
)]
pub async fn list_categories(
    State(state): State<CategoryHandlerState>,
) -> ApiResult<Json<Vec<CategoryDto>>> {
    let categories = state.category_service.list().await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/categories/create",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Missing name or name taken", body = ErrorBody),
        (status = 403, description = "Not an admin", body = ErrorBody)
    )
)]
pub async fn create_category(
    State(state): State<CategoryHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryDto>)> {
    let category = state.category_service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 400, description = "Name taken by another category", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub async fn update_category(
    State(state): State<CategoryHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryDto>> {
    let category = state.category_service.update(&id, request.into()).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub async fn delete_category(
    State(state): State<CategoryHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.category_service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}/types",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID")),
    request_body = AddCategoryTypeRequest,
    responses(
        (status = 201, description = "Type appended", body = CategoryDto),
        (status = 400, description = "Missing or duplicate type name", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub async fn add_category_type(
    State(state): State<CategoryHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddCategoryTypeRequest>,
) -> ApiResult<(StatusCode, Json<CategoryDto>)> {
    let category = state
        .category_service
        .add_type(&id, &request.name, request.description)
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}/types/{type_id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Category ID"),
        ("type_id" = String, Path, description = "Type ID")
    ),
    request_body = UpdateCategoryTypeRequest,
    responses(
        (status = 200, description = "Type updated", body = CategoryDto),
        (status = 404, description = "Category or type not found", body = ErrorBody)
    )
)]
pub async fn update_category_type(
    State(state): State<CategoryHandlerState>,
    Path((id, type_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateCategoryTypeRequest>,
) -> ApiResult<Json<CategoryDto>> {
    let category = state
        .category_service
        .update_type(&id, &type_id, request.into())
        .await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}/types/{type_id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Category ID"),
        ("type_id" = String, Path, description = "Type ID")
    ),
    responses(
        (status = 200, description = "Type removed", body = CategoryDto),
        (status = 404, description = "Category or type not found", body = ErrorBody)
    )
)]
pub async fn delete_category_type(
    State(state): State<CategoryHandlerState>,
    Path((id, type_id)): Path<(String, String)>,
) -> ApiResult<Json<CategoryDto>> {
    let category = state.category_service.delete_type(&id, &type_id).await?;
    Ok(Json(category.into()))
}
