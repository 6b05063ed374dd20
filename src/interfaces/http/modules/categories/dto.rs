//! Category DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{
    Category, CategoryType, CreateCategoryDto, NewCategoryType, UpdateCategoryDto,
    UpdateCategoryTypeDto,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryTypeDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryType> for CategoryTypeDto {
    fn from(t: CategoryType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub types: Vec<CategoryTypeDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            types: c.types.into_iter().map(CategoryTypeDto::from).collect(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Type entry in a create or replace request.
///
/// `id` is only honored on replace, and only when it is a uuid not repeated
/// earlier in the list.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryTypeInput {
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "type name must be at most 100 characters"))]
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryTypeInput> for NewCategoryType {
    fn from(input: CategoryTypeInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
            description: input.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub types: Vec<CategoryTypeInput>,
}

impl From<CreateCategoryRequest> for CreateCategoryDto {
    fn from(req: CreateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            types: req.types.into_iter().map(NewCategoryType::from).collect(),
        }
    }
}

/// Partial update; a present `types` array replaces the current list
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(nested)]
    pub types: Option<Vec<CategoryTypeInput>>,
}

impl From<UpdateCategoryRequest> for UpdateCategoryDto {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            types: req
                .types
                .map(|types| types.into_iter().map(NewCategoryType::from).collect()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddCategoryTypeRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "type name must be at most 100 characters"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryTypeRequest {
    #[validate(length(max = 100, message = "type name must be at most 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateCategoryTypeRequest> for UpdateCategoryTypeDto {
    fn from(req: UpdateCategoryTypeRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}
