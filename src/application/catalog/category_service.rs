use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    non_empty, Category, CategoryRepositoryInterface, CategoryType, CreateCategoryDto,
    DomainError, DomainResult, NewCategoryType, UpdateCategoryDto, UpdateCategoryTypeDto,
};

/// Category use-cases. Types are edited on the loaded category and saved with it.
pub struct CategoryService<R: CategoryRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: CategoryRepositoryInterface> CategoryService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> DomainResult<Vec<Category>> {
        self.repo.list_categories().await
    }

    pub async fn get(&self, id: &str) -> DomainResult<Category> {
        self.repo
            .get_category(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category"))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> DomainResult<Category> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation("Category name is required".into()));
        }
        if self.repo.get_category_by_name(&name).await?.is_some() {
            return Err(DomainError::Conflict("Category already exists".into()));
        }

        let now = Utc::now();
        let category = Category {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: non_empty(dto.description),
            types: build_types(dto.types, false)?,
            created_at: now,
            updated_at: now,
        };

        let category = self.repo.insert_category(category).await?;
        info!(category_id = %category.id, types = category.types.len(), "Category created");
        Ok(category)
    }

    /// Blank fields keep their values; a supplied types list replaces the old one.
    pub async fn update(&self, id: &str, dto: UpdateCategoryDto) -> DomainResult<Category> {
        let mut category = self.get(id).await?;

        if let Some(name) = non_empty(dto.name) {
            let name = name.trim().to_string();
            if name != category.name {
                if let Some(other) = self.repo.get_category_by_name(&name).await? {
                    if other.id != category.id {
                        return Err(DomainError::Conflict("Category already exists".into()));
                    }
                }
                category.name = name;
            }
        }
        if let Some(description) = non_empty(dto.description) {
            category.description = Some(description);
        }
        if let Some(types) = dto.types {
            category.types = build_types(types, true)?;
        }

        self.save(category).await
    }

    /// Tracks referencing the category are left as they are.
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        self.get(id).await?;
        self.repo.delete_category(id).await?;
        info!(category_id = %id, "Category deleted");
        Ok(())
    }

    pub async fn add_type(
        &self,
        id: &str,
        name: &str,
        description: Option<String>,
    ) -> DomainResult<Category> {
        let mut category = self.get(id).await?;
        let type_id = category.add_type(name, non_empty(description))?.id.clone();

        let category = self.save(category).await?;
        info!(category_id = %id, type_id = %type_id, "Category type added");
        Ok(category)
    }

    pub async fn update_type(
        &self,
        id: &str,
        type_id: &str,
        dto: UpdateCategoryTypeDto,
    ) -> DomainResult<Category> {
        let mut category = self.get(id).await?;
        category.update_type(type_id, dto.name, dto.description)?;
        self.save(category).await
    }

    pub async fn delete_type(&self, id: &str, type_id: &str) -> DomainResult<Category> {
        let mut category = self.get(id).await?;
        category.remove_type(type_id)?;

        let category = self.save(category).await?;
        info!(category_id = %id, type_id = %type_id, "Category type removed");
        Ok(category)
    }

    async fn save(&self, mut category: Category) -> DomainResult<Category> {
        category.updated_at = Utc::now();
        self.repo.save_category(category).await
    }
}

/// Ids are generated unless `keep_ids` is set; even then a supplied id is
/// kept only when it is a uuid not already used earlier in the list.
fn build_types(types: Vec<NewCategoryType>, keep_ids: bool) -> DomainResult<Vec<CategoryType>> {
    let mut seen = HashSet::new();
    types
        .into_iter()
        .map(|t| {
            let name = t.name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::Validation("Type name is required".into()));
            }
            let mut ty = CategoryType::new(name, non_empty(t.description));

            let supplied = t
                .id
                .filter(|_| keep_ids)
                .and_then(|id| uuid::Uuid::parse_str(id.trim()).ok())
                .map(|id| id.to_string());
            if let Some(id) = supplied {
                if !seen.contains(&id) {
                    ty.id = id;
                }
            }
            seen.insert(ty.id.clone());
            Ok(ty)
        })
        .collect()
}
