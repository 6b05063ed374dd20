use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{non_empty, DomainError, DomainResult};

/// Sub-classification owned by a [`Category`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryType {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl CategoryType {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Insertion order is preserved
    pub types: Vec<CategoryType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn find_type(&self, type_id: &str) -> Option<&CategoryType> {
        self.types.iter().find(|t| t.id == type_id)
    }

    /// Append a type. Names must be unique within the category.
    pub fn add_type(&mut self, name: &str, description: Option<String>) -> DomainResult<&CategoryType> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Type name is required".into()));
        }
        if self.types.iter().any(|t| t.name == name) {
            return Err(DomainError::Conflict(
                "Type already exists in this category".into(),
            ));
        }

        self.types.push(CategoryType::new(name, description));
        Ok(&self.types[self.types.len() - 1])
    }

    /// Empty or missing values keep the current ones. Name uniqueness is not
    /// re-checked here.
    pub fn update_type(
        &mut self,
        type_id: &str,
        name: Option<String>,
        description: Option<String>,
    ) -> DomainResult<&CategoryType> {
        let ty = self
            .types
            .iter_mut()
            .find(|t| t.id == type_id)
            .ok_or_else(|| DomainError::not_found("Type"))?;

        if let Some(name) = non_empty(name) {
            ty.name = name;
        }
        if let Some(description) = non_empty(description) {
            ty.description = Some(description);
        }
        Ok(&*ty)
    }

    pub fn remove_type(&mut self, type_id: &str) -> DomainResult<CategoryType> {
        let index = self
            .types
            .iter()
            .position(|t| t.id == type_id)
            .ok_or_else(|| DomainError::not_found("Type"))?;
        Ok(self.types.remove(index))
    }
}
