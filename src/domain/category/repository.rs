use async_trait::async_trait;

use super::Category;
use crate::domain::DomainResult;

#[async_trait]
pub trait CategoryRepositoryInterface: Send + Sync {
    /// Oldest first
    async fn list_categories(&self) -> DomainResult<Vec<Category>>;
    async fn get_categories_by_ids(&self, ids: &[String]) -> DomainResult<Vec<Category>>;
    async fn get_category(&self, id: &str) -> DomainResult<Option<Category>>;
    async fn get_category_by_name(&self, name: &str) -> DomainResult<Option<Category>>;

    /// Insert a new category. `id` and timestamps on the argument are kept.
    async fn insert_category(&self, category: Category) -> DomainResult<Category>;
    /// Persist every field, including the full types list.
    async fn save_category(&self, category: Category) -> DomainResult<Category>;
    async fn delete_category(&self, id: &str) -> DomainResult<()>;
}
