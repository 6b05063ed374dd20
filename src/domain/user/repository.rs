use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self) -> DomainResult<Vec<User>>;
    async fn count_users(&self) -> DomainResult<u64>;
    /// Lookup is case-insensitive: the email is lowercased before matching.
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> DomainResult<Option<User>>;
    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
