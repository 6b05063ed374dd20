use async_trait::async_trait;

use super::{Music, NewMusic};
use crate::domain::DomainResult;

#[async_trait]
pub trait MusicRepositoryInterface: Send + Sync {
    async fn list_music(&self) -> DomainResult<Vec<Music>>;
    async fn list_music_by_category(&self, category_id: &str) -> DomainResult<Vec<Music>>;
    async fn get_music(&self, id: &str) -> DomainResult<Option<Music>>;

    async fn create_music(&self, dto: NewMusic) -> DomainResult<Music>;
    async fn save_music(&self, music: Music) -> DomainResult<Music>;
    async fn delete_music(&self, id: &str) -> DomainResult<()>;
}
