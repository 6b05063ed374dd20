use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, Music, MusicRepositoryInterface, NewMusic};
use crate::infrastructure::database::entities::music;

#[derive(Clone)]
pub struct MusicRepository {
    db: DatabaseConnection,
}

impl MusicRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn music_model_to_domain(model: music::Model) -> Music {
    Music {
        id: model.id,
        title: model.title,
        artist: model.artist,
        category_id: model.category_id,
        category_type_id: model.category_type_id,
        file_url: model.file_url,
        thumbnail_url: model.thumbnail_url,
        duration: model.duration,
        release_date: model.release_date,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl MusicRepositoryInterface for MusicRepository {
    async fn list_music(&self) -> DomainResult<Vec<Music>> {
        let models = music::Entity::find()
            .order_by_asc(music::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(music_model_to_domain).collect())
    }

    async fn list_music_by_category(&self, category_id: &str) -> DomainResult<Vec<Music>> {
        let models = music::Entity::find()
            .filter(music::Column::CategoryId.eq(category_id))
            .order_by_asc(music::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(music_model_to_domain).collect())
    }

    async fn get_music(&self, id: &str) -> DomainResult<Option<Music>> {
        let model = music::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(music_model_to_domain))
    }

    async fn create_music(&self, dto: NewMusic) -> DomainResult<Music> {
        let now = Utc::now();

        let new_music = music::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(dto.title),
            artist: Set(dto.artist),
            category_id: Set(dto.category_id),
            category_type_id: Set(dto.category_type_id),
            file_url: Set(dto.file_url),
            thumbnail_url: Set(dto.thumbnail_url),
            duration: Set(dto.duration),
            release_date: Set(dto.release_date),
            user_id: Set(dto.user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_music.insert(&self.db).await.map_err(db_err)?;
        Ok(music_model_to_domain(model))
    }

    async fn save_music(&self, music: Music) -> DomainResult<Music> {
        let active = music::ActiveModel {
            id: Set(music.id),
            title: Set(music.title),
            artist: Set(music.artist),
            category_id: Set(music.category_id),
            category_type_id: Set(music.category_type_id),
            file_url: Set(music.file_url),
            thumbnail_url: Set(music.thumbnail_url),
            duration: Set(music.duration),
            release_date: Set(music.release_date),
            user_id: Set(music.user_id),
            created_at: sea_orm::ActiveValue::NotSet,
            updated_at: Set(Utc::now()),
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Music"),
            other => db_err(other),
        })?;

        Ok(music_model_to_domain(model))
    }

    async fn delete_music(&self, id: &str) -> DomainResult<()> {
        let result = music::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Music"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::music::parse_release_date;
    use crate::test_support::test_db;

    fn track(category_id: &str) -> NewMusic {
        NewMusic {
            title: "Bohemian Rhapsody".into(),
            artist: "Queen".into(),
            category_id: category_id.into(),
            category_type_id: "type-1".into(),
            file_url: "/uploads/1-2_song.mp3".into(),
            thumbnail_url: None,
            duration: 354.0,
            release_date: parse_release_date("1975-10-31").unwrap(),
            user_id: "user-1".into(),
        }
    }

    #[tokio::test]
    async fn filter_by_category() {
        let (_dir, db) = test_db().await;
        let repo = MusicRepository::new(db);
        repo.create_music(track("cat-a")).await.unwrap();
        repo.create_music(track("cat-a")).await.unwrap();
        repo.create_music(track("cat-b")).await.unwrap();

        assert_eq!(repo.list_music().await.unwrap().len(), 3);
        assert_eq!(repo.list_music_by_category("cat-a").await.unwrap().len(), 2);
        assert!(repo.list_music_by_category("cat-c").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_keeps_created_at() {
        let (_dir, db) = test_db().await;
        let repo = MusicRepository::new(db);
        let mut created = repo.create_music(track("cat-a")).await.unwrap();
        let created_at = created.created_at;

        created.title = "Somebody to Love".into();
        created.thumbnail_url = Some("/uploads/3-4_cover.png".into());
        let saved = repo.save_music(created).await.unwrap();

        assert_eq!(saved.title, "Somebody to Love");
        assert_eq!(saved.created_at, created_at);
        assert_eq!(saved.thumbnail_url.as_deref(), Some("/uploads/3-4_cover.png"));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let (_dir, db) = test_db().await;
        let repo = MusicRepository::new(db);
        let created = repo.create_music(track("cat-a")).await.unwrap();

        repo.delete_music(&created.id).await.unwrap();
        assert!(repo.get_music(&created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_music(&created.id).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
