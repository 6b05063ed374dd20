use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::music::{parse_duration, parse_release_date};
use crate::domain::{
    non_empty, Category, CategoryRepositoryInterface, CategoryType, DomainError, DomainResult,
    Music, MusicRepositoryInterface, MusicUpload, NewMusic,
};
use crate::infrastructure::storage::UploadStore;

/// Category fields embedded in a track listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// A track joined with its category and absolute file links
#[derive(Debug, Clone)]
pub struct MusicView {
    pub music: Music,
    /// `None` when the category no longer exists
    pub category: Option<CategorySummary>,
    /// `None` when the type id does not match any type of the category
    pub category_type: Option<CategoryType>,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
}

/// Track use-cases. Files are written through the [`UploadStore`] only after
/// the submitted form has been validated.
pub struct MusicService<M: MusicRepositoryInterface, C: CategoryRepositoryInterface> {
    music: Arc<M>,
    categories: Arc<C>,
    uploads: UploadStore,
}

impl<M: MusicRepositoryInterface, C: CategoryRepositoryInterface> MusicService<M, C> {
    pub fn new(music: Arc<M>, categories: Arc<C>, uploads: UploadStore) -> Self {
        Self {
            music,
            categories,
            uploads,
        }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub async fn list(&self) -> DomainResult<Vec<MusicView>> {
        let tracks = self.music.list_music().await?;
        self.views(tracks).await
    }

    pub async fn list_by_category(&self, category_id: &str) -> DomainResult<Vec<MusicView>> {
        let category_id = parse_id(category_id, "Invalid category ID")?;

        let tracks = self.music.list_music_by_category(&category_id).await?;
        if tracks.is_empty() {
            return Err(DomainError::NotFound(
                "No music found for this category".into(),
            ));
        }
        self.views(tracks).await
    }

    pub async fn create(&self, form: MusicUpload, user_id: &str) -> DomainResult<MusicView> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::MissingFields(missing));
        }

        // missing_fields() guarantees every required value is present
        let required = |v: Option<String>| v.unwrap_or_default().trim().to_string();
        let title = required(form.title);
        let artist = required(form.artist);
        let category_id = parse_id(&required(form.category), "Invalid category ID")?;
        let category_type_id = parse_id(&required(form.category_type), "Invalid category type ID")?;
        let duration = parse_duration(&required(form.duration))?;
        let release_date = parse_release_date(&required(form.release_date))?;
        let Some(file) = form.file else {
            return Err(DomainError::MissingFields(vec!["file".into()]));
        };

        let file_url = self.uploads.save(&file).await?;
        let thumbnail_url = match &form.thumbnail {
            Some(thumbnail) => match self.uploads.save(thumbnail).await {
                Ok(url) => Some(url),
                Err(e) => {
                    self.uploads.remove(&file_url).await;
                    return Err(e);
                }
            },
            None => None,
        };

        let created = self
            .music
            .create_music(NewMusic {
                title,
                artist,
                category_id,
                category_type_id,
                file_url: file_url.clone(),
                thumbnail_url: thumbnail_url.clone(),
                duration,
                release_date,
                user_id: user_id.to_string(),
            })
            .await;

        let music = match created {
            Ok(music) => music,
            Err(e) => {
                self.uploads.remove(&file_url).await;
                if let Some(thumbnail_url) = &thumbnail_url {
                    self.uploads.remove(thumbnail_url).await;
                }
                return Err(e);
            }
        };

        info!(music_id = %music.id, category_id = %music.category_id, user_id, "Music created");
        self.view(music).await
    }

    /// Partial update. A new audio file or thumbnail replaces the old one on disk.
    pub async fn update(&self, id: &str, form: MusicUpload) -> DomainResult<MusicView> {
        let mut music = self
            .music
            .get_music(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Music"))?;

        if let Some(title) = non_empty(form.title) {
            music.title = title.trim().to_string();
        }
        if let Some(artist) = non_empty(form.artist) {
            music.artist = artist.trim().to_string();
        }
        if let Some(category) = non_empty(form.category) {
            music.category_id = parse_id(&category, "Invalid category ID")?;
        }
        if let Some(category_type) = non_empty(form.category_type) {
            music.category_type_id = parse_id(&category_type, "Invalid category type ID")?;
        }
        if let Some(duration) = non_empty(form.duration) {
            music.duration = parse_duration(&duration)?;
        }
        if let Some(release_date) = non_empty(form.release_date) {
            music.release_date = parse_release_date(&release_date)?;
        }

        if let Some(file) = &form.file {
            let new_url = self.uploads.save(file).await?;
            let old_url = std::mem::replace(&mut music.file_url, new_url);
            self.discard(&old_url).await;
        }
        if let Some(thumbnail) = &form.thumbnail {
            let new_url = self.uploads.save(thumbnail).await?;
            if let Some(old_url) = music.thumbnail_url.replace(new_url) {
                self.discard(&old_url).await;
            }
        }

        let music = self.music.save_music(music).await?;
        info!(music_id = %music.id, "Music updated");
        self.view(music).await
    }

    /// Deletes the record, then whatever files it pointed at.
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let music = self
            .music
            .get_music(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Music"))?;

        self.music.delete_music(id).await?;

        self.discard(&music.file_url).await;
        if let Some(thumbnail_url) = &music.thumbnail_url {
            self.discard(thumbnail_url).await;
        }

        info!(music_id = %id, "Music deleted");
        Ok(())
    }

    async fn discard(&self, stored: &str) {
        if !self.uploads.remove(stored).await {
            debug!(file = %stored, "Upload already gone");
        }
    }

    async fn view(&self, music: Music) -> DomainResult<MusicView> {
        let category = self.categories.get_category(&music.category_id).await?;
        Ok(self.shape(music, category.as_ref()))
    }

    async fn views(&self, tracks: Vec<Music>) -> DomainResult<Vec<MusicView>> {
        let mut ids: Vec<String> = tracks.iter().map(|m| m.category_id.clone()).collect();
        ids.sort();
        ids.dedup();

        let categories: HashMap<String, Category> = self
            .categories
            .get_categories_by_ids(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Ok(tracks
            .into_iter()
            .map(|music| {
                let category = categories.get(&music.category_id);
                self.shape(music, category)
            })
            .collect())
    }

    fn shape(&self, music: Music, category: Option<&Category>) -> MusicView {
        let category_type = category
            .and_then(|c| c.find_type(&music.category_type_id))
            .cloned();

        MusicView {
            category: category.map(|c| CategorySummary {
                id: c.id.clone(),
                name: c.name.clone(),
                description: c.description.clone(),
            }),
            category_type,
            file_url: self.uploads.public_url(&music.file_url),
            thumbnail_url: music
                .thumbnail_url
                .as_deref()
                .map(|t| self.uploads.public_url(t)),
            music,
        }
    }
}

fn parse_id(raw: &str, message: &str) -> DomainResult<String> {
    uuid::Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| DomainError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadsConfig;
    use crate::domain::{CreateCategoryDto, FileUpload, NewCategoryType};
    use crate::application::catalog::CategoryService;
    use crate::infrastructure::database::repositories::{CategoryRepository, MusicRepository};
    use crate::test_support::test_db;

    struct Fixture {
        dir: tempfile::TempDir,
        categories: CategoryService<CategoryRepository>,
        service: MusicService<MusicRepository, CategoryRepository>,
    }

    async fn fixture() -> Fixture {
        let (dir, db) = test_db().await;
        let uploads = UploadStore::new(&UploadsConfig {
            dir: dir.path().join("uploads"),
            max_file_size: 1024,
            public_base_url: "http://localhost:5000".into(),
        });
        let category_repo = Arc::new(CategoryRepository::new(db.clone()));
        Fixture {
            categories: CategoryService::new(category_repo.clone()),
            service: MusicService::new(Arc::new(MusicRepository::new(db)), category_repo, uploads),
            dir,
        }
    }

    impl Fixture {
        async fn rock(&self) -> Category {
            self.categories
                .create(CreateCategoryDto {
                    name: "Rock".into(),
                    description: Some("Rock music".into()),
                    types: vec![NewCategoryType {
                        name: "Classic".into(),
                        ..NewCategoryType::default()
                    }],
                })
                .await
                .unwrap()
        }

        fn upload_count(&self) -> usize {
            std::fs::read_dir(self.dir.path().join("uploads"))
                .map(|entries| entries.count())
                .unwrap_or(0)
        }
    }

    fn file(name: &str) -> FileUpload {
        FileUpload {
            original_name: name.into(),
            data: b"ID3 fake audio".to_vec(),
        }
    }

    fn form(category: &Category) -> MusicUpload {
        MusicUpload {
            title: Some("Bohemian Rhapsody".into()),
            artist: Some("Queen".into()),
            category: Some(category.id.clone()),
            category_type: Some(category.types[0].id.clone()),
            duration: Some("354".into()),
            release_date: Some("1975-10-31".into()),
            file: Some(file("bohemian rhapsody.mp3")),
            thumbnail: Some(file("cover.png")),
        }
    }

    #[tokio::test]
    async fn create_resolves_category_and_type() {
        let f = fixture().await;
        let rock = f.rock().await;

        let view = f.service.create(form(&rock), "user-1").await.unwrap();

        assert_eq!(view.category.as_ref().unwrap().name, "Rock");
        assert_eq!(view.category_type.as_ref().unwrap().name, "Classic");
        assert!(view
            .file_url
            .starts_with("http://localhost:5000/uploads/"));
        assert!(view.file_url.ends_with("_bohemian-rhapsody.mp3"));
        assert!(view.music.file_url.starts_with("/uploads/"));
        assert_eq!(f.upload_count(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_rejected_before_anything_is_written() {
        let f = fixture().await;
        let rock = f.rock().await;

        let err = f
            .service
            .create(
                MusicUpload {
                    file: None,
                    ..form(&rock)
                },
                "user-1",
            )
            .await
            .unwrap_err();

        match err {
            DomainError::MissingFields(fields) => assert_eq!(fields, vec!["file"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(f.upload_count(), 0);
    }

    #[tokio::test]
    async fn invalid_values_are_rejected_without_writing() {
        let f = fixture().await;
        let rock = f.rock().await;

        for bad in [
            MusicUpload {
                duration: Some("0".into()),
                ..form(&rock)
            },
            MusicUpload {
                category: Some("not-a-uuid".into()),
                ..form(&rock)
            },
            MusicUpload {
                release_date: Some("someday".into()),
                ..form(&rock)
            },
        ] {
            assert!(matches!(
                f.service.create(bad, "user-1").await,
                Err(DomainError::Validation(_))
            ));
        }
        assert_eq!(f.upload_count(), 0);
    }

    #[tokio::test]
    async fn dangling_category_shapes_as_none() {
        let f = fixture().await;
        let rock = f.rock().await;
        let view = f.service.create(form(&rock), "user-1").await.unwrap();

        f.categories.delete(&rock.id).await.unwrap();

        let listed = f.service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].music.id, view.music.id);
        assert!(listed[0].category.is_none());
        assert!(listed[0].category_type.is_none());
    }

    #[tokio::test]
    async fn list_by_category_validates_and_reports_empty() {
        let f = fixture().await;
        let rock = f.rock().await;

        assert!(matches!(
            f.service.list_by_category("nope").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            f.service.list_by_category(&rock.id).await,
            Err(DomainError::NotFound(_))
        ));

        f.service.create(form(&rock), "user-1").await.unwrap();
        assert_eq!(f.service.list_by_category(&rock.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_audio_file_on_disk() {
        let f = fixture().await;
        let rock = f.rock().await;
        let created = f.service.create(form(&rock), "user-1").await.unwrap();
        let old_path = f.service.uploads().path_for(&created.music.file_url).unwrap();
        assert!(old_path.exists());

        let updated = f
            .service
            .update(
                &created.music.id,
                MusicUpload {
                    title: Some("".into()),
                    file: Some(file("remaster.mp3")),
                    ..MusicUpload::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.music.title, "Bohemian Rhapsody");
        assert_ne!(updated.music.file_url, created.music.file_url);
        assert!(!old_path.exists());
        assert!(f
            .service
            .uploads()
            .path_for(&updated.music.file_url)
            .unwrap()
            .exists());
        assert_eq!(updated.music.thumbnail_url, created.music.thumbnail_url);
    }

    #[tokio::test]
    async fn update_replaces_thumbnail_on_disk() {
        let f = fixture().await;
        let rock = f.rock().await;
        let created = f.service.create(form(&rock), "user-1").await.unwrap();
        let uploads = f.service.uploads();
        let old_thumbnail = uploads
            .path_for(created.music.thumbnail_url.as_deref().unwrap())
            .unwrap();
        let audio = uploads.path_for(&created.music.file_url).unwrap();
        assert!(old_thumbnail.exists());

        let updated = f
            .service
            .update(
                &created.music.id,
                MusicUpload {
                    thumbnail: Some(file("new-cover.png")),
                    ..MusicUpload::default()
                },
            )
            .await
            .unwrap();

        let new_thumbnail = updated.music.thumbnail_url.as_deref().unwrap();
        assert_ne!(Some(new_thumbnail), created.music.thumbnail_url.as_deref());
        assert!(!old_thumbnail.exists());
        assert!(uploads.path_for(new_thumbnail).unwrap().exists());
        assert!(updated.thumbnail_url.unwrap().ends_with("_new-cover.png"));
        assert_eq!(updated.music.file_url, created.music.file_url);
        assert!(audio.exists());
    }

    #[tokio::test]
    async fn delete_removes_files_and_repeats_as_not_found() {
        let f = fixture().await;
        let rock = f.rock().await;
        let created = f.service.create(form(&rock), "user-1").await.unwrap();

        f.service.delete(&created.music.id).await.unwrap();
        assert_eq!(f.upload_count(), 0);
        assert!(matches!(
            f.service.delete(&created.music.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_tolerates_missing_files() {
        let f = fixture().await;
        let rock = f.rock().await;
        let created = f.service.create(form(&rock), "user-1").await.unwrap();
        std::fs::remove_dir_all(f.dir.path().join("uploads")).unwrap();

        f.service.delete(&created.music.id).await.unwrap();
    }
}
