//! Music DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::catalog::CategorySummary;
use crate::application::MusicView;
use crate::interfaces::http::modules::categories::CategoryTypeDto;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<CategorySummary> for CategorySummaryDto {
    fn from(c: CategorySummary) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

/// Track with its category resolved and absolute file links
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicResponse {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// `null` when the category was deleted
    pub category: Option<CategorySummaryDto>,
    pub category_type: Option<CategoryTypeDto>,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: f64,
    pub release_date: DateTime<Utc>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MusicView> for MusicResponse {
    fn from(view: MusicView) -> Self {
        let music = view.music;
        Self {
            id: music.id,
            title: music.title,
            artist: music.artist,
            category: view.category.map(CategorySummaryDto::from),
            category_type: view.category_type.map(CategoryTypeDto::from),
            file_url: view.file_url,
            thumbnail_url: view.thumbnail_url,
            duration: music.duration,
            release_date: music.release_date,
            user_id: music.user_id,
            created_at: music.created_at,
            updated_at: music.updated_at,
        }
    }
}

/// Multipart form accepted by create and update (OpenAPI only)
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicForm {
    pub title: String,
    pub artist: String,
    /// Category ID
    pub category: String,
    /// Category type ID
    pub category_type: String,
    /// Seconds, at least 1
    pub duration: f64,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub release_date: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub thumbnail: Option<Vec<u8>>,
}
