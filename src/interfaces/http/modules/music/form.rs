//! Multipart track form parsing
//!
//! Text parts are collected as-is; file parts are buffered with a per-file
//! cap and at most one part each for `file` and `thumbnail`.

use axum::extract::multipart::Field;
use axum::extract::Multipart;

use crate::domain::{FileUpload, MusicUpload};
use crate::interfaces::http::error::ApiError;

const FILE_FIELD: &str = "file";
const THUMBNAIL_FIELD: &str = "thumbnail";

pub async fn read_music_form(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<MusicUpload, ApiError> {
    let mut form = MusicUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            FILE_FIELD | THUMBNAIL_FIELD => {
                let upload = read_file(field, &name, max_file_size).await?;
                let slot = if name == FILE_FIELD {
                    &mut form.file
                } else {
                    &mut form.thumbnail
                };
                if slot.is_some() {
                    return Err(ApiError::Upload(format!("Unexpected field '{}'", name)));
                }
                *slot = upload;
            }
            _ if field.file_name().is_some() => {
                return Err(ApiError::Upload(format!("Unexpected field '{}'", name)));
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Upload(e.body_text()))?;
                let slot = match name.as_str() {
                    "title" => &mut form.title,
                    "artist" => &mut form.artist,
                    "category" => &mut form.category,
                    "categoryType" => &mut form.category_type,
                    "duration" => &mut form.duration,
                    "releaseDate" => &mut form.release_date,
                    _ => continue,
                };
                *slot = Some(value);
            }
        }
    }

    Ok(form)
}

/// Buffer one file part. An empty part without a file name counts as absent.
async fn read_file(
    mut field: Field<'_>,
    name: &str,
    max_file_size: usize,
) -> Result<Option<FileUpload>, ApiError> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let mut data = Vec::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::Upload(e.body_text()))?
    {
        if data.len() + chunk.len() > max_file_size {
            return Err(ApiError::Upload(format!(
                "Field '{}' exceeds the {} byte limit",
                name, max_file_size
            )));
        }
        data.extend_from_slice(&chunk);
    }

    if original_name.is_empty() && data.is_empty() {
        return Ok(None);
    }

    Ok(Some(FileUpload {
        original_name,
        data,
    }))
}
