use chrono::{DateTime, Utc};

/// File part received from a multipart request, held in memory until the
/// request is validated.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Client-supplied file name, unsanitized
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Raw track form as submitted on create or update.
///
/// Text fields are unparsed; blank values count as absent.
#[derive(Debug, Clone, Default)]
pub struct MusicUpload {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub category: Option<String>,
    pub category_type: Option<String>,
    pub duration: Option<String>,
    pub release_date: Option<String>,
    pub file: Option<FileUpload>,
    pub thumbnail: Option<FileUpload>,
}

impl MusicUpload {
    /// Names of required fields absent on create, in form order.
    pub fn missing_fields(&self) -> Vec<String> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        let mut missing = Vec::new();
        if !present(&self.title) {
            missing.push("title");
        }
        if !present(&self.artist) {
            missing.push("artist");
        }
        if !present(&self.category) {
            missing.push("category");
        }
        if !present(&self.category_type) {
            missing.push("categoryType");
        }
        if self.file.is_none() {
            missing.push("file");
        }
        if !present(&self.duration) {
            missing.push("duration");
        }
        if !present(&self.release_date) {
            missing.push("releaseDate");
        }
        missing.into_iter().map(String::from).collect()
    }
}

/// Validated track ready for insert
#[derive(Debug, Clone)]
pub struct NewMusic {
    pub title: String,
    pub artist: String,
    pub category_id: String,
    pub category_type_id: String,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: f64,
    pub release_date: DateTime<Utc>,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_reports_every_field_in_order() {
        let missing = MusicUpload::default().missing_fields();
        assert_eq!(
            missing,
            vec![
                "title",
                "artist",
                "category",
                "categoryType",
                "file",
                "duration",
                "releaseDate"
            ]
        );
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let form = MusicUpload {
            title: Some("  ".into()),
            artist: Some("Queen".into()),
            category: Some("c".into()),
            category_type: Some("t".into()),
            duration: Some("200".into()),
            release_date: Some("1975-10-31".into()),
            file: Some(FileUpload {
                original_name: "song.mp3".into(),
                data: vec![1, 2, 3],
            }),
            thumbnail: None,
        };
        assert_eq!(form.missing_fields(), vec!["title"]);
    }

    #[test]
    fn missing_file_is_reported() {
        let form = MusicUpload {
            title: Some("Bohemian Rhapsody".into()),
            artist: Some("Queen".into()),
            category: Some("c".into()),
            category_type: Some("t".into()),
            duration: Some("354".into()),
            release_date: Some("1975-10-31".into()),
            file: None,
            thumbnail: None,
        };
        assert_eq!(form.missing_fields(), vec!["file"]);
    }
}
