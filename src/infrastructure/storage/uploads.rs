use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use crate::config::UploadsConfig;
use crate::domain::{DomainError, DomainResult, FileUpload};

/// URL prefix the upload directory is served under
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Writes uploaded files to a flat directory and resolves their public links.
///
/// Stored references have the form `/uploads/<file name>`; only the file name
/// part is ever used to locate a file on disk.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_file_size: usize,
    public_base_url: String,
}

impl UploadStore {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_file_size: config.max_file_size,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write the file under a fresh randomized name and return its stored reference.
    pub async fn save(&self, upload: &FileUpload) -> DomainResult<String> {
        if upload.data.len() > self.max_file_size {
            return Err(DomainError::Validation("File upload error".into()));
        }

        let millis = Utc::now().timestamp_millis();
        let random = rand::thread_rng().gen_range(0..1_000_000_000u32);
        let name = stored_file_name(&upload.original_name, millis, random);

        self.ensure_dir()
            .await
            .map_err(|e| DomainError::internal("Failed to create upload directory", e))?;
        tokio::fs::write(self.dir.join(&name), &upload.data)
            .await
            .map_err(|e| DomainError::internal("Failed to store upload", e))?;

        debug!(file = %name, bytes = upload.data.len(), "Stored upload");
        Ok(format!("{}/{}", UPLOADS_ROUTE, name))
    }

    /// Best-effort delete. Returns true when a file was actually removed.
    pub async fn remove(&self, stored: &str) -> bool {
        let Some(path) = self.path_for(stored) else {
            return false;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove upload");
                false
            }
        }
    }

    /// Location on disk, from the base name of a stored reference.
    pub fn path_for(&self, stored: &str) -> Option<PathBuf> {
        let name = base_name(stored);
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }
        Some(self.dir.join(name))
    }

    /// Absolute link clients can fetch the file from.
    pub fn public_url(&self, stored: &str) -> String {
        format!(
            "{}{}/{}",
            self.public_base_url,
            UPLOADS_ROUTE,
            base_name(stored)
        )
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// `<millis>-<random>_<sanitized base><ext>`
///
/// Whitespace runs in the base name become `-` and anything outside
/// `[A-Za-z0-9-_]` is dropped; the extension keeps ASCII alphanumerics only.
pub fn stored_file_name(original: &str, millis: i64, random: u32) -> String {
    let name = base_name(original);
    let (stem, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx + 1..]),
        _ => (name, ""),
    };

    let mut base = String::with_capacity(stem.len());
    let mut in_space = false;
    for c in stem.chars() {
        if c.is_whitespace() {
            if !in_space {
                base.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            base.push(c);
        }
    }

    let ext: String = ext.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if ext.is_empty() {
        format!("{}-{}_{}", millis, random, base)
    } else {
        format!("{}-{}_{}.{}", millis, random, base, ext)
    }
}
