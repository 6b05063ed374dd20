//! Shared fixtures for unit tests

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

use crate::application::ports::{Mailer, OutgoingMail};
use crate::config::AppConfig;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig};

/// Fresh migrated SQLite file. Keep the directory alive for the test's duration.
pub(crate) async fn test_db() -> (TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig {
        max_connections: 1,
        ..DatabaseConfig::sqlite(&path.to_string_lossy())
    };

    let db = init_database(&config).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    (dir, db)
}

/// Config pointing uploads at `dir`, with a fixed secret and frontend URL
pub(crate) fn test_config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.security.jwt_secret = "test-secret".into();
    config.server.frontend_url = "http://localhost:3000".into();
    config.uploads.dir = dir.join("uploads");
    config.uploads.public_base_url = "http://localhost:5000".into();
    config
}

/// Keeps every message instead of sending it
#[derive(Clone, Default)]
pub(crate) struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    fail: bool,
}

impl RecordingMailer {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()> {
        if self.fail {
            return Err(DomainError::internal("Email could not be sent", "relay down"));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

const MULTIPART_BOUNDARY: &str = "X-TEST-BOUNDARY";

/// Encode text and file parts as `multipart/form-data`.
/// Returns the content type header value and the body.
pub(crate) fn multipart_body(
    text: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in text {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                MULTIPART_BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    for (name, file_name, data) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                MULTIPART_BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    (
        format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        body,
    )
}
