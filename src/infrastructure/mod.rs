//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod mail;
pub mod storage;

pub use database::{init_database, DatabaseConfig};
pub use mail::{mailer_from_config, LogMailer, SmtpMailer};
pub use storage::UploadStore;
