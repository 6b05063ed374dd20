//! Database repository implementations
//!
//! One SeaORM repository per aggregate.

pub mod category_repository;
pub mod music_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use music_repository::MusicRepository;
pub use user_repository::UserRepository;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::internal("Database error", e)
}

/// Map a unique-constraint violation to a conflict with the given message.
pub(crate) fn unique_err(e: sea_orm::DbErr, message: &str) -> DomainError {
    let text = e.to_string();
    if text.contains("UNIQUE") || text.contains("duplicate") {
        DomainError::Conflict(message.to_string())
    } else {
        db_err(e)
    }
}
