//! Domain layer: catalog entities, DTOs and repository interfaces

pub mod category;
pub mod error;
pub mod music;
pub mod user;

pub use category::{
    Category, CategoryRepositoryInterface, CategoryType, CreateCategoryDto, NewCategoryType,
    UpdateCategoryDto, UpdateCategoryTypeDto,
};
pub use error::{DomainError, DomainResult};
pub use music::{FileUpload, Music, MusicRepositoryInterface, MusicUpload, NewMusic};
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepositoryInterface, UserRole};

/// Treat blank strings like absent ones.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
