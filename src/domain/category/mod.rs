//! Category aggregate
//!
//! A category owns an ordered list of embedded types. The list is saved
//! together with the category, never on its own.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{CreateCategoryDto, NewCategoryType, UpdateCategoryDto, UpdateCategoryTypeDto};
pub use model::{Category, CategoryType};
pub use repository::CategoryRepositoryInterface;
