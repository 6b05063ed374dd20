//! Catalog module: categories with embedded types, and music tracks

pub mod category_service;
pub mod music_service;

pub use category_service::CategoryService;
pub use music_service::{CategorySummary, MusicService, MusicView};
