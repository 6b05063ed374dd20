//! Music aggregate

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{FileUpload, MusicUpload, NewMusic};
pub use model::{parse_duration, parse_release_date, Music};
pub use repository::MusicRepositoryInterface;
