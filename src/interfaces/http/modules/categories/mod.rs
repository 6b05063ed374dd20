//! Categories module: categories and their embedded types

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
