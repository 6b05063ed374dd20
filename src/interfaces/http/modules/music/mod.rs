//! Music module: track listing and multipart upload endpoints

pub mod dto;
pub mod form;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
