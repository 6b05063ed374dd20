//! Authentication module: register, login, logout, profile, password reset

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
