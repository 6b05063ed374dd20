//! HTTP REST API interfaces
//!
//! - `middleware`: Authentication middleware (bearer header or `jwt` cookie)
//! - `modules`: Request handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod error;
pub mod middleware;
pub mod modules;
pub mod router;

pub use error::{ApiError, ErrorBody};
pub use router::{create_api_router, AppState};
