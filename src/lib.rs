//! # Music Catalog
//!
//! REST backend for a music catalog: user accounts with roles, categories
//! with embedded types, and tracks with uploaded audio and thumbnails.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository interfaces
//! - **application**: use-case services (identity, catalog) and ports
//! - **infrastructure**: SeaORM persistence, crypto, mail relay, upload store
//! - **interfaces**: axum HTTP API with Swagger documentation
//! - **server**: runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::{create_api_router, AppState};
