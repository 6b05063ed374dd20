//! Identity module: user management & authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: registration, login, profile updates, password resets.

pub mod commands;
pub mod service;

pub use commands::{ProfileUpdate, RegisterUser};
pub use service::{AuthResult, UserService};
