//! Password hashing and token signing

pub mod jwt;
pub mod password;

pub use jwt::{create_reset_token, create_session_token, verify_token, JwtConfig, TokenClaims, TokenPurpose};
pub use password::{hash_password, verify_password};
