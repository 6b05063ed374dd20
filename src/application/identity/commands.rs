//! Input objects for identity use-cases
//!
//! Fields arrive as submitted; blank strings are treated as absent.

#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `user`, `admin` or `moderator`; defaults to `user`
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Applied only when the requester is an admin
    pub role: Option<String>,
}
