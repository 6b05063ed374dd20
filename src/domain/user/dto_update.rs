use super::UserRole;

/// Partial user update. `None` keeps the stored value.
///
/// A `password` is re-hashed by the repository; nothing else touches the hash.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}
