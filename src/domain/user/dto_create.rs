use super::UserRole;

/// Plaintext password; the repository hashes it on insert.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
}
