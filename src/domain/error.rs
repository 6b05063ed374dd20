use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Message is user-facing, e.g. "Category not found"
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// Duplicate value for a unique field
    #[error("{0}")]
    Conflict(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// Database, filesystem, crypto or mail relay failure
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &str) -> Self {
        DomainError::NotFound(format!("{} not found", entity))
    }

    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        DomainError::Internal(format!("{}: {}", context, err))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(DomainError::not_found("Category").to_string(), "Category not found");
    }

    #[test]
    fn missing_fields_lists_all_names() {
        let err = DomainError::MissingFields(vec!["title".into(), "file".into()]);
        assert_eq!(err.to_string(), "Missing required fields: title, file");
    }

    #[test]
    fn internal_keeps_context() {
        let err = DomainError::internal("Database error", "disk I/O error");
        assert_eq!(err.to_string(), "Database error: disk I/O error");
    }
}
