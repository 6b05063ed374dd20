//! Error responses
//!
//! Every failure is rendered as `{message, error?, missing?}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DomainError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    /// Underlying cause, for server and upload errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Required fields absent from the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
            missing: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Multipart body could not be accepted (repeated field, oversize file, ...)
    Upload(String),
    BadRequest(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upload(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::Validation(_)
                | DomainError::Conflict(_)
                | DomainError::MissingFields(_) => StatusCode::BAD_REQUEST,
                DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(self) -> ErrorBody {
        match self {
            ApiError::Upload(detail) => ErrorBody {
                error: Some(detail),
                ..ErrorBody::new("File upload error")
            },
            ApiError::BadRequest(message) => ErrorBody::new(message),
            ApiError::Domain(DomainError::MissingFields(fields)) => ErrorBody {
                missing: Some(fields),
                ..ErrorBody::new("Missing required fields")
            },
            ApiError::Domain(DomainError::Internal(detail)) => {
                tracing::error!(error = %detail, "Request failed");
                ErrorBody {
                    error: Some(detail),
                    ..ErrorBody::new("Server Error")
                }
            }
            ApiError::Domain(other) => ErrorBody::new(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_fields_are_listed() {
        let (status, body) = render(
            DomainError::MissingFields(vec!["title".into(), "file".into()]).into(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing required fields");
        assert_eq!(body["missing"], serde_json::json!(["title", "file"]));
    }

    #[tokio::test]
    async fn internal_errors_keep_detail_in_error_field() {
        let (status, body) =
            render(DomainError::internal("Database error", "disk full").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server Error");
        assert_eq!(body["error"], "Database error: disk full");
    }

    #[tokio::test]
    async fn domain_statuses() {
        let cases = [
            (DomainError::Conflict("User already exists".into()), StatusCode::BAD_REQUEST),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::not_found("Music"), StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }

        let (_, body) = render(DomainError::not_found("Music").into()).await;
        assert_eq!(body, serde_json::json!({"message": "Music not found"}));
    }

    #[tokio::test]
    async fn upload_errors_are_bad_requests() {
        let (status, body) = render(ApiError::Upload("Unexpected field".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "File upload error");
        assert_eq!(body["error"], "Unexpected field");
    }
}
