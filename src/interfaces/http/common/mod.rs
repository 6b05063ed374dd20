//! Shared HTTP extractors and response bodies

mod validated_json;

use serde::Serialize;
use utoipa::ToSchema;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Plain acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
