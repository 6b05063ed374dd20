//! Outbound ports used by application services

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Plain-text message handed to a [`Mailer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers transactional email (password reset links).
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()>;
}
