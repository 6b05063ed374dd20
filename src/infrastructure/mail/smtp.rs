use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::application::ports::{Mailer, OutgoingMail};
use crate::config::MailConfig;
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

impl From<MailError> for DomainError {
    fn from(err: MailError) -> Self {
        DomainError::internal("Email could not be sent", err)
    }
}

/// STARTTLS relay, authenticated when both username and password are set
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        Message::builder()
            .from(self.config.from_address.parse()?)
            .to(mail.to.parse()?)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = self.build_message(mail)?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        builder.build().send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()> {
        self.deliver(&mail).await?;
        info!(to = %mail.to, subject = %mail.subject, "Email sent");
        Ok(())
    }
}
