//! Mail relay adapters

mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::application::ports::{Mailer, OutgoingMail};
use crate::config::MailConfig;
use crate::domain::DomainResult;

pub use smtp::{MailError, SmtpMailer};

/// Stand-in used when no SMTP relay is configured. Only the recipient and
/// subject reach the info log; the body can carry a reset token and is
/// kept at debug level.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> DomainResult<()> {
        info!(to = %mail.to, subject = %mail.subject, "SMTP not configured, mail not sent");
        debug!(to = %mail.to, body = %mail.body, "Unsent mail body");
        Ok(())
    }
}

/// Pick the SMTP relay when configured, the logging stand-in otherwise.
pub fn mailer_from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    if config.is_configured() {
        info!(host = %config.smtp_host, port = config.smtp_port, "Using SMTP mail relay");
        Arc::new(SmtpMailer::new(config.clone()))
    } else {
        info!("No SMTP host configured, reset emails will not be sent");
        Arc::new(LogMailer)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    fn reset_mail() -> OutgoingMail {
        OutgoingMail {
            to: "a@x.com".into(),
            subject: "Password Reset Request".into(),
            body: "http://localhost:3000/reset-password/secret-token".into(),
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn log_mailer_keeps_body_out_of_info_log() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(LevelFilter::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        assert!(LogMailer.send(reset_mail()).await.is_ok());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("a@x.com"));
        assert!(output.contains("Password Reset Request"));
        assert!(!output.contains("secret-token"));
    }

    #[tokio::test]
    async fn unconfigured_mailer_accepts_mail() {
        let mailer = mailer_from_config(&MailConfig::default());
        assert!(mailer.send(reset_mail()).await.is_ok());
    }
}
