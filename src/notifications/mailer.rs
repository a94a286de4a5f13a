//! Outgoing email transport
//!
//! The dispatcher sends ticket emails through the `Mailer` trait; the
//! SMTP implementation is used when email is enabled in config, the
//! log-only implementation otherwise.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::EmailConfig;
use crate::domain::{DomainError, DomainResult};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> DomainResult<()>;
}

/// SMTP mailer backed by lettre's async transport (STARTTLS)
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> DomainResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| DomainError::Validation(format!("SMTP transport: {}", e)))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from = config
            .from
            .parse()
            .map_err(|e| DomainError::Validation(format!("from address: {}", e)))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> DomainResult<()> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| DomainError::Validation(format!("recipient address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DomainError::Validation(format!("build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DomainError::Validation(format!("send email: {}", e)))?;
        Ok(())
    }
}

/// Logs outgoing mail instead of delivering it. Used when email is
/// disabled in config and in tests.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> DomainResult<()> {
        info!("Email (logged, not sent): to={} subject={:?}", to, subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        LogMailer
            .send("user@example.com", "Your Parking Ticket", "hello")
            .await
            .unwrap();
    }
}
