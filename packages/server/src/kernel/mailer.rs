//! Mail backends: console (development) and SMTP (lettre).

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, EmailBackend, SmtpSettings};
use crate::kernel::{BaseMailer, OutboundEmail};

/// Select the mail backend named by configuration
pub fn mailer_from_config(config: &Config) -> Result<Arc<dyn BaseMailer>> {
    match &config.email_backend {
        EmailBackend::Console => Ok(Arc::new(ConsoleMailer::new(&config.default_from_email))),
        EmailBackend::Smtp(settings) => Ok(Arc::new(SmtpMailer::new(
            settings,
            &config.default_from_email,
        )?)),
    }
}

// =============================================================================
// Console
// =============================================================================

/// Writes messages to the log instead of sending them.
#[derive(Debug, Clone)]
pub struct ConsoleMailer {
    from: String,
}

impl ConsoleMailer {
    pub fn new(from: &str) -> Self {
        Self {
            from: from.to_string(),
        }
    }
}

#[async_trait]
impl BaseMailer for ConsoleMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        info!(
            from = %self.from,
            to = %email.to,
            subject = %email.subject,
            "Outbound email (console backend)\n{}",
            email.body
        );
        Ok(())
    }
}

// =============================================================================
// SMTP
// =============================================================================

/// Relays messages through an SMTP server using lettre's async transport.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings, from: &str) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .with_context(|| format!("Invalid SMTP relay host: {}", settings.host))?
            .port(settings.port);

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from = from
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid DEFAULT_FROM_EMAIL: {}", from))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(email
                .to
                .parse::<Mailbox>()
                .with_context(|| format!("Invalid recipient address: {}", email.to))?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .context("Failed to build email")
    }
}

#[async_trait]
impl BaseMailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let message = self.build_message(email)?;
        self.transport
            .send(message)
            .await
            .context("SMTP delivery failed")?;
        Ok(())
    }
}
