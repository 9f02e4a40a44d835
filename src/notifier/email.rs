// notifier/email.rs

use crate::config::EmailConfig;
use crate::model::NotifyError;
use lettre::message::header::{ContentType, Header, HeaderName, HeaderValue};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, warn};

/// `X-Priority` mail header; `1` marks the message as important.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPriority(pub u8);

impl Header for XPriority {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Priority")
    }

    fn parse(s: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self(s.trim().parse()?))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.to_string())
    }
}

pub struct EmailNotifier {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailNotifier {
    /// STARTTLS relay on the configured host and port, logging in as the sender.
    pub fn new(config: EmailConfig) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.from.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(30)))
            .build();
        Ok(Self { config, transport })
    }

    pub async fn send_report(&self, subject: &str, html: String) -> Result<(), NotifyError> {
        let message = build_message(&self.config, subject, html)?;
        info!("📤 Sending report to {}", self.config.recipient());
        match self.transport.send(message).await {
            Ok(response) => {
                info!("✅ Mail accepted [{}]", response.code());
                Ok(())
            }
            Err(e) => {
                warn!("❌ Mail send failed: {}", e);
                Err(e.into())
            }
        }
    }
}

/// HTML mail from the configured sender to the recipient, flagged important.
pub fn build_message(config: &EmailConfig, subject: &str, html: String) -> Result<Message, NotifyError> {
    let message = Message::builder()
        .from(config.from.parse()?)
        .to(config.recipient().parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .header(XPriority(1))
        .body(html)?;
    Ok(message)
}
