//! Email delivery of the daily report over SMTP.

use crate::services::error::DeliveryError;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::info;

/// Port that speaks TLS from the first byte; anything else upgrades with STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[async_trait::async_trait]
pub trait AlertDispatcher {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        plain_text: &str,
        html: &str,
    ) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
}

pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpDispatcher {
    pub fn new(settings: &SmtpSettings) -> Result<Self, DeliveryError> {
        let sender = parse_mailbox(&settings.sender)?;

        let relay = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        };
        let builder = relay.map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(30)))
            .build();

        Ok(Self { transport, sender })
    }
}

#[async_trait::async_trait]
impl AlertDispatcher for SmtpDispatcher {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        plain_text: &str,
        html: &str,
    ) -> Result<(), DeliveryError> {
        let message = build_message(&self.sender, recipients, subject, plain_text, html)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        info!(
            recipients = recipients.len(),
            "Report email sent to {} recipient(s)",
            recipients.len()
        );
        Ok(())
    }
}

pub fn parse_mailbox(address: &str) -> Result<Mailbox, DeliveryError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| DeliveryError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Build a `multipart/alternative` message carrying both report bodies.
pub fn build_message(
    sender: &Mailbox,
    recipients: &[String],
    subject: &str,
    plain_text: &str,
    html: &str,
) -> Result<Message, DeliveryError> {
    if recipients.is_empty() {
        return Err(DeliveryError::Message("no recipients configured".to_string()));
    }

    let mut builder = Message::builder().from(sender.clone()).subject(subject);
    for recipient in recipients {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            plain_text.to_string(),
            html.to_string(),
        ))
        .map_err(|e| DeliveryError::Message(e.to_string()))
}
