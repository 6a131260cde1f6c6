//! SMTP email transport built on `lettre`.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::domain::OutboundEmail;
use crate::domain::ports::{EmailReceipt, EmailTransport, EmailTransportError};

/// Connection security for the SMTP relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// Upgrade with STARTTLS (submission port 587).
    #[default]
    StartTls,
    /// TLS from the first byte (port 465).
    Tls,
    /// Plain text. Local relays only.
    None,
}

/// SMTP relay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub security: SmtpSecurity,
}

/// Email transport speaking SMTP to a relay.
#[derive(Clone)]
pub struct SmtpEmailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailTransport {
    /// Build the transport. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns an error when the relay host cannot be used for TLS.
    pub fn new(settings: SmtpSettings) -> Result<Self, lettre::transport::smtp::Error> {
        let mut builder = match settings.security {
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?,
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
        };
        if let Some(port) = settings.port {
            builder = builder.port(port);
        }
        if let (Some(username), Some(password)) = (settings.username, settings.password) {
            builder = builder.credentials(Credentials::new(username, password));
        }
        Ok(Self {
            mailer: builder.build(),
        })
    }
}

fn build_message(email: &OutboundEmail) -> Result<Message, EmailTransportError> {
    let from: Mailbox = email.source.parse().map_err(|err| {
        EmailTransportError::invalid_message(format!("invalid sender {:?}: {err}", email.source))
    })?;
    let mut builder = Message::builder()
        .from(from)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_HTML);
    for recipient in &email.destination {
        let to: Mailbox = recipient.parse().map_err(|err| {
            EmailTransportError::invalid_message(format!("invalid recipient {recipient:?}: {err}"))
        })?;
        builder = builder.to(to);
    }
    builder
        .body(email.html_body.clone())
        .map_err(|err| EmailTransportError::invalid_message(err.to_string()))
}

#[async_trait]
impl EmailTransport for SmtpEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailTransportError> {
        let message = build_message(email)?;
        let response = self.mailer.send(message).await.map_err(|err| {
            if err.is_permanent() {
                EmailTransportError::rejected(err.to_string())
            } else {
                EmailTransportError::unavailable(err.to_string())
            }
        })?;
        let receipt = response
            .first_line()
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Ok(EmailReceipt::new(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn email(source: &str, recipient: &str) -> OutboundEmail {
        OutboundEmail {
            source: source.to_owned(),
            destination: vec![recipient.to_owned()],
            subject: "New Product Added: Lamp".to_owned(),
            html_body: "<p>Lamp</p>".to_owned(),
        }
    }

    #[rstest]
    fn well_formed_addresses_build_an_html_message() {
        let message = build_message(&email("shop@example.com", "ops@example.com"))
            .expect("message builds");
        let raw = String::from_utf8(message.formatted()).expect("utf-8 message");
        assert!(raw.contains("Subject: New Product Added: Lamp"));
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[rstest]
    #[case("not an address", "ops@example.com")]
    #[case("shop@example.com", "")]
    fn malformed_addresses_are_invalid_messages(#[case] source: &str, #[case] recipient: &str) {
        let err = build_message(&email(source, recipient)).expect_err("bad address");
        assert!(matches!(err, EmailTransportError::InvalidMessage { .. }));
    }

    #[rstest]
    fn plain_relays_build_without_tls() {
        let transport = SmtpEmailTransport::new(SmtpSettings {
            host: "localhost".to_owned(),
            port: Some(1025),
            username: None,
            password: None,
            security: SmtpSecurity::None,
        });
        assert!(transport.is_ok());
    }
}
