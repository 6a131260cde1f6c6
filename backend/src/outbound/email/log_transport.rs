//! Transport that writes emails to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::OutboundEmail;
use crate::domain::ports::{EmailReceipt, EmailTransport, EmailTransportError};

/// Logs each email at info level. Used when no relay is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEmailTransport;

#[async_trait]
impl EmailTransport for LogEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailTransportError> {
        let receipt = EmailReceipt::new(format!("log-{}", Uuid::new_v4()));
        info!(
            receipt = %receipt,
            from = email.source.as_str(),
            to = ?email.destination,
            subject = email.subject.as_str(),
            body_len = email.html_body.len(),
            "email written to log"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_email_gets_a_distinct_receipt() {
        let email = OutboundEmail {
            source: "shop@example.com".to_owned(),
            destination: vec!["ops@example.com".to_owned()],
            subject: "New Product Added: Lamp".to_owned(),
            html_body: String::new(),
        };
        let first = LogEmailTransport.send(&email).await.expect("logged");
        let second = LogEmailTransport.send(&email).await.expect("logged");
        assert_ne!(first, second);
        assert!(first.to_string().starts_with("log-"));
    }
}
