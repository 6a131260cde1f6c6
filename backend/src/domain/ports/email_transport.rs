//! Port for outbound email delivery.
use std::fmt;

use async_trait::async_trait;

use crate::domain::OutboundEmail;

use super::define_port_error;

define_port_error! {
    /// Errors raised by email transports.
    pub enum EmailTransportError {
        /// The email could not be built from the supplied addresses or content.
        InvalidMessage { message: String } => "email could not be built: {message}",
        /// The transport could not be reached or timed out.
        Unavailable { message: String } => "email transport is unavailable: {message}",
        /// The transport answered but refused the email.
        Rejected { message: String } => "email was rejected: {message}",
    }
}

/// Identifier handed back by the transport for a sent email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt(String);

impl EmailReceipt {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for EmailReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delivery of fully addressed emails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Send one email.
    async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailTransportError>;
}

/// Fixture transport that accepts every email.
#[derive(Debug, Default)]
pub struct FixtureEmailTransport;

#[async_trait]
impl EmailTransport for FixtureEmailTransport {
    async fn send(&self, _email: &OutboundEmail) -> Result<EmailReceipt, EmailTransportError> {
        Ok(EmailReceipt::new("fixture-receipt"))
    }
}
