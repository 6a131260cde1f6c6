//! Email transport adapters.
//!
//! [`ConfiguredEmailTransport`] wraps whichever transport the server settings
//! select so the notifier service stays monomorphic.

mod http_transport;
mod log_transport;
mod smtp_transport;

use async_trait::async_trait;

use crate::domain::OutboundEmail;
use crate::domain::ports::{EmailReceipt, EmailTransport, EmailTransportError};

pub use http_transport::HttpEmailTransport;
pub use log_transport::LogEmailTransport;
pub use smtp_transport::{SmtpEmailTransport, SmtpSecurity, SmtpSettings};

/// Transport chosen at startup.
pub enum ConfiguredEmailTransport {
    Http(HttpEmailTransport),
    Smtp(SmtpEmailTransport),
    Log(LogEmailTransport),
}

impl ConfiguredEmailTransport {
    /// Short name for startup logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Smtp(_) => "smtp",
            Self::Log(_) => "log",
        }
    }
}

#[async_trait]
impl EmailTransport for ConfiguredEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailTransportError> {
        match self {
            Self::Http(transport) => transport.send(email).await,
            Self::Smtp(transport) => transport.send(email).await,
            Self::Log(transport) => transport.send(email).await,
        }
    }
}
