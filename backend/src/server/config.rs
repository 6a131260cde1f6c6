//! Process-level server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CATALOGUE_*` environment variables or a
//! config file. Per-request settings (table, topic, mail addresses) are not
//! here; they are read from the environment on every invocation.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::outbound::email::{SmtpSecurity, SmtpSettings};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_EVENTS_TOPIC: &str = "product-events";

/// Errors raised while interpreting server settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}")]
    BindAddress { value: String },
    #[error("invalid email relay URL {value:?}")]
    RelayUrl { value: String },
    #[error("unknown email transport {value:?}; expected http, smtp or log")]
    TransportKind { value: String },
    #[error("unknown SMTP security {value:?}; expected starttls, tls or none")]
    SmtpSecurity { value: String },
    #[error("email transport {kind} selected but {setting} is unset")]
    TransportIncomplete {
        kind: &'static str,
        setting: &'static str,
    },
}

/// Which email transport the notifier uses.
#[derive(Debug, Clone, PartialEq)]
pub enum EmailTransportSettings {
    Http { endpoint: Url, timeout: Duration },
    Smtp(SmtpSettings),
    Log,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE")]
pub struct ServerSettings {
    /// Socket address the HTTP server binds to.
    pub bind_address: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_max_size: Option<u32>,
    /// Force an email transport: `http`, `smtp` or `log`.
    pub email_transport: Option<String>,
    /// HTTP email relay endpoint.
    pub email_relay_url: Option<String>,
    /// Relay request timeout in seconds.
    #[ortho_config(default = 10)]
    pub email_timeout_secs: u64,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// `starttls` (default), `tls` or `none`.
    pub smtp_security: Option<String>,
    /// Topic the notification subscriber attaches to.
    pub events_topic: Option<String>,
    /// Messages buffered per topic before publishers wait.
    #[ortho_config(default = 1024)]
    pub channel_capacity: usize,
    /// Maximum messages handed to the notifier at once.
    #[ortho_config(default = 10)]
    pub batch_size: usize,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).map(str::trim).filter(|v| !v.is_empty())
}

impl ServerSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(self.bind_address.as_ref()).unwrap_or(DEFAULT_BIND_ADDRESS);
        raw.parse().map_err(|_| SettingsError::BindAddress {
            value: raw.to_owned(),
        })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = non_blank(self.database_url.as_ref())?;
        let config = PoolConfig::new(url);
        Some(match self.db_pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity.max(1)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Topic for the subscriber, or `fallback` (normally the intake topic
    /// variable) when unset, or `product-events`.
    pub fn events_topic(&self, fallback: Option<String>) -> String {
        non_blank(self.events_topic.as_ref())
            .map(str::to_owned)
            .or_else(|| fallback.filter(|topic| !topic.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_EVENTS_TOPIC.to_owned())
    }

    /// Resolve the email transport.
    ///
    /// An explicit `email_transport` wins; otherwise a relay URL selects
    /// HTTP, an SMTP host selects SMTP, and the log transport is the fallback.
    pub fn email_transport(&self) -> Result<EmailTransportSettings, SettingsError> {
        let relay = non_blank(self.email_relay_url.as_ref());
        let smtp_host = non_blank(self.smtp_host.as_ref());
        let kind = match non_blank(self.email_transport.as_ref()) {
            Some(kind) => kind.to_ascii_lowercase(),
            None if relay.is_some() => "http".to_owned(),
            None if smtp_host.is_some() => "smtp".to_owned(),
            None => "log".to_owned(),
        };

        match kind.as_str() {
            "http" => {
                let raw = relay.ok_or(SettingsError::TransportIncomplete {
                    kind: "http",
                    setting: "email_relay_url",
                })?;
                let endpoint = Url::parse(raw).map_err(|_| SettingsError::RelayUrl {
                    value: raw.to_owned(),
                })?;
                let timeout = Duration::from_secs(self.email_timeout_secs.max(1));
                Ok(EmailTransportSettings::Http { endpoint, timeout })
            }
            "smtp" => {
                let host = smtp_host.ok_or(SettingsError::TransportIncomplete {
                    kind: "smtp",
                    setting: "smtp_host",
                })?;
                Ok(EmailTransportSettings::Smtp(SmtpSettings {
                    host: host.to_owned(),
                    port: self.smtp_port,
                    username: self.smtp_username.clone(),
                    password: self.smtp_password.clone(),
                    security: self.smtp_security()?,
                }))
            }
            "log" => Ok(EmailTransportSettings::Log),
            _ => Err(SettingsError::TransportKind { value: kind }),
        }
    }

    fn smtp_security(&self) -> Result<SmtpSecurity, SettingsError> {
        match non_blank(self.smtp_security.as_ref()).map(str::to_ascii_lowercase) {
            None => Ok(SmtpSecurity::default()),
            Some(value) => match value.as_str() {
                "starttls" => Ok(SmtpSecurity::StartTls),
                "tls" => Ok(SmtpSecurity::Tls),
                "none" => Ok(SmtpSecurity::None),
                _ => Err(SettingsError::SmtpSecurity { value }),
            },
        }
    }
}
