//! Reqwest-backed email relay transport.
//!
//! Posts each email as JSON to a relay endpoint. The adapter only owns the
//! HTTP concerns: request shape, timeout and status mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::OutboundEmail;
use crate::domain::ports::{EmailReceipt, EmailTransport, EmailTransportError};

const USER_AGENT: &str = "catalogue-notifier/0.1";

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Email transport that POSTs to an HTTP relay.
pub struct HttpEmailTransport {
    client: Client,
    endpoint: Url,
}

impl HttpEmailTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl EmailTransport for HttpEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailTransportError> {
        let request = RelayRequest {
            from: &email.source,
            to: &email.destination,
            subject: &email.subject,
            html: &email.html_body,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(receipt_from_body(body.as_ref()))
    }
}

/// Use the relay's id when it sends one, otherwise mint a local one.
fn receipt_from_body(body: &[u8]) -> EmailReceipt {
    let relay_id = serde_json::from_slice::<RelayResponse>(body)
        .ok()
        .and_then(|response| response.id)
        .filter(|id| !id.trim().is_empty());
    match relay_id {
        Some(id) => EmailReceipt::new(id),
        None => {
            debug!("relay response carried no id");
            EmailReceipt::new(Uuid::new_v4().to_string())
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> EmailTransportError {
    if error.is_builder() {
        EmailTransportError::invalid_message(error.to_string())
    } else {
        EmailTransportError::unavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> EmailTransportError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::GATEWAY_TIMEOUT => EmailTransportError::unavailable(message),
        _ if status.is_client_error() => EmailTransportError::rejected(message),
        _ => EmailTransportError::unavailable(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn request_uses_relay_field_names() {
        let to = vec!["ops@example.com".to_owned()];
        let request = RelayRequest {
            from: "shop@example.com",
            to: &to,
            subject: "New Product Added: Lamp",
            html: "<p>hi</p>",
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialise"),
            json!({
                "from": "shop@example.com",
                "to": ["ops@example.com"],
                "subject": "New Product Added: Lamp",
                "html": "<p>hi</p>",
            })
        );
    }

    #[rstest]
    #[case(br#"{"id":"relay-42"}"#.as_slice(), Some("relay-42"))]
    #[case(br#"{"id":""}"#.as_slice(), None)]
    #[case(b"accepted".as_slice(), None)]
    fn receipts_prefer_the_relay_id(#[case] body: &[u8], #[case] expected: Option<&str>) {
        let receipt = receipt_from_body(body).to_string();
        match expected {
            Some(id) => assert_eq!(receipt, id),
            None => assert!(Uuid::parse_str(&receipt).is_ok()),
        }
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, true)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, true)]
    #[case(StatusCode::TOO_MANY_REQUESTS, false)]
    #[case(StatusCode::BAD_GATEWAY, false)]
    fn client_errors_are_rejections(#[case] status: StatusCode, #[case] rejected: bool) {
        let err = map_status_error(status, b"nope");
        assert_eq!(matches!(err, EmailTransportError::Rejected { .. }), rejected);
        assert!(err.to_string().contains(&status.as_u16().to_string()));
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
