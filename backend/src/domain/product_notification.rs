//! Email composed for each `ProductCreated` event.

use serde::Serialize;

use super::product_events::ProductCreatedEvent;

/// Fully addressed email ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEmail {
    pub source: String,
    pub destination: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Subject and body announcing a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductNotification {
    subject: String,
    html_body: String,
}

impl ProductNotification {
    /// Render the notification for an event.
    ///
    /// The subject interpolates the name verbatim; the HTML body escapes every
    /// interpolated value.
    ///
    /// # Examples
    /// ```
    /// use catalogue::domain::{ProductCreatedEvent, ProductNotification};
    ///
    /// let event: ProductCreatedEvent = serde_json::from_str(
    ///     r#"{"productId":"00000000-0000-0000-0000-000000000000","name":"Lamp","price":10}"#,
    /// )
    /// .expect("event");
    /// let notification = ProductNotification::for_event(&event);
    /// assert_eq!(notification.subject(), "New Product Added: Lamp");
    /// ```
    #[must_use]
    pub fn for_event(event: &ProductCreatedEvent) -> Self {
        let product_id = escape_html(&event.product_id);
        let name = escape_html(&event.name);
        let price = escape_html(&event.price.to_string());
        let html_body = format!(
            "<p>A new product has been added to the catalogue:</p>\n\
             <ul>\n\
             <li><strong>ID:</strong> {product_id}</li>\n\
             <li><strong>Name:</strong> {name}</li>\n\
             <li><strong>Price:</strong> {price}</li>\n\
             </ul>\n\
             <p>This is an automatic email.</p>\n"
        );
        Self {
            subject: format!("New Product Added: {}", event.name),
            html_body,
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn html_body(&self) -> &str {
        &self.html_body
    }

    /// Address the notification.
    #[must_use]
    pub fn addressed(self, source: impl Into<String>, recipient: impl Into<String>) -> OutboundEmail {
        OutboundEmail {
            source: source.into(),
            destination: vec![recipient.into()],
            subject: self.subject,
            html_body: self.html_body,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
