//! Channel envelopes and the `ProductCreated` event.
//!
//! Messages travel as a text body plus a flat string attribute map. The
//! `eventType` attribute routes a message; consumers never inspect the body to
//! decide whether they care about it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::product::{Price, Product};
use super::TraceId;

/// Attribute key naming the event carried by a message.
pub const EVENT_TYPE_ATTRIBUTE: &str = "eventType";
/// Attribute key carrying the trace id of the originating request.
pub const TRACE_ID_ATTRIBUTE: &str = "traceId";

/// Kind of event announced in a message envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    ProductCreated,
    Other(String),
}

impl EventType {
    /// Wire value of the event type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ProductCreated => "ProductCreated",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Interpret an attribute value. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ProductCreated" => Self::ProductCreated,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String-valued message attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageAttributes(BTreeMap<String, String>);

impl MessageAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Event type announced by the envelope, if any.
    #[must_use]
    pub fn event_type(&self) -> Option<EventType> {
        self.get(EVENT_TYPE_ATTRIBUTE).map(EventType::parse)
    }

    /// Trace id propagated from the publisher, ignoring malformed values.
    #[must_use]
    pub fn trace_id(&self) -> Option<TraceId> {
        self.get(TRACE_ID_ATTRIBUTE)
            .and_then(|raw| raw.parse().ok())
    }
}

/// Broker-assigned message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message handed to a publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub attributes: MessageAttributes,
    pub body: String,
}

/// Message delivered to a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub message_id: MessageId,
    pub attributes: MessageAttributes,
    pub body: String,
}

impl ChannelMessage {
    /// Stamp an outbound message with the id assigned on publish.
    #[must_use]
    pub fn delivered(message_id: MessageId, message: OutboundMessage) -> Self {
        Self {
            message_id,
            attributes: message.attributes,
            body: message.body,
        }
    }

    /// Decode the body as a [`ProductCreatedEvent`].
    pub fn decode_product_created(&self) -> Result<ProductCreatedEvent, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Payload published after a product is stored.
///
/// Serialises to `{productId, name, price}`; `description` and `createdAt`
/// stay in the store. Consumers treat `productId` and `name` as opaque text,
/// so events from other producers decode as long as the fields are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatedEvent {
    pub product_id: String,
    pub name: String,
    pub price: Price,
}

impl ProductCreatedEvent {
    /// Project the event payload out of a stored record.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.product_id.to_string(),
            name: product.name.to_string(),
            price: product.price.clone(),
        }
    }

    /// Wrap the event in an envelope tagged `eventType = ProductCreated`.
    ///
    /// The trace id, when supplied, rides along as an attribute.
    pub fn to_message(&self, trace_id: Option<TraceId>) -> Result<OutboundMessage, serde_json::Error> {
        let body = serde_json::to_string(self)?;
        let mut attributes =
            MessageAttributes::new().with(EVENT_TYPE_ATTRIBUTE, EventType::ProductCreated.as_str());
        if let Some(trace_id) = trace_id {
            attributes = attributes.with(TRACE_ID_ATTRIBUTE, trace_id.to_string());
        }
        Ok(OutboundMessage { attributes, body })
    }
}
