//! Port for publishing product events onto a channel.
use async_trait::async_trait;

use crate::domain::{ChannelLocation, MessageId, OutboundMessage};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by event publisher adapters.
    pub enum EventPublishError {
        /// The channel does not exist or is not accepting messages.
        Unavailable { message: String } => "event channel is unavailable: {message}",
        /// The channel refused the message.
        Rejected { message: String } => "event was rejected: {message}",
    }
}

/// Publish/subscribe sink for domain events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductEventPublisher: Send + Sync {
    /// Publish a message and return the id the channel assigned to it.
    async fn publish(
        &self,
        channel: &ChannelLocation,
        message: &OutboundMessage,
    ) -> Result<MessageId, EventPublishError>;
}

/// Fixture publisher that acknowledges every message with a fixed id.
#[derive(Debug, Default)]
pub struct FixtureProductEventPublisher;

#[async_trait]
impl ProductEventPublisher for FixtureProductEventPublisher {
    async fn publish(
        &self,
        _channel: &ChannelLocation,
        _message: &OutboundMessage,
    ) -> Result<MessageId, EventPublishError> {
        Ok(MessageId::new("fixture-message"))
    }
}
