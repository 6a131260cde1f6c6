//! Port for pulling message batches off a channel subscription.
use async_trait::async_trait;

use crate::domain::ChannelMessage;

/// Source of message batches for a single subscription.
#[async_trait]
pub trait MessageSource: Send {
    /// Wait for at least one message and return up to `max` of them.
    ///
    /// Returns `None` once the channel is closed and drained.
    async fn next_batch(&mut self, max: usize) -> Option<Vec<ChannelMessage>>;
}
