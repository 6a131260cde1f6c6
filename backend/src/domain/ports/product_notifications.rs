//! Driving port for notification batches.
use async_trait::async_trait;

use crate::domain::ChannelMessage;

/// Per-batch outcome tallies.
///
/// Every delivered message lands in exactly one of `sent`, `skipped` or
/// `failed`, unless the batch was abandoned for missing configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Emails handed to the transport successfully.
    pub sent: usize,
    /// Messages whose `eventType` was not `ProductCreated`.
    pub skipped: usize,
    /// Messages with an unreadable body or a failed send.
    pub failed: usize,
    /// The batch was not processed because sender or recipient was unset.
    pub configuration_missing: bool,
}

impl BatchReport {
    /// Report for a batch abandoned before any message was examined.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            configuration_missing: true,
            ..Self::default()
        }
    }
}

/// Consume a batch of channel messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductNotifications: Send + Sync {
    /// Process every message in the batch independently.
    ///
    /// Never fails: per-message problems are logged and counted.
    async fn handle_batch(&self, batch: Vec<ChannelMessage>) -> BatchReport;
}

/// Fixture handler that marks every message as skipped.
#[derive(Debug, Default)]
pub struct FixtureProductNotifications;

#[async_trait]
impl ProductNotifications for FixtureProductNotifications {
    async fn handle_batch(&self, batch: Vec<ChannelMessage>) -> BatchReport {
        BatchReport {
            skipped: batch.len(),
            ..BatchReport::default()
        }
    }
}
