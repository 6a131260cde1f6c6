//! Channel subscriber driving the notification handler.
//!
//! The loop pulls batches from a [`MessageSource`] and hands each one to
//! [`ProductNotifications`]. Batches are processed one at a time in delivery
//! order. The loop ends when the source reports that the channel closed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{MessageSource, ProductNotifications};

/// Totals accumulated over the lifetime of a subscriber loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriberSummary {
    pub batches: usize,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
    pub unconfigured_batches: usize,
}

/// Drain `source` into `handler` until the channel closes.
///
/// A `batch_size` of zero is treated as one.
pub async fn run_subscriber<S>(
    mut source: S,
    handler: Arc<dyn ProductNotifications>,
    batch_size: usize,
) -> SubscriberSummary
where
    S: MessageSource,
{
    let max = batch_size.max(1);
    let mut summary = SubscriberSummary::default();
    info!(batch_size = max, "notification subscriber started");

    while let Some(batch) = source.next_batch(max).await {
        let size = batch.len();
        let report = handler.handle_batch(batch).await;
        summary.batches += 1;
        summary.sent += report.sent;
        summary.skipped += report.skipped;
        summary.failed += report.failed;
        if report.configuration_missing {
            summary.unconfigured_batches += 1;
            warn!(batch_size = size, "notification batch dropped: configuration missing");
        } else {
            debug!(
                batch_size = size,
                sent = report.sent,
                skipped = report.skipped,
                failed = report.failed,
                "notification batch processed"
            );
        }
    }

    info!(
        batches = summary.batches,
        sent = summary.sent,
        failed = summary.failed,
        "notification subscriber stopped: channel closed"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{BatchReport, MockProductNotifications};
    use crate::domain::{ChannelMessage, MessageAttributes, MessageId};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::collections::VecDeque;

    struct ScriptedSource {
        pending: VecDeque<ChannelMessage>,
        requested: Vec<usize>,
    }

    impl ScriptedSource {
        fn with_messages(count: usize) -> Self {
            let pending = (0..count)
                .map(|index| ChannelMessage {
                    message_id: MessageId::new(format!("m-{index}")),
                    attributes: MessageAttributes::new(),
                    body: String::new(),
                })
                .collect();
            Self {
                pending,
                requested: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl MessageSource for ScriptedSource {
        async fn next_batch(&mut self, max: usize) -> Option<Vec<ChannelMessage>> {
            self.requested.push(max);
            if self.pending.is_empty() {
                return None;
            }
            let take = max.min(self.pending.len());
            Some(self.pending.drain(..take).collect())
        }
    }

    #[rstest]
    #[tokio::test]
    async fn batches_are_chunked_and_tallied() {
        let mut handler = MockProductNotifications::new();
        handler
            .expect_handle_batch()
            .times(3)
            .returning(|batch| BatchReport {
                sent: batch.len(),
                ..BatchReport::default()
            });

        let summary =
            run_subscriber(ScriptedSource::with_messages(5), Arc::new(handler), 2).await;

        assert_eq!(summary.batches, 3);
        assert_eq!(summary.sent, 5);
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_batches_are_counted() {
        let mut handler = MockProductNotifications::new();
        handler
            .expect_handle_batch()
            .returning(|_| BatchReport::unconfigured());

        let summary =
            run_subscriber(ScriptedSource::with_messages(2), Arc::new(handler), 10).await;

        assert_eq!(summary.unconfigured_batches, 1);
        assert_eq!(summary.sent, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn zero_batch_size_still_makes_progress() {
        let mut handler = MockProductNotifications::new();
        handler
            .expect_handle_batch()
            .times(2)
            .withf(|batch| batch.len() == 1)
            .returning(|_| BatchReport::default());

        let summary =
            run_subscriber(ScriptedSource::with_messages(2), Arc::new(handler), 0).await;
        assert_eq!(summary.batches, 2);
    }
}
