//! Notification handling for `ProductCreated` events.
//!
//! Each batch is a fold over its messages: a message is skipped, sent or
//! counted as failed, and no outcome affects its neighbours. The handler
//! never returns an error, so the delivering channel never redelivers a batch
//! because of a single bad message.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Env;
use tracing::{error, info};

use super::ports::{BatchReport, EmailTransport, ProductNotifications};
use super::{ChannelMessage, EventType, NotifierSettings, ProductNotification, TraceId};

/// Domain service implementing [`ProductNotifications`].
pub struct ProductNotifierService<T, E> {
    transport: Arc<T>,
    env: Arc<E>,
}

impl<T, E> ProductNotifierService<T, E> {
    /// Create a new notifier.
    pub fn new(transport: Arc<T>, env: Arc<E>) -> Self {
        Self { transport, env }
    }
}

enum Outcome {
    Sent,
    Skipped,
    Failed,
}

impl<T, E> ProductNotifierService<T, E>
where
    T: EmailTransport,
{
    async fn handle_message(&self, settings: &NotifierSettings, message: &ChannelMessage) -> Outcome {
        match message.attributes.event_type() {
            Some(EventType::ProductCreated) => {}
            other => {
                info!(
                    message_id = %message.message_id,
                    event_type = other.as_ref().map(EventType::as_str),
                    "skipping message that is not ProductCreated"
                );
                return Outcome::Skipped;
            }
        }

        let event = match message.decode_product_created() {
            Ok(event) => event,
            Err(err) => {
                error!(
                    message_id = %message.message_id,
                    error = %err,
                    "failed to parse ProductCreated body"
                );
                return Outcome::Failed;
            }
        };

        let email = ProductNotification::for_event(&event)
            .addressed(settings.sender.as_str(), settings.recipient.as_str());
        match self.transport.send(&email).await {
            Ok(receipt) => {
                info!(
                    product_id = %event.product_id,
                    receipt = %receipt,
                    "notification email sent"
                );
                Outcome::Sent
            }
            Err(err) => {
                error!(
                    product_id = %event.product_id,
                    error = %err,
                    "failed to send notification email"
                );
                Outcome::Failed
            }
        }
    }
}

#[async_trait]
impl<T, E> ProductNotifications for ProductNotifierService<T, E>
where
    T: EmailTransport,
    E: Env + Send + Sync,
{
    async fn handle_batch(&self, batch: Vec<ChannelMessage>) -> BatchReport {
        let settings = match NotifierSettings::from_env(&*self.env) {
            Ok(settings) => settings,
            Err(err) => {
                error!(
                    error = %err,
                    batch_size = batch.len(),
                    "configuration error: missing sender or recipient email address"
                );
                return BatchReport::unconfigured();
            }
        };

        let mut report = BatchReport::default();
        for message in &batch {
            let outcome = match message.attributes.trace_id() {
                Some(trace_id) => {
                    TraceId::scope(trace_id, self.handle_message(&settings, message)).await
                }
                None => self.handle_message(&settings, message).await,
            };
            match outcome {
                Outcome::Sent => report.sent += 1,
                Outcome::Skipped => report.skipped += 1,
                Outcome::Failed => report.failed += 1,
            }
        }
        report
    }
}
