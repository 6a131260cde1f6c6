//! In-process publish/subscribe channel.
//!
//! Each topic is a bounded `tokio::sync::mpsc` queue with a single
//! subscriber. Publishing waits while the queue is full. A topic exists only
//! while it has a live [`Subscription`]; publishing to any other topic fails
//! with [`EventPublishError::Unavailable`].

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{EventPublishError, MessageSource, ProductEventPublisher};
use crate::domain::{ChannelLocation, ChannelMessage, MessageId, OutboundMessage};

/// Topic registry shared by publishers and subscribers.
#[derive(Debug)]
pub struct InProcessChannel {
    topics: Mutex<HashMap<String, mpsc::Sender<ChannelMessage>>>,
    capacity: usize,
}

impl InProcessChannel {
    /// Create a registry whose topics buffer up to `capacity` messages.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Attach a subscriber to `topic`, replacing any previous one.
    ///
    /// Messages still queued for a replaced subscriber stay with it.
    pub fn subscribe(&self, topic: &ChannelLocation) -> Result<Subscription, EventPublishError> {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let mut topics = self
            .topics
            .lock()
            .map_err(|_| EventPublishError::unavailable("topic registry lock poisoned"))?;
        if topics.insert(topic.as_ref().to_owned(), sender).is_some() {
            warn!(topic = topic.as_ref(), "replacing existing subscription");
        }
        Ok(Subscription {
            topic: topic.clone(),
            receiver,
        })
    }

    /// Detach `topic`; the subscriber drains what is queued and then ends.
    pub fn close(&self, topic: &ChannelLocation) -> bool {
        self.topics
            .lock()
            .map(|mut topics| topics.remove(topic.as_ref()).is_some())
            .unwrap_or(false)
    }

    fn sender_for(
        &self,
        topic: &ChannelLocation,
    ) -> Result<mpsc::Sender<ChannelMessage>, EventPublishError> {
        let topics = self
            .topics
            .lock()
            .map_err(|_| EventPublishError::unavailable("topic registry lock poisoned"))?;
        topics.get(topic.as_ref()).cloned().ok_or_else(|| {
            EventPublishError::unavailable(format!("no subscriber for topic {}", topic.as_ref()))
        })
    }
}

#[async_trait]
impl ProductEventPublisher for InProcessChannel {
    async fn publish(
        &self,
        channel: &ChannelLocation,
        message: &OutboundMessage,
    ) -> Result<MessageId, EventPublishError> {
        let sender = self.sender_for(channel)?;
        let message_id = MessageId::new(Uuid::new_v4().to_string());
        sender
            .send(ChannelMessage::delivered(message_id.clone(), message.clone()))
            .await
            .map_err(|_| {
                EventPublishError::unavailable(format!("topic {} is closed", channel.as_ref()))
            })?;
        debug!(topic = channel.as_ref(), message_id = %message_id, "message enqueued");
        Ok(message_id)
    }
}

/// Receiving end of one topic.
#[derive(Debug)]
pub struct Subscription {
    topic: ChannelLocation,
    receiver: mpsc::Receiver<ChannelMessage>,
}

impl Subscription {
    pub fn topic(&self) -> &ChannelLocation {
        &self.topic
    }
}

#[async_trait]
impl MessageSource for Subscription {
    async fn next_batch(&mut self, max: usize) -> Option<Vec<ChannelMessage>> {
        let first = self.receiver.recv().await?;
        let mut batch = Vec::with_capacity(max.max(1));
        batch.push(first);
        while batch.len() < max {
            match self.receiver.try_recv() {
                Ok(message) => batch.push(message),
                Err(_) => break,
            }
        }
        Some(batch)
    }
}
