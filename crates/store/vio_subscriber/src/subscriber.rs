//! Per-topic Zenoh subscriber management.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use zenoh::Wait as _;

use vio_bus::ZenohSession;

use crate::message::BusMessage;

/// Manages subscriptions to individual topics.
///
/// Each subscribed topic gets its own Zenoh subscriber. Received payloads
/// are forwarded through a bounded mpsc channel as [`BusMessage`]s; when the
/// channel is full the sample is dropped so a slow consumer never stalls the
/// bus threads.
pub struct SubscriptionManager {
    session: Arc<ZenohSession>,
    subscribers: HashMap<String, zenoh::pubsub::Subscriber<()>>,
    message_tx: mpsc::Sender<BusMessage>,
    message_rx: Option<mpsc::Receiver<BusMessage>>,
}

/// Channel capacity for incoming messages (overflow is dropped and counted).
const MESSAGE_CHANNEL_CAPACITY: usize = 4096;

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new(session: Arc<ZenohSession>) -> Self {
        let (tx, rx) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        Self {
            session,
            subscribers: HashMap::new(),
            message_tx: tx,
            message_rx: Some(rx),
        }
    }

    /// Take the message receiver. Can only be called once.
    pub fn take_message_receiver(&mut self) -> Option<mpsc::Receiver<BusMessage>> {
        self.message_rx.take()
    }

    /// Subscribe to a topic by name. The topic name is used verbatim as the
    /// key expression.
    pub fn subscribe(&mut self, topic_name: &str) -> anyhow::Result<()> {
        if self.subscribers.contains_key(topic_name) {
            tracing::warn!("Already subscribed to {topic_name}");
            return Ok(());
        }

        let topic = topic_name.to_owned();
        let tx = self.message_tx.clone();

        tracing::info!("Subscribing to {topic}");

        let subscriber = self
            .session
            .session()
            .declare_subscriber(topic_name)
            .callback(move |sample| {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_nanos() as u64;

                let msg = BusMessage {
                    topic_name: topic.clone(),
                    payload: sample.payload().to_bytes().to_vec(),
                    receive_time_ns: now,
                };

                if tx.try_send(msg).is_err() {
                    tracing::debug!("Message channel full or receiver dropped");
                }
            })
            .wait()
            .map_err(|e| anyhow::anyhow!("Failed to create subscriber for {topic_name}: {e}"))?;

        self.subscribers.insert(topic_name.to_owned(), subscriber);

        Ok(())
    }

    /// Unsubscribe from a topic.
    pub fn unsubscribe(&mut self, topic_name: &str) {
        if self.subscribers.remove(topic_name).is_some() {
            tracing::info!("Unsubscribed from {topic_name}");
            // Subscriber is dropped, which closes the subscription
        } else {
            tracing::warn!("Not subscribed to {topic_name}");
        }
    }

    /// Check if a topic is currently subscribed.
    pub fn is_subscribed(&self, topic_name: &str) -> bool {
        self.subscribers.contains_key(topic_name)
    }

    /// Get the list of currently subscribed topic names.
    pub fn subscribed_topics(&self) -> Vec<String> {
        self.subscribers.keys().cloned().collect()
    }

    /// Unsubscribe from all topics.
    pub fn unsubscribe_all(&mut self) {
        let topics: Vec<String> = self.subscribers.keys().cloned().collect();
        for topic in topics {
            self.unsubscribe(&topic);
        }
    }
}
