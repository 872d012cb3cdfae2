//! Main bridge orchestrator that routes bus messages to the appropriate handlers.

use std::collections::HashMap;

use vio_subscriber::BusMessage;

use crate::handler::TopicHandler;

/// Routes incoming bus messages to the handler registered for their topic.
#[derive(Default)]
pub struct Bridge {
    handlers: HashMap<String, Box<dyn TopicHandler>>,
}

impl Bridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a topic. Replaces any previous handler.
    pub fn add_topic(&mut self, topic_name: &str, handler: Box<dyn TopicHandler>) {
        tracing::info!(
            "Bridge: added {} handler for {topic_name}",
            handler.schema_name()
        );
        if self
            .handlers
            .insert(topic_name.to_owned(), handler)
            .is_some()
        {
            tracing::warn!("Topic {topic_name} was already registered in bridge");
        }
    }

    /// Remove a topic from the bridge.
    pub fn remove_topic(&mut self, topic_name: &str) {
        if self.handlers.remove(topic_name).is_some() {
            tracing::info!("Bridge: removed handler for {topic_name}");
        }
    }

    /// Process a single incoming message.
    ///
    /// Errors from the handler are returned to the caller, which decides
    /// whether to log and continue; a message on a topic without a handler
    /// is silently skipped.
    pub fn process_message(&mut self, msg: &BusMessage) -> anyhow::Result<()> {
        let receive_time_ns = i64::try_from(msg.receive_time_ns).unwrap_or(i64::MAX);

        if let Some(handler) = self.handlers.get_mut(&msg.topic_name) {
            handler.handle_message(&msg.payload, receive_time_ns)?;
        } else {
            tracing::debug!("No handler for topic {}", msg.topic_name);
        }

        Ok(())
    }

    /// The topics this bridge has handlers for.
    pub fn topics(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }
}
