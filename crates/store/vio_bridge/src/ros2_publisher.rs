//! A ROS2 publisher backed by a Zenoh publisher in the rmw_zenoh wire format.

use std::time::{SystemTime, UNIX_EPOCH};

use zenoh::Wait as _;

use vio_bus::{rmw_attachment, Ros2Endpoint, ZenohSession};

/// Publishes CDR payloads on a ROS2 topic.
///
/// Declaring the publisher also declares the rmw_zenoh liveliness token so
/// the ROS2 graph discovers the endpoint; every sample carries the rmw
/// attachment (sequence number, source timestamp, gid).
pub struct Ros2Publisher {
    publisher: zenoh::pubsub::Publisher<'static>,
    _token: zenoh::liveliness::LivelinessToken,
    topic_name: String,
    gid: [u8; 16],
    sequence: i64,
}

impl Ros2Publisher {
    /// Declare the publisher and announce it to the ROS2 graph.
    ///
    /// `entity_id` disambiguates endpoints declared by the same session and
    /// must be unique per publisher.
    pub async fn declare(
        session: &ZenohSession,
        endpoint: &Ros2Endpoint,
        node_name: &str,
        entity_id: u32,
    ) -> anyhow::Result<Self> {
        let key_expr = endpoint.data_key_expr();
        let publisher = session
            .session()
            .declare_publisher(key_expr.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to declare publisher for {key_expr}: {e}"))?;

        let token_key = endpoint.liveliness_token(&session.zid(), 0, entity_id, node_name);
        let token = session
            .session()
            .liveliness()
            .declare_token(token_key.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to declare liveliness token {token_key}: {e}"))?;

        tracing::info!(
            "Announced ROS2 publisher on {} ({})",
            endpoint.topic_name,
            endpoint.type_name
        );

        Ok(Self {
            publisher,
            _token: token,
            topic_name: endpoint.topic_name.clone(),
            gid: *uuid::Uuid::new_v4().as_bytes(),
            sequence: 1,
        })
    }

    /// Publish one CDR-encoded message.
    pub fn publish(&mut self, payload: &[u8]) -> anyhow::Result<()> {
        let source_timestamp_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as i64;
        let attachment = rmw_attachment(self.sequence, source_timestamp_ns, &self.gid);

        self.publisher
            .put(payload)
            .attachment(attachment.to_vec())
            .wait()
            .map_err(|e| anyhow::anyhow!("Failed to publish on {}: {e}", self.topic_name))?;

        self.sequence += 1;
        Ok(())
    }

    /// The ROS2 topic this publisher is announced on.
    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }
}
