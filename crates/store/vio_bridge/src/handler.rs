//! Topic handler trait for per-schema message translation.

/// Translates a single raw payload from a subscribed topic.
///
/// One handler instance owns one topic's sink state (recording stream or
/// ROS2 publishers) and processes messages one at a time, in arrival order.
pub trait TopicHandler: Send {
    /// Process a single Cap'n Proto payload received on the handler's topic.
    ///
    /// An error is fatal for this message only; the caller logs it and
    /// continues with the next one.
    fn handle_message(&mut self, payload: &[u8], receive_time_ns: i64) -> anyhow::Result<()>;

    /// Name of the schema this handler decodes.
    fn schema_name(&self) -> &'static str;
}
