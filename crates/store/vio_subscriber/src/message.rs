//! Message type representing data received from a bus subscription.

/// A message received from a subscribed topic.
#[derive(Debug, Clone)]
pub struct BusMessage {
    /// The topic name (e.g., `S1/vio_odom` or `raw_fisheye_image`).
    pub topic_name: String,

    /// The raw Cap'n Proto payload bytes.
    pub payload: Vec<u8>,

    /// Wall-clock receive time in nanoseconds since Unix epoch.
    pub receive_time_ns: u64,
}
