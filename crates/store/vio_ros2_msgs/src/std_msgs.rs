//! Definitions for the ROS2 `std_msgs` package.
//!
//! Based on <https://github.com/ros2/common_interfaces/tree/rolling/std_msgs>

use serde::{Deserialize, Serialize};

use crate::builtin_interfaces::Time;

/// Standard metadata for higher-level stamped data types.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    /// Time the data in the message was generated.
    pub stamp: Time,

    /// The frame this data is associated with.
    pub frame_id: String,
}

impl Header {
    /// Build a header from nanoseconds since the Unix epoch and a frame name.
    pub fn new(stamp_nanos: u64, frame_id: impl Into<String>) -> Self {
        Self {
            stamp: Time::from_nanos(stamp_nanos),
            frame_id: frame_id.into(),
        }
    }
}
