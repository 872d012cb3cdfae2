//! Definitions for the ROS2 `builtin_interfaces` package.
//!
//! Based on <https://github.com/ros2/rcl_interfaces/tree/rolling/builtin_interfaces>

use serde::{Deserialize, Serialize};

/// A point in time, split into seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Time {
    /// Seconds since the Unix epoch.
    pub sec: i32,

    /// Nanoseconds within the second, in `[0, 1e9)`.
    pub nanosec: u32,
}

impl Time {
    /// Build a `Time` from nanoseconds since the Unix epoch.
    pub fn from_nanos(nanos: u64) -> Self {
        Self {
            sec: (nanos / 1_000_000_000) as i32,
            nanosec: (nanos % 1_000_000_000) as u32,
        }
    }
}
