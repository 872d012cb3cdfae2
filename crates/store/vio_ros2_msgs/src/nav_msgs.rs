//! Definitions for the ROS2 `nav_msgs` package.
//!
//! Based on <https://github.com/ros2/common_interfaces/tree/rolling/nav_msgs>

use serde::{Deserialize, Serialize};

use crate::geometry_msgs::{PoseWithCovariance, TwistWithCovariance};
use crate::std_msgs::Header;

/// Clean ROS2 type name, as used in rmw_zenoh key expressions.
pub const ODOMETRY_TYPE_NAME: &str = "nav_msgs::msg::Odometry";

/// RIHS01 type hash announced in the liveliness token for `Odometry`.
pub const ODOMETRY_TYPE_HASH: &str =
    "RIHS01_8df7bc0b0b2eea4bbb0ab0d8a22cdfd4481c31ed2bc09c0e9fb5aa17a8d6b2bc";

/// An estimate of a position and velocity in free space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Odometry {
    pub header: Header,

    /// Frame id the pose points to.
    pub child_frame_id: String,

    /// Estimated pose, relative to the frame named in the header.
    pub pose: PoseWithCovariance,

    /// Estimated linear and angular velocity relative to `child_frame_id`.
    pub twist: TwistWithCovariance,
}
