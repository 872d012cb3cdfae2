//! Definitions for the ROS2 `tf2_msgs` package.
//!
//! Based on <https://github.com/ros2/geometry2/tree/rolling/tf2_msgs>

use serde::{Deserialize, Serialize};

use crate::geometry_msgs::TransformStamped;

/// Clean ROS2 type name, as used in rmw_zenoh key expressions.
pub const TF_MESSAGE_TYPE_NAME: &str = "tf2_msgs::msg::TFMessage";

/// RIHS01 type hash announced in the liveliness token for `TFMessage`.
pub const TF_MESSAGE_TYPE_HASH: &str =
    "RIHS01_a6c29f5b0d7e9bd528ec7a65cf73a4d2b016e1d1708d8be97fba2f7b9a5c310f";

/// A batch of coordinate-frame transforms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TFMessage {
    pub transforms: Vec<TransformStamped>,
}
