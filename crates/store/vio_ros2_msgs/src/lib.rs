//! ROS2 message definitions for the bridge's outbound topics.
//!
//! This crate provides `serde`-compatible Rust types for the subset of ROS2
//! message definitions the bridge publishes, plus CDR encoding in the wire
//! format DDS and `rmw_zenoh` expect. Definitions follow the upstream
//! interfaces at <https://github.com/ros2/common_interfaces>.

pub mod builtin_interfaces;
pub mod encode;
pub mod geometry_msgs;
pub mod nav_msgs;
pub mod std_msgs;
pub mod tf2_msgs;

pub use encode::{decode, encode};
