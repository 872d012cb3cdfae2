//! Decodes Cap'n Proto payloads from the bus and translates them for their
//! downstream consumers.
//!
//! This crate is the core translation layer between the sensor-rig topics
//! and the two sinks: camera frames go to a Rerun recording stream, odometry
//! is republished into ROS2 (via the rmw_zenoh wire format) together with
//! its transform broadcasts. It provides a [`TopicHandler`] trait for
//! per-schema conversion and a [`Bridge`] orchestrator.

mod bridge;
mod convert;
mod frames;
mod handler;
pub mod handlers;
mod ros2_publisher;

pub use bridge::Bridge;
pub use convert::yuv420_to_rgb;
pub use frames::{is_ned_topic, FrameNames};
pub use handler::TopicHandler;
pub use ros2_publisher::Ros2Publisher;
