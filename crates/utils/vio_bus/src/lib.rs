//! Zenoh session management and ROS2 interop plumbing.
//!
//! This crate provides the shared [`ZenohSession`] wrapper and the
//! construction of key-expressions, liveliness tokens, and per-sample
//! attachments in the format expected by `rmw_zenoh`, so that messages
//! published here are consumed by a stock ROS2 graph.

mod attachment;
mod ros2_keyexpr;
mod session;

pub use attachment::rmw_attachment;
pub use ros2_keyexpr::{dds_type_name, mangle_name, Ros2Endpoint, LIVELINESS_PREFIX, QOS_DEFAULT};
pub use session::ZenohSession;
