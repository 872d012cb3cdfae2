//! Per-schema handlers that translate bus payloads for their sinks.

pub mod image;
pub mod odometry;
