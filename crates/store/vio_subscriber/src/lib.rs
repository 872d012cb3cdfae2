//! Per-topic Zenoh subscription management and payload forwarding.
//!
//! This crate manages Zenoh subscribers for the raw sensor-rig topics and
//! forwards received Cap'n Proto payloads as [`BusMessage`]s.

mod message;
mod subscriber;

pub use message::BusMessage;
pub use subscriber::SubscriptionManager;
