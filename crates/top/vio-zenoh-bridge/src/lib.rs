//! Bridges Cap'n Proto sensor topics from a Zenoh bus into the Rerun
//! viewer and ROS2.
//!
//! This crate provides the `vio-zenoh-bridge` binary with two subcommands:
//! `view-image` streams camera topics to a live viewer, `bridge-odometry`
//! republishes odometry into ROS2 (rmw_zenoh wire format) with transform
//! broadcasting.

pub mod app;
pub mod cli;
