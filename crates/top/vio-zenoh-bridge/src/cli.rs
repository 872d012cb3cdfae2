//! Command-line interface for the bridge.

use clap::{Args, Parser, Subcommand};

/// Bridges Cap'n Proto sensor topics from a Zenoh bus into the Rerun
/// viewer and ROS2.
#[derive(Parser, Debug)]
#[command(name = "vio-zenoh-bridge", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub zenoh: ZenohArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection options shared by all subcommands.
#[derive(Args, Debug)]
pub struct ZenohArgs {
    /// Path to a Zenoh configuration file (JSON5 format).
    #[arg(long)]
    pub zenoh_config: Option<String>,

    /// Zenoh router endpoint to connect to (e.g., `tcp/192.168.1.100:7447`).
    #[arg(long)]
    pub zenoh_connect: Option<String>,

    /// Zenoh listener endpoint for peer mode (e.g., `tcp/0.0.0.0:7447`).
    #[arg(long)]
    pub zenoh_listen: Option<String>,

    /// Zenoh session mode: `peer` or `client`.
    #[arg(long, default_value = "peer")]
    pub zenoh_mode: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Subscribe to camera topics and stream the frames to the Rerun viewer.
    ViewImage(ViewImageArgs),

    /// Republish odometry into ROS2 with transform broadcasting.
    BridgeOdometry(BridgeOdometryArgs),
}

#[derive(Args, Debug)]
pub struct ViewImageArgs {
    /// Camera topics to subscribe to (can be repeated).
    #[arg(long, short = 't', default_value = "raw_fisheye_image")]
    pub topic: Vec<String>,

    /// Entity path prefix for all data in the viewer.
    #[arg(long, default_value = "vio")]
    pub entity_prefix: String,

    /// Save to a Rerun .rrd recording file instead of spawning the viewer.
    #[arg(long)]
    pub recording: Option<String>,
}

#[derive(Args, Debug)]
pub struct BridgeOdometryArgs {
    /// Odometry topic to subscribe to on the bus.
    #[arg(default_value = "S1/vio_odom")]
    pub topic_in: String,

    /// ROS topic to publish on, prefixed by the tf prefix. A name ending in
    /// `_ned` selects the NED frame pair.
    #[arg(default_value = "/basalt/odom")]
    pub ros_topic_out: String,

    /// TF prefix for all broadcast frames.
    #[arg(long, default_value = "S1")]
    pub ros_tf_prefix: String,

    /// Do not broadcast the dynamic odometry transform.
    #[arg(long)]
    pub no_tf_publisher: bool,

    /// ROS2 domain ID.
    #[arg(long, default_value = "0")]
    pub domain_id: u32,

    /// Node name announced to the ROS2 graph.
    #[arg(long, default_value = "vio_zenoh_bridge")]
    pub node_name: String,
}
