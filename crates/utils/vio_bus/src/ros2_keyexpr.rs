//! Construction of ROS2 key-expressions as used by `rmw_zenoh`.
//!
//! `rmw_zenoh` announces every endpoint with a liveliness token of the form:
//! ```text
//! @ros2_lv/<domain_id>/<zid>/<nid>/<id>/<entity_kind>/<enclave>/<namespace>/<node_name>/<topic_name>/<type_name>/<type_hash>/<qos>
//! ```
//!
//! Topic names are "mangled" by replacing `/` with `%`, and type names use
//! DDS-style naming (e.g., `nav_msgs::msg::dds_::Odometry_`).
//!
//! The data key-expression actual samples are published on is:
//! ```text
//! <domain_id>/<topic_name>/<type_name>/<type_hash>
//! ```
//!
//! This module builds both for the publishers this bridge declares.

/// The rmw_zenoh liveliness key prefix.
pub const LIVELINESS_PREFIX: &str = "@ros2_lv";

/// QoS string for a reliable, keep-last-10 publisher, as rmw_zenoh encodes it.
pub const QOS_DEFAULT: &str = "::,10:,:,:,,";

/// Replace `/` with `%`, the rmw_zenoh name mangling.
pub fn mangle_name(name: &str) -> String {
    name.replace('/', "%")
}

/// Convert a clean ROS2 type name to DDS style.
///
/// `nav_msgs::msg::Odometry` becomes `nav_msgs::msg::dds_::Odometry_`.
pub fn dds_type_name(type_name: &str) -> String {
    match type_name.rsplit_once("::") {
        Some((package, message)) => format!("{package}::dds_::{message}_"),
        None => type_name.to_owned(),
    }
}

/// A ROS2 publisher endpoint this bridge announces on the Zenoh network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ros2Endpoint {
    /// The ROS2 domain ID (typically 0).
    pub domain_id: u32,

    /// The ROS2 topic name with leading slash (e.g., `/S1/basalt/odom`).
    pub topic_name: String,

    /// The ROS2 message type in clean format (e.g., `nav_msgs::msg::Odometry`).
    pub type_name: String,

    /// The `RIHS01` type hash announced alongside the type.
    pub type_hash: String,
}

impl Ros2Endpoint {
    /// Create an endpoint description, normalizing the topic to have a
    /// single leading slash.
    pub fn new(domain_id: u32, topic_name: &str, type_name: &str, type_hash: &str) -> Self {
        Self {
            domain_id,
            topic_name: format!("/{}", topic_name.trim_start_matches('/')),
            type_name: type_name.to_owned(),
            type_hash: type_hash.to_owned(),
        }
    }

    /// The key-expression data samples are published on.
    pub fn data_key_expr(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.domain_id,
            self.topic_name.trim_start_matches('/'),
            dds_type_name(&self.type_name),
            self.type_hash
        )
    }

    /// The liveliness token announcing this publisher to the ROS2 graph.
    ///
    /// `zid` is the Zenoh session ID, `node_id`/`entity_id` are the
    /// per-session counters rmw_zenoh uses to disambiguate entities.
    pub fn liveliness_token(
        &self,
        zid: &str,
        node_id: u32,
        entity_id: u32,
        node_name: &str,
    ) -> String {
        format!(
            "{LIVELINESS_PREFIX}/{}/{zid}/{node_id}/{entity_id}/MP/%/%/{node_name}/{}/{}/{}/{QOS_DEFAULT}",
            self.domain_id,
            mangle_name(&self.topic_name),
            dds_type_name(&self.type_name),
            self.type_hash,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Mangling tests ---

    #[test]
    fn test_mangle_name() {
        assert_eq!(mangle_name("/chatter"), "%chatter");
        assert_eq!(
            mangle_name("/camera/color/image_raw"),
            "%camera%color%image_raw"
        );
        assert_eq!(mangle_name("/"), "%");
        assert_eq!(mangle_name("no_slashes"), "no_slashes");
    }

    // --- DDS type naming tests ---

    #[test]
    fn test_dds_type_name() {
        assert_eq!(
            dds_type_name("nav_msgs::msg::Odometry"),
            "nav_msgs::msg::dds_::Odometry_"
        );
        assert_eq!(
            dds_type_name("tf2_msgs::msg::TFMessage"),
            "tf2_msgs::msg::dds_::TFMessage_"
        );
        assert_eq!(
            dds_type_name("std_msgs::msg::String"),
            "std_msgs::msg::dds_::String_"
        );
    }

    // --- Endpoint tests ---

    #[test]
    fn test_data_key_expr() {
        let ep = Ros2Endpoint::new(0, "/basalt/odom", "nav_msgs::msg::Odometry", "RIHS01_abc123");
        assert_eq!(
            ep.data_key_expr(),
            "0/basalt/odom/nav_msgs::msg::dds_::Odometry_/RIHS01_abc123"
        );
    }

    #[test]
    fn test_topic_normalization() {
        let with_slash = Ros2Endpoint::new(0, "/tf", "tf2_msgs::msg::TFMessage", "RIHS01_x");
        let without_slash = Ros2Endpoint::new(0, "tf", "tf2_msgs::msg::TFMessage", "RIHS01_x");
        assert_eq!(with_slash, without_slash);
        assert_eq!(with_slash.topic_name, "/tf");
    }

    #[test]
    fn test_data_key_expr_domain() {
        let ep = Ros2Endpoint::new(42, "/tf", "tf2_msgs::msg::TFMessage", "RIHS01_x");
        assert_eq!(
            ep.data_key_expr(),
            "42/tf/tf2_msgs::msg::dds_::TFMessage_/RIHS01_x"
        );
    }

    #[test]
    fn test_liveliness_token_layout() {
        let ep = Ros2Endpoint::new(
            0,
            "/S1/basalt/odom",
            "nav_msgs::msg::Odometry",
            "RIHS01_abc123",
        );
        let token = ep.liveliness_token("b89f34a8f6a786788926e9c41d11be8e", 1, 5, "vio_bridge");

        let parts: Vec<&str> = token.split('/').collect();
        assert_eq!(parts.len(), 13);
        assert_eq!(parts[0], LIVELINESS_PREFIX);
        assert_eq!(parts[1], "0");
        assert_eq!(parts[2], "b89f34a8f6a786788926e9c41d11be8e");
        assert_eq!(parts[5], "MP");
        assert_eq!(parts[8], "vio_bridge");
        assert_eq!(parts[9], "%S1%basalt%odom");
        assert_eq!(parts[10], "nav_msgs::msg::dds_::Odometry_");
        assert_eq!(parts[11], "RIHS01_abc123");
        assert_eq!(parts[12], QOS_DEFAULT);
    }
}
