//! Odometry handler: Cap'n Proto `Odometry3d` → ROS2 `Odometry` + TF.
//!
//! The incoming pose is NED world / FRD body; the odometry republished on
//! the ROS topic negates x and y of the position (NED → NWU sign
//! convention) while the quaternion is copied verbatim. The dynamic
//! transform carries the unmodified position. Three static transforms pin
//! the convention frames together and are re-stamped with every message.

use vio_bus::{Ros2Endpoint, ZenohSession};
use vio_msgs::{decode_odometry, OdometrySample};
use vio_ros2_msgs::geometry_msgs::{
    Quaternion, Transform, TransformStamped, Twist, TwistWithCovariance, Vector3,
};
use vio_ros2_msgs::nav_msgs::{self, Odometry};
use vio_ros2_msgs::std_msgs::Header;
use vio_ros2_msgs::tf2_msgs::{self, TFMessage};

use crate::frames::{is_ned_topic, FrameNames};
use crate::handler::TopicHandler;
use crate::ros2_publisher::Ros2Publisher;

/// Republishes odometry samples into ROS2 with transform broadcasts.
pub struct OdometryHandler {
    odom_pub: Ros2Publisher,
    tf_pub: Ros2Publisher,
    tf_static_pub: Ros2Publisher,
    frames: FrameNames,
    ned: bool,
    publish_dynamic_tf: bool,
    first_message: bool,
}

impl OdometryHandler {
    /// Declare the three ROS2 publishers (odometry, `/tf`, `/tf_static`)
    /// and build the handler.
    pub async fn declare(
        session: &ZenohSession,
        domain_id: u32,
        ros_topic_out: &str,
        tf_prefix: &str,
        publish_dynamic_tf: bool,
        node_name: &str,
    ) -> anyhow::Result<Self> {
        let odom_endpoint = Ros2Endpoint::new(
            domain_id,
            ros_topic_out,
            nav_msgs::ODOMETRY_TYPE_NAME,
            nav_msgs::ODOMETRY_TYPE_HASH,
        );
        let tf_endpoint = Ros2Endpoint::new(
            domain_id,
            "/tf",
            tf2_msgs::TF_MESSAGE_TYPE_NAME,
            tf2_msgs::TF_MESSAGE_TYPE_HASH,
        );
        let tf_static_endpoint = Ros2Endpoint::new(
            domain_id,
            "/tf_static",
            tf2_msgs::TF_MESSAGE_TYPE_NAME,
            tf2_msgs::TF_MESSAGE_TYPE_HASH,
        );

        let odom_pub = Ros2Publisher::declare(session, &odom_endpoint, node_name, 10).await?;
        let tf_pub = Ros2Publisher::declare(session, &tf_endpoint, node_name, 11).await?;
        let tf_static_pub =
            Ros2Publisher::declare(session, &tf_static_endpoint, node_name, 12).await?;

        tracing::info!(
            "Odometry bridge publishing on {} (dynamic tf: {publish_dynamic_tf})",
            odom_pub.topic_name()
        );

        Ok(Self {
            odom_pub,
            tf_pub,
            tf_static_pub,
            frames: FrameNames::new(tf_prefix),
            ned: is_ned_topic(ros_topic_out),
            publish_dynamic_tf,
            first_message: true,
        })
    }
}

impl TopicHandler for OdometryHandler {
    fn handle_message(&mut self, payload: &[u8], receive_time_ns: i64) -> anyhow::Result<()> {
        let sample = decode_odometry(payload)?;

        if self.first_message {
            tracing::info!(
                body_frame = sample.body_frame.as_str(),
                reference_frame = sample.reference_frame.as_str(),
                velocity_frame = sample.velocity_frame.as_str(),
                "first odometry message"
            );
            self.first_message = false;
        }

        tracing::debug!(
            seq = sample.header.seq,
            latency_device_ms = sample.header.latency_device as f64 / 1e6,
            latency_host_ms = sample.header.latency_host as f64 / 1e6,
            "odometry sample"
        );

        // Stamp outgoing messages with the host receive time, as the
        // upstream device clock is not the ROS clock.
        let stamp_ns = receive_time_ns.max(0) as u64;

        let odom = odometry_to_ros(&sample, stamp_ns, &self.frames, self.ned);
        self.odom_pub.publish(&vio_ros2_msgs::encode(&odom)?)?;

        let statics = static_transforms(&self.frames, stamp_ns);
        self.tf_static_pub
            .publish(&vio_ros2_msgs::encode(&statics)?)?;

        if self.publish_dynamic_tf {
            let tf = TFMessage {
                transforms: vec![dynamic_transform(&sample, stamp_ns, &self.frames, self.ned)],
            };
            self.tf_pub.publish(&vio_ros2_msgs::encode(&tf)?)?;
        }

        Ok(())
    }

    fn schema_name(&self) -> &'static str {
        "Odometry3d"
    }
}

fn ros_quaternion(sample: &OdometrySample) -> Quaternion {
    Quaternion {
        x: sample.orientation.x,
        y: sample.orientation.y,
        z: sample.orientation.z,
        w: sample.orientation.w,
    }
}

/// Build the `nav_msgs/Odometry` message for a decoded sample.
fn odometry_to_ros(
    sample: &OdometrySample,
    stamp_ns: u64,
    frames: &FrameNames,
    ned: bool,
) -> Odometry {
    let (frame_id, child_frame_id) = frames.odometry_frames(ned);

    let mut odom = Odometry {
        header: Header::new(stamp_ns, frame_id),
        child_frame_id,
        ..Odometry::default()
    };

    odom.pose.pose.position.x = -sample.position.x;
    odom.pose.pose.position.y = -sample.position.y;
    odom.pose.pose.position.z = sample.position.z;
    odom.pose.pose.orientation = ros_quaternion(sample);

    odom.twist = TwistWithCovariance {
        twist: Twist {
            linear: Vector3 {
                x: sample.linear_velocity.x,
                y: sample.linear_velocity.y,
                z: sample.linear_velocity.z,
            },
            angular: Vector3 {
                x: sample.angular_velocity.x,
                y: sample.angular_velocity.y,
                z: sample.angular_velocity.z,
            },
        },
        ..TwistWithCovariance::default()
    };

    odom
}

/// Build the dynamic transform for a decoded sample. The translation is the
/// incoming position, unmodified.
fn dynamic_transform(
    sample: &OdometrySample,
    stamp_ns: u64,
    frames: &FrameNames,
    ned: bool,
) -> TransformStamped {
    let (frame_id, child_frame_id) = frames.odometry_frames(ned);

    TransformStamped {
        header: Header::new(stamp_ns, frame_id),
        child_frame_id,
        transform: Transform {
            translation: Vector3 {
                x: sample.position.x,
                y: sample.position.y,
                z: sample.position.z,
            },
            rotation: ros_quaternion(sample),
        },
    }
}

/// The static transforms pinning the convention frames together:
/// `odom → odom_ned` and `base_link → base_link_frd` are a 180° rotation
/// about X; `odom → odom_nwu` is the identity.
fn static_transforms(frames: &FrameNames, stamp_ns: u64) -> TFMessage {
    let x_180 = Quaternion {
        x: 1.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    TFMessage {
        transforms: vec![
            TransformStamped {
                header: Header::new(stamp_ns, frames.odom()),
                child_frame_id: frames.odom_ned(),
                transform: Transform {
                    translation: Vector3::default(),
                    rotation: x_180,
                },
            },
            TransformStamped {
                header: Header::new(stamp_ns, frames.base_link()),
                child_frame_id: frames.base_link_frd(),
                transform: Transform {
                    translation: Vector3::default(),
                    rotation: x_180,
                },
            },
            TransformStamped {
                header: Header::new(stamp_ns, frames.odom()),
                child_frame_id: frames.odom_nwu(),
                transform: Transform::default(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vio_msgs::{FrameConvention, Header as MsgHeader, Quat, Vec3};

    fn sample() -> OdometrySample {
        OdometrySample {
            header: MsgHeader {
                seq: 9,
                stamp: 1_000,
                ..MsgHeader::default()
            },
            body_frame: FrameConvention::Frd,
            reference_frame: FrameConvention::Ned,
            velocity_frame: FrameConvention::Frd,
            position: Vec3 {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            },
            orientation: Quat {
                w: 0.7,
                x: 0.1,
                y: -0.2,
                z: 0.3,
            },
            linear_velocity: Vec3 {
                x: 0.5,
                y: -0.5,
                z: 0.1,
            },
            angular_velocity: Vec3 {
                x: 0.0,
                y: 0.0,
                z: 0.2,
            },
        }
    }

    #[test]
    fn test_odometry_position_sign_flip() {
        let odom = odometry_to_ros(&sample(), 0, &FrameNames::new("S1"), false);
        let p = odom.pose.pose.position;
        assert_eq!((p.x, p.y, p.z), (-1.0, -2.0, 3.0));
    }

    #[test]
    fn test_odometry_orientation_copied_verbatim() {
        let odom = odometry_to_ros(&sample(), 0, &FrameNames::new("S1"), false);
        let q = odom.pose.pose.orientation;
        assert_eq!((q.w, q.x, q.y, q.z), (0.7, 0.1, -0.2, 0.3));
    }

    #[test]
    fn test_odometry_twist_passthrough() {
        let odom = odometry_to_ros(&sample(), 0, &FrameNames::new("S1"), false);
        assert_eq!(odom.twist.twist.linear.x, 0.5);
        assert_eq!(odom.twist.twist.linear.y, -0.5);
        assert_eq!(odom.twist.twist.angular.z, 0.2);
    }

    #[test]
    fn test_odometry_frames_by_convention() {
        let frames = FrameNames::new("S1");

        let nwu = odometry_to_ros(&sample(), 0, &frames, false);
        assert_eq!(nwu.header.frame_id, "S1/odom");
        assert_eq!(nwu.child_frame_id, "S1/base_link");

        let ned = odometry_to_ros(&sample(), 0, &frames, true);
        assert_eq!(ned.header.frame_id, "S1/odom_ned");
        assert_eq!(ned.child_frame_id, "S1/base_link_frd");
    }

    #[test]
    fn test_dynamic_transform_keeps_raw_position() {
        let tf = dynamic_transform(&sample(), 5_000, &FrameNames::new("S1"), false);
        let t = tf.transform.translation;
        assert_eq!((t.x, t.y, t.z), (1.0, 2.0, 3.0));
        assert_eq!(tf.transform.rotation.w, 0.7);
        assert_eq!(tf.header.stamp.nanosec, 5_000);
    }

    #[test]
    fn test_static_transforms() {
        let msg = static_transforms(&FrameNames::new("S1"), 0);
        assert_eq!(msg.transforms.len(), 3);

        let ned = &msg.transforms[0];
        assert_eq!(ned.header.frame_id, "S1/odom");
        assert_eq!(ned.child_frame_id, "S1/odom_ned");
        // 180 degrees about x
        let q = ned.transform.rotation;
        assert_eq!((q.x, q.y, q.z, q.w), (1.0, 0.0, 0.0, 0.0));

        let frd = &msg.transforms[1];
        assert_eq!(frd.header.frame_id, "S1/base_link");
        assert_eq!(frd.child_frame_id, "S1/base_link_frd");
        assert_eq!(frd.transform.rotation.x, 1.0);

        let nwu = &msg.transforms[2];
        assert_eq!(nwu.child_frame_id, "S1/odom_nwu");
        let q = nwu.transform.rotation;
        assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.0, 1.0));
    }
}
