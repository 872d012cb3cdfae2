//! Definitions for the ROS2 `geometry_msgs` package.
//!
//! Based on <https://github.com/ros2/common_interfaces/tree/rolling/geometry_msgs>

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::std_msgs::Header;

/// A vector in free space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A point in free space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// An orientation in free space in quaternion form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

/// A pose in free space, composed of position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

/// A 6x6 row-major covariance matrix over (x, y, z, rotation about X, Y, Z).
///
/// On the wire this is a fixed-length array, so it must serialize without a
/// length prefix; serde only derives array impls up to 32 elements, hence
/// the tuple-based implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Covariance(pub [f64; 36]);

impl Default for Covariance {
    fn default() -> Self {
        Self([0.0; 36])
    }
}

impl Serialize for Covariance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(36)?;
        for value in &self.0 {
            tup.serialize_element(value)?;
        }
        tup.end()
    }
}

impl<'de> Deserialize<'de> for Covariance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CovarianceVisitor;

        impl<'de> Visitor<'de> for CovarianceVisitor {
            type Value = Covariance;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an array of 36 f64 values")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = [0.0; 36];
                for (i, slot) in values.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Covariance(values))
            }
        }

        deserializer.deserialize_tuple(36, CovarianceVisitor)
    }
}

/// A pose with uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseWithCovariance {
    pub pose: Pose,
    pub covariance: Covariance,
}

/// Velocity in free space, split into linear and angular parts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

/// A twist with uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TwistWithCovariance {
    pub twist: Twist,
    pub covariance: Covariance,
}

/// The transform between two coordinate frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Quaternion,
}

/// A transform from the header frame to the child frame, at the header time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformStamped {
    pub header: Header,

    /// The frame this transform points to.
    pub child_frame_id: String,

    pub transform: Transform,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{decode, encode};

    #[test]
    fn test_quaternion_default_is_identity() {
        let q = Quaternion::default();
        assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_covariance_no_length_prefix() {
        let mut cov = Covariance::default();
        cov.0[0] = 1.0;

        let bytes = encode(&cov).expect("encode");
        // 4-byte encapsulation header followed by exactly 36 doubles
        assert_eq!(bytes.len(), 4 + 36 * 8);
        // first element immediately after the header, little-endian 1.0
        assert_eq!(&bytes[4..12], &[0, 0, 0, 0, 0, 0, 0xf0, 0x3f]);
    }

    #[test]
    fn test_covariance_roundtrip() {
        let mut cov = Covariance::default();
        cov.0[0] = 0.01;
        cov.0[35] = 0.5;

        let bytes = encode(&cov).expect("encode");
        let back: Covariance = decode(&bytes).expect("decode");
        assert_eq!(back, cov);
    }
}
