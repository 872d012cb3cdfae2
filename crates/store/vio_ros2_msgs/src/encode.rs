//! CDR encoding of outbound messages.

use cdr::{CdrLe, Infinite};

/// CDR-encode a ROS2 message, little-endian, with the 4-byte DDS
/// encapsulation header.
pub fn encode<T: serde::Serialize>(msg: &T) -> anyhow::Result<Vec<u8>> {
    cdr::serialize::<_, _, CdrLe>(msg, Infinite)
        .map_err(|e| anyhow::anyhow!("CDR encoding failed: {e}"))
}

/// Decode a CDR payload produced by [`encode`].
pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> anyhow::Result<T> {
    cdr::deserialize::<T>(bytes).map_err(|e| anyhow::anyhow!("CDR decoding failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin_interfaces::Time;
    use crate::geometry_msgs::{Transform, TransformStamped, Vector3};
    use crate::std_msgs::Header;
    use crate::tf2_msgs::TFMessage;

    #[test]
    fn test_time_wire_layout() {
        let t = Time {
            sec: 1,
            nanosec: 2,
        };
        let bytes = encode(&t).expect("encode");
        // encapsulation header: CDR little-endian, no options
        assert_eq!(&bytes[0..4], &[0x00, 0x01, 0x00, 0x00]);
        assert_eq!(&bytes[4..8], &[1, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[2, 0, 0, 0]);
        assert_eq!(bytes.len(), 12);
    }

    #[test]
    fn test_string_includes_nul() {
        let h = Header::new(0, "odom");
        let bytes = encode(&h).expect("encode");
        // header(4) + stamp(8) + string length(4) + "odom\0"(5)
        assert_eq!(bytes.len(), 21);
        // CDR strings are NUL-terminated, so the length counts it
        assert_eq!(&bytes[12..16], &[5, 0, 0, 0]);
        assert_eq!(&bytes[16..21], b"odom\0");
    }

    #[test]
    fn test_vector3_alignment() {
        let v = Vector3 {
            x: 1.0,
            y: 0.0,
            z: 0.0,
        };
        let bytes = encode(&v).expect("encode");
        // doubles start right after the encapsulation header
        assert_eq!(bytes.len(), 4 + 24);
        assert_eq!(&bytes[4..12], &[0, 0, 0, 0, 0, 0, 0xf0, 0x3f]);
    }

    #[test]
    fn test_tf_message_sequence_prefix() {
        let msg = TFMessage {
            transforms: vec![TransformStamped {
                header: Header::new(0, "odom"),
                child_frame_id: "base_link".to_owned(),
                transform: Transform::default(),
            }],
        };
        let bytes = encode(&msg).expect("encode");
        // the sequence length prefix comes first in the payload
        assert_eq!(&bytes[4..8], &[1, 0, 0, 0]);

        let back: TFMessage = decode(&bytes).expect("decode");
        assert_eq!(back, msg);
    }
}
