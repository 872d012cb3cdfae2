//! Per-sample attachment in the rmw_zenoh wire format.

/// Byte length of an rmw_zenoh sample attachment.
pub const ATTACHMENT_LEN: usize = 32;

/// Build the attachment rmw_zenoh expects on every published sample:
/// little-endian sequence number, little-endian source timestamp in
/// nanoseconds, then the 16-byte publisher GID.
pub fn rmw_attachment(
    sequence_number: i64,
    source_timestamp_ns: i64,
    gid: &[u8; 16],
) -> [u8; ATTACHMENT_LEN] {
    let mut out = [0u8; ATTACHMENT_LEN];
    out[0..8].copy_from_slice(&sequence_number.to_le_bytes());
    out[8..16].copy_from_slice(&source_timestamp_ns.to_le_bytes());
    out[16..32].copy_from_slice(gid);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_layout() {
        let gid = [0xab; 16];
        let att = rmw_attachment(3, 0x0102030405060708, &gid);

        assert_eq!(att.len(), ATTACHMENT_LEN);
        assert_eq!(&att[0..8], &[3, 0, 0, 0, 0, 0, 0, 0]);
        // little-endian timestamp
        assert_eq!(&att[8..16], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(&att[16..32], &[0xab; 16]);
    }

    #[test]
    fn test_attachment_negative_sequence() {
        let att = rmw_attachment(-1, 0, &[0; 16]);
        assert_eq!(&att[0..8], &[0xff; 8]);
    }
}
