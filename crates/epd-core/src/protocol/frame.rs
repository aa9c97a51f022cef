//! Frame assembly and XOR checksum for the EPD serial protocol.
//!
//! Wire format:
//! ```text
//! [begin:1][length:2][opcode:1][payload:N][end:4][checksum:1]
//! ```
//! The length field is big-endian and counts every byte of the frame, from
//! the begin marker through the checksum inclusive, so it is always
//! `9 + N`. The checksum is the XOR fold of all preceding bytes, which
//! makes the XOR of a complete frame equal to zero.

/// Marker byte that opens every frame.
pub const FRAME_BEGIN: u8 = 0xA5;

/// Fixed four-byte sequence that closes every frame, before the checksum.
pub const FRAME_END: [u8; 4] = [0xCC, 0x33, 0xC3, 0x3C];

/// Frame bytes that are not payload: begin (1) + length (2) + opcode (1) +
/// end marker (4) + checksum (1).
pub const FRAME_OVERHEAD: usize = 9;

/// XOR-folds a byte sequence into a single byte.
///
/// Appending the result to the input makes the fold of the whole sequence
/// zero, which is how the device validates a received frame.
///
/// # Examples
///
/// ```rust
/// use epd_core::protocol::frame::xor_checksum;
///
/// assert_eq!(xor_checksum(&[0x01, 0x02]), 0x03);
/// ```
pub fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc ^ b)
}

/// Renders the checksum of `bytes` as the two-hex-digit, zero-padded form
/// used by the device documentation.
pub fn checksum_hex(bytes: &[u8]) -> String {
    format!("{:02x}", xor_checksum(bytes))
}

/// Assembles a complete, transmittable frame for `opcode` and `payload`.
///
/// The declared length always equals the actual byte count of the returned
/// vector, and the trailing checksum is computed over everything before it.
/// Payloads are bounded well below `u16::MAX - 9` by command-level input
/// validation, so the length field cannot overflow.
pub fn build_frame(opcode: u8, payload: &[u8]) -> Vec<u8> {
    let total = FRAME_OVERHEAD + payload.len();
    let mut frame = Vec::with_capacity(total);
    frame.push(FRAME_BEGIN);
    frame.extend_from_slice(&(total as u16).to_be_bytes());
    frame.push(opcode);
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&FRAME_END);
    frame.push(xor_checksum(&frame));
    frame
}

/// Reads the big-endian length field of an assembled frame.
///
/// Returns `None` if the slice is too short to carry one.
pub fn declared_length(frame: &[u8]) -> Option<u16> {
    if frame.len() < FRAME_OVERHEAD {
        return None;
    }
    Some(u16::from_be_bytes([frame[1], frame[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_example() {
        assert_eq!(xor_checksum(&[0x01, 0x02]), 0x03);
        assert_eq!(checksum_hex(&[0x01, 0x02]), "03");
    }

    #[test]
    fn test_checksum_of_empty_input_is_zero() {
        assert_eq!(xor_checksum(&[]), 0x00);
        assert_eq!(checksum_hex(&[]), "00");
    }

    #[test]
    fn test_checksum_self_cancels() {
        let samples: [&[u8]; 4] = [
            &[0x01, 0x02],
            &[0xA5, 0x00, 0x09, 0x00],
            &[0xFF; 16],
            &[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x42],
        ];
        for bytes in samples {
            let mut with_checksum = bytes.to_vec();
            with_checksum.push(xor_checksum(bytes));
            assert_eq!(xor_checksum(&with_checksum), 0x00);
        }
    }

    #[test]
    fn test_handshake_frame_bytes() {
        // The canonical no-payload frame: A5 0009 00 CC33C33C AC.
        let frame = build_frame(0x00, &[]);
        assert_eq!(
            frame,
            [0xA5, 0x00, 0x09, 0x00, 0xCC, 0x33, 0xC3, 0x3C, 0xAC]
        );
    }

    #[test]
    fn test_declared_length_matches_actual_length() {
        for payload_len in [0usize, 1, 2, 6, 12, 1021] {
            let payload = vec![0x5A; payload_len];
            let frame = build_frame(0x24, &payload);
            assert_eq!(frame.len(), FRAME_OVERHEAD + payload_len);
            assert_eq!(declared_length(&frame), Some(frame.len() as u16));
        }
    }

    #[test]
    fn test_declared_length_of_short_slice_is_none() {
        assert_eq!(declared_length(&[0xA5, 0x00]), None);
    }

    #[test]
    fn test_every_frame_xor_folds_to_zero() {
        let frame = build_frame(0x20, &[0x00, 0x00, 0x10, 0x00, 0x00, 0x20]);
        assert_eq!(xor_checksum(&frame), 0x00);
    }
}
