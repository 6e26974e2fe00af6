//! Framing for the UDP query protocol.
//!
//! Requests are `FE FD <opcode> <session:4> [payload]`, responses are
//! `<opcode> <session:4> <payload>`.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

use crate::error::ProtocolMismatch;
use crate::utils::coerce_int;

pub const MAGIC: [u8; 2] = [0xFE, 0xFD];
pub const REQUEST_HEADER_LEN: usize = 7;
pub const RESPONSE_HEADER_LEN: usize = 5;
pub const MAX_RESPONSE_LEN: usize = 2048;

/// Reserved area after the challenge token in a full-status request.
pub const STATUS_PADDING: [u8; 4] = [0x00; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Status = 0x00,
    Handshake = 0x09,
}

impl Opcode {
    pub fn byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handshake => write!(f, "handshake"),
            Self::Status => write!(f, "status"),
        }
    }
}

pub fn build_request(opcode: Opcode, session: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut request = Vec::with_capacity(REQUEST_HEADER_LEN + payload.len());
    request.extend_from_slice(&MAGIC);
    request.push(opcode.byte());
    request.extend_from_slice(&session);
    request.extend_from_slice(payload);
    request
}

/// Checks the echoed header and returns what follows it.
pub fn strip_response(opcode: Opcode, response: &[u8]) -> Result<&[u8], ProtocolMismatch> {
    if response.len() < RESPONSE_HEADER_LEN {
        return Err(ProtocolMismatch::TooShort(response.len()));
    }
    if response[0] != opcode.byte() {
        return Err(ProtocolMismatch::OpcodeMismatch {
            expected: opcode.byte(),
            actual: response[0],
        });
    }
    Ok(&response[RESPONSE_HEADER_LEN..])
}

/// Turns the textual challenge into the 4-byte token for the status request.
///
/// Parsing is permissive: the trailing NUL servers send is ignored, text that
/// is not a number yields 0 and wider values keep their low 32 bits.
pub fn challenge_token(payload: &[u8]) -> [u8; 4] {
    let text = String::from_utf8_lossy(payload);
    let challenge = coerce_int(&text) as i32;

    let mut token = [0u8; 4];
    BigEndian::write_i32(&mut token, challenge);
    token
}

pub fn status_payload(token: [u8; 4]) -> [u8; 8] {
    let mut payload = [0u8; 8];
    payload[..4].copy_from_slice(&token);
    payload[4..].copy_from_slice(&STATUS_PADDING);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: [u8; 4] = [0x01, 0x02, 0x03, 0x04];

    #[test]
    fn handshake_request_has_no_payload() {
        let request = build_request(Opcode::Handshake, SESSION, &[]);
        assert_eq!(request, vec![0xFE, 0xFD, 0x09, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn status_request_carries_token_and_padding() {
        let payload = status_payload([0xAA, 0xBB, 0xCC, 0xDD]);
        let request = build_request(Opcode::Status, SESSION, &payload);
        assert_eq!(request.len(), REQUEST_HEADER_LEN + 8);
        assert_eq!(request[2], 0x00);
        assert_eq!(&request[7..11], &[0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(&request[11..], &[0, 0, 0, 0]);
    }

    #[test]
    fn challenge_token_is_big_endian() {
        assert_eq!(challenge_token(b"123456789"), 123_456_789i32.to_be_bytes());
        assert_eq!(challenge_token(b"123456789"), [0x07, 0x5B, 0xCD, 0x15]);
    }

    #[test]
    fn challenge_token_ignores_trailing_nul() {
        assert_eq!(challenge_token(b"9513307\0"), 9_513_307i32.to_be_bytes());
    }

    #[test]
    fn negative_challenge_is_twos_complement() {
        assert_eq!(challenge_token(b"-1\0"), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn non_numeric_challenge_becomes_zero() {
        assert_eq!(challenge_token(b"nope"), [0, 0, 0, 0]);
        assert_eq!(challenge_token(b""), [0, 0, 0, 0]);
    }

    #[test]
    fn wide_challenge_keeps_low_bits() {
        // 2^32 + 5
        assert_eq!(challenge_token(b"4294967301"), [0, 0, 0, 5]);
    }

    #[test]
    fn strips_echoed_header() {
        let response = [0x09, 0x01, 0x02, 0x03, 0x04, b'4', b'2', 0x00];
        assert_eq!(strip_response(Opcode::Handshake, &response), Ok(&b"42\0"[..]));
    }

    #[test]
    fn header_only_response_has_empty_payload() {
        let response = [0x00, 0x01, 0x02, 0x03, 0x04];
        let empty: &[u8] = &[];
        assert_eq!(strip_response(Opcode::Status, &response), Ok(empty));
    }

    #[test]
    fn rejects_short_response() {
        assert_eq!(
            strip_response(Opcode::Handshake, &[0x09, 0x01, 0x02, 0x03]),
            Err(ProtocolMismatch::TooShort(4))
        );
    }

    #[test]
    fn rejects_opcode_mismatch() {
        let response = [0x00, 0x01, 0x02, 0x03, 0x04, b'1'];
        assert_eq!(
            strip_response(Opcode::Handshake, &response),
            Err(ProtocolMismatch::OpcodeMismatch {
                expected: 0x09,
                actual: 0x00
            })
        );
    }
}
