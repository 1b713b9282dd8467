//! Identifier codec for the query boundary.
//!
//! Ledger identifiers are held in storage byte order but cross the API in
//! display order: bytes reversed, then lowercase hex. Raw serialized
//! entities are the exception and travel as plain hex of their wire bytes.

use shared_types::{Uint160, Uint256, UINT160_SIZE, UINT256_SIZE};

/// Errors decoding a hex parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("invalid hex: {0}")]
    NotHex(String),
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
}

/// Encode a storage-order identifier for display.
pub fn encode_hash(bytes: &[u8]) -> String {
    let mut reversed = bytes.to_vec();
    reversed.reverse();
    hex::encode(reversed)
}

/// Decode a display-order identifier back to storage order.
///
/// Fails unless the input is valid hex of exactly `expected_len` bytes.
pub fn decode_hash(display: &str, expected_len: usize) -> Result<Vec<u8>, HexError> {
    let mut bytes = hex::decode(display).map_err(|e| HexError::NotHex(e.to_string()))?;
    if bytes.len() != expected_len {
        return Err(HexError::Length {
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    bytes.reverse();
    Ok(bytes)
}

/// Plain hex of canonical wire bytes (no reversal).
pub fn encode_raw(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn decode_raw(data: &str) -> Result<Vec<u8>, HexError> {
    hex::decode(data).map_err(|e| HexError::NotHex(e.to_string()))
}

pub fn encode_uint256(id: &Uint256) -> String {
    encode_hash(id.as_bytes())
}

pub fn encode_uint160(id: &Uint160) -> String {
    encode_hash(id.as_bytes())
}

pub fn decode_uint256(display: &str) -> Result<Uint256, HexError> {
    let bytes = decode_hash(display, UINT256_SIZE)?;
    Uint256::from_slice(&bytes).ok_or(HexError::Length {
        expected: UINT256_SIZE,
        actual: bytes.len(),
    })
}

pub fn decode_uint160(display: &str) -> Result<Uint160, HexError> {
    let bytes = decode_hash(display, UINT160_SIZE)?;
    Uint160::from_slice(&bytes).ok_or(HexError::Length {
        expected: UINT160_SIZE,
        actual: bytes.len(),
    })
}
