//! # Canonical Wire Codec
//!
//! The single byte encoding used for hashing, for raw-mode query output, and
//! for decoding submitted transactions. Fixed-width little-endian integers,
//! `u64` length prefixes, and no trailing bytes.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::WireError;

/// Upper bound on a decoded entity unless the caller picks a tighter one.
pub const MAX_WIRE_SIZE: u64 = 16 * 1024 * 1024;

/// Encode a value into its canonical bytes.
pub fn to_wire<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, WireError> {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
        .serialize(value)
        .map_err(WireError::from)
}

/// Decode canonical bytes with the default size bound.
pub fn from_wire<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WireError> {
    from_wire_bounded(bytes, MAX_WIRE_SIZE)
}

/// Decode canonical bytes, refusing to allocate past `limit` bytes.
pub fn from_wire_bounded<T: DeserializeOwned>(bytes: &[u8], limit: u64) -> Result<T, WireError> {
    if bytes.len() as u64 > limit {
        return Err(WireError::TooLarge { limit });
    }
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
        .with_limit(limit)
        .deserialize(bytes)
        .map_err(|err| match *err {
            bincode::ErrorKind::SizeLimit => WireError::TooLarge { limit },
            other => WireError::Malformed(other.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Fixed64, Uint256};

    #[test]
    fn test_fixed_width_layout() {
        let bytes = to_wire(&Fixed64(1)).unwrap();
        assert_eq!(bytes, vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = to_wire(&Uint256([9; 32])).unwrap();
        bytes.push(0);
        assert!(matches!(
            from_wire::<Uint256>(&bytes),
            Err(WireError::Malformed(_))
        ));
    }

    #[test]
    fn test_limit_enforced() {
        let bytes = to_wire(&vec![0u8; 64]).unwrap();
        assert!(matches!(
            from_wire_bounded::<Vec<u8>>(&bytes, 16),
            Err(WireError::TooLarge { limit: 16 })
        ));
    }
}
