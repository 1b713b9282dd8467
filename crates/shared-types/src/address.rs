//! # Addresses
//!
//! Base58check encoding of script hashes:
//! `version(1) || script_hash(20) || checksum(4)`, where the checksum is the
//! first four bytes of the double SHA-256 of the first 21 bytes.

use crate::errors::AddressError;
use crate::primitives::{double_sha256, Uint160, UINT160_SIZE};

/// Version byte prefixed to every address.
pub const ADDRESS_VERSION: u8 = 0x17;

const CHECKSUM_LEN: usize = 4;
const ADDRESS_LEN: usize = 1 + UINT160_SIZE + CHECKSUM_LEN;

impl Uint160 {
    /// Encode this script hash as a base58check address.
    pub fn to_address(&self) -> String {
        let mut data = Vec::with_capacity(ADDRESS_LEN);
        data.push(ADDRESS_VERSION);
        data.extend_from_slice(&self.0);
        let checksum = double_sha256(&data);
        data.extend_from_slice(&checksum.0[..CHECKSUM_LEN]);
        bs58::encode(data).into_string()
    }

    /// Resolve a base58check address to the script hash it names.
    pub fn from_address(address: &str) -> Result<Self, AddressError> {
        let decoded = bs58::decode(address)
            .into_vec()
            .map_err(|e| AddressError::Base58(e.to_string()))?;
        if decoded.len() != ADDRESS_LEN {
            return Err(AddressError::Length(decoded.len()));
        }

        let body = &decoded[..1 + UINT160_SIZE];
        let checksum = double_sha256(body);
        if checksum.0[..CHECKSUM_LEN] != decoded[1 + UINT160_SIZE..] {
            return Err(AddressError::Checksum);
        }

        Uint160::from_slice(&body[1..]).ok_or(AddressError::Length(decoded.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_round_trip() {
        let owner = Uint160([0x42; 20]);
        let address = owner.to_address();
        assert!(address.starts_with('A'));
        assert_eq!(Uint160::from_address(&address).unwrap(), owner);
    }

    #[test]
    fn test_checksum_mismatch() {
        let owner = Uint160([0x07; 20]);
        let mut raw = bs58::decode(owner.to_address()).into_vec().unwrap();
        raw[5] ^= 0xff;
        let tampered = bs58::encode(raw).into_string();
        assert_eq!(
            Uint160::from_address(&tampered),
            Err(AddressError::Checksum)
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Uint160::from_address("0OIl"),
            Err(AddressError::Base58(_))
        ));
        assert!(matches!(
            Uint160::from_address("3mJr7AoUXx2Wqd"),
            Err(AddressError::Length(_))
        ));
        assert!(matches!(
            Uint160::from_address(""),
            Err(AddressError::Length(0))
        ));
    }
}
