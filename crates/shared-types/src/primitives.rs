//! # Ledger Primitives
//!
//! Fixed-width identifiers and the fixed-point amount type.
//!
//! ## Byte Order
//!
//! `Uint256` and `Uint160` hold their bytes in storage/wire order. The
//! conventional display form reverses them before hex-encoding; use
//! [`Uint256::to_array_reverse`] (or the `Display` impl) whenever an
//! identifier leaves the node for a human or an API caller.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::errors::AmountError;

/// Width of a block, transaction, or asset identifier.
pub const UINT256_SIZE: usize = 32;

/// Width of a script (program) hash.
pub const UINT160_SIZE: usize = 20;

/// Number of base units in one whole token.
pub const FIXED64_SCALE: i64 = 100_000_000;

/// Maximum fractional digits carried by [`Fixed64`].
pub const FIXED64_DECIMALS: usize = 8;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// A 256-bit ledger identifier (block, transaction, or asset hash).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Uint256(pub [u8; UINT256_SIZE]);

impl Uint256 {
    /// The all-zero identifier, used as the "no parent" marker.
    pub const ZERO: Uint256 = Uint256([0u8; UINT256_SIZE]);

    /// Build from a storage-order slice. Fails unless it is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; UINT256_SIZE] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    /// Storage-order bytes.
    pub fn as_bytes(&self) -> &[u8; UINT256_SIZE] {
        &self.0
    }

    /// Bytes in display order (reversed).
    pub fn to_array_reverse(&self) -> [u8; UINT256_SIZE] {
        let mut out = self.0;
        out.reverse();
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; UINT256_SIZE]
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_array_reverse()))
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint256({})", self)
    }
}

/// A 160-bit script hash, the owner key for balances and locks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Uint160(pub [u8; UINT160_SIZE]);

impl Uint160 {
    pub const ZERO: Uint160 = Uint160([0u8; UINT160_SIZE]);

    /// Build from a storage-order slice. Fails unless it is exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; UINT160_SIZE] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; UINT160_SIZE] {
        &self.0
    }

    /// Bytes in display order (reversed).
    pub fn to_array_reverse(&self) -> [u8; UINT160_SIZE] {
        let mut out = self.0;
        out.reverse();
        out
    }
}

impl fmt::Display for Uint160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_array_reverse()))
    }
}

impl fmt::Debug for Uint160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint160({})", self)
    }
}

// =============================================================================
// HASHING
// =============================================================================

/// SHA-256 applied twice. Used for block and transaction identity and for
/// address checksums.
pub fn double_sha256(data: &[u8]) -> Uint256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Uint256(second.into())
}

/// RIPEMD-160 over SHA-256. Used to derive script (code) hashes.
pub fn hash160(data: &[u8]) -> Uint160 {
    use ripemd::Ripemd160;
    let sha = Sha256::digest(data);
    let digest = Ripemd160::digest(sha);
    Uint160(digest.into())
}

// =============================================================================
// AMOUNTS
// =============================================================================

/// Fixed-point amount with eight decimal places.
///
/// All value arithmetic stays in base units; there is no rounding anywhere.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Fixed64(pub i64);

impl Fixed64 {
    pub const ZERO: Fixed64 = Fixed64(0);

    /// Amount of `units` whole tokens.
    pub const fn from_units(units: i64) -> Self {
        Fixed64(units * FIXED64_SCALE)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Fixed64)
    }
}

impl fmt::Display for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // i128 keeps i64::MIN representable after negation
        let mut value = i128::from(self.0);
        if value < 0 {
            f.write_str("-")?;
            value = -value;
        }
        let scale = i128::from(FIXED64_SCALE);
        write!(f, "{}", value / scale)?;
        let frac = value % scale;
        if frac > 0 {
            let digits = format!("{:0width$}", frac, width = FIXED64_DECIMALS);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed64({})", self)
    }
}

impl FromStr for Fixed64 {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Malformed(s.to_string()));
        }
        if body.contains('.') && frac_part.is_empty() {
            return Err(AmountError::Malformed(s.to_string()));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Malformed(s.to_string()));
        }
        if frac_part.len() > FIXED64_DECIMALS {
            return Err(AmountError::TooPrecise(s.to_string()));
        }

        let int_value: i64 = int_part
            .parse()
            .map_err(|_| AmountError::Overflow(s.to_string()))?;
        let padded = format!("{:0<width$}", frac_part, width = FIXED64_DECIMALS);
        let frac_value: i64 = padded
            .parse()
            .map_err(|_| AmountError::Malformed(s.to_string()))?;

        let magnitude = int_value
            .checked_mul(FIXED64_SCALE)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(|| AmountError::Overflow(s.to_string()))?;

        Ok(Fixed64(if negative { -magnitude } else { magnitude }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint256_reverse_display() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let id = Uint256(bytes);
        let shown = id.to_string();
        assert!(shown.starts_with("01"));
        assert!(shown.ends_with("ab"));
        assert_eq!(shown.len(), 64);
    }

    #[test]
    fn test_from_slice_rejects_wrong_width() {
        assert!(Uint256::from_slice(&[0u8; 31]).is_none());
        assert!(Uint256::from_slice(&[0u8; 33]).is_none());
        assert!(Uint160::from_slice(&[0u8; 20]).is_some());
        assert!(Uint160::from_slice(&[0u8; 32]).is_none());
    }

    #[test]
    fn test_fixed64_display() {
        assert_eq!(Fixed64::ZERO.to_string(), "0");
        assert_eq!(Fixed64::from_units(5).to_string(), "5");
        assert_eq!(Fixed64(150_000_000).to_string(), "1.5");
        assert_eq!(Fixed64(1).to_string(), "0.00000001");
        assert_eq!(Fixed64(-250_000_000).to_string(), "-2.5");
        assert_eq!(Fixed64(i64::MIN).to_string(), "-92233720368.54775808");
    }

    #[test]
    fn test_fixed64_parse() {
        assert_eq!("1.5".parse::<Fixed64>().unwrap(), Fixed64(150_000_000));
        assert_eq!("0".parse::<Fixed64>().unwrap(), Fixed64::ZERO);
        assert_eq!("-0.00000001".parse::<Fixed64>().unwrap(), Fixed64(-1));
        assert!("1.000000001".parse::<Fixed64>().is_err());
        assert!("1.".parse::<Fixed64>().is_err());
        assert!("abc".parse::<Fixed64>().is_err());
        assert!("99999999999999".parse::<Fixed64>().is_err());
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(Fixed64(1).checked_add(Fixed64(2)), Some(Fixed64(3)));
        assert_eq!(Fixed64(i64::MAX).checked_add(Fixed64(1)), None);
    }

    #[test]
    fn test_hash160_width() {
        let h = hash160(b"code");
        assert_eq!(h.as_bytes().len(), UINT160_SIZE);
        assert_ne!(h, Uint160::ZERO);
    }

    #[test]
    fn test_double_sha256_is_deterministic() {
        assert_eq!(double_sha256(b"abc"), double_sha256(b"abc"));
        assert_ne!(double_sha256(b"abc"), double_sha256(b"abd"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fixed64_display_parses_back(
                raw in any::<i64>().prop_filter("min has no positive twin", |v| *v != i64::MIN)
            ) {
                let amount = Fixed64(raw);
                let parsed: Fixed64 = amount.to_string().parse().unwrap();
                prop_assert_eq!(parsed, amount);
            }
        }
    }
}
