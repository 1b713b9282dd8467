//! # Error Types
//!
//! Errors raised while decoding ledger data or reading from the ledger store.

use thiserror::Error;

/// Errors surfaced by a ledger store read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key has no entry.
    #[error("not found: {0}")]
    NotFound(String),

    /// An entry exists but could not be decoded.
    #[error("corrupted entry: {0}")]
    Corrupted(String),

    /// The storage backend failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::NotFound(what.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Errors from the canonical wire codec.
#[derive(Debug, Clone, Error)]
pub enum WireError {
    /// Input bytes did not decode into the expected structure.
    #[error("malformed wire data: {0}")]
    Malformed(String),

    /// Input exceeded the configured decode limit.
    #[error("wire data exceeds limit of {limit} bytes")]
    TooLarge { limit: u64 },
}

impl From<bincode::Error> for WireError {
    fn from(err: bincode::Error) -> Self {
        WireError::Malformed(err.to_string())
    }
}

/// Errors converting a base58check address to a script hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid base58: {0}")]
    Base58(String),

    #[error("address decodes to {0} bytes, expected 25")]
    Length(usize),

    #[error("address checksum mismatch")]
    Checksum,
}

/// Errors parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("malformed amount: {0}")]
    Malformed(String),

    #[error("amount has more than 8 fractional digits: {0}")]
    TooPrecise(String),

    #[error("amount out of range: {0}")]
    Overflow(String),
}
