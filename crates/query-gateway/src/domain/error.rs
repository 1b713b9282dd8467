//! Query gateway error types and the numeric result-code taxonomy.
//!
//! Every operation either succeeds with code 0 or fails with exactly one
//! code from [`codes`]. Relay rejections pass their code through verbatim.

use std::fmt;

use shared_types::{AddressError, StoreError};

use super::codec::HexError;

/// Result codes carried in the response envelope's `Error` field.
pub mod codes {
    pub const SUCCESS: i64 = 0;

    // Request shape (42xxx)
    pub const INVALID_METHOD: i64 = 42001;
    pub const INVALID_PARAMS: i64 = 42002;

    // Entity validity (43xxx)
    pub const INVALID_TRANSACTION: i64 = 43001;
    pub const INVALID_ASSET: i64 = 43002;
    pub const INVALID_BLOCK: i64 = 43003;
    pub const INVALID_USER: i64 = 43004;

    // Lookup misses (44xxx)
    pub const UNKNOWN_TRANSACTION: i64 = 44001;
    pub const UNKNOWN_ASSET: i64 = 44002;
    pub const UNKNOWN_BLOCK: i64 = 44003;

    pub const INTERNAL_ERROR: i64 = 45001;

    /// Codes the transaction relay may return. Passed through unchanged.
    pub mod relay {
        pub const SUCCESS: i64 = 0;
        pub const ERR_UNKNOWN: i64 = -1;
        pub const ERR_DUPLICATED_TX: i64 = 1;
        pub const ERR_DUPLICATE_INPUT: i64 = 45003;
        pub const ERR_ASSET_PRECISION: i64 = 45004;
        pub const ERR_TRANSACTION_BALANCE: i64 = 45005;
        pub const ERR_ATTRIBUTE_PROGRAM: i64 = 45006;
        pub const ERR_TRANSACTION_CONTRACTS: i64 = 45007;
        pub const ERR_TRANSACTION_PAYLOAD: i64 = 45008;
        pub const ERR_DOUBLE_SPEND: i64 = 45009;
        pub const ERR_TX_HASH_DUPLICATE: i64 = 45010;
        pub const ERR_XMIT_FAIL: i64 = 45013;
    }
}

/// A failed query: one result code plus a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_method(action: &str) -> Self {
        Self::new(codes::INVALID_METHOD, format!("unknown action: {}", action))
    }

    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_PARAMS,
            format!("invalid params: {}", details.into()),
        )
    }

    /// A required parameter is absent.
    pub fn missing_param(name: &str) -> Self {
        Self::invalid_params(format!("missing '{}'", name))
    }

    pub fn invalid_transaction(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_TRANSACTION,
            format!("invalid transaction: {}", details.into()),
        )
    }

    pub fn invalid_asset(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_ASSET,
            format!("invalid asset: {}", details.into()),
        )
    }

    pub fn invalid_user(username: &str) -> Self {
        Self::new(codes::INVALID_USER, format!("unknown user: {}", username))
    }

    pub fn unknown_transaction(hash: impl fmt::Display) -> Self {
        Self::new(
            codes::UNKNOWN_TRANSACTION,
            format!("transaction not found: {}", hash),
        )
    }

    pub fn unknown_asset(id: impl fmt::Display) -> Self {
        Self::new(codes::UNKNOWN_ASSET, format!("asset not found: {}", id))
    }

    pub fn unknown_block(which: impl fmt::Display) -> Self {
        Self::new(codes::UNKNOWN_BLOCK, format!("block not found: {}", which))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(
            codes::INTERNAL_ERROR,
            format!("internal error: {}", details.into()),
        )
    }

    /// Relay rejection; the relay's code is kept as-is.
    pub fn relay(code: i64) -> Self {
        Self::new(code, format!("transaction rejected by relay (code {})", code))
    }

    /// Map a point-lookup store failure: a miss becomes `on_missing`, every
    /// other failure is internal.
    pub fn from_lookup(err: StoreError, on_missing: impl FnOnce() -> ApiError) -> Self {
        if err.is_not_found() {
            on_missing()
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<HexError> for ApiError {
    fn from(e: HexError) -> Self {
        ApiError::invalid_params(e.to_string())
    }
}

impl From<AddressError> for ApiError {
    fn from(e: AddressError) -> Self {
        ApiError::invalid_params(format!("invalid address: {}", e))
    }
}

/// Result type for query operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and serving, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    #[error("server bind error: {0}")]
    Bind(String),

    #[error("server error: {0}")]
    Serve(String),
}
