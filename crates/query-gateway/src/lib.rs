// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! Query gateway - read and submit surface of a UTXO ledger node with a
//! forum extension.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       QUERY GATEWAY                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │   HTTP  GET/POST /api/v1/{action}   /health   /metrics        │
//! │             │                                                 │
//! │   Middleware: Trace → CORS → Timeout → Body limit             │
//! │             │                                                 │
//! │   Dispatcher: action → QueryRequest → handler → envelope      │
//! │             │                                                 │
//! │   Handlers: chain │ asset │ forum │ contract │ submission gate │
//! └─────────────┼─────────────────────────────┼──────────────────┘
//!               ▼                             ▼
//!         LedgerReader                 TransactionRelay
//! ```
//!
//! Every outcome, success or failure, is a [`ResponseEnvelope`] carrying
//! an integer error code.
//!
//! # Usage
//!
//! ```ignore
//! use query_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let mut service = ApiGatewayService::new(GatewayConfig::default(), ledger, relay, peers)?;
//! let addr = service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod rpc;
pub mod service;

// Re-exports for public API
pub use domain::config::GatewayConfig;
pub use domain::envelope::{QueryResult, ResponseEnvelope, API_VERSION};
pub use domain::error::{codes, ApiError, ApiResult, GatewayError};
pub use domain::methods::{get_method_info, is_method_supported, MethodCategory, MethodInfo};
pub use domain::requests::ParamRecord;
pub use middleware::GatewayMetrics;
pub use ports::{LedgerReader, PeerStatus, QueryApi, TransactionRelay};
pub use router::Dispatcher;
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_method_support() {
        assert!(is_method_supported("getblockheight"));
        assert!(is_method_supported("sendrawtransaction"));
        assert!(is_method_supported("GetUserInfo"));
        assert!(!is_method_supported("getstateupdate"));
    }
}
