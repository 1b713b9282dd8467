//! Domain types for the query gateway.
//!
//! Identifier codec, error taxonomy, request validation, result views, the
//! response envelope, configuration, and the action registry.

pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod methods;
pub mod requests;
pub mod views;

// Re-exports for convenience
pub use config::{ConfigError, ForumConfig, GatewayConfig, LimitsConfig};
pub use envelope::{QueryResult, ResponseEnvelope, API_VERSION};
pub use error::{codes, ApiError, ApiResult, GatewayError};
pub use methods::{get_method_info, is_method_supported, Method, MethodCategory, MethodInfo};
pub use requests::{ParamRecord, QueryRequest, Username};
pub use views::Rendered;
