//! HTTP middleware for the query gateway.
//!
//! Layer order: Request → Trace → CORS → Timeout → Body limit → Handler

pub mod cors;
pub mod metrics;

pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, RequestTimer};
