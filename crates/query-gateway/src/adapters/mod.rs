//! Adapters for the query gateway.
//!
//! In-process implementations of the outbound ports.

pub mod memory;
pub mod relay;

pub use memory::InMemoryLedger;
pub use relay::{RecordingRelay, StaticPeers};
