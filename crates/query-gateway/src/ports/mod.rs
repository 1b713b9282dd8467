//! Ports (hexagonal boundaries) of the query gateway.

pub mod inbound;
pub mod outbound;

pub use inbound::QueryApi;
pub use outbound::{LedgerReader, PeerStatus, TransactionRelay};
