//! # Shared Types Crate
//!
//! Ledger entities consumed by the query gateway: blocks, transactions,
//! assets, unspent outputs, locked-asset schedules, forum records, and
//! contract state, plus the identifier, amount, address, and wire
//! conventions they are built on.
//!
//! ## Design Principles
//!
//! - **Storage order in memory**: `Uint256`/`Uint160` keep wire byte order;
//!   display order is applied only at the query boundary.
//! - **One canonical encoding**: [`wire`] is used for hashing, raw output,
//!   and decoding submitted transactions.
//! - **Type follows payload**: a transaction's type is derived from its
//!   payload variant and cannot disagree with it.

pub mod address;
pub mod contract;
pub mod entities;
pub mod errors;
pub mod forum;
pub mod primitives;
pub mod wire;

pub use address::ADDRESS_VERSION;
pub use contract::*;
pub use entities::*;
pub use errors::*;
pub use forum::*;
pub use primitives::*;
pub use wire::{from_wire, from_wire_bounded, to_wire, MAX_WIRE_SIZE};
