//! Relay and peer adapters that stand in for the network layer.

use parking_lot::Mutex;
use shared_types::Transaction;
use tracing::debug;

use crate::domain::codes;
use crate::ports::{PeerStatus, TransactionRelay};

/// Relay that answers every transaction with a fixed code and remembers
/// the ones it accepted.
pub struct RecordingRelay {
    code: i64,
    submitted: Mutex<Vec<Transaction>>,
}

impl RecordingRelay {
    pub fn accepting() -> Self {
        Self::rejecting(codes::relay::SUCCESS)
    }

    pub fn rejecting(code: i64) -> Self {
        Self {
            code,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Transactions accepted so far, in arrival order.
    pub fn submitted(&self) -> Vec<Transaction> {
        self.submitted.lock().clone()
    }
}

impl TransactionRelay for RecordingRelay {
    fn verify_and_send(&self, tx: &Transaction) -> i64 {
        debug!(tx = %tx.hash(), code = self.code, "relay verdict");
        if self.code == codes::relay::SUCCESS {
            self.submitted.lock().push(tx.clone());
        }
        self.code
    }
}

/// Fixed peer count.
pub struct StaticPeers {
    count: u32,
}

impl StaticPeers {
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

impl PeerStatus for StaticPeers {
    fn connection_count(&self) -> u32 {
        self.count
    }
}
