//! Submission gate for raw transactions.
//!
//! A submitted payload moves Received -> Accepted or Received -> Rejected.
//! The checks run in a fixed order and the first failure wins:
//!
//! 1. hex decode (InvalidParameter)
//! 2. wire decode within the size limit (InvalidTransaction)
//! 3. type whitelist (InvalidTransaction)
//! 4. relay verify-and-send (relay code, verbatim)

use std::sync::Arc;

use shared_types::{from_wire_bounded, Transaction, TransactionType, Uint256};
use tracing::{debug, info, instrument};

use crate::domain::codec::decode_raw;
use crate::domain::codes;
use crate::ports::TransactionRelay;
use crate::{ApiError, ApiResult};

/// Transaction types the gate forwards. Everything else is rejected before
/// it reaches the relay.
pub const ADMITTED_TYPES: [TransactionType; 6] = [
    TransactionType::TransferAsset,
    TransactionType::RegisterUser,
    TransactionType::PostArticle,
    TransactionType::ReplyArticle,
    TransactionType::LikeArticle,
    TransactionType::Withdrawal,
];

pub fn is_admitted(tx_type: TransactionType) -> bool {
    ADMITTED_TYPES.contains(&tx_type)
}

/// Gate in front of the transaction relay.
pub struct SubmissionGate {
    relay: Arc<dyn TransactionRelay>,
    max_transaction_size: u64,
}

impl SubmissionGate {
    pub fn new(relay: Arc<dyn TransactionRelay>, max_transaction_size: u64) -> Self {
        Self {
            relay,
            max_transaction_size,
        }
    }

    /// Decode and type-check a payload without relaying it.
    pub fn admit(&self, data: &str) -> ApiResult<Transaction> {
        let bytes = decode_raw(data)?;
        let tx: Transaction = from_wire_bounded(&bytes, self.max_transaction_size)
            .map_err(|e| ApiError::invalid_transaction(e.to_string()))?;
        let tx_type = tx.tx_type();
        if !is_admitted(tx_type) {
            return Err(ApiError::invalid_transaction(format!(
                "type 0x{:02x} is not accepted for submission",
                tx_type.as_u8()
            )));
        }
        Ok(tx)
    }

    /// sendrawtransaction - admit, relay, and return the transaction hash
    #[instrument(skip(self, data), fields(len = data.len()))]
    pub fn submit(&self, data: &str) -> ApiResult<Uint256> {
        let tx = self.admit(data).map_err(|err| {
            debug!(code = err.code, reason = %err.message, "submission rejected");
            err
        })?;
        let hash = tx.hash();
        let code = self.relay.verify_and_send(&tx);
        if code != codes::relay::SUCCESS {
            debug!(tx = %hash, code, "relay refused transaction");
            return Err(ApiError::relay(code));
        }
        info!(tx = %hash, tx_type = tx.tx_type().as_u8(), "transaction accepted");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RecordingRelay;
    use shared_types::{to_wire, Payload, Uint160};

    fn encode(tx: &Transaction) -> String {
        hex::encode(to_wire(tx).unwrap())
    }

    fn gate(relay: Arc<RecordingRelay>) -> SubmissionGate {
        SubmissionGate::new(relay, 64 * 1024)
    }

    #[test]
    fn test_whitelist() {
        assert!(is_admitted(TransactionType::TransferAsset));
        assert!(is_admitted(TransactionType::Withdrawal));
        assert!(!is_admitted(TransactionType::BookKeeping));
        assert!(!is_admitted(TransactionType::RegisterAsset));
        assert!(!is_admitted(TransactionType::DeployCode));
        assert!(!is_admitted(TransactionType::InvokeCode));
    }

    #[test]
    fn test_accepted_returns_hash() {
        let relay = Arc::new(RecordingRelay::accepting());
        let tx = Transaction::new(Payload::RegisterUser {
            username: "alice".into(),
            user_program_hash: Uint160([1; 20]),
        });
        let hash = gate(relay.clone()).submit(&encode(&tx)).unwrap();
        assert_eq!(hash, tx.hash());
        assert_eq!(relay.submitted(), vec![tx]);
    }

    #[test]
    fn test_bad_hex_is_invalid_params() {
        let relay = Arc::new(RecordingRelay::accepting());
        let err = gate(relay.clone()).submit("zz").unwrap_err();
        assert_eq!(err.code, codes::INVALID_PARAMS);
        assert!(relay.submitted().is_empty());
    }

    #[test]
    fn test_undecodable_is_invalid_transaction() {
        let relay = Arc::new(RecordingRelay::accepting());
        let err = gate(relay.clone()).submit("00ff00").unwrap_err();
        assert_eq!(err.code, codes::INVALID_TRANSACTION);
        assert!(relay.submitted().is_empty());
    }

    #[test]
    fn test_oversized_is_invalid_transaction() {
        let relay = Arc::new(RecordingRelay::accepting());
        let tx = Transaction::new(Payload::Record {
            record_type: "blob".into(),
            data: vec![0; 128],
        });
        let err = SubmissionGate::new(relay, 64).submit(&encode(&tx)).unwrap_err();
        assert_eq!(err.code, codes::INVALID_TRANSACTION);
    }

    #[test]
    fn test_non_whitelisted_never_reaches_relay() {
        let relay = Arc::new(RecordingRelay::accepting());
        let tx = Transaction::new(Payload::InvokeCode {
            code: vec![0x51],
            program_hash: Uint160::ZERO,
        });
        let err = gate(relay.clone()).submit(&encode(&tx)).unwrap_err();
        assert_eq!(err.code, codes::INVALID_TRANSACTION);
        assert!(relay.submitted().is_empty());
    }

    #[test]
    fn test_relay_code_verbatim() {
        let relay = Arc::new(RecordingRelay::rejecting(codes::relay::ERR_DOUBLE_SPEND));
        let tx = Transaction::new(Payload::TransferAsset);
        let err = gate(relay).submit(&encode(&tx)).unwrap_err();
        assert_eq!(err.code, codes::relay::ERR_DOUBLE_SPEND);
    }
}
