//! Contract lookup by script hash.

use std::sync::Arc;

use shared_types::{from_wire, ContractState, Uint160};
use tracing::{instrument, warn};

use crate::domain::views::DeployCodeInfo;
use crate::ports::LedgerReader;
use crate::{ApiError, ApiResult};

/// Contract RPC methods handler
pub struct ContractRpc {
    ledger: Arc<dyn LedgerReader>,
}

impl ContractRpc {
    pub fn new(ledger: Arc<dyn LedgerReader>) -> Self {
        Self { ledger }
    }

    /// getcontract - stored contract state, decoded and shaped
    #[instrument(skip(self))]
    pub fn contract(&self, script_hash: &Uint160) -> ApiResult<DeployCodeInfo> {
        let bytes = self.ledger.contract_state(script_hash).map_err(|e| {
            ApiError::from_lookup(e, || {
                ApiError::invalid_params(format!("no contract at {}", script_hash))
            })
        })?;
        let state: ContractState = from_wire(&bytes).map_err(|e| {
            warn!(contract = %script_hash, error = %e, "stored contract state does not decode");
            ApiError::internal(format!("contract {} unreadable: {}", script_hash, e))
        })?;
        Ok(DeployCodeInfo::from(&state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::domain::codes;
    use shared_types::{ContractParameterType, FunctionCode};

    fn state() -> ContractState {
        ContractState {
            code: FunctionCode {
                code: vec![0x51, 0x52, 0x93],
                parameter_types: vec![
                    ContractParameterType::Integer,
                    ContractParameterType::ByteArray,
                ],
                return_type: ContractParameterType::Boolean,
            },
            name: "adder".into(),
            version: "1.0".into(),
            author: "alice".into(),
            email: "alice@example.org".into(),
            description: "adds".into(),
            language: 0,
            program_hash: Uint160([6; 20]),
        }
    }

    #[test]
    fn test_contract_shaped() {
        let ledger = Arc::new(InMemoryLedger::new());
        let hash = ledger.insert_contract(&state()).unwrap();
        let info = ContractRpc::new(ledger).contract(&hash).unwrap();
        assert_eq!(info.name, "adder");
        assert_eq!(info.code.code, "515293");
        assert_eq!(info.code.parameter_types, vec![0x02, 0x05]);
        assert_eq!(info.code.return_type, 0x01);
        assert_eq!(info.code.code_hash, hash.to_string());
        assert_eq!(info.program_hash, "06".repeat(20));
    }

    #[test]
    fn test_missing_contract_is_invalid_params() {
        let rpc = ContractRpc::new(Arc::new(InMemoryLedger::new()));
        let err = rpc.contract(&Uint160([1; 20])).unwrap_err();
        assert_eq!(err.code, codes::INVALID_PARAMS);
    }

    #[test]
    fn test_corrupt_contract_is_internal() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.insert_contract_bytes(Uint160([2; 20]), vec![0xff, 0x00]);
        let err = ContractRpc::new(ledger).contract(&Uint160([2; 20])).unwrap_err();
        assert_eq!(err.code, codes::INTERNAL_ERROR);
    }
}
