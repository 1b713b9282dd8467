//! # Contract State
//!
//! Deployed code and its metadata, as persisted by the contract store.

use serde::{Deserialize, Serialize};

use crate::primitives::{hash160, Uint160};

/// Virtual-machine parameter and return types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractParameterType {
    Signature,
    Boolean,
    Integer,
    Hash160,
    Hash256,
    ByteArray,
    PublicKey,
    String,
    Object,
    Array,
    Void,
}

impl ContractParameterType {
    /// The VM's integer code for this type.
    pub fn code(&self) -> u8 {
        match self {
            ContractParameterType::Signature => 0x00,
            ContractParameterType::Boolean => 0x01,
            ContractParameterType::Integer => 0x02,
            ContractParameterType::Hash160 => 0x03,
            ContractParameterType::Hash256 => 0x04,
            ContractParameterType::ByteArray => 0x05,
            ContractParameterType::PublicKey => 0x06,
            ContractParameterType::String => 0x07,
            ContractParameterType::Object => 0x08,
            ContractParameterType::Array => 0x10,
            ContractParameterType::Void => 0xff,
        }
    }
}

/// Deployed code with its calling convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCode {
    pub code: Vec<u8>,
    pub parameter_types: Vec<ContractParameterType>,
    pub return_type: ContractParameterType,
}

impl FunctionCode {
    /// Script hash of the code. Always re-derived, never stored.
    pub fn code_hash(&self) -> Uint160 {
        hash160(&self.code)
    }
}

/// Contract as persisted by the contract store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    pub code: FunctionCode,
    pub name: String,
    pub version: String,
    pub author: String,
    pub email: String,
    pub description: String,
    pub language: u8,
    pub program_hash: Uint160,
}
