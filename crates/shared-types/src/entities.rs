//! # Core Ledger Entities
//!
//! Blocks, transactions, assets, and the owner-keyed value records derived
//! from them. Every entity here is produced by the ledger as transactions
//! confirm; consumers only read snapshots.
//!
//! ## Clusters
//!
//! - **Chain**: `Block`, `BlockHeader`, `Program`
//! - **Transactions**: `Transaction`, `TransactionType`, `Payload`, inputs/outputs
//! - **Value**: `Asset`, `UnspentOutput`, `LockedAsset`

use serde::{Deserialize, Serialize};

use crate::contract::FunctionCode;
use crate::forum::LikeType;
use crate::primitives::{double_sha256, Fixed64, Uint160, Uint256};
use crate::wire::to_wire;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// Signature program: verification script plus its invocation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    pub code: Vec<u8>,
    pub parameter: Vec<u8>,
}

/// Block header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Protocol version.
    pub version: u32,
    /// Hash of the parent block.
    pub prev_block_hash: Uint256,
    /// Merkle root of the block's transactions.
    pub transactions_root: Uint256,
    /// Unix timestamp (seconds).
    pub timestamp: u32,
    /// Height in the chain; genesis is 0.
    pub height: u32,
    /// Consensus nonce.
    pub consensus_data: u64,
    /// Script hash of the bookkeepers for the next block.
    pub next_bookkeeper: Uint160,
    /// Bookkeeper signature. Excluded from the hash.
    pub program: Program,
}

impl BlockHeader {
    /// Block identity: double SHA-256 over every field except the signature program.
    pub fn hash(&self) -> Uint256 {
        let unsigned = (
            self.version,
            &self.prev_block_hash,
            &self.transactions_root,
            self.timestamp,
            self.height,
            self.consensus_data,
            &self.next_bookkeeper,
        );
        // encoding in-memory values into a Vec does not fail
        double_sha256(&to_wire(&unsigned).unwrap_or_default())
    }
}

/// A confirmed block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> Uint256 {
        self.header.hash()
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }
}

// =============================================================================
// CLUSTER B: TRANSACTIONS
// =============================================================================

/// Transaction type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    BookKeeping,
    IssueAsset,
    RegisterAsset,
    TransferAsset,
    Record,
    RegisterUser,
    PostArticle,
    ReplyArticle,
    LikeArticle,
    Withdrawal,
    DeployCode,
    InvokeCode,
}

impl TransactionType {
    /// Numeric tag used on the query surface.
    pub fn as_u8(&self) -> u8 {
        match self {
            TransactionType::BookKeeping => 0x00,
            TransactionType::IssueAsset => 0x01,
            TransactionType::RegisterAsset => 0x40,
            TransactionType::TransferAsset => 0x80,
            TransactionType::Record => 0x81,
            TransactionType::RegisterUser => 0x90,
            TransactionType::PostArticle => 0x91,
            TransactionType::ReplyArticle => 0x92,
            TransactionType::LikeArticle => 0x93,
            TransactionType::Withdrawal => 0x94,
            TransactionType::DeployCode => 0xd0,
            TransactionType::InvokeCode => 0xd1,
        }
    }
}

/// Type-specific transaction body. The variant *is* the transaction type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    BookKeeping {
        nonce: u64,
    },
    IssueAsset,
    RegisterAsset {
        asset: Asset,
        amount: Fixed64,
        /// Issuer public key bytes.
        issuer: Vec<u8>,
        controller: Uint160,
    },
    TransferAsset,
    Record {
        record_type: String,
        data: Vec<u8>,
    },
    RegisterUser {
        username: String,
        user_program_hash: Uint160,
    },
    PostArticle {
        author: String,
        content_hash: Uint256,
    },
    ReplyArticle {
        post_hash: Uint256,
        content_hash: Uint256,
        replier: String,
    },
    LikeArticle {
        post_hash: Uint256,
        liker: String,
        like_type: LikeType,
    },
    Withdrawal {
        username: String,
        recipient: Uint160,
        asset_id: Uint256,
        amount: Fixed64,
    },
    DeployCode {
        code: FunctionCode,
        name: String,
        version: String,
        author: String,
        email: String,
        description: String,
        language: u8,
        program_hash: Uint160,
    },
    InvokeCode {
        code: Vec<u8>,
        program_hash: Uint160,
    },
}

impl Payload {
    pub fn tx_type(&self) -> TransactionType {
        match self {
            Payload::BookKeeping { .. } => TransactionType::BookKeeping,
            Payload::IssueAsset => TransactionType::IssueAsset,
            Payload::RegisterAsset { .. } => TransactionType::RegisterAsset,
            Payload::TransferAsset => TransactionType::TransferAsset,
            Payload::Record { .. } => TransactionType::Record,
            Payload::RegisterUser { .. } => TransactionType::RegisterUser,
            Payload::PostArticle { .. } => TransactionType::PostArticle,
            Payload::ReplyArticle { .. } => TransactionType::ReplyArticle,
            Payload::LikeArticle { .. } => TransactionType::LikeArticle,
            Payload::Withdrawal { .. } => TransactionType::Withdrawal,
            Payload::DeployCode { .. } => TransactionType::DeployCode,
            Payload::InvokeCode { .. } => TransactionType::InvokeCode,
        }
    }
}

/// Free-form transaction attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxAttribute {
    pub usage: u8,
    pub data: Vec<u8>,
}

/// Reference to an output being spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoInput {
    pub refer_txid: Uint256,
    pub refer_output_index: u16,
}

/// Value assigned to a script hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub asset_id: Uint256,
    pub value: Fixed64,
    pub program_hash: Uint160,
}

/// A ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub payload_version: u8,
    pub payload: Payload,
    pub attributes: Vec<TxAttribute>,
    pub inputs: Vec<UtxoInput>,
    pub outputs: Vec<TxOutput>,
    /// Witness programs. Excluded from the hash.
    pub programs: Vec<Program>,
}

impl Transaction {
    /// Bare transaction with no attributes, inputs, outputs, or witnesses.
    pub fn new(payload: Payload) -> Self {
        Self {
            payload_version: 0,
            payload,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            programs: Vec::new(),
        }
    }

    pub fn tx_type(&self) -> TransactionType {
        self.payload.tx_type()
    }

    /// Transaction identity: double SHA-256 over everything except witnesses.
    pub fn hash(&self) -> Uint256 {
        let unsigned = (
            self.payload_version,
            &self.payload,
            &self.attributes,
            &self.inputs,
            &self.outputs,
        );
        double_sha256(&to_wire(&unsigned).unwrap_or_default())
    }
}

// =============================================================================
// CLUSTER C: VALUE
// =============================================================================

/// Registered asset metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub description: String,
    /// Decimal places honoured by transfers of this asset.
    pub precision: u8,
    /// 0 currency, 1 share, 2 invoice, 3 token.
    pub asset_type: u8,
    /// 0 unique record, 1 balance record.
    pub record_type: u8,
}

/// An output nobody has spent yet, keyed by `(txid, index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub owner: Uint160,
    pub asset_id: Uint256,
    pub txid: Uint256,
    pub index: u32,
    pub value: Fixed64,
}

/// Value earmarked to an owner, spendable once the chain reaches `unlock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedAsset {
    pub owner: Uint160,
    pub asset_id: Uint256,
    pub lock: u32,
    pub unlock: u32,
    pub amount: Fixed64,
}
