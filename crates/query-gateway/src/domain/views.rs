//! Result shapes returned by the query surface.
//!
//! Field names follow the established PascalCase wire contract. Identifiers
//! are display-encoded, byte blobs are plain hex, and amounts are decimal
//! strings.

use serde::Serialize;

use shared_types::{
    ArticleRecord, Asset, Block, BlockHeader, ContractState, FunctionCode, LikeRecord,
    LockedAsset, Payload, Program, Transaction, TxAttribute, TxOutput, UnspentOutput, UtxoInput,
};

use super::codec::{encode_raw, encode_uint160, encode_uint256};

/// Either the plain hex of an entity's wire bytes or its structured view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered<T> {
    Raw(String),
    Structured(T),
}

// =============================================================================
// CHAIN
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgramInfo {
    pub code: String,
    pub parameter: String,
}

impl From<&Program> for ProgramInfo {
    fn from(program: &Program) -> Self {
        Self {
            code: encode_raw(&program.code),
            parameter: encode_raw(&program.parameter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockHead {
    pub version: u32,
    pub prev_block_hash: String,
    pub transactions_root: String,
    pub timestamp: u32,
    pub height: u32,
    pub consensus_data: u64,
    pub next_book_keeper: String,
    pub program: ProgramInfo,
    pub hash: String,
}

impl From<&BlockHeader> for BlockHead {
    fn from(header: &BlockHeader) -> Self {
        Self {
            version: header.version,
            prev_block_hash: encode_uint256(&header.prev_block_hash),
            transactions_root: encode_uint256(&header.transactions_root),
            timestamp: header.timestamp,
            height: header.height,
            consensus_data: header.consensus_data,
            next_book_keeper: encode_uint160(&header.next_bookkeeper),
            program: ProgramInfo::from(&header.program),
            hash: encode_uint256(&header.hash()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockInfo {
    pub hash: String,
    pub block_data: BlockHead,
    pub transactions: Vec<TransactionInfo>,
}

impl From<&Block> for BlockInfo {
    fn from(block: &Block) -> Self {
        Self {
            hash: encode_uint256(&block.hash()),
            block_data: BlockHead::from(&block.header),
            transactions: block.transactions.iter().map(TransactionInfo::from).collect(),
        }
    }
}

/// A block's transaction hashes, in block order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockTransactions {
    pub hash: String,
    pub height: u32,
    pub transactions: Vec<String>,
}

impl From<&Block> for BlockTransactions {
    fn from(block: &Block) -> Self {
        Self {
            hash: encode_uint256(&block.hash()),
            height: block.height(),
            transactions: block
                .transactions
                .iter()
                .map(|tx| encode_uint256(&tx.hash()))
                .collect(),
        }
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TxAttributeInfo {
    pub usage: u8,
    pub data: String,
}

impl From<&TxAttribute> for TxAttributeInfo {
    fn from(attr: &TxAttribute) -> Self {
        Self {
            usage: attr.usage,
            data: encode_raw(&attr.data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtxoInputInfo {
    #[serde(rename = "ReferTxID")]
    pub refer_txid: String,
    #[serde(rename = "ReferTxOutputIndex")]
    pub refer_output_index: u16,
}

impl From<&UtxoInput> for UtxoInputInfo {
    fn from(input: &UtxoInput) -> Self {
        Self {
            refer_txid: encode_uint256(&input.refer_txid),
            refer_output_index: input.refer_output_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxOutputInfo {
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "ProgramHash")]
    pub program_hash: String,
    #[serde(rename = "Address")]
    pub address: String,
}

impl From<&TxOutput> for TxOutputInfo {
    fn from(output: &TxOutput) -> Self {
        Self {
            asset_id: encode_uint256(&output.asset_id),
            value: output.value.to_string(),
            program_hash: encode_uint160(&output.program_hash),
            address: output.program_hash.to_address(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionCodeInfo {
    pub code: String,
    pub parameter_types: Vec<u8>,
    pub return_type: u8,
    pub code_hash: String,
}

impl From<&FunctionCode> for FunctionCodeInfo {
    fn from(code: &FunctionCode) -> Self {
        Self {
            code: encode_raw(&code.code),
            parameter_types: code.parameter_types.iter().map(|t| t.code()).collect(),
            return_type: code.return_type.code(),
            code_hash: encode_uint160(&code.code_hash()),
        }
    }
}

/// Contract metadata, shared by DeployCode payloads and contract lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployCodeInfo {
    pub code: FunctionCodeInfo,
    pub name: String,
    pub version: String,
    pub author: String,
    pub email: String,
    pub description: String,
    pub language: u8,
    pub program_hash: String,
}

impl From<&ContractState> for DeployCodeInfo {
    fn from(state: &ContractState) -> Self {
        Self {
            code: FunctionCodeInfo::from(&state.code),
            name: state.name.clone(),
            version: state.version.clone(),
            author: state.author.clone(),
            email: state.email.clone(),
            description: state.description.clone(),
            language: state.language,
            program_hash: encode_uint160(&state.program_hash),
        }
    }
}

/// Type-specific payload view. Payload-less types render as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadInfo {
    #[serde(rename_all = "PascalCase")]
    BookKeeping { nonce: u64 },
    #[serde(rename_all = "PascalCase")]
    RegisterAsset {
        asset: AssetInfo,
        amount: String,
        issuer: String,
        controller: String,
    },
    #[serde(rename_all = "PascalCase")]
    Record { record_type: String, record_data: String },
    #[serde(rename_all = "PascalCase")]
    RegisterUser {
        user_name: String,
        user_program_hash: String,
    },
    #[serde(rename_all = "PascalCase")]
    PostArticle { author: String, content_hash: String },
    #[serde(rename_all = "PascalCase")]
    ReplyArticle {
        post_hash: String,
        content_hash: String,
        replier: String,
    },
    #[serde(rename_all = "PascalCase")]
    LikeArticle {
        post_hash: String,
        liker: String,
        like_type: &'static str,
    },
    #[serde(rename_all = "PascalCase")]
    Withdrawal {
        user_name: String,
        recipient: String,
        #[serde(rename = "AssetID")]
        asset_id: String,
        amount: String,
    },
    DeployCode(Box<DeployCodeInfo>),
    #[serde(rename_all = "PascalCase")]
    InvokeCode { code: String, program_hash: String },
}

impl PayloadInfo {
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        let info = match payload {
            Payload::IssueAsset | Payload::TransferAsset => return None,
            Payload::BookKeeping { nonce } => PayloadInfo::BookKeeping { nonce: *nonce },
            Payload::RegisterAsset {
                asset,
                amount,
                issuer,
                controller,
            } => PayloadInfo::RegisterAsset {
                asset: AssetInfo::from(asset),
                amount: amount.to_string(),
                issuer: encode_raw(issuer),
                controller: encode_uint160(controller),
            },
            Payload::Record { record_type, data } => PayloadInfo::Record {
                record_type: record_type.clone(),
                record_data: encode_raw(data),
            },
            Payload::RegisterUser {
                username,
                user_program_hash,
            } => PayloadInfo::RegisterUser {
                user_name: username.clone(),
                user_program_hash: encode_uint160(user_program_hash),
            },
            Payload::PostArticle {
                author,
                content_hash,
            } => PayloadInfo::PostArticle {
                author: author.clone(),
                content_hash: encode_raw(content_hash.as_bytes()),
            },
            Payload::ReplyArticle {
                post_hash,
                content_hash,
                replier,
            } => PayloadInfo::ReplyArticle {
                post_hash: encode_uint256(post_hash),
                content_hash: encode_raw(content_hash.as_bytes()),
                replier: replier.clone(),
            },
            Payload::LikeArticle {
                post_hash,
                liker,
                like_type,
            } => PayloadInfo::LikeArticle {
                post_hash: encode_uint256(post_hash),
                liker: liker.clone(),
                like_type: like_type.as_str(),
            },
            Payload::Withdrawal {
                username,
                recipient,
                asset_id,
                amount,
            } => PayloadInfo::Withdrawal {
                user_name: username.clone(),
                recipient: encode_uint160(recipient),
                asset_id: encode_uint256(asset_id),
                amount: amount.to_string(),
            },
            Payload::DeployCode {
                code,
                name,
                version,
                author,
                email,
                description,
                language,
                program_hash,
            } => PayloadInfo::DeployCode(Box::new(DeployCodeInfo {
                code: FunctionCodeInfo::from(code),
                name: name.clone(),
                version: version.clone(),
                author: author.clone(),
                email: email.clone(),
                description: description.clone(),
                language: *language,
                program_hash: encode_uint160(program_hash),
            })),
            Payload::InvokeCode { code, program_hash } => PayloadInfo::InvokeCode {
                code: encode_raw(code),
                program_hash: encode_uint160(program_hash),
            },
        };
        Some(info)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionInfo {
    pub tx_type: u8,
    pub payload_version: u8,
    pub payload: Option<PayloadInfo>,
    pub attributes: Vec<TxAttributeInfo>,
    #[serde(rename = "UTXOInputs")]
    pub utxo_inputs: Vec<UtxoInputInfo>,
    pub outputs: Vec<TxOutputInfo>,
    pub programs: Vec<ProgramInfo>,
    pub hash: String,
}

impl From<&Transaction> for TransactionInfo {
    fn from(tx: &Transaction) -> Self {
        Self {
            tx_type: tx.tx_type().as_u8(),
            payload_version: tx.payload_version,
            payload: PayloadInfo::from_payload(&tx.payload),
            attributes: tx.attributes.iter().map(TxAttributeInfo::from).collect(),
            utxo_inputs: tx.inputs.iter().map(UtxoInputInfo::from).collect(),
            outputs: tx.outputs.iter().map(TxOutputInfo::from).collect(),
            programs: tx.programs.iter().map(ProgramInfo::from).collect(),
            hash: encode_uint256(&tx.hash()),
        }
    }
}

// =============================================================================
// ASSETS AND VALUE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetInfo {
    pub name: String,
    pub description: String,
    pub precision: u8,
    pub asset_type: u8,
    pub record_type: u8,
}

impl From<&Asset> for AssetInfo {
    fn from(asset: &Asset) -> Self {
        Self {
            name: asset.name.clone(),
            description: asset.description.clone(),
            precision: asset.precision,
            asset_type: asset.asset_type,
            record_type: asset.record_type,
        }
    }
}

/// One unspent output, as listed by the unspent-output operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UtxoInfo {
    pub txid: String,
    pub index: u32,
    pub value: String,
}

impl From<&UnspentOutput> for UtxoInfo {
    fn from(utxo: &UnspentOutput) -> Self {
        Self {
            txid: encode_uint256(&utxo.txid),
            index: utxo.index,
            value: utxo.value.to_string(),
        }
    }
}

/// An owner's unspent outputs of one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetUtxos {
    pub asset_id: String,
    pub asset_name: String,
    pub utxo: Vec<UtxoInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LockedInfo {
    pub lock: u32,
    pub unlock: u32,
    pub amount: String,
}

impl From<&LockedAsset> for LockedInfo {
    fn from(locked: &LockedAsset) -> Self {
        Self {
            lock: locked.lock,
            unlock: locked.unlock,
            amount: locked.amount.to_string(),
        }
    }
}

// =============================================================================
// FORUM
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfo {
    pub program_hash: String,
    pub reputation: String,
    pub total_token: String,
    pub withdrawn_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArticleInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_txn_hash: Option<String>,
    /// Plain hex; content digests are not display-reversed.
    pub content_hash: String,
    pub content_type: &'static str,
}

impl From<&ArticleRecord> for ArticleInfo {
    fn from(article: &ArticleRecord) -> Self {
        Self {
            parent_txn_hash: article.parent().map(|h| encode_uint256(&h)),
            content_hash: encode_raw(article.content_hash.as_bytes()),
            content_type: article.content_type.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LikeEntry {
    pub liker: String,
    pub like_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LikeInfo {
    pub post_hash: String,
    pub likes: Vec<LikeEntry>,
}

impl From<&LikeRecord> for LikeInfo {
    fn from(record: &LikeRecord) -> Self {
        Self {
            post_hash: encode_uint256(&record.post_hash),
            likes: record
                .likes
                .iter()
                .map(|like| LikeEntry {
                    liker: like.liker.clone(),
                    like_type: like.like_type.as_str(),
                })
                .collect(),
        }
    }
}
