//! The uniform response envelope.
//!
//! Every action, successful or not, answers with the same five fields.
//! `Result` is an empty string until an operation fills it in, and `Error`
//! is 0 exactly when the operation succeeded.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use shared_types::Fixed64;

use super::error::{codes, ApiError};
use super::views::{
    ArticleInfo, AssetInfo, AssetUtxos, BlockInfo, BlockTransactions, DeployCodeInfo, LikeInfo,
    LockedInfo, Rendered, TransactionInfo, UserInfo, UtxoInfo,
};

/// Version string carried by every envelope.
pub const API_VERSION: &str = "1.0.0";

/// Per-action result payload.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Nothing filled in yet (and the value of every failure).
    Empty,
    ConnectionCount(u32),
    BlockHeight(u32),
    BlockHash(String),
    TotalIssued(Fixed64),
    Block(Box<Rendered<BlockInfo>>),
    BlockTransactions(BlockTransactions),
    Asset(Rendered<AssetInfo>),
    Balance(Fixed64),
    LockedAssets(Vec<LockedInfo>),
    Unspents(Vec<AssetUtxos>),
    UnspentOutputs(Vec<UtxoInfo>),
    Transaction(Box<Rendered<TransactionInfo>>),
    UserInfo(UserInfo),
    UserArticles(Vec<ArticleInfo>),
    LikeInfo(LikeInfo),
    Contract(Box<DeployCodeInfo>),
    /// Display hash of an accepted transaction.
    Submitted(String),
}

impl Serialize for QueryResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            QueryResult::Empty => serializer.serialize_str(""),
            QueryResult::ConnectionCount(n) | QueryResult::BlockHeight(n) => {
                serializer.serialize_u32(*n)
            }
            QueryResult::BlockHash(s) | QueryResult::Submitted(s) => serializer.serialize_str(s),
            QueryResult::TotalIssued(amount) | QueryResult::Balance(amount) => {
                serializer.collect_str(amount)
            }
            QueryResult::Block(block) => block.serialize(serializer),
            QueryResult::BlockTransactions(txs) => txs.serialize(serializer),
            QueryResult::Asset(asset) => asset.serialize(serializer),
            QueryResult::LockedAssets(locked) => locked.serialize(serializer),
            QueryResult::Unspents(groups) => groups.serialize(serializer),
            QueryResult::UnspentOutputs(utxos) => utxos.serialize(serializer),
            QueryResult::Transaction(tx) => tx.serialize(serializer),
            QueryResult::UserInfo(user) => user.serialize(serializer),
            QueryResult::UserArticles(articles) => articles.serialize(serializer),
            QueryResult::LikeInfo(likes) => likes.serialize(serializer),
            QueryResult::Contract(contract) => contract.serialize(serializer),
        }
    }
}

/// Response to one action.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub action: String,
    pub result: QueryResult,
    pub error: i64,
    pub desc: String,
    pub version: &'static str,
    /// Caller correlation token, echoed only by an accepted submission.
    pub userid: Option<String>,
}

impl ResponseEnvelope {
    /// Fresh envelope carrying `error` and an empty result.
    pub fn new(error: i64) -> Self {
        Self {
            action: String::new(),
            result: QueryResult::Empty,
            error,
            desc: String::new(),
            version: API_VERSION,
            userid: None,
        }
    }

    pub fn success(action: impl Into<String>, result: QueryResult) -> Self {
        Self {
            action: action.into(),
            result,
            ..Self::new(codes::SUCCESS)
        }
    }

    /// Failed envelope. The result stays empty; the message goes to `Desc`.
    pub fn failure(action: impl Into<String>, err: &ApiError) -> Self {
        Self {
            action: action.into(),
            desc: err.message.clone(),
            ..Self::new(err.code)
        }
    }

    pub fn with_userid(mut self, userid: Option<String>) -> Self {
        self.userid = userid;
        self
    }

    pub fn is_success(&self) -> bool {
        self.error == codes::SUCCESS
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = if self.userid.is_some() { 6 } else { 5 };
        let mut state = serializer.serialize_struct("ResponseEnvelope", fields)?;
        state.serialize_field("Action", &self.action)?;
        state.serialize_field("Result", &self.result)?;
        state.serialize_field("Error", &self.error)?;
        state.serialize_field("Desc", &self.desc)?;
        state.serialize_field("Version", self.version)?;
        if let Some(ref userid) = self.userid {
            state.serialize_field("Userid", userid)?;
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_envelope_shape() {
        let json = serde_json::to_value(ResponseEnvelope::new(codes::SUCCESS)).unwrap();
        assert_eq!(json["Action"], "");
        assert_eq!(json["Result"], "");
        assert_eq!(json["Error"], 0);
        assert_eq!(json["Desc"], "");
        assert_eq!(json["Version"], "1.0.0");
        assert!(json.get("Userid").is_none());
    }

    #[test]
    fn test_failure_keeps_result_empty() {
        let err = ApiError::unknown_block(12);
        let envelope = ResponseEnvelope::failure("getblockhash", &err);
        assert!(!envelope.is_success());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["Error"], 44003);
        assert_eq!(json["Result"], "");
        assert!(json["Desc"].as_str().unwrap().contains("12"));
    }

    #[test]
    fn test_amounts_serialize_as_strings() {
        let envelope = ResponseEnvelope::success(
            "getbalancebyaddr",
            QueryResult::Balance(Fixed64(250_000_000)),
        );
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["Result"], "2.5");

        let zero =
            ResponseEnvelope::success("gettotalissued", QueryResult::TotalIssued(Fixed64::ZERO));
        assert_eq!(serde_json::to_value(&zero).unwrap()["Result"], "0");
    }

    #[test]
    fn test_userid_echo() {
        let envelope =
            ResponseEnvelope::success("sendrawtransaction", QueryResult::Submitted("ab".into()))
                .with_userid(Some("client-7".into()));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["Userid"], "client-7");
        assert_eq!(json["Result"], "ab");
    }

    #[test]
    fn test_relay_code_kept() {
        let envelope = ResponseEnvelope::failure("sendrawtransaction", &ApiError::relay(-1));
        assert_eq!(serde_json::to_value(&envelope).unwrap()["Error"], -1);
    }
}
