//! Request parameters and their typed, validated form.
//!
//! Callers hand the gateway a loose key/value record. Each action turns it
//! into a [`QueryRequest`] up front, so handlers only ever see well-formed
//! heights, identifiers, addresses, and usernames.

use serde_json::{Map, Value};
use shared_types::{Uint160, Uint256};

use super::codec::{decode_uint160, decode_uint256};
use super::config::ForumConfig;
use super::error::{ApiError, ApiResult};
use super::methods::Method;

/// Untyped request parameters, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamRecord(Map<String, Value>);

impl ParamRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters taken from a URL query string; every value is a string.
    /// A key given twice is ambiguous and rejected.
    pub fn from_query_pairs(pairs: Vec<(String, String)>) -> ApiResult<Self> {
        let mut map = Map::with_capacity(pairs.len());
        for (key, value) in pairs {
            if map.contains_key(&key) {
                return Err(ApiError::invalid_params(format!(
                    "parameter {} given more than once",
                    key
                )));
            }
            map.insert(key, Value::String(value));
        }
        Ok(Self(map))
    }

    /// Parameters taken from a JSON body, which must be an object.
    pub fn from_json(body: Value) -> ApiResult<Self> {
        match body {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(ApiError::invalid_params(format!(
                "request body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A string parameter that may be absent. Present but non-string is an error.
    pub fn optional_str(&self, key: &str) -> ApiResult<Option<&str>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ApiError::invalid_params(format!(
                "'{}' must be a string, got {}",
                key,
                json_kind(other)
            ))),
        }
    }

    pub fn required_str(&self, key: &str) -> ApiResult<&str> {
        self.optional_str(key)?
            .ok_or_else(|| ApiError::missing_param(key))
    }

    /// Raw mode is requested only by the exact string "1".
    pub fn raw_flag(&self) -> ApiResult<bool> {
        Ok(self.optional_str("Raw")? == Some("1"))
    }

    pub fn height(&self) -> ApiResult<u32> {
        let raw = self.required_str("Height")?;
        raw.parse::<u32>().map_err(|_| {
            ApiError::invalid_params(format!("'Height' is not a block height: {}", raw))
        })
    }

    pub fn uint256(&self, key: &str) -> ApiResult<Uint256> {
        decode_uint256(self.required_str(key)?)
            .map_err(|e| ApiError::invalid_params(format!("'{}': {}", key, e)))
    }

    pub fn uint160(&self, key: &str) -> ApiResult<Uint160> {
        decode_uint160(self.required_str(key)?)
            .map_err(|e| ApiError::invalid_params(format!("'{}': {}", key, e)))
    }

    /// A base58check address, resolved to its script hash.
    pub fn address(&self) -> ApiResult<Uint160> {
        Ok(Uint160::from_address(self.required_str("Addr")?)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A forum username whose length is within the configured bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str, rules: &ForumConfig) -> ApiResult<Self> {
        let len = raw.chars().count();
        if len < rules.min_username_len || len > rules.max_username_len {
            return Err(ApiError::invalid_params(format!(
                "'Username' must be {} to {} characters, got {}",
                rules.min_username_len, rules.max_username_len, len
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated request for one action.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRequest {
    ConnectionCount,
    BlockHeight,
    BlockHash { height: u32 },
    TotalIssued { asset_id: Uint256 },
    BlockByHash { hash: Uint256, raw: bool },
    BlockByHeight { height: u32, raw: bool },
    BlockTxsByHeight { height: u32 },
    AssetByHash { hash: Uint256, raw: bool },
    BalanceByAddr { owner: Uint160 },
    /// The asset filter is matched against display-encoded asset ids as a string.
    BalanceByAsset { owner: Uint160, asset_id: String },
    LockedAsset { owner: Uint160, asset_id: Uint256 },
    Unspends { owner: Uint160 },
    UnspendOutput { owner: Uint160, asset_id: Uint256 },
    TransactionByHash { hash: Uint256, raw: bool },
    UserInfo { username: Username },
    UserArticleInfo { username: Username },
    LikeInfo { post_hash: Uint256 },
    Contract { script_hash: Uint160 },
    /// `data` is still hex here; decoding belongs to the submission gate.
    SendRawTransaction { data: String, userid: Option<String> },
}

impl QueryRequest {
    pub fn parse(method: Method, params: &ParamRecord, forum: &ForumConfig) -> ApiResult<Self> {
        let request = match method {
            Method::GetConnectionCount => QueryRequest::ConnectionCount,
            Method::GetBlockHeight => QueryRequest::BlockHeight,
            Method::GetBlockHash => QueryRequest::BlockHash {
                height: params.height()?,
            },
            Method::GetTotalIssued => QueryRequest::TotalIssued {
                asset_id: params.uint256("Assetid")?,
            },
            Method::GetBlockByHash => QueryRequest::BlockByHash {
                hash: params.uint256("Hash")?,
                raw: params.raw_flag()?,
            },
            Method::GetBlockByHeight => QueryRequest::BlockByHeight {
                height: params.height()?,
                raw: params.raw_flag()?,
            },
            Method::GetBlockTxsByHeight => QueryRequest::BlockTxsByHeight {
                height: params.height()?,
            },
            Method::GetAssetByHash => QueryRequest::AssetByHash {
                hash: params.uint256("Hash")?,
                raw: params.raw_flag()?,
            },
            Method::GetBalanceByAddr => QueryRequest::BalanceByAddr {
                owner: params.address()?,
            },
            Method::GetBalanceByAsset => QueryRequest::BalanceByAsset {
                owner: params.address()?,
                asset_id: params.required_str("Assetid")?.to_string(),
            },
            Method::GetLockedAsset => QueryRequest::LockedAsset {
                owner: params.address()?,
                asset_id: params.uint256("Assetid")?,
            },
            Method::GetUnspends => QueryRequest::Unspends {
                owner: params.address()?,
            },
            Method::GetUnspendOutput => QueryRequest::UnspendOutput {
                owner: params.address()?,
                asset_id: params.uint256("Assetid")?,
            },
            Method::GetTransactionByHash => QueryRequest::TransactionByHash {
                hash: params.uint256("Hash")?,
                raw: params.raw_flag()?,
            },
            Method::GetUserInfo => QueryRequest::UserInfo {
                username: Username::parse(params.required_str("Username")?, forum)?,
            },
            Method::GetUserArticleInfo => QueryRequest::UserArticleInfo {
                username: Username::parse(params.required_str("Username")?, forum)?,
            },
            Method::GetLikeInfo => QueryRequest::LikeInfo {
                post_hash: params.uint256("Posthash")?,
            },
            Method::GetContract => QueryRequest::Contract {
                script_hash: params.uint160("Hash")?,
            },
            Method::SendRawTransaction => QueryRequest::SendRawTransaction {
                data: params.required_str("Data")?.to_string(),
                userid: params.optional_str("Userid")?.map(str::to_string),
            },
        };
        Ok(request)
    }
}
