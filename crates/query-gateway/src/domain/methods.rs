//! Action registry: every operation the query surface exposes.
//!
//! Actions are looked up by lowercase name. Anything not in the registry is
//! answered with `InvalidMethod`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One query-surface operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GetConnectionCount,
    GetBlockHeight,
    GetBlockHash,
    GetTotalIssued,
    GetBlockByHash,
    GetBlockByHeight,
    GetBlockTxsByHeight,
    GetAssetByHash,
    GetBalanceByAddr,
    GetBalanceByAsset,
    GetLockedAsset,
    GetUnspends,
    GetUnspendOutput,
    GetTransactionByHash,
    GetUserInfo,
    GetUserArticleInfo,
    GetLikeInfo,
    GetContract,
    SendRawTransaction,
}

/// Method category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodCategory {
    Node,
    Chain,
    Asset,
    Forum,
    Contract,
    Submit,
}

impl MethodCategory {
    pub const ALL: [MethodCategory; 6] = [
        MethodCategory::Node,
        MethodCategory::Chain,
        MethodCategory::Asset,
        MethodCategory::Forum,
        MethodCategory::Contract,
        MethodCategory::Submit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodCategory::Node => "node",
            MethodCategory::Chain => "chain",
            MethodCategory::Asset => "asset",
            MethodCategory::Forum => "forum",
            MethodCategory::Contract => "contract",
            MethodCategory::Submit => "submit",
        }
    }
}

/// Method metadata
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Action name as it appears in the request path
    pub name: &'static str,
    pub method: Method,
    pub category: MethodCategory,
    /// Parameter keys the action reads
    pub params: &'static [&'static str],
    /// Is this a write operation?
    pub is_write: bool,
    /// Brief description
    pub description: &'static str,
}

impl MethodInfo {
    const fn read(
        name: &'static str,
        method: Method,
        category: MethodCategory,
        params: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self {
            name,
            method,
            category,
            params,
            is_write: false,
            description,
        }
    }

    const fn write(
        name: &'static str,
        method: Method,
        category: MethodCategory,
        params: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self {
            name,
            method,
            category,
            params,
            is_write: true,
            description,
        }
    }
}

/// Method registry - all supported actions with metadata
pub static METHOD_REGISTRY: LazyLock<HashMap<&'static str, MethodInfo>> = LazyLock::new(|| {
    use Method::*;
    use MethodCategory as C;

    let methods = [
        // --- Node ---
        MethodInfo::read(
            "getconnectioncount",
            GetConnectionCount,
            C::Node,
            &[],
            "Number of connected peers",
        ),
        // --- Chain ---
        MethodInfo::read(
            "getblockheight",
            GetBlockHeight,
            C::Chain,
            &[],
            "Height of the current tip",
        ),
        MethodInfo::read(
            "getblockhash",
            GetBlockHash,
            C::Chain,
            &["Height"],
            "Hash of the block at a height",
        ),
        MethodInfo::read(
            "getblockbyhash",
            GetBlockByHash,
            C::Chain,
            &["Hash", "Raw"],
            "Block by hash, structured or raw",
        ),
        MethodInfo::read(
            "getblockbyheight",
            GetBlockByHeight,
            C::Chain,
            &["Height", "Raw"],
            "Block by height, structured or raw",
        ),
        MethodInfo::read(
            "getblocktxsbyheight",
            GetBlockTxsByHeight,
            C::Chain,
            &["Height"],
            "Transaction hashes of the block at a height",
        ),
        MethodInfo::read(
            "gettransactionbyhash",
            GetTransactionByHash,
            C::Chain,
            &["Hash", "Raw"],
            "Transaction by hash, structured or raw",
        ),
        // --- Assets and balances ---
        MethodInfo::read(
            "gettotalissued",
            GetTotalIssued,
            C::Asset,
            &["Assetid"],
            "Total amount issued of an asset",
        ),
        MethodInfo::read(
            "getassetbyhash",
            GetAssetByHash,
            C::Asset,
            &["Hash", "Raw"],
            "Asset metadata, structured or raw",
        ),
        MethodInfo::read(
            "getbalancebyaddr",
            GetBalanceByAddr,
            C::Asset,
            &["Addr"],
            "Sum of every unspent output of an address",
        ),
        MethodInfo::read(
            "getbalancebyasset",
            GetBalanceByAsset,
            C::Asset,
            &["Addr", "Assetid"],
            "Sum of an address's unspent outputs of one asset",
        ),
        MethodInfo::read(
            "getlockedasset",
            GetLockedAsset,
            C::Asset,
            &["Addr", "Assetid"],
            "Locked-asset schedule of an address for one asset",
        ),
        MethodInfo::read(
            "getunspends",
            GetUnspends,
            C::Asset,
            &["Addr"],
            "Unspent outputs of an address grouped by asset",
        ),
        MethodInfo::read(
            "getunspendoutput",
            GetUnspendOutput,
            C::Asset,
            &["Addr", "Assetid"],
            "Unspent outputs of an address for one asset",
        ),
        // --- Forum ---
        MethodInfo::read(
            "getuserinfo",
            GetUserInfo,
            C::Forum,
            &["Username"],
            "User program hash, reputation, and token counters",
        ),
        MethodInfo::read(
            "getuserarticleinfo",
            GetUserArticleInfo,
            C::Forum,
            &["Username"],
            "Articles authored by a user",
        ),
        MethodInfo::read(
            "getlikeinfo",
            GetLikeInfo,
            C::Forum,
            &["Posthash"],
            "Reactions recorded on an article",
        ),
        // --- Contracts ---
        MethodInfo::read(
            "getcontract",
            GetContract,
            C::Contract,
            &["Hash"],
            "Deployed contract by script hash",
        ),
        // --- Submission ---
        MethodInfo::write(
            "sendrawtransaction",
            SendRawTransaction,
            C::Submit,
            &["Data", "Userid"],
            "Submit a serialized transaction for relay",
        ),
    ];

    methods.into_iter().map(|m| (m.name, m)).collect()
});

/// Get method info by action name (case-insensitive)
pub fn get_method_info(action: &str) -> Option<&'static MethodInfo> {
    METHOD_REGISTRY.get(action.to_ascii_lowercase().as_str())
}

/// Check if action is supported
pub fn is_method_supported(action: &str) -> bool {
    get_method_info(action).is_some()
}

/// Get all actions for a category
pub fn get_methods_by_category(category: MethodCategory) -> Vec<&'static str> {
    let mut names: Vec<_> = METHOD_REGISTRY
        .values()
        .filter(|m| m.category == category)
        .map(|m| m.name)
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_registry() {
        assert_eq!(METHOD_REGISTRY.len(), 19);
        assert!(is_method_supported("getblockheight"));
        assert!(is_method_supported("sendrawtransaction"));
        assert!(!is_method_supported("getstateupdate"));
        assert!(!is_method_supported("getfoo"));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let info = get_method_info("GetBlockByHeight").unwrap();
        assert_eq!(info.method, Method::GetBlockByHeight);
        assert_eq!(info.params, &["Height", "Raw"]);
    }

    #[test]
    fn test_only_submission_writes() {
        let writes: Vec<_> = METHOD_REGISTRY
            .values()
            .filter(|m| m.is_write)
            .map(|m| m.name)
            .collect();
        assert_eq!(writes, vec!["sendrawtransaction"]);
    }

    #[test]
    fn test_get_methods_by_category() {
        assert_eq!(
            get_methods_by_category(MethodCategory::Forum),
            vec!["getlikeinfo", "getuserarticleinfo", "getuserinfo"]
        );
        let total: usize = MethodCategory::ALL
            .iter()
            .map(|c| get_methods_by_category(*c).len())
            .sum();
        assert_eq!(total, METHOD_REGISTRY.len());
    }
}
