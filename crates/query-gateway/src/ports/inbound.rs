//! Inbound port: the query operations the gateway offers.

use shared_types::{Fixed64, Uint160, Uint256};

use crate::domain::views::{
    ArticleInfo, AssetInfo, AssetUtxos, BlockInfo, BlockTransactions, DeployCodeInfo, LikeInfo,
    LockedInfo, Rendered, TransactionInfo, UserInfo, UtxoInfo,
};
use crate::domain::{ApiResult, Username};

/// Read and submit operations over ledger state.
///
/// Inputs are already validated; implementations only resolve them
/// against the ledger.
pub trait QueryApi: Send + Sync {
    fn connection_count(&self) -> ApiResult<u32>;

    fn block_height(&self) -> ApiResult<u32>;

    fn block_hash(&self, height: u32) -> ApiResult<String>;

    fn total_issued(&self, asset_id: &Uint256) -> ApiResult<Fixed64>;

    fn block_by_hash(&self, hash: &Uint256, raw: bool) -> ApiResult<Rendered<BlockInfo>>;

    fn block_by_height(&self, height: u32, raw: bool) -> ApiResult<Rendered<BlockInfo>>;

    fn block_txs_by_height(&self, height: u32) -> ApiResult<BlockTransactions>;

    fn asset_by_hash(&self, asset_id: &Uint256, raw: bool) -> ApiResult<Rendered<AssetInfo>>;

    fn balance_by_addr(&self, owner: &Uint160) -> ApiResult<Fixed64>;

    fn balance_by_asset(&self, owner: &Uint160, asset_id: &str) -> ApiResult<Fixed64>;

    fn locked_assets(&self, owner: &Uint160, asset_id: &Uint256) -> ApiResult<Vec<LockedInfo>>;

    fn unspents(&self, owner: &Uint160) -> ApiResult<Vec<AssetUtxos>>;

    fn unspent_outputs(&self, owner: &Uint160, asset_id: &Uint256) -> ApiResult<Vec<UtxoInfo>>;

    fn transaction_by_hash(&self, hash: &Uint256, raw: bool)
        -> ApiResult<Rendered<TransactionInfo>>;

    fn user_info(&self, username: &Username) -> ApiResult<UserInfo>;

    fn user_articles(&self, username: &Username) -> ApiResult<Vec<ArticleInfo>>;

    fn like_info(&self, post_hash: &Uint256) -> ApiResult<LikeInfo>;

    fn contract(&self, script_hash: &Uint160) -> ApiResult<DeployCodeInfo>;

    /// Decode, admit, and relay a hex-encoded transaction. Returns its hash.
    fn send_raw_transaction(&self, data: &str) -> ApiResult<Uint256>;
}
