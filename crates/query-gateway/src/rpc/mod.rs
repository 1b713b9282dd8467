//! Query handlers, grouped by the part of the ledger they read.

pub mod asset;
pub mod chain;
pub mod contract;
pub mod forum;
pub mod submit;

pub use asset::AssetRpc;
pub use chain::ChainRpc;
pub use contract::ContractRpc;
pub use forum::ForumRpc;
pub use submit::{is_admitted, SubmissionGate, ADMITTED_TYPES};

use std::sync::Arc;

use serde::Serialize;
use shared_types::{to_wire, Fixed64, StoreError, Uint160, Uint256};

use crate::domain::codec::encode_raw;
use crate::domain::config::GatewayConfig;
use crate::domain::views::{
    ArticleInfo, AssetInfo, AssetUtxos, BlockInfo, BlockTransactions, DeployCodeInfo, LikeInfo,
    LockedInfo, Rendered, TransactionInfo, UserInfo, UtxoInfo,
};
use crate::domain::Username;
use crate::ports::{LedgerReader, PeerStatus, QueryApi, TransactionRelay};
use crate::{ApiError, ApiResult};

/// All query handlers
pub struct RpcHandlers {
    pub chain: ChainRpc,
    pub asset: AssetRpc,
    pub forum: ForumRpc,
    pub contract: ContractRpc,
    pub submit: SubmissionGate,
}

impl RpcHandlers {
    /// Create all handlers over one ledger reader
    pub fn new(
        config: &GatewayConfig,
        ledger: Arc<dyn LedgerReader>,
        relay: Arc<dyn TransactionRelay>,
        peers: Arc<dyn PeerStatus>,
    ) -> Self {
        Self {
            chain: ChainRpc::new(Arc::clone(&ledger), peers),
            asset: AssetRpc::new(Arc::clone(&ledger)),
            forum: ForumRpc::new(Arc::clone(&ledger)),
            contract: ContractRpc::new(ledger),
            submit: SubmissionGate::new(relay, config.limits.max_transaction_size),
        }
    }
}

impl QueryApi for RpcHandlers {
    fn connection_count(&self) -> ApiResult<u32> {
        self.chain.connection_count()
    }

    fn block_height(&self) -> ApiResult<u32> {
        self.chain.block_height()
    }

    fn block_hash(&self, height: u32) -> ApiResult<String> {
        self.chain.block_hash(height)
    }

    fn total_issued(&self, asset_id: &Uint256) -> ApiResult<Fixed64> {
        self.asset.total_issued(asset_id)
    }

    fn block_by_hash(&self, hash: &Uint256, raw: bool) -> ApiResult<Rendered<BlockInfo>> {
        self.chain.block_by_hash(hash, raw)
    }

    fn block_by_height(&self, height: u32, raw: bool) -> ApiResult<Rendered<BlockInfo>> {
        self.chain.block_by_height(height, raw)
    }

    fn block_txs_by_height(&self, height: u32) -> ApiResult<BlockTransactions> {
        self.chain.block_txs_by_height(height)
    }

    fn asset_by_hash(&self, asset_id: &Uint256, raw: bool) -> ApiResult<Rendered<AssetInfo>> {
        self.asset.asset_by_hash(asset_id, raw)
    }

    fn balance_by_addr(&self, owner: &Uint160) -> ApiResult<Fixed64> {
        self.asset.balance_by_addr(owner)
    }

    fn balance_by_asset(&self, owner: &Uint160, asset_id: &str) -> ApiResult<Fixed64> {
        self.asset.balance_by_asset(owner, asset_id)
    }

    fn locked_assets(&self, owner: &Uint160, asset_id: &Uint256) -> ApiResult<Vec<LockedInfo>> {
        self.asset.locked_assets(owner, asset_id)
    }

    fn unspents(&self, owner: &Uint160) -> ApiResult<Vec<AssetUtxos>> {
        self.asset.unspents(owner)
    }

    fn unspent_outputs(&self, owner: &Uint160, asset_id: &Uint256) -> ApiResult<Vec<UtxoInfo>> {
        self.asset.unspent_outputs(owner, asset_id)
    }

    fn transaction_by_hash(
        &self,
        hash: &Uint256,
        raw: bool,
    ) -> ApiResult<Rendered<TransactionInfo>> {
        self.chain.transaction_by_hash(hash, raw)
    }

    fn user_info(&self, username: &Username) -> ApiResult<UserInfo> {
        self.forum.user_info(username)
    }

    fn user_articles(&self, username: &Username) -> ApiResult<Vec<ArticleInfo>> {
        self.forum.user_articles(username)
    }

    fn like_info(&self, post_hash: &Uint256) -> ApiResult<LikeInfo> {
        self.forum.like_info(post_hash)
    }

    fn contract(&self, script_hash: &Uint160) -> ApiResult<DeployCodeInfo> {
        self.contract.contract(script_hash)
    }

    fn send_raw_transaction(&self, data: &str) -> ApiResult<Uint256> {
        self.submit.submit(data)
    }
}

/// Plain hex of the entity's wire bytes in raw mode, otherwise its view.
pub(crate) fn render<T, V>(
    entity: &T,
    raw: bool,
    view: impl FnOnce(&T) -> V,
) -> ApiResult<Rendered<V>>
where
    T: Serialize,
{
    if raw {
        let bytes = to_wire(entity).map_err(|e| ApiError::internal(e.to_string()))?;
        Ok(Rendered::Raw(encode_raw(&bytes)))
    } else {
        Ok(Rendered::Structured(view(entity)))
    }
}

/// A collection lookup: a miss is an empty collection.
pub(crate) fn collection<T: Default>(result: Result<T, StoreError>) -> ApiResult<T> {
    match result {
        Ok(items) => Ok(items),
        Err(e) if e.is_not_found() => Ok(T::default()),
        Err(e) => Err(ApiError::internal(e.to_string())),
    }
}
