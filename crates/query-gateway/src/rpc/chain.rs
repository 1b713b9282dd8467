//! Chain queries: tip height, blocks, transactions, peer count.

use std::sync::Arc;

use shared_types::{Block, Uint256};
use tracing::{debug, instrument};

use super::render;
use crate::domain::codec::encode_uint256;
use crate::domain::views::{BlockInfo, BlockTransactions, Rendered, TransactionInfo};
use crate::ports::{LedgerReader, PeerStatus};
use crate::{ApiError, ApiResult};

/// Chain RPC methods handler
pub struct ChainRpc {
    ledger: Arc<dyn LedgerReader>,
    peers: Arc<dyn PeerStatus>,
}

impl ChainRpc {
    pub fn new(ledger: Arc<dyn LedgerReader>, peers: Arc<dyn PeerStatus>) -> Self {
        Self { ledger, peers }
    }

    #[instrument(skip(self))]
    pub fn connection_count(&self) -> ApiResult<u32> {
        Ok(self.peers.connection_count())
    }

    #[instrument(skip(self))]
    pub fn block_height(&self) -> ApiResult<u32> {
        Ok(self.ledger.block_height())
    }

    /// getblockhash - display hash of the block at `height`
    #[instrument(skip(self))]
    pub fn block_hash(&self, height: u32) -> ApiResult<String> {
        self.hash_at(height).map(|hash| encode_uint256(&hash))
    }

    #[instrument(skip(self))]
    pub fn block_by_hash(&self, hash: &Uint256, raw: bool) -> ApiResult<Rendered<BlockInfo>> {
        let block = self.fetch_block(hash)?;
        render(&block, raw, |b| BlockInfo::from(b))
    }

    #[instrument(skip(self))]
    pub fn block_by_height(&self, height: u32, raw: bool) -> ApiResult<Rendered<BlockInfo>> {
        let hash = self.hash_at(height)?;
        let block = self.fetch_block(&hash)?;
        render(&block, raw, |b| BlockInfo::from(b))
    }

    /// getblocktxsbyheight - block hash, height, and its transaction hashes
    #[instrument(skip(self))]
    pub fn block_txs_by_height(&self, height: u32) -> ApiResult<BlockTransactions> {
        let hash = self.hash_at(height)?;
        let block = self.fetch_block(&hash)?;
        debug!(height, txs = block.transactions.len(), "listing block transactions");
        Ok(BlockTransactions::from(&block))
    }

    #[instrument(skip(self))]
    pub fn transaction_by_hash(
        &self,
        hash: &Uint256,
        raw: bool,
    ) -> ApiResult<Rendered<TransactionInfo>> {
        let tx = self
            .ledger
            .transaction_by_hash(hash)
            .map_err(|e| ApiError::from_lookup(e, || ApiError::unknown_transaction(hash)))?;
        render(&tx, raw, |t| TransactionInfo::from(t))
    }

    fn hash_at(&self, height: u32) -> ApiResult<Uint256> {
        self.ledger
            .block_hash_at(height)
            .map_err(|e| ApiError::from_lookup(e, || ApiError::unknown_block(height)))
    }

    fn fetch_block(&self, hash: &Uint256) -> ApiResult<Block> {
        self.ledger
            .block_by_hash(hash)
            .map_err(|e| ApiError::from_lookup(e, || ApiError::unknown_block(hash)))
    }
}
