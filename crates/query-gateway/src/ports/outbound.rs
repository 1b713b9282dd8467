//! Outbound ports for the query gateway.
//!
//! The gateway reads the ledger through [`LedgerReader`], hands accepted
//! transactions to [`TransactionRelay`], and asks [`PeerStatus`] for the
//! connection count. All three are synchronous; the HTTP adapter moves
//! calls onto blocking threads.

use std::collections::BTreeMap;

use shared_types::{
    ArticleRecord, Asset, Block, Fixed64, LikeRecord, LockedAsset, StoreError, TokenInfo,
    TokenKind, Transaction, Uint160, Uint256, UnspentOutput, UserRecord,
};

/// Read-only view of ledger state.
///
/// Each method reads one snapshot; nothing ties two calls to the same one.
/// A miss is reported as [`StoreError::NotFound`].
pub trait LedgerReader: Send + Sync {
    /// Height of the current tip.
    fn block_height(&self) -> u32;

    fn block_hash_at(&self, height: u32) -> Result<Uint256, StoreError>;

    fn block_by_hash(&self, hash: &Uint256) -> Result<Block, StoreError>;

    fn transaction_by_hash(&self, hash: &Uint256) -> Result<Transaction, StoreError>;

    fn asset_by_hash(&self, asset_id: &Uint256) -> Result<Asset, StoreError>;

    fn total_issued(&self, asset_id: &Uint256) -> Result<Fixed64, StoreError>;

    /// Every unspent output of an owner, grouped by asset id.
    fn unspents_by_owner(
        &self,
        owner: &Uint160,
    ) -> Result<BTreeMap<Uint256, Vec<UnspentOutput>>, StoreError>;

    fn unspents_by_owner_and_asset(
        &self,
        owner: &Uint160,
        asset_id: &Uint256,
    ) -> Result<Vec<UnspentOutput>, StoreError>;

    fn locked_assets(
        &self,
        owner: &Uint160,
        asset_id: &Uint256,
    ) -> Result<Vec<LockedAsset>, StoreError>;

    fn user_record(&self, username: &str) -> Result<UserRecord, StoreError>;

    fn token_counter(&self, username: &str, kind: TokenKind) -> Result<TokenInfo, StoreError>;

    /// Articles authored by a user, in posting order.
    fn articles_by_user(&self, username: &str) -> Result<Vec<ArticleRecord>, StoreError>;

    fn likes_on_article(&self, post_hash: &Uint256) -> Result<LikeRecord, StoreError>;

    /// Contract state bytes as persisted, still in wire encoding.
    fn contract_state(&self, script_hash: &Uint160) -> Result<Vec<u8>, StoreError>;
}

/// Verifies a transaction and forwards it to peers.
///
/// Returns 0 on acceptance, otherwise one of the relay codes in
/// [`crate::domain::codes::relay`].
pub trait TransactionRelay: Send + Sync {
    fn verify_and_send(&self, tx: &Transaction) -> i64;
}

/// Peer connectivity.
pub trait PeerStatus: Send + Sync {
    fn connection_count(&self) -> u32;
}
