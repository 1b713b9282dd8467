//! In-memory ledger used by tests and the dev binary.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use shared_types::{
    to_wire, ArticleRecord, Asset, Block, ContractState, Fixed64, Like, LikeRecord, LockedAsset,
    StoreError, TokenInfo, TokenKind, Transaction, Uint160, Uint256, UnspentOutput, UserRecord,
    WireError,
};

use crate::ports::LedgerReader;

#[derive(Default)]
struct LedgerState {
    heights: BTreeMap<u32, Uint256>,
    blocks: HashMap<Uint256, Block>,
    transactions: HashMap<Uint256, Transaction>,
    assets: HashMap<Uint256, (Asset, Fixed64)>,
    unspents: Vec<UnspentOutput>,
    locked: Vec<LockedAsset>,
    users: HashMap<String, UserRecord>,
    tokens: HashMap<(String, TokenKind), TokenInfo>,
    articles: HashMap<String, Vec<ArticleRecord>>,
    likes: HashMap<Uint256, Vec<Like>>,
    contracts: HashMap<Uint160, Vec<u8>>,
}

/// Ledger state held behind a single lock. Every read takes its own guard,
/// so two reads may straddle a write.
#[derive(Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a block and index its transactions.
    pub fn insert_block(&self, block: Block) {
        let hash = block.hash();
        let mut state = self.state.write();
        state.heights.insert(block.height(), hash);
        for tx in &block.transactions {
            state.transactions.insert(tx.hash(), tx.clone());
        }
        state.blocks.insert(hash, block);
    }

    pub fn insert_asset(&self, asset_id: Uint256, asset: Asset, issued: Fixed64) {
        self.state.write().assets.insert(asset_id, (asset, issued));
    }

    pub fn add_unspent(&self, utxo: UnspentOutput) {
        self.state.write().unspents.push(utxo);
    }

    pub fn add_locked(&self, locked: LockedAsset) {
        self.state.write().locked.push(locked);
    }

    pub fn upsert_user(&self, user: UserRecord) {
        self.state.write().users.insert(user.username.clone(), user);
    }

    pub fn set_token(&self, username: &str, kind: TokenKind, number: Fixed64) {
        self.state
            .write()
            .tokens
            .insert((username.to_string(), kind), TokenInfo { number });
    }

    pub fn add_article(&self, username: &str, article: ArticleRecord) {
        self.state
            .write()
            .articles
            .entry(username.to_string())
            .or_default()
            .push(article);
    }

    pub fn add_like(&self, post_hash: Uint256, like: Like) {
        self.state.write().likes.entry(post_hash).or_default().push(like);
    }

    /// Persist a contract under the hash of its code.
    pub fn insert_contract(&self, contract: &ContractState) -> Result<Uint160, WireError> {
        let script_hash = contract.code.code_hash();
        let bytes = to_wire(contract)?;
        self.insert_contract_bytes(script_hash, bytes);
        Ok(script_hash)
    }

    pub fn insert_contract_bytes(&self, script_hash: Uint160, bytes: Vec<u8>) {
        self.state.write().contracts.insert(script_hash, bytes);
    }
}

impl LedgerReader for InMemoryLedger {
    fn block_height(&self) -> u32 {
        self.state
            .read()
            .heights
            .last_key_value()
            .map(|(height, _)| *height)
            .unwrap_or(0)
    }

    fn block_hash_at(&self, height: u32) -> Result<Uint256, StoreError> {
        self.state
            .read()
            .heights
            .get(&height)
            .copied()
            .ok_or_else(|| StoreError::not_found(format!("block at height {}", height)))
    }

    fn block_by_hash(&self, hash: &Uint256) -> Result<Block, StoreError> {
        self.state
            .read()
            .blocks
            .get(hash)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("block {}", hash)))
    }

    fn transaction_by_hash(&self, hash: &Uint256) -> Result<Transaction, StoreError> {
        self.state
            .read()
            .transactions
            .get(hash)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("transaction {}", hash)))
    }

    fn asset_by_hash(&self, asset_id: &Uint256) -> Result<Asset, StoreError> {
        self.state
            .read()
            .assets
            .get(asset_id)
            .map(|(asset, _)| asset.clone())
            .ok_or_else(|| StoreError::not_found(format!("asset {}", asset_id)))
    }

    fn total_issued(&self, asset_id: &Uint256) -> Result<Fixed64, StoreError> {
        self.state
            .read()
            .assets
            .get(asset_id)
            .map(|(_, issued)| *issued)
            .ok_or_else(|| StoreError::not_found(format!("asset {}", asset_id)))
    }

    fn unspents_by_owner(
        &self,
        owner: &Uint160,
    ) -> Result<BTreeMap<Uint256, Vec<UnspentOutput>>, StoreError> {
        let state = self.state.read();
        let mut groups: BTreeMap<Uint256, Vec<UnspentOutput>> = BTreeMap::new();
        for utxo in state.unspents.iter().filter(|u| u.owner == *owner) {
            groups.entry(utxo.asset_id).or_default().push(utxo.clone());
        }
        if groups.is_empty() {
            return Err(StoreError::not_found(format!("unspents of {}", owner)));
        }
        Ok(groups)
    }

    fn unspents_by_owner_and_asset(
        &self,
        owner: &Uint160,
        asset_id: &Uint256,
    ) -> Result<Vec<UnspentOutput>, StoreError> {
        let utxos: Vec<_> = self
            .state
            .read()
            .unspents
            .iter()
            .filter(|u| u.owner == *owner && u.asset_id == *asset_id)
            .cloned()
            .collect();
        if utxos.is_empty() {
            return Err(StoreError::not_found(format!("unspents of {}", owner)));
        }
        Ok(utxos)
    }

    fn locked_assets(
        &self,
        owner: &Uint160,
        asset_id: &Uint256,
    ) -> Result<Vec<LockedAsset>, StoreError> {
        let locked: Vec<_> = self
            .state
            .read()
            .locked
            .iter()
            .filter(|l| l.owner == *owner && l.asset_id == *asset_id)
            .cloned()
            .collect();
        if locked.is_empty() {
            return Err(StoreError::not_found(format!("locked assets of {}", owner)));
        }
        Ok(locked)
    }

    fn user_record(&self, username: &str) -> Result<UserRecord, StoreError> {
        self.state
            .read()
            .users
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("user {}", username)))
    }

    fn token_counter(&self, username: &str, kind: TokenKind) -> Result<TokenInfo, StoreError> {
        self.state
            .read()
            .tokens
            .get(&(username.to_string(), kind))
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("{:?} token of {}", kind, username)))
    }

    fn articles_by_user(&self, username: &str) -> Result<Vec<ArticleRecord>, StoreError> {
        let state = self.state.read();
        if !state.users.contains_key(username) {
            return Err(StoreError::not_found(format!("user {}", username)));
        }
        Ok(state.articles.get(username).cloned().unwrap_or_default())
    }

    fn likes_on_article(&self, post_hash: &Uint256) -> Result<LikeRecord, StoreError> {
        self.state
            .read()
            .likes
            .get(post_hash)
            .map(|likes| LikeRecord {
                post_hash: *post_hash,
                likes: likes.clone(),
            })
            .ok_or_else(|| StoreError::not_found(format!("likes on {}", post_hash)))
    }

    fn contract_state(&self, script_hash: &Uint160) -> Result<Vec<u8>, StoreError> {
        self.state
            .read()
            .contracts
            .get(script_hash)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("contract {}", script_hash)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{BlockHeader, Payload};

    fn block_at(height: u32) -> Block {
        Block {
            header: BlockHeader {
                height,
                ..Default::default()
            },
            transactions: vec![Transaction::new(Payload::BookKeeping {
                nonce: u64::from(height),
            })],
        }
    }

    #[test]
    fn test_height_tracks_highest_block() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.block_height(), 0);
        ledger.insert_block(block_at(0));
        ledger.insert_block(block_at(2));
        ledger.insert_block(block_at(1));
        assert_eq!(ledger.block_height(), 2);
        assert_eq!(ledger.block_hash_at(1).unwrap(), block_at(1).hash());
    }

    #[test]
    fn test_transactions_indexed_with_block() {
        let ledger = InMemoryLedger::new();
        let block = block_at(5);
        let tx_hash = block.transactions[0].hash();
        ledger.insert_block(block);
        assert!(ledger.transaction_by_hash(&tx_hash).is_ok());
        assert!(ledger
            .transaction_by_hash(&Uint256([1; 32]))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_articles_need_registered_user() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.articles_by_user("dave").unwrap_err().is_not_found());
        ledger.upsert_user(UserRecord {
            username: "dave".into(),
            user_program_hash: Uint160::ZERO,
            reputation: Fixed64::ZERO,
        });
        assert!(ledger.articles_by_user("dave").unwrap().is_empty());
    }
}
