//! Asset and value queries: asset metadata, issuance, balances, unspent
//! outputs, and locked-asset schedules.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared_types::{Fixed64, Uint160, Uint256, UnspentOutput};
use tracing::{debug, instrument, warn};

use super::{collection, render};
use crate::domain::codec::encode_uint256;
use crate::domain::views::{AssetInfo, AssetUtxos, LockedInfo, Rendered, UtxoInfo};
use crate::ports::LedgerReader;
use crate::{ApiError, ApiResult};

/// Asset RPC methods handler
pub struct AssetRpc {
    ledger: Arc<dyn LedgerReader>,
}

impl AssetRpc {
    pub fn new(ledger: Arc<dyn LedgerReader>) -> Self {
        Self { ledger }
    }

    #[instrument(skip(self))]
    pub fn asset_by_hash(&self, asset_id: &Uint256, raw: bool) -> ApiResult<Rendered<AssetInfo>> {
        let asset = self
            .ledger
            .asset_by_hash(asset_id)
            .map_err(|e| ApiError::from_lookup(e, || ApiError::unknown_asset(asset_id)))?;
        render(&asset, raw, |a| AssetInfo::from(a))
    }

    #[instrument(skip(self))]
    pub fn total_issued(&self, asset_id: &Uint256) -> ApiResult<Fixed64> {
        self.ledger
            .total_issued(asset_id)
            .map_err(|e| ApiError::from_lookup(e, || ApiError::unknown_asset(asset_id)))
    }

    /// getbalancebyaddr - sum of every unspent output the owner holds
    #[instrument(skip(self))]
    pub fn balance_by_addr(&self, owner: &Uint160) -> ApiResult<Fixed64> {
        let groups = self.owned_unspents(owner)?;
        sum_values(groups.values().flatten())
    }

    /// getbalancebyasset - sum over the groups whose display-encoded asset
    /// id equals `asset_id`
    #[instrument(skip(self))]
    pub fn balance_by_asset(&self, owner: &Uint160, asset_id: &str) -> ApiResult<Fixed64> {
        let groups = self.owned_unspents(owner)?;
        sum_values(
            groups
                .iter()
                .filter(|(id, _)| encode_uint256(id) == asset_id)
                .flat_map(|(_, utxos)| utxos),
        )
    }

    #[instrument(skip(self))]
    pub fn locked_assets(&self, owner: &Uint160, asset_id: &Uint256) -> ApiResult<Vec<LockedInfo>> {
        let locked = collection(self.ledger.locked_assets(owner, asset_id))?;
        Ok(locked.iter().map(LockedInfo::from).collect())
    }

    /// getunspends - unspent outputs grouped by asset, ordered by asset id
    #[instrument(skip(self))]
    pub fn unspents(&self, owner: &Uint160) -> ApiResult<Vec<AssetUtxos>> {
        let groups = self.owned_unspents(owner)?;
        let mut results = Vec::with_capacity(groups.len());
        for (asset_id, utxos) in &groups {
            // an owned output always references a registered asset
            let asset = self.ledger.asset_by_hash(asset_id).map_err(|e| {
                warn!(asset = %asset_id, error = %e, "unspent output references unreadable asset");
                ApiError::internal(format!("asset {} unreadable: {}", asset_id, e))
            })?;
            results.push(AssetUtxos {
                asset_id: encode_uint256(asset_id),
                asset_name: asset.name,
                utxo: utxos.iter().map(UtxoInfo::from).collect(),
            });
        }
        debug!(assets = results.len(), "grouped unspent outputs");
        Ok(results)
    }

    #[instrument(skip(self))]
    pub fn unspent_outputs(&self, owner: &Uint160, asset_id: &Uint256) -> ApiResult<Vec<UtxoInfo>> {
        let utxos = collection(self.ledger.unspents_by_owner_and_asset(owner, asset_id))?;
        Ok(utxos.iter().map(UtxoInfo::from).collect())
    }

    fn owned_unspents(&self, owner: &Uint160) -> ApiResult<BTreeMap<Uint256, Vec<UnspentOutput>>> {
        collection(self.ledger.unspents_by_owner(owner))
    }
}

fn sum_values<'a>(utxos: impl IntoIterator<Item = &'a UnspentOutput>) -> ApiResult<Fixed64> {
    utxos.into_iter().try_fold(Fixed64::ZERO, |acc, utxo| {
        acc.checked_add(utxo.value)
            .ok_or_else(|| ApiError::internal("balance overflows 64-bit amount"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::domain::codes;
    use shared_types::{Asset, LockedAsset};

    const OWNER: Uint160 = Uint160([7; 20]);
    const GOLD: Uint256 = Uint256([1; 32]);
    const SILVER: Uint256 = Uint256([2; 32]);

    fn utxo(asset_id: Uint256, tag: u8, value: i64) -> UnspentOutput {
        UnspentOutput {
            owner: OWNER,
            asset_id,
            txid: Uint256([tag; 32]),
            index: 0,
            value: Fixed64(value),
        }
    }

    fn setup() -> (AssetRpc, Arc<InMemoryLedger>) {
        let ledger = Arc::new(InMemoryLedger::new());
        for (id, name) in [(GOLD, "gold"), (SILVER, "silver")] {
            ledger.insert_asset(
                id,
                Asset {
                    name: name.into(),
                    ..Default::default()
                },
                Fixed64::from_units(1000),
            );
        }
        ledger.add_unspent(utxo(GOLD, 10, 150_000_000));
        ledger.add_unspent(utxo(GOLD, 11, 50_000_000));
        ledger.add_unspent(utxo(SILVER, 12, 1));
        (AssetRpc::new(ledger.clone()), ledger)
    }

    #[test]
    fn test_balances() {
        let (rpc, _) = setup();
        assert_eq!(rpc.balance_by_addr(&OWNER).unwrap(), Fixed64(200_000_001));
        assert_eq!(
            rpc.balance_by_asset(&OWNER, &GOLD.to_string()).unwrap(),
            Fixed64::from_units(2)
        );
        assert_eq!(
            rpc.balance_by_asset(&OWNER, "not-an-asset").unwrap(),
            Fixed64::ZERO
        );
    }

    #[test]
    fn test_unknown_owner_is_empty() {
        let (rpc, _) = setup();
        let stranger = Uint160([9; 20]);
        assert_eq!(rpc.balance_by_addr(&stranger).unwrap(), Fixed64::ZERO);
        assert!(rpc.unspents(&stranger).unwrap().is_empty());
        assert!(rpc.unspent_outputs(&stranger, &GOLD).unwrap().is_empty());
        assert!(rpc.locked_assets(&stranger, &GOLD).unwrap().is_empty());
    }

    #[test]
    fn test_balance_overflow_is_internal() {
        let (rpc, ledger) = setup();
        ledger.add_unspent(utxo(SILVER, 13, i64::MAX));
        let err = rpc.balance_by_addr(&OWNER).unwrap_err();
        assert_eq!(err.code, codes::INTERNAL_ERROR);
    }

    #[test]
    fn test_unspents_grouped_in_asset_order() {
        let (rpc, _) = setup();
        let groups = rpc.unspents(&OWNER).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].asset_name, "gold");
        assert_eq!(groups[0].utxo.len(), 2);
        assert_eq!(groups[1].asset_name, "silver");
        assert_eq!(groups[1].utxo[0].value, "0.00000001");
    }

    #[test]
    fn test_unspents_with_missing_asset_is_internal() {
        let (rpc, ledger) = setup();
        ledger.add_unspent(utxo(Uint256([3; 32]), 14, 5));
        assert_eq!(rpc.unspents(&OWNER).unwrap_err().code, codes::INTERNAL_ERROR);
    }

    #[test]
    fn test_asset_lookups() {
        let (rpc, _) = setup();
        assert_eq!(rpc.total_issued(&GOLD).unwrap(), Fixed64::from_units(1000));
        assert_eq!(
            rpc.total_issued(&Uint256([3; 32])).unwrap_err().code,
            codes::UNKNOWN_ASSET
        );
        assert_eq!(
            rpc.asset_by_hash(&Uint256([3; 32]), false).unwrap_err().code,
            codes::UNKNOWN_ASSET
        );
        assert!(matches!(rpc.asset_by_hash(&GOLD, true).unwrap(), Rendered::Raw(_)));
    }

    #[test]
    fn test_locked_schedule() {
        let (rpc, ledger) = setup();
        ledger.add_locked(LockedAsset {
            owner: OWNER,
            asset_id: GOLD,
            lock: 100,
            unlock: 200,
            amount: Fixed64::from_units(5),
        });
        let locked = rpc.locked_assets(&OWNER, &GOLD).unwrap();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].unlock, 200);
        assert_eq!(locked[0].amount, "5");
    }
}
