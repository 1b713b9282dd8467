//! Action dispatch: action name + parameter record in, envelope out.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::config::{ChainConfig, ForumConfig};
use crate::domain::envelope::{QueryResult, ResponseEnvelope};
use crate::domain::methods::get_method_info;
use crate::domain::requests::{ParamRecord, QueryRequest};
use crate::domain::{ApiError, ApiResult};
use crate::middleware::{GatewayMetrics, RequestTimer};
use crate::ports::QueryApi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub metrics: Arc<GatewayMetrics>,
    pub chain: ChainConfig,
}

/// Routes actions to the query API and wraps every outcome in an envelope.
pub struct Dispatcher {
    api: Arc<dyn QueryApi>,
    forum: ForumConfig,
    metrics: Arc<GatewayMetrics>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn QueryApi>, forum: ForumConfig, metrics: Arc<GatewayMetrics>) -> Self {
        Self { api, forum, metrics }
    }

    /// Run one action. Never fails: errors are carried in the envelope.
    #[instrument(skip(self, params))]
    pub fn dispatch(&self, action: &str, params: &ParamRecord) -> ResponseEnvelope {
        let Some(info) = get_method_info(action) else {
            self.metrics.record_unknown_action();
            debug!("unknown action");
            return ResponseEnvelope::failure(action, &ApiError::invalid_method(action));
        };

        let timer = RequestTimer::new(Arc::clone(&self.metrics), info.is_write);
        let outcome = QueryRequest::parse(info.method, params, &self.forum)
            .and_then(|request| route_method(self.api.as_ref(), request));
        timer.finish(outcome.is_ok());

        match outcome {
            Ok((result, userid)) => {
                ResponseEnvelope::success(info.name, result).with_userid(userid)
            }
            Err(err) => {
                debug!(code = err.code, reason = %err.message, "action failed");
                ResponseEnvelope::failure(info.name, &err)
            }
        }
    }
}

/// Execute a validated request. The second value is the caller token to
/// echo, set only for accepted submissions.
pub fn route_method(
    api: &dyn QueryApi,
    request: QueryRequest,
) -> ApiResult<(QueryResult, Option<String>)> {
    let result = match request {
        QueryRequest::ConnectionCount => QueryResult::ConnectionCount(api.connection_count()?),
        QueryRequest::BlockHeight => QueryResult::BlockHeight(api.block_height()?),
        QueryRequest::BlockHash { height } => QueryResult::BlockHash(api.block_hash(height)?),
        QueryRequest::TotalIssued { asset_id } => {
            QueryResult::TotalIssued(api.total_issued(&asset_id)?)
        }
        QueryRequest::BlockByHash { hash, raw } => {
            QueryResult::Block(Box::new(api.block_by_hash(&hash, raw)?))
        }
        QueryRequest::BlockByHeight { height, raw } => {
            QueryResult::Block(Box::new(api.block_by_height(height, raw)?))
        }
        QueryRequest::BlockTxsByHeight { height } => {
            QueryResult::BlockTransactions(api.block_txs_by_height(height)?)
        }
        QueryRequest::AssetByHash { hash, raw } => {
            QueryResult::Asset(api.asset_by_hash(&hash, raw)?)
        }
        QueryRequest::BalanceByAddr { owner } => QueryResult::Balance(api.balance_by_addr(&owner)?),
        QueryRequest::BalanceByAsset { owner, asset_id } => {
            QueryResult::Balance(api.balance_by_asset(&owner, &asset_id)?)
        }
        QueryRequest::LockedAsset { owner, asset_id } => {
            QueryResult::LockedAssets(api.locked_assets(&owner, &asset_id)?)
        }
        QueryRequest::Unspends { owner } => QueryResult::Unspents(api.unspents(&owner)?),
        QueryRequest::UnspendOutput { owner, asset_id } => {
            QueryResult::UnspentOutputs(api.unspent_outputs(&owner, &asset_id)?)
        }
        QueryRequest::TransactionByHash { hash, raw } => {
            QueryResult::Transaction(Box::new(api.transaction_by_hash(&hash, raw)?))
        }
        QueryRequest::UserInfo { username } => QueryResult::UserInfo(api.user_info(&username)?),
        QueryRequest::UserArticleInfo { username } => {
            QueryResult::UserArticles(api.user_articles(&username)?)
        }
        QueryRequest::LikeInfo { post_hash } => QueryResult::LikeInfo(api.like_info(&post_hash)?),
        QueryRequest::Contract { script_hash } => {
            QueryResult::Contract(Box::new(api.contract(&script_hash)?))
        }
        QueryRequest::SendRawTransaction { data, userid } => {
            let hash = api.send_raw_transaction(&data)?;
            let userid = userid.filter(|id| !id.is_empty());
            return Ok((QueryResult::Submitted(hash.to_string()), userid));
        }
    };
    Ok((result, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryLedger, RecordingRelay, StaticPeers};
    use crate::domain::{codes, GatewayConfig};
    use crate::rpc::RpcHandlers;
    use shared_types::{to_wire, Block, BlockHeader, Payload, Transaction};
    use std::sync::atomic::Ordering;

    fn dispatcher(ledger: Arc<InMemoryLedger>, relay: Arc<RecordingRelay>) -> Dispatcher {
        let config = GatewayConfig::default();
        let handlers = RpcHandlers::new(&config, ledger, relay, Arc::new(StaticPeers::new(1)));
        Dispatcher::new(
            Arc::new(handlers),
            config.forum,
            Arc::new(GatewayMetrics::new()),
        )
    }

    #[test]
    fn test_unknown_action() {
        let d = dispatcher(
            Arc::new(InMemoryLedger::new()),
            Arc::new(RecordingRelay::accepting()),
        );
        let envelope = d.dispatch("getstateupdate", &ParamRecord::new());
        assert_eq!(envelope.error, codes::INVALID_METHOD);
        assert_eq!(envelope.action, "getstateupdate");
        assert_eq!(envelope.result, QueryResult::Empty);
        assert_eq!(d.metrics.unknown_actions.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_action_name_normalised() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.insert_block(Block {
            header: BlockHeader {
                height: 0,
                ..Default::default()
            },
            transactions: vec![],
        });
        let d = dispatcher(ledger, Arc::new(RecordingRelay::accepting()));
        let envelope = d.dispatch("GetBlockHeight", &ParamRecord::new());
        assert!(envelope.is_success());
        assert_eq!(envelope.action, "getblockheight");
        assert_eq!(envelope.result, QueryResult::BlockHeight(0));
    }

    #[test]
    fn test_validation_failure_never_reaches_ledger() {
        let d = dispatcher(
            Arc::new(InMemoryLedger::new()),
            Arc::new(RecordingRelay::accepting()),
        );
        let envelope = d.dispatch("getblockhash", &ParamRecord::new().with("Height", "abc"));
        assert_eq!(envelope.error, codes::INVALID_PARAMS);
        assert_eq!(d.metrics.requests_error.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_userid_echoed_only_on_acceptance() {
        let tx = Transaction::new(Payload::TransferAsset);
        let data = hex::encode(to_wire(&tx).unwrap());

        let d = dispatcher(
            Arc::new(InMemoryLedger::new()),
            Arc::new(RecordingRelay::accepting()),
        );
        let params = ParamRecord::new().with("Data", data.clone()).with("Userid", "req-9");
        let accepted = d.dispatch("sendrawtransaction", &params);
        assert!(accepted.is_success());
        assert_eq!(accepted.userid.as_deref(), Some("req-9"));
        assert_eq!(accepted.result, QueryResult::Submitted(tx.hash().to_string()));

        let empty_id = d.dispatch(
            "sendrawtransaction",
            &ParamRecord::new().with("Data", data.clone()).with("Userid", ""),
        );
        assert_eq!(empty_id.userid, None);

        let rejecting = dispatcher(
            Arc::new(InMemoryLedger::new()),
            Arc::new(RecordingRelay::rejecting(codes::relay::ERR_XMIT_FAIL)),
        );
        let rejected = rejecting.dispatch("sendrawtransaction", &params);
        assert_eq!(rejected.error, codes::relay::ERR_XMIT_FAIL);
        assert_eq!(rejected.userid, None);
        assert_eq!(
            rejecting.metrics.submissions_rejected.load(Ordering::Relaxed),
            1
        );
    }
}
