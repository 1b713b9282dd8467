//! Forum queries: user standing, authored articles, article reactions.

use std::sync::Arc;

use shared_types::{TokenKind, Uint256};
use tracing::{debug, instrument};

use crate::domain::codec::encode_uint160;
use crate::domain::views::{ArticleInfo, LikeInfo, UserInfo};
use crate::domain::Username;
use crate::ports::LedgerReader;
use crate::{ApiError, ApiResult};

/// Forum RPC methods handler
pub struct ForumRpc {
    ledger: Arc<dyn LedgerReader>,
}

impl ForumRpc {
    pub fn new(ledger: Arc<dyn LedgerReader>) -> Self {
        Self { ledger }
    }

    /// getuserinfo - user record plus both token counters.
    ///
    /// The three reads are independent; a counter update landing between
    /// them is visible in the later reads only.
    #[instrument(skip(self, username), fields(username = %username.as_str()))]
    pub fn user_info(&self, username: &Username) -> ApiResult<UserInfo> {
        let name = username.as_str();
        let user = self
            .ledger
            .user_record(name)
            .map_err(|e| ApiError::from_lookup(e, || ApiError::invalid_user(name)))?;
        let total = self.token(name, TokenKind::Total)?;
        let withdrawn = self.token(name, TokenKind::Withdrawn)?;

        Ok(UserInfo {
            program_hash: encode_uint160(&user.user_program_hash),
            reputation: user.reputation.to_string(),
            total_token: total,
            withdrawn_token: withdrawn,
        })
    }

    #[instrument(skip(self, username), fields(username = %username.as_str()))]
    pub fn user_articles(&self, username: &Username) -> ApiResult<Vec<ArticleInfo>> {
        let name = username.as_str();
        let articles = self
            .ledger
            .articles_by_user(name)
            .map_err(|e| ApiError::from_lookup(e, || ApiError::invalid_user(name)))?;
        debug!(count = articles.len(), "user articles");
        Ok(articles.iter().map(ArticleInfo::from).collect())
    }

    #[instrument(skip(self))]
    pub fn like_info(&self, post_hash: &Uint256) -> ApiResult<LikeInfo> {
        let record = self.ledger.likes_on_article(post_hash).map_err(|e| {
            ApiError::from_lookup(e, || {
                ApiError::invalid_transaction(format!("no likes recorded for {}", post_hash))
            })
        })?;
        Ok(LikeInfo::from(&record))
    }

    fn token(&self, name: &str, kind: TokenKind) -> ApiResult<String> {
        self.ledger
            .token_counter(name, kind)
            .map(|info| info.number.to_string())
            .map_err(|e| {
                ApiError::invalid_asset(format!("{:?} token counter of {}: {}", kind, name, e))
            })
    }
}
