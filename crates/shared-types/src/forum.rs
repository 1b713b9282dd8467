//! # Forum Records
//!
//! Per-user and per-article state maintained by the forum extension as
//! RegisterUser/PostArticle/ReplyArticle/LikeArticle/Withdrawal
//! transactions confirm.

use serde::{Deserialize, Serialize};

use crate::primitives::{Fixed64, Uint160, Uint256};

/// A registered forum user. The username maps to exactly one script hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub user_program_hash: Uint160,
    pub reputation: Fixed64,
}

/// Which token counter to read for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Tokens ever credited to the user.
    Total,
    /// Tokens the user has withdrawn to a script hash.
    Withdrawn,
}

/// A user's token counter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    pub number: Fixed64,
}

/// Whether an article opens a thread or answers one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Post,
    Reply,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Post => "post",
            ContentType::Reply => "reply",
        }
    }
}

/// An article authored by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Digest of the off-chain content.
    pub content_hash: Uint256,
    /// Transaction that posted the parent article; zero for a top-level post.
    pub parent_txn_hash: Uint256,
    pub content_type: ContentType,
}

impl ArticleRecord {
    pub fn parent(&self) -> Option<Uint256> {
        (!self.parent_txn_hash.is_zero()).then_some(self.parent_txn_hash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LikeType {
    Like,
    Dislike,
}

impl LikeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeType::Like => "like",
            LikeType::Dislike => "dislike",
        }
    }
}

/// One user's reaction to an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub liker: String,
    pub like_type: LikeType,
}

/// All reactions recorded against one article transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRecord {
    pub post_hash: Uint256,
    pub likes: Vec<Like>,
}
