use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    good::Good,
    mail_address::MailAddress,
    password::HashedPassword,
    user::{NewUser, User, UserId},
    verification_code::{CodeKey, VerificationCode},
};

// CodeStore port trait and errors
#[derive(Debug, Error)]
pub enum CodeStoreError {
    #[error("Code store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of [`CodeStore::take_if_matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatch {
    /// The stored code equalled the submitted one and has been removed.
    Consumed,
    /// A live code exists but differs; it is left in place.
    Mismatch,
    /// Nothing live is stored under the key.
    Missing,
}

/// Key-value store with a per-key TTL backing one-time codes.
///
/// `put` overwrites any previous code for the key and restarts its TTL.
/// `get` yields `None` for keys that were never written or have expired.
/// `take_if_matches` compares and removes in one atomic step, so a code
/// is consumed by at most one caller.
#[async_trait]
pub trait CodeStore: Send + Sync {
    async fn put(
        &self,
        key: &CodeKey,
        code: VerificationCode,
        ttl: Duration,
    ) -> Result<(), CodeStoreError>;
    async fn get(&self, key: &CodeKey) -> Result<Option<VerificationCode>, CodeStoreError>;
    async fn delete(&self, key: &CodeKey) -> Result<(), CodeStoreError>;
    async fn take_if_matches(
        &self,
        key: &CodeKey,
        submitted: &VerificationCode,
    ) -> Result<CodeMatch, CodeStoreError>;
}

// UserRepository port trait and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    MailAddress,
    Name,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MailAddress => f.write_str("mail address"),
            Self::Name => f.write_str("name"),
        }
    }
}

#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("A user with this {0} already exists")]
    UniqueViolation(UniqueField),
    #[error("User not found")]
    NotFound,
    #[error("User repository unavailable: {0}")]
    Unavailable(String),
}

impl PartialEq for UserRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UniqueViolation(a), Self::UniqueViolation(b)) => a == b,
            (Self::NotFound, Self::NotFound) => true,
            (Self::Unavailable(_), Self::Unavailable(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_mail_address(
        &self,
        mail_address: &MailAddress,
    ) -> Result<User, UserRepositoryError>;
    async fn find_by_id(&self, id: UserId) -> Result<User, UserRepositoryError>;
    /// Fails with `UniqueViolation` when the mail address or name is taken.
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError>;
    async fn update_credential(
        &self,
        id: UserId,
        password: HashedPassword,
    ) -> Result<(), UserRepositoryError>;
}

// GoodsRepository port trait and errors
#[derive(Debug, Error)]
pub enum GoodsRepositoryError {
    #[error("User not found")]
    UserNotFound,
    #[error("Goods repository unavailable: {0}")]
    Unavailable(String),
}

/// Loads a user's good relations fully materialized.
#[async_trait]
pub trait GoodsRepository: Send + Sync {
    /// Every good the user has listed, bought or not. Unknown sellers have none.
    async fn find_goods_by_seller(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Good>, GoodsRepositoryError>;
    async fn load_favorites(&self, user_id: UserId) -> Result<Vec<Good>, GoodsRepositoryError>;
    async fn load_bought(&self, user_id: UserId) -> Result<Vec<Good>, GoodsRepositoryError>;
}
