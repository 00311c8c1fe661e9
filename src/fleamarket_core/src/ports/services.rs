use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    mail_address::MailAddress,
    password::{HashedPassword, Password},
    session::{Principal, SessionToken},
    user::User,
    verification_code::{CodePurpose, VerificationCode},
};

#[derive(Debug, Error)]
#[error("Failed to deliver verification code: {0}")]
pub struct DeliveryError(pub String);

/// Port trait for delivering verification codes
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_code(
        &self,
        recipient: &MailAddress,
        purpose: CodePurpose,
        code: &VerificationCode,
    ) -> Result<(), DeliveryError>;
}

#[derive(Debug, Error)]
pub enum CredentialHasherError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
}

#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<HashedPassword, CredentialHasherError>;
    /// `false` for a wrong candidate as well as for an unreadable stored hash.
    async fn verify(&self, candidate: Password, hash: &HashedPassword) -> bool;
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid session token")]
    InvalidToken,
    #[error("Failed to issue session token: {0}")]
    IssueFailed(String),
}

/// Issues session tokens and resolves them back to a principal.
pub trait SessionIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<SessionToken, SessionError>;
    fn authenticate(&self, token: &str) -> Result<Principal, SessionError>;
}
