use std::future::Future;
use std::time::Duration;

use fleamarket_core::{
    CodeStoreError, CredentialHasherError, GoodsRepositoryError, SessionError,
    UserRepositoryError,
};
use thiserror::Error;

/// A store, repository or other collaborator could not serve the request.
/// Safe for the caller to retry.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("{0}")]
    Unavailable(String),
    #[error("No answer within {0:?}")]
    Timeout(Duration),
}

#[cfg(test)]
impl PartialEq for InfraError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Unavailable(_), Self::Unavailable(_)) | (Self::Timeout(_), Self::Timeout(_))
        )
    }
}

impl From<CodeStoreError> for InfraError {
    fn from(error: CodeStoreError) -> Self {
        Self::Unavailable(error.to_string())
    }
}

impl From<CredentialHasherError> for InfraError {
    fn from(error: CredentialHasherError) -> Self {
        Self::Unavailable(error.to_string())
    }
}

impl From<SessionError> for InfraError {
    fn from(error: SessionError) -> Self {
        Self::Unavailable(error.to_string())
    }
}

/// Only for repository outcomes the calling workflow does not expect.
impl From<UserRepositoryError> for InfraError {
    fn from(error: UserRepositoryError) -> Self {
        Self::Unavailable(error.to_string())
    }
}

impl From<GoodsRepositoryError> for InfraError {
    fn from(error: GoodsRepositoryError) -> Self {
        Self::Unavailable(error.to_string())
    }
}

/// Why a submitted code was refused. The caller has to request a new code.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    #[error("Verification code expired or not issued")]
    ExpiredOrMissing,
    #[error("Verification code does not match")]
    Mismatch,
}

/// Bounds a collaborator call by `limit`, if one was set.
pub(crate) async fn within<F>(limit: Option<Duration>, operation: F) -> Result<F::Output, InfraError>
where
    F: Future,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| InfraError::Timeout(limit)),
        None => Ok(operation.await),
    }
}
