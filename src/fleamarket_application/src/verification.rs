use std::time::Duration;

use fleamarket_core::{
    CodeKey, CodeMatch, CodePurpose, CodeStore, DeliveryError, MailAddress, Notifier,
    VerificationCode,
};
use thiserror::Error;

use crate::error::{InfraError, VerificationFailure, within};

/// How long an issued code stays valid unless configured otherwise.
pub const DEFAULT_CODE_TTL: Duration = Duration::from_secs(5 * 60);

/// Result of a successful issuance. The code is stored even when delivery
/// failed; `delivery_warning` tells the caller about it.
#[derive(Debug)]
pub struct IssuedCode {
    pub code: VerificationCode,
    pub delivery_warning: Option<DeliveryError>,
}

#[derive(Debug, Error)]
pub enum IssueCodeError {
    #[error("Failed to store verification code: {0}")]
    Infra(#[from] InfraError),
}

#[derive(Debug, Error)]
pub enum ValidateCodeError {
    #[error(transparent)]
    Failed(#[from] VerificationFailure),
    #[error("Failed to read verification code: {0}")]
    Infra(#[from] InfraError),
}

/// Issues one-time codes and checks submitted ones against the code store.
#[derive(Clone)]
pub struct VerificationService<C, N> {
    code_store: C,
    notifier: N,
    code_ttl: Duration,
    timeout: Option<Duration>,
}

impl<C, N> VerificationService<C, N>
where
    C: CodeStore,
    N: Notifier,
{
    pub fn new(code_store: C, notifier: N) -> Self {
        Self {
            code_store,
            notifier,
            code_ttl: DEFAULT_CODE_TTL,
            timeout: None,
        }
    }

    pub fn with_code_ttl(mut self, code_ttl: Duration) -> Self {
        self.code_ttl = code_ttl;
        self
    }

    /// Bounds every code store and notifier call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn code_ttl(&self) -> Duration {
        self.code_ttl
    }

    /// Generate a fresh code for (`mail_address`, `purpose`), store it and
    /// send it to the address.
    ///
    /// A previously issued code for the same pair is overwritten. Storage
    /// failure aborts issuance; delivery failure does not.
    #[tracing::instrument(name = "VerificationService::issue_code", skip(self))]
    pub async fn issue_code(
        &self,
        mail_address: MailAddress,
        purpose: CodePurpose,
    ) -> Result<IssuedCode, IssueCodeError> {
        let key = CodeKey::new(mail_address, purpose);
        let code = VerificationCode::generate();

        within(
            self.timeout,
            self.code_store.put(&key, code.clone(), self.code_ttl),
        )
        .await?
        .map_err(InfraError::from)?;

        let delivery = within(
            self.timeout,
            self.notifier.send_code(&key.mail_address, purpose, &code),
        )
        .await;
        let delivery_warning = match delivery {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e),
            Err(e) => Some(DeliveryError(e.to_string())),
        };

        Ok(IssuedCode {
            code,
            delivery_warning,
        })
    }

    /// Check `submitted` against the stored code. The store is consulted on
    /// every call, and a matching code is consumed in the same atomic step so
    /// it cannot be replayed, even by a concurrent request.
    #[tracing::instrument(name = "VerificationService::validate_code", skip(self, submitted))]
    pub async fn validate_code(
        &self,
        mail_address: &MailAddress,
        purpose: CodePurpose,
        submitted: &VerificationCode,
    ) -> Result<(), ValidateCodeError> {
        let key = CodeKey::new(mail_address.clone(), purpose);

        let outcome = within(self.timeout, self.code_store.take_if_matches(&key, submitted))
            .await?
            .map_err(InfraError::from)?;

        match outcome {
            CodeMatch::Consumed => Ok(()),
            CodeMatch::Mismatch => Err(VerificationFailure::Mismatch.into()),
            CodeMatch::Missing => Err(VerificationFailure::ExpiredOrMissing.into()),
        }
    }
}
