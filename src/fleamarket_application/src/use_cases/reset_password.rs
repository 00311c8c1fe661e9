use std::time::Duration;

use fleamarket_core::{
    CodePurpose, CodeStore, CredentialHasher, MailAddress, Notifier, Password, UserRepository,
    UserRepositoryError, VerificationCode,
};

use crate::error::{InfraError, VerificationFailure, within};
use crate::verification::{ValidateCodeError, VerificationService};

/// Error types for reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Verification failed: {0}")]
    VerificationFailed(VerificationFailure),
    #[error("User not found")]
    UserNotFound,
    #[error("Infrastructure error: {0}")]
    Infra(#[from] InfraError),
}

impl From<ValidateCodeError> for ResetPasswordError {
    fn from(error: ValidateCodeError) -> Self {
        match error {
            ValidateCodeError::Failed(reason) => Self::VerificationFailed(reason),
            ValidateCodeError::Infra(e) => Self::Infra(e),
        }
    }
}

impl From<UserRepositoryError> for ResetPasswordError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => Self::UserNotFound,
            other => Self::Infra(other.into()),
        }
    }
}

/// Reset password use case - replaces the credential of a user who proved
/// mailbox ownership with a "reset" code
pub struct ResetPasswordUseCase<'a, C, N, U, H> {
    verification: &'a VerificationService<C, N>,
    user_repository: &'a U,
    hasher: &'a H,
    timeout: Option<Duration>,
}

impl<'a, C, N, U, H> ResetPasswordUseCase<'a, C, N, U, H>
where
    C: CodeStore,
    N: Notifier,
    U: UserRepository,
    H: CredentialHasher,
{
    pub fn new(
        verification: &'a VerificationService<C, N>,
        user_repository: &'a U,
        hasher: &'a H,
    ) -> Self {
        Self {
            verification,
            user_repository,
            hasher,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the reset password use case
    ///
    /// # Returns
    /// Ok(()) as the only acknowledgement; no profile data is returned
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip(self, code, new_password))]
    pub async fn execute(
        &self,
        mail_address: MailAddress,
        code: VerificationCode,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        self.verification
            .validate_code(&mail_address, CodePurpose::Reset, &code)
            .await?;

        let user = within(
            self.timeout,
            self.user_repository.find_by_mail_address(&mail_address),
        )
        .await??;

        let password = self
            .hasher
            .hash(new_password)
            .await
            .map_err(InfraError::from)?;

        within(
            self.timeout,
            self.user_repository.update_credential(user.id(), password),
        )
        .await??;

        Ok(())
    }
}
